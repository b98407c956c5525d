// src/ui/elements/top_panel.rs
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::parts::events::{RequestLoadBom, RequestRescanImages};
use crate::parts::resources::BomRegistry;
use crate::settings::ImportOptions;
use crate::ui::state::EditorWindowState;

/// Toolbar row: file open, image rescan, import options, expand and
/// collapse shortcuts, and a summary of the loaded file.
pub fn show_top_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    registry: &BomRegistry,
    options: &ImportOptions,
    load_writer: &mut EventWriter<RequestLoadBom>,
    rescan_writer: &mut EventWriter<RequestRescanImages>,
) {
    ui.horizontal(|ui| {
        if ui.button("Open BOM…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV files", &["csv"])
                .pick_file()
            {
                load_writer.write(RequestLoadBom { path });
            }
        }

        if ui.button("Rescan Images").clicked() {
            rescan_writer.write(RequestRescanImages);
        }

        if ui.button("Import Options…").clicked() {
            state.import_options_draft = options.clone();
            state.show_import_options_popup = true;
        }

        ui.separator();

        let forest = registry.forest();
        let has_tree = !forest.is_empty();
        if ui
            .add_enabled(has_tree, egui::Button::new("Expand All"))
            .clicked()
        {
            for (_, item) in forest.iter() {
                if !item.children.is_empty() {
                    state.expanded.insert(item.part_no.clone());
                }
            }
        }
        if ui
            .add_enabled(has_tree, egui::Button::new("Collapse All"))
            .clicked()
        {
            state.expanded.clear();
        }

        if let Some(path) = registry.source_path() {
            ui.separator();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.weak(format!(
                "{}  ({} parts, {} roots, max level {})",
                name,
                forest.len(),
                forest.roots().len(),
                forest.max_level()
            ));
        }
    });
}
