// src/ui/elements/metadata_panel.rs
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::parts::categories::CategoryMapper;
use crate::parts::imported::ImportedNodeRegistry;
use crate::parts::resources::BomRegistry;
use crate::parts::tree::PartForest;
use crate::ui::state::EditorWindowState;

/// Details table for the selected part. Blank fields render as "N/A".
pub fn show_metadata_panel(
    ui: &mut egui::Ui,
    state: &EditorWindowState,
    registry: &BomRegistry,
    mapper: &CategoryMapper,
    imported: &ImportedNodeRegistry,
) {
    ui.heading("Part Details");
    ui.separator();

    let forest = registry.forest();
    let Some(id) = state
        .selected_part
        .as_deref()
        .and_then(|p| forest.get(p))
    else {
        ui.weak("No part selected.");
        return;
    };
    let item = forest.item(id);

    let mut rows: Vec<(String, String)> = PartForest::metadata_fields(item)
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect();

    match mapper.category_for(&item.part_no) {
        Some(category) => {
            rows.push(("Main Category".to_string(), category.main.as_str().to_string()));
            rows.push((
                "Sub Category".to_string(),
                category.main.subsystem_to_string(category.sub),
            ));
            if !category.notes.is_empty() {
                rows.push(("Category Notes".to_string(), category.notes.clone()));
            }
        }
        None => rows.push(("Main Category".to_string(), "Unassigned".to_string())),
    }
    rows.push((
        "Imported".to_string(),
        if imported.is_imported(&item.part_no) {
            "Yes".to_string()
        } else {
            "No".to_string()
        },
    ));

    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .body(|mut body| {
            for (label, value) in &rows {
                body.row(row_height, |mut row| {
                    row.col(|ui| {
                        ui.strong(label);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });

    ui.add_space(6.0);
    if ui.button("Copy Metadata").clicked() {
        ui.ctx().copy_text(forest.formatted_metadata(id));
    }
}
