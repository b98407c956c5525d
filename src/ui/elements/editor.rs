// src/ui/elements/editor.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::parts::categories::CategoryMapper;
use crate::parts::events::{
    RequestLoadBom, RequestMarkImported, RequestRescanImages, RequestUnmarkImported,
};
use crate::parts::images::PartImageCache;
use crate::parts::imported::ImportedNodeRegistry;
use crate::parts::resources::BomRegistry;
use crate::parts::systems::logic::filters::FilterManager;
use crate::settings::ImportOptions;
use crate::ui::{
    elements::{
        image_panel::{show_image_panel, show_image_popup},
        metadata_panel::show_metadata_panel,
        popups::{show_category_popup, show_import_options_popup},
        search_bar::show_search_bar,
        top_panel::show_top_panel,
        tree_panel::show_tree_panel,
    },
    state::EditorWindowState,
    UiFeedbackState,
};

#[allow(clippy::too_many_arguments)]
pub fn bom_editor_ui<'w>(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    registry: Res<BomRegistry>,
    images: Res<PartImageCache>,
    imported: Res<ImportedNodeRegistry>,
    mut mapper: ResMut<CategoryMapper>,
    mut filters: ResMut<FilterManager>,
    mut options: ResMut<ImportOptions>,
    ui_feedback: Res<UiFeedbackState>,
    mut load_writer: EventWriter<RequestLoadBom>,
    mut rescan_writer: EventWriter<RequestRescanImages>,
    mut mark_writer: EventWriter<'w, RequestMarkImported>,
    mut unmark_writer: EventWriter<'w, RequestUnmarkImported>,
) {
    let ctx = contexts.ctx_mut();

    // Popups first so they sit above the panels.
    show_import_options_popup(ctx, &mut state, &mut options);
    show_category_popup(ctx, &mut state, &mut mapper);
    show_image_popup(ctx, &mut state, &images);

    egui::TopBottomPanel::top("bom_top_panel").show(ctx, |ui| {
        show_top_panel(
            ui,
            &mut state,
            &registry,
            &options,
            &mut load_writer,
            &mut rescan_writer,
        );
        show_search_bar(ui, &mut state, &registry);
        if !ui_feedback.last_message.is_empty() {
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
    });

    egui::SidePanel::right("bom_details_panel")
        .default_width(320.0)
        .show(ctx, |ui| {
            show_metadata_panel(ui, &state, &registry, &mapper, &imported);
            ui.separator();
            show_image_panel(ui, &mut state, &images);
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        show_tree_panel(
            ui,
            &mut state,
            &registry,
            &images,
            &imported,
            &mapper,
            &mut filters,
            &mut mark_writer,
            &mut unmark_writer,
        );
    });
}
