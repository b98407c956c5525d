// src/ui/elements/popups/import_options_popup.rs
use bevy::prelude::warn;
use bevy_egui::egui;

use crate::settings::{self, ImportOptions, MaterialUpdatePolicy};
use crate::ui::state::EditorWindowState;

/// Modal editor for the import options. Edits go to a draft; Confirm
/// applies the draft and persists it to disk.
pub fn show_import_options_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    options: &mut ImportOptions,
) {
    if !state.show_import_options_popup {
        return;
    }

    let mut is_open = true;
    let mut close_requested = false;

    egui::Window::new("Import Options")
        .collapsible(false)
        .resizable(false)
        .open(&mut is_open)
        .show(ctx, |ui| {
            let draft = &mut state.import_options_draft;

            ui.checkbox(
                &mut draft.remove_transparent_meshes,
                "Remove transparent meshes",
            );
            ui.checkbox(
                &mut draft.cleanup_non_mesh_nodes,
                "Clean up non-mesh nodes",
            );
            ui.checkbox(
                &mut draft.select_node_after_import,
                "Select node after import",
            );

            ui.horizontal(|ui| {
                ui.label("Materials:");
                egui::ComboBox::from_id_salt("material_update_policy")
                    .selected_text(draft.material_update_policy.label())
                    .show_ui(ui, |ui| {
                        for policy in MaterialUpdatePolicy::ALL {
                            ui.selectable_value(
                                &mut draft.material_update_policy,
                                policy,
                                policy.label(),
                            );
                        }
                    });
            });

            ui.checkbox(
                &mut draft.dont_show_dialog_again,
                "Don't show this dialog again",
            );

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Confirm").clicked() {
                    *options = state.import_options_draft.clone();
                    if let Err(e) = settings::io::save_settings_to_file(options) {
                        warn!("Failed to persist import options: {}", e);
                    }
                    close_requested = true;
                }
                if ui.button("Cancel").clicked() {
                    close_requested = true;
                }
                if ui.button("Reset to Defaults").clicked() {
                    state.import_options_draft = ImportOptions::default();
                }
            });
        });

    if !is_open || close_requested {
        state.show_import_options_popup = false;
    }
}
