// src/ui/elements/popups/category_popup.rs
use bevy::prelude::{info, warn};
use bevy_egui::egui;

use crate::parts::categories::{CategoryMapper, PartCategory, SystemCategory};
use crate::ui::state::EditorWindowState;

/// Category assignment dialog for a single part, plus save/load of the
/// whole mapping file.
pub fn show_category_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    mapper: &mut CategoryMapper,
) {
    if !state.show_category_popup {
        return;
    }
    let Some(part_no) = state.category_popup_part.clone() else {
        state.show_category_popup = false;
        return;
    };

    let mut is_open = true;
    let mut close_requested = false;

    egui::Window::new("Edit Category")
        .collapsible(false)
        .resizable(false)
        .open(&mut is_open)
        .show(ctx, |ui| {
            ui.label(format!("Part: {}", part_no));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Main:");
                let previous_main = state.category_draft_main;
                egui::ComboBox::from_id_salt("category_main")
                    .selected_text(state.category_draft_main.as_str())
                    .show_ui(ui, |ui| {
                        for category in SystemCategory::ALL {
                            ui.selectable_value(
                                &mut state.category_draft_main,
                                category,
                                category.as_str(),
                            );
                        }
                    });
                if state.category_draft_main != previous_main {
                    state.category_draft_sub = 0;
                }
            });

            let subsystems = state.category_draft_main.subsystems();
            if !subsystems.is_empty() {
                ui.horizontal(|ui| {
                    ui.label("Sub:");
                    let main = state.category_draft_main;
                    egui::ComboBox::from_id_salt("category_sub")
                        .selected_text(main.subsystem_to_string(state.category_draft_sub))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut state.category_draft_sub, 0, "None");
                            for (code, name) in subsystems {
                                ui.selectable_value(
                                    &mut state.category_draft_sub,
                                    *code,
                                    *name,
                                );
                            }
                        });
                });
            }

            ui.horizontal(|ui| {
                ui.label("Notes:");
                ui.text_edit_singleline(&mut state.category_draft_notes);
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    mapper.set_category(
                        part_no.clone(),
                        PartCategory::new(
                            state.category_draft_main,
                            state.category_draft_sub,
                            state.category_draft_notes.clone(),
                        ),
                    );
                    close_requested = true;
                }
                if mapper.category_for(&part_no).is_some()
                    && ui.button("Remove Mapping").clicked()
                {
                    mapper.remove_mapping(&part_no);
                    close_requested = true;
                }
                if ui.button("Cancel").clicked() {
                    close_requested = true;
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save Mapping…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .save_file()
                    {
                        match mapper.save_mapping_file(&path) {
                            Ok(()) => info!("Saved category mapping to {}", path.display()),
                            Err(e) => warn!("Failed to save category mapping: {}", e),
                        }
                    }
                }
                if ui.button("Load Mapping…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                    {
                        match mapper.load_mapping_file(&path) {
                            Ok(count) => {
                                info!("Loaded {} category mappings", count);
                                // Refresh the draft for the open part.
                                if let Some(existing) = mapper.category_for(&part_no) {
                                    state.category_draft_main = existing.main;
                                    state.category_draft_sub = existing.sub;
                                    state.category_draft_notes = existing.notes.clone();
                                }
                            }
                            Err(e) => warn!("Failed to load category mapping: {}", e),
                        }
                    }
                }
                if mapper.has_unsaved_changes() {
                    ui.weak("unsaved changes");
                }
            });
        });

    if !is_open || close_requested {
        state.show_category_popup = false;
        state.category_popup_part = None;
    }
}
