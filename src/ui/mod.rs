// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod elements;
pub mod state;
pub mod systems;

use elements::editor::bom_editor_ui;
use state::EditorWindowState;
use systems::handle_ui_feedback;

#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the standalone BOM viewer UI.
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .init_resource::<EditorWindowState>()
            .add_systems(Update, handle_ui_feedback)
            .add_systems(EguiContextPass, bom_editor_ui);

        info!("EditorUiPlugin initialized.");
    }
}
