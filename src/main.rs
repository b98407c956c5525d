// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use bevy_egui::EguiPlugin;

mod parts;
mod settings;
mod ui;

use parts::PartsPlugin;
use settings::ImportOptions;
use ui::EditorUiPlugin;

/// Command-line options, kept around as a resource so startup and
/// rescan systems can reach the configured directories.
#[derive(Parser, Resource, Debug, Clone)]
#[command(name = "bomview", about = "Level-based BOM tree viewer")]
pub struct ViewerCli {
    /// BOM CSV to load on startup.
    #[arg(long)]
    pub bom: Option<PathBuf>,

    /// Directory scanned for part images.
    #[arg(long, default_value = "images")]
    pub images: PathBuf,

    /// Directory holding import source files, matched by part number.
    #[arg(long)]
    pub import_dir: Option<PathBuf>,

    /// File extension of import source files.
    #[arg(long, default_value = "xml")]
    pub source_ext: String,

    /// Category mapping CSV to load on startup.
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

impl ViewerCli {
    pub fn image_dir(&self) -> PathBuf {
        self.images.clone()
    }
}

fn main() {
    let args = ViewerCli::parse();
    let import_options: ImportOptions =
        settings::io::load_settings_from_file().unwrap_or_default();

    App::new()
        .insert_resource(args)
        .insert_resource(import_options)
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "BOM Viewer".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(PartsPlugin)
        .add_plugins(EditorUiPlugin)
        .run();
}
