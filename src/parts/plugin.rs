// src/parts/plugin.rs
use bevy::prelude::*;

use super::categories::CategoryMapper;
use super::events::{
    BomLoadedEvent, BomOperationFeedback, RequestLoadBom, RequestMarkImported,
    RequestRescanImages, RequestSelectPart, RequestUnmarkImported,
};
use super::images::PartImageCache;
use super::imported::{self, ImportedNodeRegistry};
use super::resources::BomRegistry;
use super::systems;
use super::systems::logic::filters::FilterManager;

// System sets for ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum PartSystemSet {
    UserInput,      // Systems reacting directly to UI events
    ApplyChanges,   // Systems mutating registries and view state
    FileOperations, // Systems touching the filesystem
}

/// Plugin owning the part forest, category mapping, image cache and
/// imported-node bookkeeping.
pub struct PartsPlugin;

impl Plugin for PartsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                PartSystemSet::UserInput,
                PartSystemSet::ApplyChanges.after(PartSystemSet::UserInput),
                PartSystemSet::FileOperations.after(PartSystemSet::ApplyChanges),
            ),
        );

        // --- Resource Initialization ---
        app.init_resource::<BomRegistry>()
            .init_resource::<CategoryMapper>()
            .init_resource::<PartImageCache>()
            .init_resource::<ImportedNodeRegistry>()
            .init_resource::<FilterManager>();

        // --- Event Registration ---
        app.add_event::<RequestLoadBom>()
            .add_event::<BomLoadedEvent>()
            .add_event::<BomOperationFeedback>()
            .add_event::<RequestSelectPart>()
            .add_event::<RequestRescanImages>()
            .add_event::<RequestMarkImported>()
            .add_event::<RequestUnmarkImported>();

        // --- Startup Systems ---
        app.add_systems(
            Startup,
            (
                imported::initialize_from_world,
                systems::io::startup::load_startup_mapping,
                apply_deferred,
                systems::io::startup::queue_startup_bom_load,
            )
                .chain(),
        );

        // --- Update Systems (Organized into Sets) ---
        app.add_systems(
            Update,
            (
                systems::io::load::handle_load_bom_request,
                apply_deferred,
                systems::logic::imported::handle_mark_imported_request,
                systems::logic::imported::handle_unmark_imported_request,
                apply_deferred,
                systems::logic::selection::handle_select_part_request,
            )
                .chain()
                .in_set(PartSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            (systems::io::load::handle_rescan_images_request,)
                .in_set(PartSystemSet::FileOperations),
        );

        info!("PartsPlugin initialized.");
    }
}
