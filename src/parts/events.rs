// src/parts/events.rs
use bevy::prelude::Event;
use std::path::PathBuf;

/// Sent when the user picks a BOM CSV (or at startup for a CLI-supplied
/// path). Handled by `systems::io::handle_load_bom_request`.
#[derive(Event, Debug, Clone)]
pub struct RequestLoadBom {
    pub path: PathBuf,
}

/// Emitted after a BOM was parsed and the forest rebuilt.
#[derive(Event, Debug, Clone)]
pub struct BomLoadedEvent {
    pub path: PathBuf,
    pub node_count: usize,
    pub root_count: usize,
}

/// Outcome of a user-visible operation, rendered by the UI feedback line.
#[derive(Event, Debug, Clone)]
pub struct BomOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

/// Select a part in the tree (double-click, search hit, post-import).
#[derive(Event, Debug, Clone)]
pub struct RequestSelectPart {
    pub part_no: String,
}

/// Re-scan the image directory and rebuild the part-image cache.
#[derive(Event, Debug, Clone)]
pub struct RequestRescanImages;

/// Mark the part as imported: spawns a placeholder entity carrying the
/// imported marker and registers it.
#[derive(Event, Debug, Clone)]
pub struct RequestMarkImported {
    pub part_no: String,
}

/// Remove the imported marker for the part and despawn its placeholder.
#[derive(Event, Debug, Clone)]
pub struct RequestUnmarkImported {
    pub part_no: String,
}
