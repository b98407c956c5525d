pub mod io;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// What to do with materials when a part is re-imported.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialUpdatePolicy {
    #[default]
    AlwaysUpdate,
    KeepExisting,
    RecreateAll,
}

impl MaterialUpdatePolicy {
    pub const ALL: [MaterialUpdatePolicy; 3] = [
        MaterialUpdatePolicy::AlwaysUpdate,
        MaterialUpdatePolicy::KeepExisting,
        MaterialUpdatePolicy::RecreateAll,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialUpdatePolicy::AlwaysUpdate => "Always update",
            MaterialUpdatePolicy::KeepExisting => "Keep existing",
            MaterialUpdatePolicy::RecreateAll => "Recreate all",
        }
    }
}

/// User-facing import options, persisted as JSON between sessions.
#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportOptions {
    pub remove_transparent_meshes: bool,
    pub cleanup_non_mesh_nodes: bool,
    pub select_node_after_import: bool,
    pub material_update_policy: MaterialUpdatePolicy,
    /// Skips the options dialog before each import.
    pub dont_show_dialog_again: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            remove_transparent_meshes: true,
            cleanup_non_mesh_nodes: true,
            select_node_after_import: true,
            material_update_policy: MaterialUpdatePolicy::default(),
            dont_show_dialog_again: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_round_trip_through_json() {
        let options = ImportOptions {
            remove_transparent_meshes: false,
            material_update_policy: MaterialUpdatePolicy::RecreateAll,
            ..Default::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: ImportOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: ImportOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(back, ImportOptions::default());
    }
}
