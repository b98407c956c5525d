// src/parts/mod.rs

// --- Public Interface ---
pub mod categories;
pub mod definitions;
pub mod events;
pub mod images;
pub mod imported;
pub mod plugin;
pub mod resources;
pub mod tree;

// Internal implementation detail; the UI reaches in for search and
// filter helpers.
pub(crate) mod systems;

pub use definitions::{PartId, PartTreeItem};
pub use plugin::PartsPlugin;
pub use resources::BomRegistry;
pub use tree::PartForest;
