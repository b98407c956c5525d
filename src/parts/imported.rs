// src/parts/imported.rs
//! Bookkeeping for parts that have been imported into the scene.
//!
//! Each imported part is backed by a placeholder entity carrying
//! `ImportedNode` + `PartNoTag`; the registry is the part-number index
//! over those entities and can be rebuilt from the world at startup.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

/// Marker for entities that represent an imported part.
#[derive(Component, Debug)]
pub struct ImportedNode;

/// Part number carried by an imported-node entity.
#[derive(Component, Debug, Clone)]
pub struct PartNoTag(pub String);

#[derive(Debug, Clone)]
pub struct ImportedNodeRecord {
    pub entity: Entity,
    /// Source file resolved at import time, when one was found.
    pub source_file: Option<PathBuf>,
}

#[derive(Resource, Default, Debug)]
pub struct ImportedNodeRegistry {
    nodes: HashMap<String, ImportedNodeRecord>,
}

impl ImportedNodeRegistry {
    pub fn register(
        &mut self,
        part_no: impl Into<String>,
        entity: Entity,
        source_file: Option<PathBuf>,
    ) {
        let part_no = part_no.into();
        if self
            .nodes
            .insert(part_no.clone(), ImportedNodeRecord { entity, source_file })
            .is_some()
        {
            warn!("Re-registering imported node for part '{}'", part_no);
        }
    }

    pub fn is_imported(&self, part_no: &str) -> bool {
        self.nodes.contains_key(part_no)
    }

    pub fn get(&self, part_no: &str) -> Option<&ImportedNodeRecord> {
        self.nodes.get(part_no)
    }

    pub fn remove(&mut self, part_no: &str) -> Option<ImportedNodeRecord> {
        self.nodes.remove(part_no)
    }

    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ImportedNodeRecord)> {
        self.nodes.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Startup system: rebuild the registry from whatever tagged entities
/// already exist in the world.
pub fn initialize_from_world(
    mut registry: ResMut<ImportedNodeRegistry>,
    query: Query<(Entity, &PartNoTag), With<ImportedNode>>,
) {
    registry.clear();
    for (entity, tag) in query.iter() {
        registry.register(tag.0.clone(), entity, None);
    }
    if registry.count() > 0 {
        info!(
            "Imported-node registry initialized from world: {} nodes",
            registry.count()
        );
    }
}
