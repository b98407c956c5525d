// src/parts/resources.rs
use bevy::prelude::*;
use std::path::{Path, PathBuf};

use super::tree::PartForest;

/// The currently loaded BOM. Replaced wholesale on every load; nothing
/// mutates the forest after `replace`.
#[derive(Resource, Default, Debug)]
pub struct BomRegistry {
    forest: PartForest,
    source_path: Option<PathBuf>,
}

impl BomRegistry {
    pub fn replace(&mut self, forest: PartForest, source_path: PathBuf) {
        self.forest = forest;
        self.source_path = Some(source_path);
    }

    pub fn clear(&mut self) {
        self.forest = PartForest::default();
        self.source_path = None;
    }

    pub fn forest(&self) -> &PartForest {
        &self.forest
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}
