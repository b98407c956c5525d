// src/parts/systems/logic/filters.rs
//! Toggleable display filters for the tree panel.
//!
//! Filters decide whether an item is shown at all; they never mutate
//! the forest. Stateful filters reset at the start of every traversal
//! via `begin_pass`, so display order decides which duplicate survives.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::parts::definitions::PartId;
use crate::parts::images::PartImageCache;
use crate::parts::tree::PartForest;

pub trait TreeItemFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Called once before each top-to-bottom traversal of the tree.
    fn begin_pass(&mut self) {}
    fn passes(&mut self, forest: &PartForest, images: &PartImageCache, id: PartId) -> bool;
}

/// Keeps only items that carry an image themselves or somewhere in
/// their subtree, so the branches above a pictured part stay visible.
pub struct ImageFilter;

impl TreeItemFilter for ImageFilter {
    fn name(&self) -> &'static str {
        "image"
    }

    fn description(&self) -> &'static str {
        "Show only items with an image in their subtree"
    }

    fn passes(&mut self, forest: &PartForest, images: &PartImageCache, id: PartId) -> bool {
        images.has_child_with_image(forest, id)
    }
}

/// Keeps the first occurrence of each part number and drops the rest.
pub struct DuplicateFilter {
    seen: HashSet<String>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self { seen: HashSet::new() }
    }
}

impl TreeItemFilter for DuplicateFilter {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn description(&self) -> &'static str {
        "Hide repeated occurrences of the same part number"
    }

    fn begin_pass(&mut self) {
        self.seen.clear();
    }

    fn passes(&mut self, forest: &PartForest, _images: &PartImageCache, id: PartId) -> bool {
        self.seen.insert(forest.item(id).part_no.clone())
    }
}

/// Active filters, applied in insertion order. An item must pass every
/// filter to be shown.
#[derive(Resource, Default)]
pub struct FilterManager {
    filters: Vec<Box<dyn TreeItemFilter>>,
}

impl FilterManager {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f.name() == name)
    }

    pub fn set_enabled(&mut self, filter: Box<dyn TreeItemFilter>, enabled: bool) {
        let name = filter.name();
        if enabled {
            if !self.is_enabled(name) {
                self.filters.push(filter);
            }
        } else {
            self.filters.retain(|f| f.name() != name);
        }
    }

    pub fn any_active(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn begin_pass(&mut self) {
        for filter in &mut self.filters {
            filter.begin_pass();
        }
    }

    pub fn passes_all(
        &mut self,
        forest: &PartForest,
        images: &PartImageCache,
        id: PartId,
    ) -> bool {
        self.filters
            .iter_mut()
            .all(|f| f.passes(forest, images, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::definitions::BomColumns;

    fn forest_with_duplicate() -> PartForest {
        let rows = vec![
            vec!["PartNo", "NextPart", "Level"],
            vec!["A100", "", "0"],
            vec!["B200", "A100", "1"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect::<Vec<Vec<String>>>();
        let columns = BomColumns::resolve(&rows[0]);
        PartForest::from_rows(&rows, &columns)
    }

    #[test]
    fn duplicate_filter_keeps_first_occurrence_and_resets() {
        let forest = forest_with_duplicate();
        let images = PartImageCache::default();
        let a = forest.get("A100").unwrap();

        let mut manager = FilterManager::default();
        manager.set_enabled(Box::new(DuplicateFilter::new()), true);

        manager.begin_pass();
        assert!(manager.passes_all(&forest, &images, a));
        assert!(!manager.passes_all(&forest, &images, a));

        // A new pass forgets everything seen before.
        manager.begin_pass();
        assert!(manager.passes_all(&forest, &images, a));
    }

    #[test]
    fn toggling_is_idempotent() {
        let mut manager = FilterManager::default();
        assert!(!manager.any_active());

        manager.set_enabled(Box::new(ImageFilter), true);
        manager.set_enabled(Box::new(ImageFilter), true);
        assert!(manager.is_enabled("image"));
        assert_eq!(manager.filters.len(), 1);

        manager.set_enabled(Box::new(ImageFilter), false);
        assert!(!manager.any_active());
    }

    #[test]
    fn image_filter_hides_bare_branches() {
        let forest = forest_with_duplicate();
        let images = PartImageCache::default();
        let mut manager = FilterManager::default();
        manager.set_enabled(Box::new(ImageFilter), true);
        manager.begin_pass();
        let a = forest.get("A100").unwrap();
        assert!(!manager.passes_all(&forest, &images, a));
    }
}
