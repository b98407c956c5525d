// src/parts/tree.rs
//! Flat BOM rows -> part hierarchy.
//!
//! Two passes: `create_and_group_items` turns rows into arena items and
//! groups them by level, `build_tree_structure` links each item at level
//! L+1 to the item named by its NextPart column, but only when that item
//! sits at level L. The forest is rebuilt wholesale on every load.

use bevy::log::{info, trace};
use std::collections::{BTreeMap, HashMap};

use super::definitions::{is_blank_marker, BomColumns, PartId, PartTreeItem};

#[derive(Debug, Clone, Default)]
pub struct PartForest {
    items: Vec<PartTreeItem>,
    part_no_to_item: HashMap<String, PartId>,
    level_to_items: BTreeMap<i32, Vec<PartId>>,
    roots: Vec<PartId>,
    max_level: i32,
}

impl PartForest {
    /// Builds a forest from raw CSV cells. `rows` must include the header
    /// row; data rows start at index 1.
    pub fn from_rows(rows: &[Vec<String>], columns: &BomColumns) -> Self {
        let mut forest = Self::default();
        let created = forest.create_and_group_items(&rows[1..], columns);
        forest.build_tree_structure();
        info!(
            "BOM tree built: {} items, {} roots, max level {}",
            created,
            forest.roots.len(),
            forest.max_level
        );
        for (level, ids) in &forest.level_to_items {
            trace!("level {}: {} items", level, ids.len());
        }
        forest
    }

    /// First pass: create one item per valid row and group by level.
    /// Rows with an empty part number or fewer cells than the key columns
    /// require are skipped. Returns the number of items created.
    fn create_and_group_items(&mut self, data_rows: &[Vec<String>], columns: &BomColumns) -> usize {
        let mut created = 0;
        let cell = |row: &[String], idx: usize| -> String {
            row.get(idx).map(|c| c.trim().to_string()).unwrap_or_default()
        };

        for row in data_rows {
            if row.len() < columns.min_row_len() {
                continue;
            }
            let part_no = cell(row, columns.part_no);
            if part_no.is_empty() {
                continue;
            }
            let next_part = cell(row, columns.next_part);

            let level_str = cell(row, columns.level);
            let level = if is_blank_marker(&level_str) {
                0
            } else {
                level_str.parse::<i32>().unwrap_or(0)
            };

            let mut item = PartTreeItem::new(part_no.clone(), next_part.clone(), level);
            item.part_type = cell(row, columns.part_type);
            item.serial_no = cell(row, columns.serial_no);
            item.part_rev = cell(row, columns.part_rev);
            item.part_status = cell(row, columns.part_status);
            item.latest = cell(row, columns.latest);
            item.nomenclature = cell(row, columns.nomenclature);
            item.instance_id_total = cell(row, columns.instance_id_total);
            item.qty = cell(row, columns.qty);

            let id: PartId = self.items.len();
            self.items.push(item);
            self.part_no_to_item.insert(part_no, id);
            self.level_to_items.entry(level).or_default().push(id);
            self.max_level = self.max_level.max(level);

            // Only level-0 rows without a parent become roots outright.
            if is_blank_marker(&next_part) && level == 0 {
                self.roots.push(id);
            }
            created += 1;
        }
        created
    }

    /// Second pass: attach each item to the parent named by NextPart,
    /// enforcing the adjacent-level contract (parent level == child
    /// level - 1). When no explicit roots were found, all level-0 items
    /// serve as roots.
    fn build_tree_structure(&mut self) {
        for current_level in 0..self.max_level {
            let Some(child_ids) = self.level_to_items.get(&(current_level + 1)).cloned() else {
                continue;
            };
            let mut connected = 0;
            for child_id in child_ids {
                let next_part = self.items[child_id].next_part.clone();
                if is_blank_marker(&next_part) {
                    continue;
                }
                if let Some(&parent_id) = self.part_no_to_item.get(&next_part) {
                    if self.items[parent_id].level == current_level {
                        self.items[parent_id].children.push(child_id);
                        connected += 1;
                    }
                }
            }
            trace!(
                "level {} -> {}: {} parent-child links",
                current_level,
                current_level + 1,
                connected
            );
        }

        if self.roots.is_empty() {
            if let Some(level_zero) = self.level_to_items.get(&0) {
                self.roots = level_zero.clone();
                info!(
                    "no explicit root candidates; using all {} level-0 items as roots",
                    self.roots.len()
                );
            }
        }
    }

    pub fn item(&self, id: PartId) -> &PartTreeItem {
        &self.items[id]
    }

    pub fn get(&self, part_no: &str) -> Option<PartId> {
        self.part_no_to_item.get(part_no).copied()
    }

    pub fn contains(&self, part_no: &str) -> bool {
        self.part_no_to_item.contains_key(part_no)
    }

    pub fn roots(&self) -> &[PartId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    pub fn items_at_level(&self, level: i32) -> &[PartId] {
        self.level_to_items
            .get(&level)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate all items in load order.
    pub fn iter(&self) -> impl Iterator<Item = (PartId, &PartTreeItem)> {
        self.items.iter().enumerate()
    }

    /// Parent lookup through the NextPart key.
    pub fn find_parent(&self, id: PartId) -> Option<PartId> {
        let item = &self.items[id];
        if item.is_root_candidate() {
            return None;
        }
        self.get(&item.next_part)
    }

    /// True when `descendant` sits anywhere below `ancestor` in the
    /// attached tree (direct or transitive child).
    pub fn is_descendant_of(&self, descendant: PartId, ancestor: PartId) -> bool {
        self.items[ancestor].children.iter().any(|&child| {
            child == descendant || self.is_descendant_of(descendant, child)
        })
    }

    /// Ancestors of `id`, nearest first. Follows the NextPart chain, so a
    /// cycle in the input terminates at the first repeated key.
    pub fn path_to_root(&self, id: PartId) -> Vec<PartId> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.find_parent(current) {
            if parent == current || path.contains(&parent) {
                break;
            }
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Field label/value pairs for the metadata panel, in display order.
    pub fn metadata_fields(item: &PartTreeItem) -> Vec<(&'static str, String)> {
        let safe = |s: &str| {
            if s.is_empty() {
                "N/A".to_string()
            } else {
                s.to_string()
            }
        };
        vec![
            ("S/N", safe(&item.serial_no)),
            ("Level", item.level.to_string()),
            ("Type", safe(&item.part_type)),
            ("Part No", safe(&item.part_no)),
            ("Part Rev", safe(&item.part_rev)),
            ("Part Status", safe(&item.part_status)),
            ("Latest", safe(&item.latest)),
            ("Nomenclature", safe(&item.nomenclature)),
            ("Instance ID Total", safe(&item.instance_id_total)),
            ("Qty", safe(&item.qty)),
            ("NextPart", safe(&item.next_part)),
        ]
    }

    /// The metadata block as a single text blob (one "Label: value" line
    /// per field).
    pub fn formatted_metadata(&self, id: PartId) -> String {
        Self::metadata_fields(self.item(id))
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    /// Header + rows in compact (PartNo, NextPart, Level, Type, Nomenclature) layout.
    fn forest_from(rows: &[Vec<String>]) -> PartForest {
        let mut all = vec![row(&["PartNo", "NextPart", "Level", "Type", "Nomenclature"])];
        all.extend_from_slice(rows);
        let columns = BomColumns::resolve(&all[0]);
        PartForest::from_rows(&all, &columns)
    }

    fn sample_rows() -> Vec<Vec<String>> {
        vec![
            row(&["A100", "", "0", "assembly", "airframe"]),
            row(&["B200", "A100", "1", "sub", "left wing"]),
            row(&["B201", "A100", "1", "sub", "right wing"]),
            row(&["C300", "B200", "2", "part", "aileron"]),
        ]
    }

    #[test]
    fn builds_adjacency_linked_tree() {
        let forest = forest_from(&sample_rows());
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.roots().len(), 1);

        let root = forest.get("A100").unwrap();
        assert_eq!(forest.item(root).children.len(), 2);

        let b200 = forest.get("B200").unwrap();
        let c300 = forest.get("C300").unwrap();
        assert_eq!(forest.item(b200).children, vec![c300]);
        assert!(forest.is_descendant_of(c300, root));
        assert!(!forest.is_descendant_of(root, c300));
    }

    #[test]
    fn nan_next_part_marks_root_case_insensitively() {
        let forest = forest_from(&[
            row(&["A100", "NaN", "0", "", ""]),
            row(&["A200", "nan", "0", "", ""]),
            row(&["B100", "A100", "1", "", ""]),
        ]);
        assert_eq!(forest.roots().len(), 2);
    }

    #[test]
    fn skip_level_attachment_is_rejected() {
        // C300 claims A100 as parent but sits two levels below it.
        let forest = forest_from(&[
            row(&["A100", "", "0", "", ""]),
            row(&["B200", "A100", "1", "", ""]),
            row(&["C300", "A100", "2", "", ""]),
        ]);
        let root = forest.get("A100").unwrap();
        let children = &forest.item(root).children;
        assert_eq!(children.len(), 1);
        assert_eq!(forest.item(children[0]).part_no, "B200");
    }

    #[test]
    fn falls_back_to_level_zero_roots() {
        // Level-0 rows that name a (dangling) parent are not root
        // candidates, so the fallback kicks in.
        let forest = forest_from(&[
            row(&["A100", "GHOST", "0", "", ""]),
            row(&["A200", "GHOST", "0", "", ""]),
        ]);
        assert_eq!(forest.roots().len(), 2);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let forest = forest_from(&[
            row(&["A100", "", "0", "", ""]),
            row(&["", "A100", "1", "", ""]), // empty part number
            row(&["B1"]),                    // too few cells
            row(&["B200", "A100", "1", "", ""]),
        ]);
        assert_eq!(forest.len(), 2);
        assert!(forest.contains("A100"));
        assert!(forest.contains("B200"));
    }

    #[test]
    fn blank_or_nan_level_parses_as_zero() {
        let forest = forest_from(&[
            row(&["A100", "", "nan", "", ""]),
            row(&["A200", "", "", "", ""]),
        ]);
        assert_eq!(forest.items_at_level(0).len(), 2);
        assert_eq!(forest.max_level(), 0);
    }

    #[test]
    fn rebuild_from_same_rows_is_identical() {
        let rows = sample_rows();
        let first = forest_from(&rows);
        let second = forest_from(&rows);
        assert_eq!(first.len(), second.len());
        assert_eq!(first.roots(), second.roots());
        for (id, item) in first.iter() {
            assert_eq!(item, second.item(id));
        }
    }

    #[test]
    fn path_to_root_follows_next_part_chain() {
        let forest = forest_from(&sample_rows());
        let c300 = forest.get("C300").unwrap();
        let path = forest.path_to_root(c300);
        let names: Vec<&str> = path.iter().map(|&id| forest.item(id).part_no.as_str()).collect();
        assert_eq!(names, vec!["B200", "A100"]);
    }

    #[test]
    fn formatted_metadata_substitutes_na_for_empty_fields() {
        let forest = forest_from(&sample_rows());
        let text = forest.formatted_metadata(forest.get("A100").unwrap());
        assert!(text.contains("Part No: A100"));
        assert!(text.contains("Level: 0"));
        assert!(text.contains("S/N: N/A"));
        assert!(text.contains("NextPart: N/A"));
    }
}
