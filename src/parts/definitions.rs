// src/parts/definitions.rs
use std::fmt;

/// Index of an item inside `PartForest::items`.
pub type PartId = usize;

/// Marker used in the `NextPart` and `Level` columns for "no value".
/// Spreadsheet exports render missing cells as "nan".
pub fn is_blank_marker(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("nan")
}

/// A single row of the bill of materials, plus its resolved children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartTreeItem {
    /// Unique part number. Key for all lookups.
    pub part_no: String,
    /// Part number of the parent row. Blank or "nan" marks a root candidate.
    pub next_part: String,
    /// Hierarchy depth as declared by the export.
    pub level: i32,
    pub part_type: String,
    pub serial_no: String,
    pub part_rev: String,
    pub part_status: String,
    pub latest: String,
    pub nomenclature: String,
    pub instance_id_total: String,
    pub qty: String,
    /// Children attached by `PartForest::build_tree_structure`.
    pub children: Vec<PartId>,
}

impl PartTreeItem {
    pub fn new(part_no: impl Into<String>, next_part: impl Into<String>, level: i32) -> Self {
        Self {
            part_no: part_no.into(),
            next_part: next_part.into(),
            level,
            ..Default::default()
        }
    }

    /// True when the row declares no parent.
    pub fn is_root_candidate(&self) -> bool {
        is_blank_marker(&self.next_part)
    }
}

impl fmt::Display for PartTreeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {})", self.part_no, self.level)
    }
}

/// Resolved column indices for a BOM export.
///
/// Headers are matched by name first; the fixed fallback indices match the
/// standard export column order when a header is missing or renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BomColumns {
    pub serial_no: usize,
    pub level: usize,
    pub part_type: usize,
    pub part_no: usize,
    pub part_rev: usize,
    pub part_status: usize,
    pub latest: usize,
    pub nomenclature: usize,
    pub instance_id_total: usize,
    pub qty: usize,
    pub next_part: usize,
}

impl Default for BomColumns {
    fn default() -> Self {
        Self {
            serial_no: 0,
            level: 1,
            part_type: 2,
            part_no: 3,
            part_rev: 4,
            part_status: 5,
            latest: 6,
            nomenclature: 7,
            instance_id_total: 11,
            qty: 12,
            next_part: 13,
        }
    }
}

impl BomColumns {
    /// Locates each column in the header row, falling back to the default
    /// index when no header matches.
    pub fn resolve(header: &[String]) -> Self {
        let find = |names: &[&str], fallback: usize| -> usize {
            header
                .iter()
                .position(|h| {
                    let h = h.trim();
                    names.iter().any(|n| h.eq_ignore_ascii_case(n))
                })
                .unwrap_or(fallback)
        };
        let defaults = Self::default();
        Self {
            serial_no: find(&["S/N", "SN"], defaults.serial_no),
            level: find(&["Level"], defaults.level),
            part_type: find(&["Type"], defaults.part_type),
            part_no: find(&["PartNo", "Part No"], defaults.part_no),
            part_rev: find(&["PartRev", "Part Rev"], defaults.part_rev),
            part_status: find(&["PartStatus", "Part Status"], defaults.part_status),
            latest: find(&["Latest"], defaults.latest),
            nomenclature: find(&["Nomenclature"], defaults.nomenclature),
            instance_id_total: find(
                &["InstanceID", "Instance ID", "Instance ID Total"],
                defaults.instance_id_total,
            ),
            qty: find(&["Qty"], defaults.qty),
            next_part: find(&["NextPart", "Next Part"], defaults.next_part),
        }
    }

    /// Largest index among the three columns every valid row must provide.
    pub fn min_row_len(&self) -> usize {
        self.part_no.max(self.next_part).max(self.level) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_columns_by_header_name() {
        let cols = BomColumns::resolve(&header(&[
            "PartNo", "NextPart", "Level", "Type", "Nomenclature",
        ]));
        assert_eq!(cols.part_no, 0);
        assert_eq!(cols.next_part, 1);
        assert_eq!(cols.level, 2);
        assert_eq!(cols.part_type, 3);
        assert_eq!(cols.nomenclature, 4);
        // Absent headers keep their fixed positions.
        assert_eq!(cols.qty, 12);
    }

    #[test]
    fn header_match_is_case_insensitive_and_accepts_spaced_variants() {
        let cols = BomColumns::resolve(&header(&["part no", "next part", "LEVEL"]));
        assert_eq!(cols.part_no, 0);
        assert_eq!(cols.next_part, 1);
        assert_eq!(cols.level, 2);
    }

    #[test]
    fn empty_header_falls_back_to_fixed_indices() {
        let cols = BomColumns::resolve(&[]);
        assert_eq!(cols, BomColumns::default());
        assert_eq!(cols.min_row_len(), 14);
    }

    #[test]
    fn blank_marker_accepts_nan_in_any_case() {
        assert!(is_blank_marker(""));
        assert!(is_blank_marker("nan"));
        assert!(is_blank_marker("NaN"));
        assert!(is_blank_marker("NAN"));
        assert!(!is_blank_marker("A100"));
    }
}
