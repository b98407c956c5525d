// src/parts/categories.rs
//! Cockpit-system category taxonomy and the part -> category mapping.
//!
//! Mappings persist as a small CSV file
//! (`PartNo,MainCategory,SubCategory,Notes`) so they can be hand-edited
//! alongside the BOM export.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main system category of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SystemCategory {
    #[default]
    None,
    FlightControl,
    PowerManagement,
    EngineFuel,
    NavigationComm,
    WeaponsDefense,
    Lighting,
    Emergency,
    EnvironmentalControl,
    DisplayRecording,
    TestDiagnostics,
    Avionics,
}

impl SystemCategory {
    pub const ALL: [SystemCategory; 12] = [
        SystemCategory::None,
        SystemCategory::FlightControl,
        SystemCategory::PowerManagement,
        SystemCategory::EngineFuel,
        SystemCategory::NavigationComm,
        SystemCategory::WeaponsDefense,
        SystemCategory::Lighting,
        SystemCategory::Emergency,
        SystemCategory::EnvironmentalControl,
        SystemCategory::DisplayRecording,
        SystemCategory::TestDiagnostics,
        SystemCategory::Avionics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemCategory::None => "None",
            SystemCategory::FlightControl => "FlightControl",
            SystemCategory::PowerManagement => "PowerManagement",
            SystemCategory::EngineFuel => "EngineFuel",
            SystemCategory::NavigationComm => "NavigationComm",
            SystemCategory::WeaponsDefense => "WeaponsDefense",
            SystemCategory::Lighting => "Lighting",
            SystemCategory::Emergency => "Emergency",
            SystemCategory::EnvironmentalControl => "EnvironmentalControl",
            SystemCategory::DisplayRecording => "DisplayRecording",
            SystemCategory::TestDiagnostics => "TestDiagnostics",
            SystemCategory::Avionics => "Avionics",
        }
    }

    /// Case-insensitive parse; unknown strings map to `None`.
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(SystemCategory::None)
    }

    /// Named subsystems of this main category, as (code, name) pairs.
    /// Categories without a named breakdown use raw numeric codes.
    pub fn subsystems(&self) -> &'static [(u8, &'static str)] {
        match self {
            SystemCategory::FlightControl => &[
                (1, "FLCS"),
                (2, "ControlSurfaces"),
                (3, "TrimControl"),
                (4, "AutoPilot"),
                (5, "LandingGear"),
                (6, "SpeedBrake"),
                (7, "AirBrake"),
                (8, "StabilityAugmentation"),
            ],
            SystemCategory::Avionics => &[
                (1, "MFD"),
                (2, "HUD"),
                (3, "HOTAS"),
                (4, "Radar"),
                (5, "IFF"),
                (6, "FLIR"),
                (7, "EW"),
            ],
            _ => &[],
        }
    }

    /// Subsystem code from a string: named subsystem first, then a plain
    /// numeric code, else 0.
    pub fn subsystem_from_str(&self, s: &str) -> u8 {
        let s = s.trim();
        if let Some((code, _)) = self
            .subsystems()
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
        {
            return *code;
        }
        s.parse::<u8>().unwrap_or(0)
    }

    /// Canonical string for a subsystem code ("None" for 0 in named
    /// categories, the bare number elsewhere).
    pub fn subsystem_to_string(&self, code: u8) -> String {
        if let Some((_, name)) = self.subsystems().iter().find(|(c, _)| *c == code) {
            return (*name).to_string();
        }
        if self.subsystems().is_empty() {
            code.to_string()
        } else {
            "None".to_string()
        }
    }
}

/// Category assignment for one part number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartCategory {
    pub main: SystemCategory,
    pub sub: u8,
    pub notes: String,
}

impl PartCategory {
    pub fn new(main: SystemCategory, sub: u8, notes: impl Into<String>) -> Self {
        Self {
            main,
            sub,
            notes: notes.into(),
        }
    }
}

/// Part number -> category mapping with CSV persistence.
#[derive(Resource, Default, Debug)]
pub struct CategoryMapper {
    map: HashMap<String, PartCategory>,
    has_unsaved_changes: bool,
}

impl CategoryMapper {
    /// Loads a mapping CSV, replacing the current map. The first line is
    /// treated as a header; rows with fewer than three columns are
    /// skipped. Returns the number of mappings loaded.
    pub fn load_mapping_file(&mut self, path: &Path) -> Result<usize, String> {
        if !path.is_file() {
            return Err(format!("Mapping file not found: {}", path.display()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| format!("Failed to open mapping file '{}': {}", path.display(), e))?;

        self.map.clear();
        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping malformed mapping row: {}", e);
                    continue;
                }
            };
            if record.len() < 3 {
                continue;
            }
            let part_no = record[0].trim().to_string();
            if part_no.is_empty() {
                continue;
            }
            let main = SystemCategory::parse(&record[1]);
            let sub = main.subsystem_from_str(&record[2]);
            let notes = record.get(3).map(|n| n.trim().to_string()).unwrap_or_default();
            self.map.insert(part_no, PartCategory::new(main, sub, notes));
        }
        self.has_unsaved_changes = false;
        info!(
            "Loaded {} category mappings from {}",
            self.map.len(),
            path.display()
        );
        Ok(self.map.len())
    }

    /// Writes the mapping CSV (header plus one row per part, sorted by
    /// part number for stable diffs).
    pub fn save_mapping_file(&mut self, path: &Path) -> Result<(), String> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| format!("Failed to create mapping file '{}': {}", path.display(), e))?;
        writer
            .write_record(["PartNo", "MainCategory", "SubCategory", "Notes"])
            .map_err(|e| format!("Failed to write mapping header: {}", e))?;

        let mut entries: Vec<(&String, &PartCategory)> = self.map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (part_no, category) in entries {
            writer
                .write_record([
                    part_no.as_str(),
                    category.main.as_str(),
                    &category.main.subsystem_to_string(category.sub),
                    category.notes.as_str(),
                ])
                .map_err(|e| format!("Failed to write mapping row for '{}': {}", part_no, e))?;
        }
        writer
            .flush()
            .map_err(|e| format!("Failed to flush mapping file: {}", e))?;
        self.has_unsaved_changes = false;
        info!(
            "Saved {} category mappings to {}",
            self.map.len(),
            path.display()
        );
        Ok(())
    }

    pub fn category_for(&self, part_no: &str) -> Option<&PartCategory> {
        self.map.get(part_no)
    }

    /// Records a mapping. The unsaved flag only flips when the value
    /// actually changes.
    pub fn set_category(&mut self, part_no: impl Into<String>, category: PartCategory) {
        let part_no = part_no.into();
        if self.map.get(&part_no) != Some(&category) {
            self.map.insert(part_no, category);
            self.has_unsaved_changes = true;
        }
    }

    pub fn remove_mapping(&mut self, part_no: &str) {
        if self.map.remove(part_no).is_some() {
            self.has_unsaved_changes = true;
        }
    }

    /// Part numbers assigned to a main category; `sub == 0` matches any
    /// subsystem. Sorted for deterministic display.
    pub fn parts_in_category(&self, main: SystemCategory, sub: u8) -> Vec<String> {
        let mut parts: Vec<String> = self
            .map
            .iter()
            .filter(|(_, c)| c.main == main && (sub == 0 || c.sub == sub))
            .map(|(p, _)| p.clone())
            .collect();
        parts.sort_unstable();
        parts
    }

    pub fn mappings(&self) -> &HashMap<String, PartCategory> {
        &self.map
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_string_round_trip() {
        for category in SystemCategory::ALL {
            assert_eq!(SystemCategory::parse(category.as_str()), category);
        }
        assert_eq!(SystemCategory::parse("flightcontrol"), SystemCategory::FlightControl);
        assert_eq!(SystemCategory::parse("bogus"), SystemCategory::None);
    }

    #[test]
    fn subsystem_parse_named_and_numeric() {
        let fc = SystemCategory::FlightControl;
        assert_eq!(fc.subsystem_from_str("flcs"), 1);
        assert_eq!(fc.subsystem_from_str("LandingGear"), 5);
        assert_eq!(fc.subsystem_from_str("7"), 7);
        assert_eq!(fc.subsystem_from_str("unknown"), 0);
        // Categories without named subsystems fall back to numbers.
        assert_eq!(SystemCategory::Lighting.subsystem_from_str("3"), 3);
        assert_eq!(SystemCategory::Lighting.subsystem_to_string(3), "3");
        assert_eq!(fc.subsystem_to_string(1), "FLCS");
        assert_eq!(fc.subsystem_to_string(0), "None");
    }

    #[test]
    fn unsaved_flag_tracks_real_changes() {
        let mut mapper = CategoryMapper::default();
        assert!(!mapper.has_unsaved_changes());

        let cat = PartCategory::new(SystemCategory::Avionics, 4, "radar unit");
        mapper.set_category("A100", cat.clone());
        assert!(mapper.has_unsaved_changes());

        mapper.has_unsaved_changes = false;
        mapper.set_category("A100", cat); // identical, no change
        assert!(!mapper.has_unsaved_changes());

        mapper.remove_mapping("missing");
        assert!(!mapper.has_unsaved_changes());
        mapper.remove_mapping("A100");
        assert!(mapper.has_unsaved_changes());
    }

    #[test]
    fn parts_in_category_honors_sub_wildcard() {
        let mut mapper = CategoryMapper::default();
        mapper.set_category("A1", PartCategory::new(SystemCategory::Avionics, 1, ""));
        mapper.set_category("A2", PartCategory::new(SystemCategory::Avionics, 2, ""));
        mapper.set_category("F1", PartCategory::new(SystemCategory::FlightControl, 1, ""));

        assert_eq!(mapper.parts_in_category(SystemCategory::Avionics, 0), vec!["A1", "A2"]);
        assert_eq!(mapper.parts_in_category(SystemCategory::Avionics, 2), vec!["A2"]);
        assert!(mapper.parts_in_category(SystemCategory::Emergency, 0).is_empty());
    }

    #[test]
    fn mapping_file_round_trip() {
        let path = std::env::temp_dir().join("bomview_category_mapping_test.csv");
        let mut mapper = CategoryMapper::default();
        mapper.set_category("A100", PartCategory::new(SystemCategory::FlightControl, 5, "gear"));
        mapper.set_category("B200", PartCategory::new(SystemCategory::Lighting, 3, ""));
        mapper.save_mapping_file(&path).unwrap();
        assert!(!mapper.has_unsaved_changes());

        let mut loaded = CategoryMapper::default();
        let count = loaded.load_mapping_file(&path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            loaded.category_for("A100"),
            Some(&PartCategory::new(SystemCategory::FlightControl, 5, "gear"))
        );
        assert_eq!(
            loaded.category_for("B200"),
            Some(&PartCategory::new(SystemCategory::Lighting, 3, ""))
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn loading_missing_file_is_an_error() {
        let mut mapper = CategoryMapper::default();
        assert!(mapper
            .load_mapping_file(Path::new("/nonexistent/mapping.csv"))
            .is_err());
    }
}
