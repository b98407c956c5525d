// src/parts/images.rs
//! Part image lookup.
//!
//! Image files are named `<site>_<project>_<batch>_<partno>[_...]`; the
//! part number sits at underscore index 3. The cache is rebuilt after
//! every BOM load and on demand, and only keeps entries for parts that
//! exist in the current forest.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::definitions::PartId;
use super::tree::PartForest;

/// Underscore index of the part number inside an image/source file stem.
pub const PART_NO_STEM_INDEX: usize = 3;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extracts the part number from an underscore-separated file stem.
pub fn extract_part_no_from_stem(stem: &str, part_index: usize) -> Option<&str> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() > part_index {
        Some(parts[part_index])
    } else {
        None
    }
}

/// Finds the first file in `dir` with the given extension whose stem
/// carries `part_no` at `part_index`. Non-recursive, mirroring a flat
/// export directory.
pub fn find_matching_file(
    dir: &Path,
    extension: &str,
    part_no: &str,
    part_index: usize,
) -> Result<PathBuf, String> {
    if !dir.is_dir() {
        return Err(format!("Directory does not exist: {}", dir.display()));
    }
    let mut saw_any = false;
    for entry in WalkDir::new(dir).max_depth(1).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !path
            .extension()
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false)
        {
            continue;
        }
        saw_any = true;
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if extract_part_no_from_stem(stem, part_index) == Some(part_no) {
            return Ok(path.to_path_buf());
        }
    }
    if !saw_any {
        return Err(format!(
            "No *.{} files in {}",
            extension,
            dir.display()
        ));
    }
    Err(format!("No file matching part number '{}' found", part_no))
}

/// Which parts have an image on disk, and where.
#[derive(Resource, Default, Debug)]
pub struct PartImageCache {
    parts_with_image: HashSet<String>,
    path_by_part: HashMap<String, PathBuf>,
}

impl PartImageCache {
    /// Rebuilds the cache from `dir`, keeping only parts present in
    /// `forest`. A missing directory clears the cache and logs a warning.
    pub fn rescan(&mut self, dir: &Path, forest: &PartForest) {
        self.parts_with_image.clear();
        self.path_by_part.clear();

        if !dir.is_dir() {
            warn!("Image directory not found: {}", dir.display());
            return;
        }

        let mut scanned = 0;
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            scanned += 1;
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(part_no) = extract_part_no_from_stem(stem, PART_NO_STEM_INDEX) else {
                continue;
            };
            if forest.contains(part_no) {
                self.parts_with_image.insert(part_no.to_string());
                self.path_by_part
                    .insert(part_no.to_string(), path.to_path_buf());
            }
        }
        info!(
            "Image cache rebuilt: {} of {} parts have images ({} files scanned in {})",
            self.parts_with_image.len(),
            forest.len(),
            scanned,
            dir.display()
        );
    }

    pub fn has_image(&self, part_no: &str) -> bool {
        self.parts_with_image.contains(part_no)
    }

    pub fn image_path_for(&self, part_no: &str) -> Option<&Path> {
        self.path_by_part.get(part_no).map(|p| p.as_path())
    }

    pub fn image_count(&self) -> usize {
        self.parts_with_image.len()
    }

    /// True when the item itself or anything below it has an image.
    pub fn has_child_with_image(&self, forest: &PartForest, id: PartId) -> bool {
        if self.has_image(&forest.item(id).part_no) {
            return true;
        }
        forest
            .item(id)
            .children
            .iter()
            .any(|&child| self.has_child_with_image(forest, child))
    }

    /// Decodes the part's image from disk. Decode failures log a warning
    /// and yield None.
    pub fn load_part_image(&self, part_no: &str) -> Option<image::DynamicImage> {
        let path = self.path_by_part.get(part_no)?;
        match image::open(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("Failed to load image '{}': {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::definitions::BomColumns;

    #[test]
    fn stem_extraction_uses_underscore_index() {
        assert_eq!(
            extract_part_no_from_stem("aaa_bbb_ccc_A100", PART_NO_STEM_INDEX),
            Some("A100")
        );
        assert_eq!(
            extract_part_no_from_stem("aaa_bbb_ccc_A100_rev2", PART_NO_STEM_INDEX),
            Some("A100")
        );
        assert_eq!(extract_part_no_from_stem("aaa_bbb", PART_NO_STEM_INDEX), None);
        assert_eq!(extract_part_no_from_stem("plain", 0), Some("plain"));
    }

    fn tiny_forest(part_nos: &[&str]) -> PartForest {
        let mut rows = vec![vec![
            "PartNo".to_string(),
            "NextPart".to_string(),
            "Level".to_string(),
        ]];
        for p in part_nos {
            rows.push(vec![p.to_string(), String::new(), "0".to_string()]);
        }
        let columns = BomColumns::resolve(&rows[0]);
        PartForest::from_rows(&rows, &columns)
    }

    #[test]
    fn rescan_associates_files_with_known_parts_only() {
        let dir = std::env::temp_dir().join("bomview_image_scan_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        // Contents don't matter for association; decode is lazy.
        std::fs::write(dir.join("site_proj_b1_A100.png"), b"x").unwrap();
        std::fs::write(dir.join("site_proj_b1_GHOST.png"), b"x").unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();

        let forest = tiny_forest(&["A100", "B200"]);
        let mut cache = PartImageCache::default();
        cache.rescan(&dir, &forest);

        assert!(cache.has_image("A100"));
        assert!(!cache.has_image("GHOST"));
        assert!(!cache.has_image("B200"));
        assert_eq!(cache.image_count(), 1);
        assert!(cache.image_path_for("A100").is_some());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rescan_of_missing_directory_clears_cache() {
        let forest = tiny_forest(&["A100"]);
        let mut cache = PartImageCache::default();
        cache
            .parts_with_image
            .insert("A100".to_string());
        cache.rescan(Path::new("/nonexistent/bomview_images"), &forest);
        assert_eq!(cache.image_count(), 0);
    }

    #[test]
    fn find_matching_file_reports_misses() {
        let dir = std::env::temp_dir().join("bomview_file_match_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a_b_c_A100.xml"), b"x").unwrap();

        assert!(find_matching_file(&dir, "xml", "A100", PART_NO_STEM_INDEX).is_ok());
        assert!(find_matching_file(&dir, "xml", "B200", PART_NO_STEM_INDEX).is_err());
        assert!(find_matching_file(&dir, "json", "A100", PART_NO_STEM_INDEX).is_err());
        assert!(find_matching_file(Path::new("/nonexistent"), "xml", "A100", 3).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
