// src/parts/systems/io/parsers.rs
use bevy::prelude::warn;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BomLoadError {
    #[error("Failed to open BOM file '{path}': {source}")]
    Open {
        path: String,
        source: csv::Error,
    },
    #[error("BOM file '{path}' needs a header row and at least one data row")]
    TooFewRows { path: String },
}

/// Reads a BOM CSV into raw rows (header included). Quoted cells and
/// ragged rows are accepted; unreadable records are skipped with a
/// warning. A leading UTF-8 BOM is stripped.
pub fn read_bom_csv(path: &Path) -> Result<Vec<Vec<String>>, BomLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| BomLoadError::Open {
            path: path.display().to_string(),
            source: e,
        })?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable row in '{}': {}", path.display(), e);
                continue;
            }
        };
        let mut cells: Vec<String> =
            record.iter().map(|c| c.to_string()).collect();
        if let Some(first) = cells.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{FEFF}') {
                *first = stripped.to_string();
            }
        }
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(cells);
    }

    if rows.len() < 2 {
        return Err(BomLoadError::TooFewRows {
            path: path.display().to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_quoted_and_ragged_rows() {
        let path = write_temp(
            "bomview_parser_test.csv",
            "PartNo,NextPart,Level,Nomenclature\nA100,,0,\"wing, left\"\nB200,A100,1\n",
        );
        let rows = read_bom_csv(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][3], "wing, left");
        assert_eq!(rows[2].len(), 3); // ragged row kept as-is
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn strips_utf8_bom_and_blank_lines() {
        let path = write_temp(
            "bomview_parser_bom_test.csv",
            "\u{FEFF}PartNo,NextPart,Level\n\nA100,,0\n",
        );
        let rows = read_bom_csv(&path).unwrap();
        assert_eq!(rows[0][0], "PartNo");
        assert_eq!(rows.len(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = read_bom_csv(Path::new("/nonexistent/bom.csv")).unwrap_err();
        assert!(matches!(err, BomLoadError::Open { .. }));
    }

    #[test]
    fn header_only_file_is_rejected() {
        let path = write_temp("bomview_parser_short_test.csv", "PartNo,NextPart,Level\n");
        let err = read_bom_csv(&path).unwrap_err();
        assert!(matches!(err, BomLoadError::TooFewRows { .. }));
        let _ = std::fs::remove_file(&path);
    }
}
