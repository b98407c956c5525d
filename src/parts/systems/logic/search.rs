// src/parts/systems/logic/search.rs
//! Text search over the part forest.
//!
//! Matching is case-insensitive over part number, part type and
//! nomenclature. Results come back in forest order and are capped so a
//! one-letter query cannot flood the view.

use crate::parts::definitions::{PartId, PartTreeItem};
use crate::parts::tree::PartForest;

/// Hard cap on search hits surfaced to the view.
pub const MAX_SEARCH_RESULTS: usize = 100;

pub fn matches_search(item: &PartTreeItem, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return false;
    }
    item.part_no.to_lowercase().contains(needle_lower)
        || item.part_type.to_lowercase().contains(needle_lower)
        || item.nomenclature.to_lowercase().contains(needle_lower)
}

/// Collects up to [`MAX_SEARCH_RESULTS`] matching items, plus the total
/// match count before truncation.
pub fn collect_search_results(forest: &PartForest, query: &str) -> (Vec<PartId>, usize) {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (Vec::new(), 0);
    }
    let mut results = Vec::new();
    let mut total = 0;
    for (id, item) in forest.iter() {
        if matches_search(item, &needle) {
            total += 1;
            if results.len() < MAX_SEARCH_RESULTS {
                results.push(id);
            }
        }
    }
    (results, total)
}

/// Part numbers of every ancestor of `id`, used to expand the path down
/// to a hit.
pub fn ancestor_part_nos(forest: &PartForest, id: PartId) -> Vec<String> {
    forest
        .path_to_root(id)
        .into_iter()
        .map(|p| forest.item(p).part_no.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::definitions::BomColumns;

    fn forest() -> PartForest {
        let rows = vec![
            vec!["PartNo", "NextPart", "Level", "Type", "Nomenclature"],
            vec!["A100", "", "0", "Assembly", "Wing assy"],
            vec!["B200", "A100", "1", "Part", "Rib"],
            vec!["C300", "A100", "1", "Part", "Spar"],
            vec!["D400", "B200", "2", "Part", "rib bracket"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect::<Vec<Vec<String>>>();
        let columns = BomColumns::resolve(&rows[0]);
        PartForest::from_rows(&rows, &columns)
    }

    #[test]
    fn search_is_case_insensitive_over_three_fields() {
        let f = forest();
        let (hits, total) = collect_search_results(&f, "RIB");
        assert_eq!(total, 2);
        let names: Vec<&str> = hits.iter().map(|&id| f.item(id).part_no.as_str()).collect();
        assert_eq!(names, vec!["B200", "D400"]);

        let (hits, _) = collect_search_results(&f, "assembly");
        assert_eq!(hits.len(), 1);
        assert_eq!(f.item(hits[0]).part_no, "A100");
    }

    #[test]
    fn blank_query_yields_nothing() {
        let f = forest();
        let (hits, total) = collect_search_results(&f, "   ");
        assert!(hits.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn results_are_capped() {
        let mut rows = vec![vec![
            "PartNo".to_string(),
            "NextPart".to_string(),
            "Level".to_string(),
        ]];
        for i in 0..250 {
            rows.push(vec![format!("P{:03}", i), String::new(), "0".to_string()]);
        }
        let columns = BomColumns::resolve(&rows[0]);
        let f = PartForest::from_rows(&rows, &columns);
        let (hits, total) = collect_search_results(&f, "p");
        assert_eq!(hits.len(), MAX_SEARCH_RESULTS);
        assert_eq!(total, 250);
    }

    #[test]
    fn ancestors_exclude_the_hit_itself() {
        let f = forest();
        let d = f.get("D400").unwrap();
        let ancestors = ancestor_part_nos(&f, d);
        assert_eq!(ancestors, vec!["B200".to_string(), "A100".to_string()]);
    }
}
