// src/ui/elements/search_bar.rs
use bevy_egui::egui;

use crate::parts::resources::BomRegistry;
use crate::parts::systems::logic::search::{
    ancestor_part_nos, collect_search_results, MAX_SEARCH_RESULTS,
};
use crate::ui::state::EditorWindowState;

/// Search row under the toolbar. Typing folds the tree and re-expands
/// only the paths leading to hits; Enter re-runs the same query.
pub fn show_search_bar(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    registry: &BomRegistry,
) {
    ui.horizontal(|ui| {
        ui.label("Search:");
        let response = ui.text_edit_singleline(&mut state.search_text);
        let enter_pressed =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if response.changed() || enter_pressed {
            run_search(state, registry);
        }
        if ui
            .button("✖")
            .on_hover_text("Clear search")
            .clicked()
        {
            state.clear_search();
        }
        if state.is_searching {
            let summary = if state.search_total > MAX_SEARCH_RESULTS {
                format!(
                    "Found {} matches (showing first {})",
                    state.search_total, MAX_SEARCH_RESULTS
                )
            } else {
                format!("Found {} match(es)", state.search_total)
            };
            ui.weak(summary);
        }
    });
}

fn run_search(state: &mut EditorWindowState, registry: &BomRegistry) {
    let forest = registry.forest();
    let query = state.search_text.trim().to_string();
    if query.is_empty() {
        let text = state.search_text.clone();
        state.clear_search();
        state.search_text = text;
        return;
    }

    let (ids, total) = collect_search_results(forest, &query);
    state.is_searching = true;
    state.search_total = total;
    state.search_results = ids
        .iter()
        .map(|&id| forest.item(id).part_no.clone())
        .collect();
    state.search_result_set = state.search_results.iter().cloned().collect();

    // Fold everything, then reopen only the paths to hits and jump to
    // the first one.
    state.expanded.clear();
    for &id in &ids {
        for ancestor in ancestor_part_nos(forest, id) {
            state.expanded.insert(ancestor);
        }
    }
    if let Some(&first) = ids.first() {
        let part_no = forest.item(first).part_no.clone();
        state.selected_part = Some(part_no.clone());
        state.scroll_to = Some(part_no);
    }
}
