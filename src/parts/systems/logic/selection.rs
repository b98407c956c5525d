// src/parts/systems/logic/selection.rs
use bevy::prelude::*;

use super::search::ancestor_part_nos;
use crate::parts::events::{BomOperationFeedback, RequestSelectPart};
use crate::parts::resources::BomRegistry;
use crate::ui::state::EditorWindowState;

/// Selects a part by number: expands the path down to it and asks the
/// tree panel to scroll it into view. Unknown part numbers produce a
/// feedback message and leave the selection alone.
pub fn handle_select_part_request(
    mut events: EventReader<RequestSelectPart>,
    registry: Res<BomRegistry>,
    mut state: ResMut<EditorWindowState>,
    mut feedback_writer: EventWriter<BomOperationFeedback>,
) {
    for event in events.read() {
        let forest = registry.forest();
        let Some(id) = forest.get(&event.part_no) else {
            feedback_writer.write(BomOperationFeedback {
                message: format!("Part '{}' is not in the current tree", event.part_no),
                is_error: true,
            });
            continue;
        };
        for ancestor in ancestor_part_nos(forest, id) {
            state.expanded.insert(ancestor);
        }
        state.selected_part = Some(event.part_no.clone());
        state.scroll_to = Some(event.part_no.clone());
        trace!("Selection moved to '{}'", event.part_no);
    }
}
