// src/parts/systems/io/load.rs
use bevy::prelude::*;

use super::parsers::read_bom_csv;
use crate::parts::definitions::BomColumns;
use crate::parts::events::{
    BomLoadedEvent, BomOperationFeedback, RequestLoadBom, RequestRescanImages,
};
use crate::parts::images::PartImageCache;
use crate::parts::resources::BomRegistry;
use crate::parts::tree::PartForest;
use crate::ui::state::EditorWindowState;
use crate::ViewerCli;

/// Loads a BOM CSV, rebuilds the forest wholesale and refreshes the
/// image cache. Failures clear the current tree and surface a feedback
/// message; there is no partial load.
pub fn handle_load_bom_request(
    mut events: EventReader<RequestLoadBom>,
    mut registry: ResMut<BomRegistry>,
    mut images: ResMut<PartImageCache>,
    mut state: ResMut<EditorWindowState>,
    args: Res<ViewerCli>,
    mut loaded_writer: EventWriter<BomLoadedEvent>,
    mut feedback_writer: EventWriter<BomOperationFeedback>,
) {
    for event in events.read() {
        info!("Loading BOM from {}", event.path.display());
        let rows = match read_bom_csv(&event.path) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("BOM load failed: {}", e);
                registry.clear();
                state.reset_for_new_bom();
                feedback_writer.write(BomOperationFeedback {
                    message: e.to_string(),
                    is_error: true,
                });
                continue;
            }
        };

        let columns = BomColumns::resolve(&rows[0]);
        let forest = PartForest::from_rows(&rows, &columns);
        if forest.is_empty() {
            registry.clear();
            state.reset_for_new_bom();
            feedback_writer.write(BomOperationFeedback {
                message: format!("No valid rows in {}", event.path.display()),
                is_error: true,
            });
            continue;
        }

        images.rescan(&args.image_dir(), &forest);

        state.reset_for_new_bom();
        // Roots start expanded, matching the view after a fresh load.
        for &root in forest.roots() {
            state.expanded.insert(forest.item(root).part_no.clone());
        }

        let node_count = forest.len();
        let root_count = forest.roots().len();
        registry.replace(forest, event.path.clone());

        loaded_writer.write(BomLoadedEvent {
            path: event.path.clone(),
            node_count,
            root_count,
        });
        feedback_writer.write(BomOperationFeedback {
            message: format!(
                "Loaded {} parts ({} roots) from {}",
                node_count,
                root_count,
                event.path.display()
            ),
            is_error: false,
        });
    }
}

/// Manual image-cache refresh, requested from the top bar.
pub fn handle_rescan_images_request(
    mut events: EventReader<RequestRescanImages>,
    mut images: ResMut<PartImageCache>,
    registry: Res<BomRegistry>,
    args: Res<ViewerCli>,
    mut feedback_writer: EventWriter<BomOperationFeedback>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    images.rescan(&args.image_dir(), registry.forest());
    feedback_writer.write(BomOperationFeedback {
        message: format!("Image cache refreshed: {} parts with images", images.image_count()),
        is_error: false,
    });
}
