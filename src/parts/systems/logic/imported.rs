// src/parts/systems/logic/imported.rs
use bevy::prelude::*;

use crate::parts::events::{
    BomOperationFeedback, RequestMarkImported, RequestSelectPart, RequestUnmarkImported,
};
use crate::parts::images::{find_matching_file, PART_NO_STEM_INDEX};
use crate::parts::imported::{ImportedNode, ImportedNodeRegistry, PartNoTag};
use crate::parts::resources::BomRegistry;
use crate::settings::ImportOptions;
use crate::ViewerCli;

/// Marks a part as imported: spawns its tracking entity, records the
/// resolved source file when one exists, and optionally jumps the
/// selection to it. A missing source file downgrades to a warning, not
/// a failure.
pub fn handle_mark_imported_request(
    mut events: EventReader<RequestMarkImported>,
    mut commands: Commands,
    mut imported: ResMut<ImportedNodeRegistry>,
    registry: Res<BomRegistry>,
    options: Res<ImportOptions>,
    args: Res<ViewerCli>,
    mut select_writer: EventWriter<RequestSelectPart>,
    mut feedback_writer: EventWriter<BomOperationFeedback>,
) {
    for event in events.read() {
        let part_no = event.part_no.as_str();
        if !registry.forest().contains(part_no) {
            feedback_writer.write(BomOperationFeedback {
                message: format!("Cannot mark '{}': not in the current tree", part_no),
                is_error: true,
            });
            continue;
        }
        if imported.is_imported(part_no) {
            feedback_writer.write(BomOperationFeedback {
                message: format!("'{}' is already marked as imported", part_no),
                is_error: false,
            });
            continue;
        }

        let source_file = match args.import_dir.as_deref() {
            Some(dir) => {
                match find_matching_file(dir, &args.source_ext, part_no, PART_NO_STEM_INDEX) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("No source file for '{}': {}", part_no, e);
                        None
                    }
                }
            }
            None => None,
        };

        let entity = commands
            .spawn((ImportedNode, PartNoTag(part_no.to_string())))
            .id();
        imported.register(part_no, entity, source_file.clone());
        info!(
            "Marked '{}' as imported ({} tracked)",
            part_no,
            imported.count()
        );

        if options.select_node_after_import {
            select_writer.write(RequestSelectPart {
                part_no: part_no.to_string(),
            });
        }

        let message = match source_file {
            Some(path) => format!("Marked '{}' as imported (source: {})", part_no, path.display()),
            None => format!("Marked '{}' as imported (no source file found)", part_no),
        };
        feedback_writer.write(BomOperationFeedback {
            message,
            is_error: false,
        });
    }
}

/// Removes the imported mark and despawns the tracking entity.
pub fn handle_unmark_imported_request(
    mut events: EventReader<RequestUnmarkImported>,
    mut commands: Commands,
    mut imported: ResMut<ImportedNodeRegistry>,
    mut feedback_writer: EventWriter<BomOperationFeedback>,
) {
    for event in events.read() {
        match imported.remove(&event.part_no) {
            Some(record) => {
                commands.entity(record.entity).despawn();
                feedback_writer.write(BomOperationFeedback {
                    message: format!("Removed imported mark from '{}'", event.part_no),
                    is_error: false,
                });
            }
            None => {
                feedback_writer.write(BomOperationFeedback {
                    message: format!("'{}' was not marked as imported", event.part_no),
                    is_error: true,
                });
            }
        }
    }
}
