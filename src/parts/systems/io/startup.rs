// src/parts/systems/io/startup.rs
use bevy::prelude::*;

use crate::parts::categories::CategoryMapper;
use crate::parts::events::RequestLoadBom;
use crate::ViewerCli;

/// Queues a load for the BOM given on the command line, if any.
pub fn queue_startup_bom_load(
    args: Res<ViewerCli>,
    mut load_writer: EventWriter<RequestLoadBom>,
) {
    if let Some(path) = &args.bom {
        load_writer.write(RequestLoadBom { path: path.clone() });
    } else {
        info!("No BOM file given on the command line; waiting for Open");
    }
}

/// Loads the category mapping file given on the command line, if any.
pub fn load_startup_mapping(args: Res<ViewerCli>, mut mapper: ResMut<CategoryMapper>) {
    let Some(path) = &args.mapping else {
        return;
    };
    match mapper.load_mapping_file(path) {
        Ok(count) => info!("Loaded {} category mappings from {}", count, path.display()),
        Err(e) => warn!("Category mapping not loaded: {}", e),
    }
}
