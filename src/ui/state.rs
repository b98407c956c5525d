// src/ui/state.rs
use bevy::prelude::*;
use bevy_egui::egui;
use std::collections::{HashMap, HashSet};

use crate::parts::categories::SystemCategory;
use crate::settings::ImportOptions;

/// Per-window UI state. Everything is keyed by part number so it
/// survives a wholesale forest rebuild.
#[derive(Resource, Default)]
pub struct EditorWindowState {
    pub selected_part: Option<String>,
    pub expanded: HashSet<String>,
    /// Part number the tree panel should scroll into view this frame.
    pub scroll_to: Option<String>,

    // Search
    pub search_text: String,
    pub is_searching: bool,
    pub search_results: Vec<String>,
    pub search_result_set: HashSet<String>,
    pub search_total: usize,

    // Import options popup
    pub show_import_options_popup: bool,
    pub import_options_draft: ImportOptions,

    // Category popup
    pub show_category_popup: bool,
    pub category_popup_part: Option<String>,
    pub category_draft_main: SystemCategory,
    pub category_draft_sub: u8,
    pub category_draft_notes: String,

    // Image viewer popup
    pub image_popup_part: Option<String>,

    /// Decoded part images already uploaded to the egui context.
    pub part_textures: HashMap<String, egui::TextureHandle>,
}

impl EditorWindowState {
    pub fn reset_for_new_bom(&mut self) {
        self.selected_part = None;
        self.expanded.clear();
        self.scroll_to = None;
        self.clear_search();
        self.image_popup_part = None;
        self.part_textures.clear();
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.is_searching = false;
        self.search_results.clear();
        self.search_result_set.clear();
        self.search_total = 0;
    }

    pub fn is_expanded(&self, part_no: &str) -> bool {
        self.expanded.contains(part_no)
    }

    pub fn is_selected(&self, part_no: &str) -> bool {
        self.selected_part.as_deref() == Some(part_no)
    }
}
