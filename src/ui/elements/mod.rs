// src/ui/elements/mod.rs
pub mod editor;
pub mod image_panel;
pub mod metadata_panel;
pub mod popups;
pub mod search_bar;
pub mod top_panel;
pub mod tree_panel;
