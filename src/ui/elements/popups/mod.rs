// src/ui/elements/popups/mod.rs
pub mod category_popup;
pub mod import_options_popup;

pub use category_popup::show_category_popup;
pub use import_options_popup::show_import_options_popup;
