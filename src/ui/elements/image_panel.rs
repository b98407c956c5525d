// src/ui/elements/image_panel.rs
use bevy_egui::egui;

use crate::parts::images::PartImageCache;
use crate::ui::state::EditorWindowState;

/// Fetches (or lazily uploads) the egui texture for a part's image.
pub fn part_texture(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    images: &PartImageCache,
    part_no: &str,
) -> Option<egui::TextureHandle> {
    if let Some(handle) = state.part_textures.get(part_no) {
        return Some(handle.clone());
    }
    let decoded = images.load_part_image(part_no)?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let handle = ctx.load_texture(
        format!("part_image_{}", part_no),
        color_image,
        egui::TextureOptions::LINEAR,
    );
    state
        .part_textures
        .insert(part_no.to_string(), handle.clone());
    Some(handle)
}

/// Image preview for the selected part, scaled to the panel width.
pub fn show_image_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    images: &PartImageCache,
) {
    ui.heading("Image");
    ui.separator();

    let Some(part_no) = state.selected_part.clone() else {
        ui.weak("No part selected.");
        return;
    };
    if !images.has_image(&part_no) {
        ui.weak("No image for this part.");
        return;
    }
    let ctx = ui.ctx().clone();
    let Some(texture) = part_texture(&ctx, state, images, &part_no) else {
        ui.weak("Image failed to load.");
        return;
    };

    let size = texture.size_vec2();
    let scale = (ui.available_width() / size.x).min(1.0);
    ui.image((texture.id(), size * scale));
}

/// Standalone image viewer window, opened from the tree context menu.
pub fn show_image_popup(
    ctx: &egui::Context,
    state: &mut EditorWindowState,
    images: &PartImageCache,
) {
    let Some(part_no) = state.image_popup_part.clone() else {
        return;
    };
    let mut is_open = true;
    egui::Window::new(format!("Image: {}", part_no))
        .collapsible(false)
        .open(&mut is_open)
        .show(ctx, |ui| {
            match part_texture(ctx, state, images, &part_no) {
                Some(texture) => {
                    let size = texture.size_vec2();
                    let max = ui.ctx().screen_rect().size() * 0.8;
                    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
                    ui.image((texture.id(), size * scale));
                }
                None => {
                    ui.weak("Image failed to load.");
                }
            }
        });
    if !is_open {
        state.image_popup_part = None;
    }
}
