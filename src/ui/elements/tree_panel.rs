// src/ui/elements/tree_panel.rs
use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::parts::categories::CategoryMapper;
use crate::parts::definitions::PartId;
use crate::parts::events::{RequestMarkImported, RequestUnmarkImported};
use crate::parts::images::PartImageCache;
use crate::parts::imported::ImportedNodeRegistry;
use crate::parts::resources::BomRegistry;
use crate::parts::systems::logic::filters::{
    DuplicateFilter, FilterManager, ImageFilter, TreeItemFilter,
};
use crate::parts::tree::PartForest;
use crate::ui::state::EditorWindowState;

struct TreePanelCtx<'a, 'w> {
    forest: &'a PartForest,
    images: &'a PartImageCache,
    imported: &'a ImportedNodeRegistry,
    mapper: &'a CategoryMapper,
    filters: &'a mut FilterManager,
    mark_writer: &'a mut EventWriter<'w, RequestMarkImported>,
    unmark_writer: &'a mut EventWriter<'w, RequestUnmarkImported>,
}

/// Central tree view over the part forest.
#[allow(clippy::too_many_arguments)]
pub fn show_tree_panel<'w>(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    registry: &BomRegistry,
    images: &PartImageCache,
    imported: &ImportedNodeRegistry,
    mapper: &CategoryMapper,
    filters: &mut FilterManager,
    mark_writer: &mut EventWriter<'w, RequestMarkImported>,
    unmark_writer: &mut EventWriter<'w, RequestUnmarkImported>,
) {
    let forest = registry.forest();
    if forest.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.weak("No BOM loaded. Use \"Open BOM…\" to pick a CSV file.");
        });
        return;
    }

    filters.begin_pass();
    let mut panel = TreePanelCtx {
        forest,
        images,
        imported,
        mapper,
        filters,
        mark_writer,
        unmark_writer,
    };

    egui::ScrollArea::both()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for &root in forest.roots() {
                draw_item(ui, state, &mut panel, root);
            }
        });

    // A scroll target only lives for the frame it was requested in.
    state.scroll_to = None;
}

fn draw_item(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    panel: &mut TreePanelCtx,
    id: PartId,
) {
    if panel.filters.any_active()
        && !panel
            .filters
            .passes_all(panel.forest, panel.images, id)
    {
        return;
    }
    if state.is_searching && !subtree_has_match(state, panel.forest, id) {
        return;
    }

    let item = panel.forest.item(id);
    let part_no = item.part_no.clone();
    let has_children = !item.children.is_empty();
    let expanded = state.is_expanded(&part_no);

    let label = if item.nomenclature.is_empty() {
        part_no.clone()
    } else {
        format!("{}  {}", part_no, item.nomenclature)
    };
    let mut text = egui::RichText::new(label);
    if state.search_result_set.contains(&part_no) {
        text = text.color(egui::Color32::GREEN).strong();
    } else if panel.imported.is_imported(&part_no) {
        text = text.color(egui::Color32::LIGHT_BLUE);
    } else if !state.is_searching && panel.images.has_image(&part_no) {
        text = text.color(egui::Color32::LIGHT_RED);
    }

    let children = item.children.clone();

    ui.horizontal(|ui| {
        if has_children {
            let arrow = if expanded { "⏷" } else { "⏵" };
            if ui.small_button(arrow).clicked() {
                if expanded {
                    state.expanded.remove(&part_no);
                } else {
                    state.expanded.insert(part_no.clone());
                }
            }
        } else {
            ui.add_space(18.0);
        }

        let response = ui.selectable_label(state.is_selected(&part_no), text);
        if response.clicked() {
            state.selected_part = Some(part_no.clone());
        }
        if response.double_clicked() && has_children {
            if expanded {
                state.expanded.remove(&part_no);
            } else {
                state.expanded.insert(part_no.clone());
            }
        }
        if state.scroll_to.as_deref() == Some(part_no.as_str()) {
            response.scroll_to_me(Some(egui::Align::Center));
        }
        response.context_menu(|ui| {
            item_context_menu(ui, state, panel, id, &part_no);
        });
    });

    if has_children && state.is_expanded(&part_no) {
        ui.indent(egui::Id::new(&part_no), |ui| {
            for &child in &children {
                draw_item(ui, state, panel, child);
            }
        });
    }
}

fn item_context_menu(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    panel: &mut TreePanelCtx,
    id: PartId,
    part_no: &str,
) {
    let has_image = panel.images.has_image(part_no);
    let is_imported = panel.imported.is_imported(part_no);
    let has_children = !panel.forest.item(id).children.is_empty();

    if ui.button("Copy Part No").clicked() {
        ui.ctx().copy_text(part_no.to_string());
        ui.close_menu();
    }
    if has_children && ui.button("Copy Subtree Part Numbers").clicked() {
        let mut part_nos = Vec::new();
        collect_subtree_part_nos(panel.forest, id, &mut part_nos);
        ui.ctx().copy_text(part_nos.join(", "));
        ui.close_menu();
    }
    if ui.button("Copy Metadata").clicked() {
        ui.ctx().copy_text(panel.forest.formatted_metadata(id));
        ui.close_menu();
    }

    ui.separator();

    if ui
        .add_enabled(has_image, egui::Button::new("View Image"))
        .clicked()
    {
        state.image_popup_part = Some(part_no.to_string());
        ui.close_menu();
    }

    if has_children {
        if ui.button("Expand All Below").clicked() {
            let mut part_nos = Vec::new();
            collect_subtree_part_nos(panel.forest, id, &mut part_nos);
            state.expanded.extend(part_nos);
            ui.close_menu();
        }
        if ui.button("Collapse All Below").clicked() {
            let mut part_nos = Vec::new();
            collect_subtree_part_nos(panel.forest, id, &mut part_nos);
            for p in part_nos {
                state.expanded.remove(&p);
            }
            ui.close_menu();
        }
        ui.separator();
    }

    if is_imported {
        if ui.button("Unmark Imported").clicked() {
            panel.unmark_writer.write(RequestUnmarkImported {
                part_no: part_no.to_string(),
            });
            ui.close_menu();
        }
    } else if ui.button("Mark as Imported").clicked() {
        panel.mark_writer.write(RequestMarkImported {
            part_no: part_no.to_string(),
        });
        ui.close_menu();
    }

    if ui.button("Edit Category…").clicked() {
        let existing = panel.mapper.category_for(part_no);
        state.category_draft_main = existing.map(|c| c.main).unwrap_or_default();
        state.category_draft_sub = existing.map(|c| c.sub).unwrap_or(0);
        state.category_draft_notes = existing.map(|c| c.notes.clone()).unwrap_or_default();
        state.category_popup_part = Some(part_no.to_string());
        state.show_category_popup = true;
        ui.close_menu();
    }

    ui.separator();

    let mut image_filter = panel.filters.is_enabled("image");
    if ui
        .checkbox(&mut image_filter, "Show only items with images")
        .on_hover_text(ImageFilter.description())
        .changed()
    {
        panel
            .filters
            .set_enabled(Box::new(ImageFilter) as Box<dyn TreeItemFilter>, image_filter);
    }
    let mut duplicate_filter = panel.filters.is_enabled("duplicate");
    if ui
        .checkbox(&mut duplicate_filter, "Hide duplicate part numbers")
        .on_hover_text(DuplicateFilter::new().description())
        .changed()
    {
        panel.filters.set_enabled(
            Box::new(DuplicateFilter::new()) as Box<dyn TreeItemFilter>,
            duplicate_filter,
        );
    }
}

fn collect_subtree_part_nos(forest: &PartForest, id: PartId, out: &mut Vec<String>) {
    out.push(forest.item(id).part_no.clone());
    for &child in &forest.item(id).children {
        collect_subtree_part_nos(forest, child, out);
    }
}

fn subtree_has_match(state: &EditorWindowState, forest: &PartForest, id: PartId) -> bool {
    if state
        .search_result_set
        .contains(&forest.item(id).part_no)
    {
        return true;
    }
    forest
        .item(id)
        .children
        .iter()
        .any(|&child| subtree_has_match(state, forest, child))
}
