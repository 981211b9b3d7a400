use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::annotator::overlap::OverlapOrdering;
use crate::config::{AppConfig, ApplyConfigRequest, SaveConfigRequest};
use crate::content::{ContentPort, ItemKind, SceneContent};
use crate::document::{Document, OpenImageRequest};
use crate::scene::pointer::TrackedPixel;
use crate::scene::tools::{CurrentTool, SceneTool};
use crate::scene::viewport::SceneViewport;

/// Main toolbar: tools, zoom readout, rulers and ordering settings, and
/// the open-image dialog.
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_tool: ResMut<CurrentTool>,
    mut config: ResMut<AppConfig>,
    mut viewport: ResMut<SceneViewport>,
    document: Res<Document>,
    mut open_requests: MessageWriter<OpenImageRequest>,
    mut save_requests: MessageWriter<SaveConfigRequest>,
    mut apply_requests: MessageWriter<ApplyConfigRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                if ui
                    .add(egui::Button::new("Open Image...").min_size(egui::vec2(0.0, 28.0)))
                    .clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter(
                            "Images",
                            &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "tif"],
                        )
                        .set_title("Open an image to annotate")
                        .pick_file()
                {
                    open_requests.write(OpenImageRequest { path });
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                // Tool buttons with keyboard shortcuts
                for tool in SceneTool::all() {
                    let selected = current_tool.tool == *tool;
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        current_tool.tool = *tool;
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label(format!("{:.0}%", viewport.magnification() * 100.0));
                if ui.button("Fit").clicked() {
                    let bounds = viewport.spaces.wrapper_bounds();
                    viewport.begin_magnify_to_fit(bounds);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let mut dirty = false;
                dirty |= ui
                    .checkbox(&mut config.data.rulers_visible, "Rulers")
                    .changed();

                ui.label("Overlap:");
                let ordering = &mut config.data.overlap_ordering;
                egui::ComboBox::from_id_salt("overlap_ordering")
                    .selected_text(ordering_label(*ordering))
                    .show_ui(ui, |ui| {
                        for option in [OverlapOrdering::Insertion, OverlapOrdering::AreaDescending]
                        {
                            dirty |= ui
                                .selectable_value(ordering, option, ordering_label(option))
                                .changed();
                        }
                    });

                dirty |= ui
                    .checkbox(&mut config.data.enable_force_touch, "Pressure gate")
                    .changed();

                if dirty {
                    config.dirty = true;
                    save_requests.write(SaveConfigRequest);
                    apply_requests.write(ApplyConfigRequest);
                }

                // Right-aligned document label
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = match &document.path {
                        Some(path) => format!(
                            "{} ({})",
                            path.file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_default(),
                            document.size
                        ),
                        None => "No image".to_string(),
                    };
                    ui.label(egui::RichText::new(label).weak());
                });
            });
        });
    Ok(())
}

fn tool_button_label(tool: &SceneTool) -> &'static str {
    match tool {
        SceneTool::Select => "Select",
        SceneTool::Annotate => "Annotate",
        SceneTool::ZoomIn => "Zoom +",
        SceneTool::ZoomOut => "Zoom -",
        SceneTool::Move => "Move",
    }
}

fn ordering_label(ordering: OverlapOrdering) -> &'static str {
    match ordering {
        OverlapOrdering::Insertion => "Insertion",
        OverlapOrdering::AreaDescending => "Area",
    }
}

/// Status bar: tracked pixel, its color, and the live selection count.
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    tracked: Res<TrackedPixel>,
    content: Res<SceneContent>,
) -> Result {
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                match tracked.coordinate {
                    Some(coordinate) => ui.label(format!("Pixel {}", coordinate)),
                    None => ui.label("Pixel -"),
                };
                ui.separator();
                let port = content.port();
                ui.label(format!(
                    "{} annotations, {} selected",
                    port.items().len(),
                    port.selected_ids().len()
                ));
                // Gizmos carry no text, so the focused item's geometry
                // reads out here.
                if let Some(item) = port.focused_id().and_then(|id| port.item(id)) {
                    ui.separator();
                    let readout = match &item.kind {
                        ItemKind::Point { coordinate, color } => {
                            format!("{} point {} {}", item.id, coordinate, color)
                        }
                        ItemKind::Area { rect } => {
                            format!("{} area {} at {}", item.id, rect.size, rect.origin)
                        }
                    };
                    ui.label(readout);
                }
            });
        });
    Ok(())
}
