//! The pointer gesture driver.
//!
//! Systems here turn raw mouse input into manipulations on [`SceneState`]
//! and, on release, into at most one content mutation through the port.
//! During a drag nothing touches the annotation list; the rubber band and
//! annotator previews live entirely inside the manipulation variant, so
//! aborting (window losing focus, release off the canvas) is a plain
//! `reset`.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::annotator::overlap::{candidates_at, cycle_next};
use crate::annotator::{overlay, AnnotatorIndex};
use crate::common::DragHandle;
use crate::config::InteractionSettings;
use crate::constants::MIN_RECOGNIZABLE_AREA_SIZE;
use crate::content::{ContentChange, ContentItem, ContentPort, ItemKind, SceneContent};
use crate::geometry::spaces::SceneSpaces;
use crate::geometry::{PixelCoordinate, PixelRect};

use super::resize::resize_area;
use super::state::{InputSide, Manipulation, ManipulationOptions, SceneState};
use super::tools::{drag_kind, effective_tool, CurrentTool, DragKind, SceneTool};
use super::viewport::SceneViewport;

/// Pressure stage report from the windowing layer. Stage 0 is a plain
/// press, higher stages are deeper presses.
#[derive(Message, Debug, Clone, Copy)]
pub struct PressureChange {
    pub stage: u8,
}

/// The document pixel currently under the pointer, if any.
#[derive(Resource, Debug, Default)]
pub struct TrackedPixel {
    pub coordinate: Option<PixelCoordinate>,
}

/// Viewport follow-up a committed gesture asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportCommand {
    None,
    /// Step up the zoom ladder, keeping `anchor` (view space) fixed.
    ZoomIn { anchor: Vec2 },
    ZoomOut { anchor: Vec2 },
    /// Fill the view with a pixel region.
    MagnifyToFit(PixelRect),
}

/// Everything a commit needs besides the manipulation itself.
pub struct GestureContext<'a> {
    pub tool: SceneTool,
    pub settings: &'a InteractionSettings,
    pub spaces: &'a SceneSpaces,
    pub alt: bool,
    pub command: bool,
}

fn modifier_options(keyboard: &ButtonInput<KeyCode>) -> ManipulationOptions {
    ManipulationOptions {
        proportional_scaling: keyboard.pressed(KeyCode::ShiftLeft)
            || keyboard.pressed(KeyCode::ShiftRight),
        centered_scaling: keyboard.pressed(KeyCode::AltLeft)
            || keyboard.pressed(KeyCode::AltRight),
    }
}

fn view_cursor(window: &Window, spaces: &SceneSpaces) -> Option<Vec2> {
    window.cursor_position().map(|p| spaces.window_to_view(p))
}

pub fn handle_pointer_down(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    viewport: Res<SceneViewport>,
    mut state: ResMut<SceneState>,
    mut contexts: EguiContexts,
) {
    let primary = mouse.just_pressed(MouseButton::Left);
    let secondary = mouse.just_pressed(MouseButton::Right);
    if !primary && !secondary {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(view) = view_cursor(window, &viewport.spaces) else {
        return;
    };
    // Presses on the rulers or outside the window never start a gesture.
    if !viewport.spaces.view_contains(view) {
        return;
    }
    let side = if primary {
        InputSide::Primary
    } else {
        InputSide::Secondary
    };
    state.begin(side, view);
}

pub fn handle_pressure_change(
    mut events: MessageReader<PressureChange>,
    mut state: ResMut<SceneState>,
) {
    for event in events.read() {
        state.raise_stage(event.stage);
    }
}

pub fn handle_pointer_drag(
    window_query: Query<&Window, With<PrimaryWindow>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<InteractionSettings>,
    current_tool: Res<CurrentTool>,
    index: Res<AnnotatorIndex>,
    mut viewport: ResMut<SceneViewport>,
    mut state: ResMut<SceneState>,
) {
    if state.is_idle() {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(view) = view_cursor(window, &viewport.spaces) else {
        return;
    };
    let options = modifier_options(&keyboard);
    let alt = options.centered_scaling;

    match state.manipulation().clone() {
        Manipulation::Generic { side, begin, stage } => {
            if begin.distance(view) < settings.min_drag_distance() {
                return;
            }
            let tool = effective_tool(current_tool.tool, alt);
            let next = match drag_kind(tool, side) {
                DragKind::Area => {
                    // Pressure gating: a shallow press only rubber-bands
                    // with Shift held.
                    if stage >= settings.required_stage() || options.proportional_scaling {
                        Manipulation::AreaDragging {
                            begin,
                            current: view,
                            options,
                            stage,
                        }
                    } else {
                        Manipulation::Forbidden { side }
                    }
                }
                DragKind::Scene => Manipulation::SceneDragging {
                    side,
                    begin,
                    last: begin,
                },
                DragKind::Annotator => {
                    match grab_annotator(&index, &viewport.spaces, begin) {
                        Some((original, handle)) => Manipulation::AnnotatorDragging {
                            begin,
                            current: view,
                            options,
                            target: original.id,
                            handle,
                            preview: original.kind.clone(),
                            original,
                        },
                        None => Manipulation::Forbidden { side },
                    }
                }
                DragKind::Forbidden => Manipulation::Forbidden { side },
            };
            state.escalate(next);
        }
        Manipulation::AreaDragging { begin, stage, .. } => {
            *state.manipulation_mut() = Manipulation::AreaDragging {
                begin,
                current: view,
                options,
                stage,
            };
        }
        Manipulation::AnnotatorDragging {
            begin,
            target,
            handle,
            original,
            ..
        } => {
            let preview = drag_preview(&viewport.spaces, &original, handle, begin, view, options);
            *state.manipulation_mut() = Manipulation::AnnotatorDragging {
                begin,
                current: view,
                options,
                target,
                handle,
                original,
                preview,
            };
        }
        Manipulation::SceneDragging { side, begin, last } => {
            viewport.pan_by(view - last);
            *state.manipulation_mut() = Manipulation::SceneDragging {
                side,
                begin,
                last: view,
            };
        }
        Manipulation::Idle | Manipulation::Forbidden { .. } => {}
    }
}

/// Topmost overlay hit at a view point, with the grabbed handle. Only
/// selected overlays expose resize handles; unselected ones are grabbed
/// whole.
fn grab_annotator(
    index: &AnnotatorIndex,
    spaces: &SceneSpaces,
    point: Vec2,
) -> Option<(ContentItem, DragHandle)> {
    let mut annotators: Vec<_> = index.iter_ordered().collect();
    annotators.sort_by_key(|a| std::cmp::Reverse(a.z));
    for annotator in annotators {
        if let Some(handle) = overlay::hit_test(&annotator.item, spaces, point) {
            let handle = if annotator.selected { handle } else { DragHandle::Move };
            return Some((annotator.item.clone(), handle));
        }
    }
    None
}

/// Uncommitted geometry for an annotator drag in progress.
fn drag_preview(
    spaces: &SceneSpaces,
    original: &ContentItem,
    handle: DragHandle,
    begin: Vec2,
    current: Vec2,
    options: ManipulationOptions,
) -> ItemKind {
    let begin_pixel = spaces.wrapper_to_pixel(spaces.view_to_wrapper(begin));
    let pointer = spaces.wrapper_to_pixel(spaces.view_to_wrapper(current));
    match (&original.kind, handle) {
        (ItemKind::Point { coordinate, color }, _) => ItemKind::Point {
            coordinate: coordinate
                .offset_by(pointer.x - begin_pixel.x, pointer.y - begin_pixel.y),
            color: *color,
        },
        (ItemKind::Area { rect }, DragHandle::Move) => ItemKind::Area {
            rect: rect.offset_by(pointer.x - begin_pixel.x, pointer.y - begin_pixel.y),
        },
        (ItemKind::Area { rect }, handle) => ItemKind::Area {
            rect: resize_area(*rect, handle, pointer, options),
        },
    }
}

pub fn handle_pointer_up(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    settings: Res<InteractionSettings>,
    current_tool: Res<CurrentTool>,
    mut content: ResMut<SceneContent>,
    mut viewport: ResMut<SceneViewport>,
    mut state: ResMut<SceneState>,
    mut changes: MessageWriter<ContentChange>,
) {
    let released = match state.manipulation().side() {
        Some(InputSide::Primary) => mouse.just_released(MouseButton::Left),
        Some(InputSide::Secondary) => mouse.just_released(MouseButton::Right),
        None => false,
    };
    if !released {
        return;
    }
    let Ok(window) = window_query.single() else {
        state.reset();
        return;
    };
    let release = view_cursor(window, &viewport.spaces)
        .or_else(|| state.begin_location())
        .unwrap_or_default();

    let alt = keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
    let command = keyboard.pressed(KeyCode::SuperLeft)
        || keyboard.pressed(KeyCode::SuperRight)
        || keyboard.pressed(KeyCode::ControlLeft)
        || keyboard.pressed(KeyCode::ControlRight);

    let manipulation = state.manipulation().clone();
    state.reset();

    let spaces = viewport.spaces.clone();
    let ctx = GestureContext {
        tool: current_tool.tool,
        settings: &settings,
        spaces: &spaces,
        alt,
        command,
    };
    let items = content.port().items().to_vec();
    let (emitted, viewport_command) =
        commit_gesture(&manipulation, release, &ctx, &items, content.port_mut());
    for change in emitted {
        changes.write(change);
    }
    match viewport_command {
        ViewportCommand::None => {}
        ViewportCommand::ZoomIn { anchor } => {
            if let Some(step) = viewport.next_ladder_step() {
                viewport.begin_zoom(step, Some(anchor));
            }
        }
        ViewportCommand::ZoomOut { anchor } => {
            if let Some(step) = viewport.prev_ladder_step() {
                viewport.begin_zoom(step, Some(anchor));
            }
        }
        ViewportCommand::MagnifyToFit(rect) => {
            let world = viewport.spaces.pixel_rect_to_wrapper(rect);
            viewport.begin_magnify_to_fit(world);
        }
    }
}

/// Commit one finished gesture. The single place content mutations come
/// from; everything before this was preview-only.
pub fn commit_gesture(
    manipulation: &Manipulation,
    release: Vec2,
    ctx: &GestureContext,
    items: &[ContentItem],
    port: &mut (dyn ContentPort + Send + Sync),
) -> (Vec<ContentChange>, ViewportCommand) {
    match manipulation {
        Manipulation::Idle | Manipulation::Forbidden { .. } => (Vec::new(), ViewportCommand::None),
        Manipulation::Generic { side, begin, .. } => match side {
            InputSide::Primary => commit_click(*begin, ctx, items, port),
            InputSide::Secondary => commit_secondary_click(*begin, ctx, items, port),
        },
        Manipulation::AreaDragging { begin, current, .. } => {
            // Releasing off the canvas abandons the rubber band.
            if !ctx.spaces.view_contains(release) {
                return (Vec::new(), ViewportCommand::None);
            }
            let span = (*current - *begin).abs();
            if span.x < MIN_RECOGNIZABLE_AREA_SIZE && span.y < MIN_RECOGNIZABLE_AREA_SIZE {
                // Too small to mean an area; fall back to the click.
                return commit_click(*begin, ctx, items, port);
            }
            let wrapper = Rect::from_corners(
                ctx.spaces.view_to_wrapper(*begin),
                ctx.spaces.view_to_wrapper(*current),
            );
            let rect = ctx.spaces.wrapper_rect_to_pixel_wrapping(wrapper);
            match effective_tool(ctx.tool, ctx.alt) {
                SceneTool::Annotate => (
                    port.add_area(rect).into_iter().collect(),
                    ViewportCommand::None,
                ),
                _ => (Vec::new(), ViewportCommand::MagnifyToFit(rect)),
            }
        }
        Manipulation::AnnotatorDragging { target, preview, .. } => {
            // Releasing off the canvas abandons the drag.
            if !ctx.spaces.view_contains(release) {
                return (Vec::new(), ViewportCommand::None);
            }
            let change = match preview {
                ItemKind::Point { coordinate, .. } => port.update_point(*target, *coordinate),
                ItemKind::Area { rect } => port.update_area(*target, *rect),
            };
            (change.into_iter().collect(), ViewportCommand::None)
        }
        // Panning already happened live and mutates nothing.
        Manipulation::SceneDragging { .. } => (Vec::new(), ViewportCommand::None),
    }
}

fn commit_click(
    begin: Vec2,
    ctx: &GestureContext,
    items: &[ContentItem],
    port: &mut (dyn ContentPort + Send + Sync),
) -> (Vec<ContentChange>, ViewportCommand) {
    let pixel = ctx.spaces.wrapper_to_pixel(ctx.spaces.view_to_wrapper(begin));
    match effective_tool(ctx.tool, ctx.alt) {
        SceneTool::Annotate => (
            port.add_point(pixel).into_iter().collect(),
            ViewportCommand::None,
        ),
        SceneTool::ZoomIn => (Vec::new(), ViewportCommand::ZoomIn { anchor: begin }),
        SceneTool::ZoomOut => (Vec::new(), ViewportCommand::ZoomOut { anchor: begin }),
        SceneTool::Move => (Vec::new(), ViewportCommand::None),
        SceneTool::Select => {
            let ordered = candidates_at(items, pixel, ctx.settings.overlap_ordering);
            let change = if ordered.is_empty() {
                port.deselect_all()
            } else if ctx.alt {
                // Cycle through the stack under the cursor.
                let current = port.focused_id().filter(|id| ordered.contains(id));
                match cycle_next(&ordered, current) {
                    Some(next) => port.select(&[next], false, Some(next)),
                    None => None,
                }
            } else if ctx.command {
                // Take the whole stack, keeping what was selected.
                port.select(&ordered, true, Some(ordered[0]))
            } else {
                port.select(&[ordered[0]], false, Some(ordered[0]))
            };
            (change.into_iter().collect(), ViewportCommand::None)
        }
    }
}

fn commit_secondary_click(
    begin: Vec2,
    ctx: &GestureContext,
    items: &[ContentItem],
    port: &mut (dyn ContentPort + Send + Sync),
) -> (Vec<ContentChange>, ViewportCommand) {
    let pixel = ctx.spaces.wrapper_to_pixel(ctx.spaces.view_to_wrapper(begin));
    let ordered = candidates_at(items, pixel, ctx.settings.overlap_ordering);
    let change = match ordered.first() {
        Some(top) => port.delete(*top),
        None => port.deselect_all(),
    };
    (change.into_iter().collect(), ViewportCommand::None)
}

/// Abort the active gesture when the window loses focus. The manipulation
/// holds all in-flight state, so dropping it discards the gesture whole.
pub fn handle_window_resign(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<SceneState>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    if !window.focused && !state.is_idle() {
        debug!("Window resigned key; aborting gesture");
        state.reset();
    }
}

/// Keep [`TrackedPixel`] on the pixel under the pointer.
pub fn track_pointer(
    window_query: Query<&Window, With<PrimaryWindow>>,
    viewport: Res<SceneViewport>,
    mut tracked: ResMut<TrackedPixel>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    tracked.coordinate = view_cursor(window, &viewport.spaces)
        .filter(|view| viewport.spaces.view_contains(*view))
        .map(|view| {
            viewport
                .spaces
                .wrapper_to_pixel(viewport.spaces.view_to_wrapper(view))
        })
        .filter(|pixel| viewport.spaces.pixel_in_bounds(*pixel));
}
