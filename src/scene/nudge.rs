//! Keyboard nudging of the tracked pixel.
//!
//! Arrow keys move the tracked pixel cursor; Enter drops a point there.
//! Nudges are magnification-gated: a move whose on-screen travel would be
//! under [`MIN_NUDGE_VIEW_DISTANCE`] points is rejected rather than
//! silently rounded away.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::MIN_NUDGE_VIEW_DISTANCE;
use crate::content::{ContentChange, ContentPort, SceneContent};

use super::pointer::TrackedPixel;
use super::state::SceneState;
use super::tools::{CurrentTool, SceneTool};
use super::viewport::SceneViewport;

/// Pixels a nudge travels for the held modifiers.
pub fn nudge_distance(shift: bool, large: bool) -> i32 {
    if large {
        100
    } else if shift {
        10
    } else {
        1
    }
}

/// A nudge must be visible to be accepted.
pub fn nudge_allowed(magnification: f32, distance: i32) -> bool {
    magnification * distance as f32 >= MIN_NUDGE_VIEW_DISTANCE
}

pub fn handle_keyboard_nudge(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<SceneState>,
    mut viewport: ResMut<SceneViewport>,
    mut tracked: ResMut<TrackedPixel>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }
    if !state.is_idle() {
        return;
    }
    let Some(coordinate) = tracked.coordinate else {
        return;
    };

    let (dx, dy) = if keyboard.just_pressed(KeyCode::ArrowLeft) {
        (-1, 0)
    } else if keyboard.just_pressed(KeyCode::ArrowRight) {
        (1, 0)
    } else if keyboard.just_pressed(KeyCode::ArrowUp) {
        (0, -1)
    } else if keyboard.just_pressed(KeyCode::ArrowDown) {
        (0, 1)
    } else {
        return;
    };

    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    let large =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let distance = nudge_distance(shift, large);
    if !nudge_allowed(viewport.magnification(), distance) {
        debug!(
            "Nudge of {} px rejected at {:.2}x",
            distance,
            viewport.magnification()
        );
        return;
    }

    let moved = coordinate.offset_by(dx * distance, dy * distance);
    if !viewport.spaces.pixel_in_bounds(moved) {
        return;
    }
    tracked.coordinate = Some(moved);

    // Scroll the moved pixel into view if it left the visible region.
    let world = viewport.spaces.pixel_center_to_wrapper(moved);
    let visible = viewport.spaces.visible_wrapper_rect();
    if !visible.contains(world) {
        let view = viewport.spaces.wrapper_to_view(world);
        let content = viewport.spaces.content_size();
        let overshoot = Vec2::new(
            view.x.min(0.0) + (view.x - content.x).max(0.0),
            view.y.min(0.0) + (view.y - content.y).max(0.0),
        );
        viewport.pan_by(-overshoot);
    }
}

/// Enter drops a point annotation on the tracked pixel when the annotate
/// tool is active.
pub fn handle_keyboard_submit(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_tool: Res<CurrentTool>,
    state: Res<SceneState>,
    tracked: Res<TrackedPixel>,
    mut content: ResMut<SceneContent>,
    mut changes: MessageWriter<ContentChange>,
    mut contexts: EguiContexts,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }
    if !state.is_idle()
        || current_tool.tool != SceneTool::Annotate
        || !keyboard.just_pressed(KeyCode::Enter)
    {
        return;
    }
    let Some(coordinate) = tracked.coordinate else {
        return;
    };
    if let Some(change) = content.port_mut().add_point(coordinate) {
        changes.write(change);
    }
}
