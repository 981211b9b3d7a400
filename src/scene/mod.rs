//! Scene interaction: tools, gesture state machine, viewport, pointer
//! systems, and keyboard nudging.

pub mod nudge;
pub mod pointer;
pub mod resize;
pub mod state;
pub mod tools;
pub mod viewport;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use pointer::{PressureChange, TrackedPixel};
use state::SceneState;
use tools::CurrentTool;
use viewport::SceneViewport;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneState>()
            .init_resource::<SceneViewport>()
            .init_resource::<CurrentTool>()
            .init_resource::<TrackedPixel>()
            .add_message::<PressureChange>()
            .add_systems(Startup, viewport::spawn_scene_camera)
            .add_systems(
                Update,
                (
                    viewport::sync_viewport_with_window,
                    tools::handle_tool_shortcuts,
                    pointer::handle_window_resign,
                    pointer::handle_pressure_change,
                    pointer::handle_pointer_down,
                    pointer::handle_pointer_drag,
                    pointer::handle_pointer_up,
                    pointer::track_pointer,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    nudge::handle_keyboard_nudge,
                    nudge::handle_keyboard_submit,
                    viewport::scroll_wheel_pan,
                    viewport::advance_viewport_animation,
                    tools::update_cursor_icon,
                )
                    .after(pointer::handle_pointer_up),
            )
            .add_systems(PostUpdate, viewport::apply_viewport_to_camera);
    }
}
