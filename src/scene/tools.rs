use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use super::state::{InputSide, SceneState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneTool {
    #[default]
    Select,
    Annotate,
    ZoomIn,
    ZoomOut,
    Move,
}

impl SceneTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            SceneTool::Select => "Select (V)",
            SceneTool::Annotate => "Annotate (A)",
            SceneTool::ZoomIn => "Zoom In (Z)",
            SceneTool::ZoomOut => "Zoom Out (X)",
            SceneTool::Move => "Move (M)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            SceneTool::Select => CursorIcon::System(SystemCursorIcon::Default),
            SceneTool::Annotate => CursorIcon::System(SystemCursorIcon::Crosshair),
            SceneTool::ZoomIn => CursorIcon::System(SystemCursorIcon::ZoomIn),
            SceneTool::ZoomOut => CursorIcon::System(SystemCursorIcon::ZoomOut),
            SceneTool::Move => CursorIcon::System(SystemCursorIcon::Grab),
        }
    }

    pub fn all() -> &'static [SceneTool] {
        &[
            SceneTool::Select,
            SceneTool::Annotate,
            SceneTool::ZoomIn,
            SceneTool::ZoomOut,
            SceneTool::Move,
        ]
    }
}

/// Holding Alt swaps the zoom tools, as a temporary flip rather than a
/// tool change.
pub fn effective_tool(tool: SceneTool, alt_held: bool) -> SceneTool {
    if !alt_held {
        return tool;
    }
    match tool {
        SceneTool::ZoomIn => SceneTool::ZoomOut,
        SceneTool::ZoomOut => SceneTool::ZoomIn,
        other => other,
    }
}

/// What a drag with the active tool turns into once it passes the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Area,
    Scene,
    Annotator,
    Forbidden,
}

pub fn drag_kind(tool: SceneTool, side: InputSide) -> DragKind {
    match side {
        InputSide::Secondary => DragKind::Scene,
        InputSide::Primary => match tool {
            SceneTool::Annotate | SceneTool::ZoomIn => DragKind::Area,
            SceneTool::Move => DragKind::Scene,
            SceneTool::Select => DragKind::Annotator,
            SceneTool::ZoomOut => DragKind::Forbidden,
        },
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: SceneTool,
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    state: Res<SceneState>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    // Tool switches mid-gesture would change what the release commits.
    if !state.is_idle() {
        return;
    }

    let new_tool = if keyboard.just_pressed(KeyCode::KeyV) {
        Some(SceneTool::Select)
    } else if keyboard.just_pressed(KeyCode::KeyA) {
        Some(SceneTool::Annotate)
    } else if keyboard.just_pressed(KeyCode::KeyZ) {
        Some(SceneTool::ZoomIn)
    } else if keyboard.just_pressed(KeyCode::KeyX) {
        Some(SceneTool::ZoomOut)
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        Some(SceneTool::Move)
    } else {
        None
    };

    if let Some(tool) = new_tool {
        current_tool.tool = tool;
    }
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<SceneState>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI, tool cursor in scene space
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let icon = match state.manipulation() {
        super::state::Manipulation::SceneDragging { .. } => {
            CursorIcon::System(SystemCursorIcon::Grabbing)
        }
        super::state::Manipulation::AnnotatorDragging { handle, .. } => handle
            .cursor_icon()
            .unwrap_or_else(|| current_tool.tool.cursor_icon()),
        _ => {
            let alt =
                keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
            effective_tool(current_tool.tool, alt).cursor_icon()
        }
    };
    commands.entity(entity).insert(icon);
}
