//! The gesture state machine.
//!
//! One manipulation is in flight at a time, held in [`SceneState`]. A press
//! enters `Generic`; pointer travel past the drag threshold escalates it
//! into one of the dragging variants, and escalation is one-way: a
//! manipulation can only move to a strictly higher level until the pointer
//! is released or the gesture aborts, both of which reset to `Idle`.
//!
//! Everything a drag needs to commit (the grabbed item, its original
//! geometry, the live preview) lives inside the variant, so an abort drops
//! the whole gesture on the floor by construction.

use bevy::prelude::*;

use crate::common::DragHandle;
use crate::content::{ContentItem, ItemId, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    Primary,
    Secondary,
}

/// Modifier-driven scaling behavior, sampled each frame during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManipulationOptions {
    pub proportional_scaling: bool,
    pub centered_scaling: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Manipulation {
    #[default]
    Idle,
    /// A press that will never become a meaningful drag. Swallows all
    /// further motion until release.
    Forbidden { side: InputSide },
    /// Pressed, not yet past the drag threshold. `begin` is in view space.
    Generic {
        side: InputSide,
        begin: Vec2,
        stage: u8,
    },
    /// Rubber-banding out a new area. `begin`/`current` are in view space.
    AreaDragging {
        begin: Vec2,
        current: Vec2,
        options: ManipulationOptions,
        stage: u8,
    },
    /// Moving or resizing an existing annotation. `original` is the item
    /// as it was at press time; `preview` is the uncommitted geometry.
    AnnotatorDragging {
        begin: Vec2,
        current: Vec2,
        options: ManipulationOptions,
        target: ItemId,
        handle: DragHandle,
        original: ContentItem,
        preview: ItemKind,
    },
    /// Panning the viewport. `last` is the previous frame's view position.
    SceneDragging {
        side: InputSide,
        begin: Vec2,
        last: Vec2,
    },
}

impl Manipulation {
    /// Escalation level. Transitions must strictly increase it.
    pub fn level(&self) -> u8 {
        match self {
            Manipulation::Idle => 0,
            Manipulation::Generic { .. } => 1,
            Manipulation::AreaDragging { .. } => 2,
            Manipulation::AnnotatorDragging { .. } => 3,
            Manipulation::SceneDragging { .. } => 4,
            Manipulation::Forbidden { .. } => u8::MAX,
        }
    }

    pub fn side(&self) -> Option<InputSide> {
        match self {
            Manipulation::Idle => None,
            Manipulation::Forbidden { side } => Some(*side),
            Manipulation::Generic { side, .. } => Some(*side),
            Manipulation::SceneDragging { side, .. } => Some(*side),
            Manipulation::AreaDragging { .. } | Manipulation::AnnotatorDragging { .. } => {
                Some(InputSide::Primary)
            }
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct SceneState {
    manipulation: Manipulation,
}

impl SceneState {
    pub fn manipulation(&self) -> &Manipulation {
        &self.manipulation
    }

    pub fn manipulation_mut(&mut self) -> &mut Manipulation {
        &mut self.manipulation
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.manipulation, Manipulation::Idle)
    }

    pub fn level(&self) -> u8 {
        self.manipulation.level()
    }

    /// Reads 0 outside a gesture instead of carrying a stale value over.
    pub fn stage(&self) -> u8 {
        match &self.manipulation {
            Manipulation::Generic { stage, .. } => *stage,
            Manipulation::AreaDragging { stage, .. } => *stage,
            _ => 0,
        }
    }

    /// View-space location the active gesture started at.
    pub fn begin_location(&self) -> Option<Vec2> {
        match &self.manipulation {
            Manipulation::Idle | Manipulation::Forbidden { .. } => None,
            Manipulation::Generic { begin, .. } => Some(*begin),
            Manipulation::AreaDragging { begin, .. } => Some(*begin),
            Manipulation::AnnotatorDragging { begin, .. } => Some(*begin),
            Manipulation::SceneDragging { begin, .. } => Some(*begin),
        }
    }

    /// Start a gesture. Ignored unless idle, so a second button pressed
    /// mid-gesture cannot hijack the manipulation.
    pub fn begin(&mut self, side: InputSide, location: Vec2) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.manipulation = Manipulation::Generic {
            side,
            begin: location,
            stage: 0,
        };
        true
    }

    /// Replace the manipulation with a strictly higher-level one.
    pub fn escalate(&mut self, next: Manipulation) -> bool {
        if next.level() <= self.manipulation.level() {
            return false;
        }
        self.manipulation = next;
        true
    }

    /// Raise the pressure stage of the active gesture. Stages never drop
    /// within a gesture.
    pub fn raise_stage(&mut self, new_stage: u8) {
        match &mut self.manipulation {
            Manipulation::Generic { stage, .. } | Manipulation::AreaDragging { stage, .. } => {
                *stage = (*stage).max(new_stage);
            }
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.manipulation = Manipulation::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_from_idle() {
        let mut state = SceneState::default();
        assert!(state.begin(InputSide::Primary, Vec2::new(5.0, 5.0)));
        assert!(!state.begin(InputSide::Secondary, Vec2::new(9.0, 9.0)));
        assert_eq!(state.manipulation().side(), Some(InputSide::Primary));
        assert_eq!(state.begin_location(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_escalation_never_downgrades() {
        let mut state = SceneState::default();
        state.begin(InputSide::Primary, Vec2::ZERO);
        assert!(state.escalate(Manipulation::AreaDragging {
            begin: Vec2::ZERO,
            current: Vec2::ZERO,
            options: ManipulationOptions::default(),
            stage: 0,
        }));
        // Back to Generic is refused.
        assert!(!state.escalate(Manipulation::Generic {
            side: InputSide::Primary,
            begin: Vec2::ZERO,
            stage: 0,
        }));
        // Sideways to the same level is refused too.
        assert!(!state.escalate(Manipulation::AreaDragging {
            begin: Vec2::ONE,
            current: Vec2::ONE,
            options: ManipulationOptions::default(),
            stage: 1,
        }));
        assert!(state.escalate(Manipulation::SceneDragging {
            side: InputSide::Primary,
            begin: Vec2::ZERO,
            last: Vec2::ZERO,
        }));
        assert_eq!(state.level(), 4);
    }

    #[test]
    fn test_forbidden_blocks_everything_until_reset() {
        let mut state = SceneState::default();
        state.begin(InputSide::Primary, Vec2::ZERO);
        assert!(state.escalate(Manipulation::Forbidden {
            side: InputSide::Primary,
        }));
        assert!(!state.escalate(Manipulation::SceneDragging {
            side: InputSide::Primary,
            begin: Vec2::ZERO,
            last: Vec2::ZERO,
        }));
        state.reset();
        assert!(state.is_idle());
        assert!(state.begin(InputSide::Primary, Vec2::ZERO));
    }

    #[test]
    fn test_stage_reads_zero_outside_gesture() {
        let mut state = SceneState::default();
        assert_eq!(state.stage(), 0);
        state.begin(InputSide::Primary, Vec2::ZERO);
        state.raise_stage(2);
        assert_eq!(state.stage(), 2);
        state.raise_stage(1);
        assert_eq!(state.stage(), 2);
        state.reset();
        assert_eq!(state.stage(), 0);
    }

    #[test]
    fn test_stage_survives_escalation_to_area() {
        let mut state = SceneState::default();
        state.begin(InputSide::Primary, Vec2::ZERO);
        state.raise_stage(1);
        let stage = state.stage();
        state.escalate(Manipulation::AreaDragging {
            begin: Vec2::ZERO,
            current: Vec2::ZERO,
            options: ManipulationOptions::default(),
            stage,
        });
        state.raise_stage(2);
        assert_eq!(state.stage(), 2);
    }
}
