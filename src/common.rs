//! Common types shared across multiple modules.

use bevy::window::{CursorIcon, SystemCursorIcon};

use crate::geometry::{PixelCoordinate, PixelRect};

/// Which part of an overlay a drag grabs.
///
/// Compass directions are in pixel space: north is the minimum pixel y,
/// the top edge of the image.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragHandle {
    #[default]
    None,
    Move,
    ResizeN,
    ResizeS,
    ResizeE,
    ResizeW,
    ResizeNE,
    ResizeNW,
    ResizeSE,
    ResizeSW,
}

impl DragHandle {
    /// Get the appropriate cursor icon for this handle.
    pub fn cursor_icon(&self) -> Option<CursorIcon> {
        match self {
            DragHandle::None => None,
            DragHandle::Move => Some(CursorIcon::System(SystemCursorIcon::Move)),
            DragHandle::ResizeN | DragHandle::ResizeS => {
                Some(CursorIcon::System(SystemCursorIcon::NsResize))
            }
            DragHandle::ResizeE | DragHandle::ResizeW => {
                Some(CursorIcon::System(SystemCursorIcon::EwResize))
            }
            DragHandle::ResizeNE | DragHandle::ResizeSW => {
                Some(CursorIcon::System(SystemCursorIcon::NeswResize))
            }
            DragHandle::ResizeNW | DragHandle::ResizeSE => {
                Some(CursorIcon::System(SystemCursorIcon::NwseResize))
            }
        }
    }

    pub fn is_resize(&self) -> bool {
        !matches!(self, DragHandle::None | DragHandle::Move)
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            DragHandle::ResizeNE
                | DragHandle::ResizeNW
                | DragHandle::ResizeSE
                | DragHandle::ResizeSW
        )
    }

    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            DragHandle::ResizeN | DragHandle::ResizeS | DragHandle::ResizeE | DragHandle::ResizeW
        )
    }

    /// The corner of `rect` this handle grabs, for corner handles.
    pub fn grabbed_corner(&self, rect: PixelRect) -> Option<PixelCoordinate> {
        match self {
            DragHandle::ResizeNW => Some(PixelCoordinate::new(rect.min_x(), rect.min_y())),
            DragHandle::ResizeNE => Some(PixelCoordinate::new(rect.max_x(), rect.min_y())),
            DragHandle::ResizeSW => Some(PixelCoordinate::new(rect.min_x(), rect.max_y())),
            DragHandle::ResizeSE => Some(PixelCoordinate::new(rect.max_x(), rect.max_y())),
            _ => None,
        }
    }

    /// The corner of `rect` diagonally opposite this handle. It stays fixed
    /// in a plain corner resize.
    pub fn anchor_corner(&self, rect: PixelRect) -> Option<PixelCoordinate> {
        match self {
            DragHandle::ResizeNW => Some(PixelCoordinate::new(rect.max_x(), rect.max_y())),
            DragHandle::ResizeNE => Some(PixelCoordinate::new(rect.min_x(), rect.max_y())),
            DragHandle::ResizeSW => Some(PixelCoordinate::new(rect.max_x(), rect.min_y())),
            DragHandle::ResizeSE => Some(PixelCoordinate::new(rect.min_x(), rect.min_y())),
            _ => None,
        }
    }
}
