//! View-space overlay frames and handle hit testing.
//!
//! An overlay either tracks its item's pixel bounds or, once those bounds
//! get too small on screen to grab, collapses into a fixed-size badge
//! centered over the item.

use bevy::prelude::*;

use crate::common::DragHandle;
use crate::constants::{
    OVERLAY_BADGE_SIZE, OVERLAY_BADGE_THRESHOLD, OVERLAY_HANDLE_RADIUS, OVERLAY_OUTER_INSET,
};
use crate::content::{ContentItem, ItemKind};
use crate::geometry::spaces::SceneSpaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStyle {
    /// The frame follows the item's bounds, with resize handles.
    TracksBounds,
    /// A fixed badge centered on the item; move only.
    FixedBadge,
}

/// View-space frame and style for an item's overlay.
pub fn overlay_frame(item: &ContentItem, spaces: &SceneSpaces) -> (Rect, RevealStyle) {
    match &item.kind {
        ItemKind::Point { coordinate, .. } => {
            let center = spaces.wrapper_to_view(spaces.pixel_center_to_wrapper(*coordinate));
            (badge_at(center), RevealStyle::FixedBadge)
        }
        ItemKind::Area { rect } => {
            let view = spaces.wrapper_rect_to_view(spaces.pixel_rect_to_wrapper(*rect));
            if view.width() < OVERLAY_BADGE_THRESHOLD || view.height() < OVERLAY_BADGE_THRESHOLD {
                (badge_at(view.center()), RevealStyle::FixedBadge)
            } else {
                (view.inflate(OVERLAY_OUTER_INSET), RevealStyle::TracksBounds)
            }
        }
    }
}

fn badge_at(center: Vec2) -> Rect {
    Rect::from_center_size(center, Vec2::splat(OVERLAY_BADGE_SIZE))
}

/// The eight handle centers of a tracking frame, with their drag roles.
/// View space is y-down, so north (minimum pixel y) is the frame's min y.
pub fn handle_positions(frame: Rect) -> [(DragHandle, Vec2); 8] {
    let center = frame.center();
    [
        (DragHandle::ResizeNW, frame.min),
        (DragHandle::ResizeN, Vec2::new(center.x, frame.min.y)),
        (DragHandle::ResizeNE, Vec2::new(frame.max.x, frame.min.y)),
        (DragHandle::ResizeW, Vec2::new(frame.min.x, center.y)),
        (DragHandle::ResizeE, Vec2::new(frame.max.x, center.y)),
        (DragHandle::ResizeSW, Vec2::new(frame.min.x, frame.max.y)),
        (DragHandle::ResizeS, Vec2::new(center.x, frame.max.y)),
        (DragHandle::ResizeSE, frame.max),
    ]
}

/// What a press at `point` (view space) grabs on this item's overlay.
pub fn hit_test(item: &ContentItem, spaces: &SceneSpaces, point: Vec2) -> Option<DragHandle> {
    let (frame, style) = overlay_frame(item, spaces);
    match style {
        RevealStyle::FixedBadge => frame.contains(point).then_some(DragHandle::Move),
        RevealStyle::TracksBounds => {
            // Handles are small; give them twice their radius to grab.
            let grab = OVERLAY_HANDLE_RADIUS * 2.0;
            for (handle, position) in handle_positions(frame) {
                if point.distance(position) <= grab {
                    return Some(handle);
                }
            }
            frame.contains(point).then_some(DragHandle::Move)
        }
    }
}
