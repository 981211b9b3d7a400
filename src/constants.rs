//! Application-wide constants.

/// Default window size on first launch.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Ruler thickness in points.
pub const RULER_THICKNESS: f32 = 16.0;
/// Extra strip reserved next to the rulers for marker glyphs.
pub const RESERVED_THICKNESS_FOR_MARKERS: f32 = 15.0;
/// Total inset the rulers take from the view's left and top edges.
pub const RULER_INSET: f32 = RULER_THICKNESS + RESERVED_THICKNESS_FOR_MARKERS;

/// Magnification bounds.
pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 128.0;

/// Discrete magnification steps for the zoom tools.
pub const ZOOM_LADDER: [f32; 17] = [
    0.25, 0.333, 0.5, 0.667, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 12.0, 16.0, 32.0, 64.0, 128.0,
];

/// Pointer travel in view points before a press becomes a drag.
pub const MIN_DRAG_DISTANCE: f32 = 3.0;
/// Raised threshold while pressure gating is enabled.
pub const MIN_DRAG_DISTANCE_FORCE: f32 = 6.0;

/// A dragged-out area smaller than this on both view axes is treated as a
/// click rather than an area gesture.
pub const MIN_RECOGNIZABLE_AREA_SIZE: f32 = 10.0;

/// Overlay resize handle radius in view points.
pub const OVERLAY_HANDLE_RADIUS: f32 = 3.67;
/// Overlay border stroke width in view points.
pub const OVERLAY_BORDER_WIDTH: f32 = 1.0;
/// Outer inset an overlay frame grows by beyond its item's bounds, so the
/// handles stay clickable.
pub const OVERLAY_OUTER_INSET: f32 = OVERLAY_HANDLE_RADIUS + OVERLAY_BORDER_WIDTH;

/// An overlay whose tracked bounds shrink below this size on either view
/// axis collapses to a fixed-size badge.
pub const OVERLAY_BADGE_THRESHOLD: f32 = 16.0;
/// Side length of the fixed badge.
pub const OVERLAY_BADGE_SIZE: f32 = 16.0;

/// Duration of animated viewport changes.
pub const VIEWPORT_ANIMATION_SECS: f32 = 0.2;

/// A keyboard nudge of `distance` pixels is only accepted when
/// `magnification * distance` reaches this product, so single-pixel moves
/// are not thrown away at far-out zoom levels.
pub const MIN_NUDGE_VIEW_DISTANCE: f32 = 10.0;

/// Fallback document size before any image is opened.
pub const DEFAULT_IMAGE_WIDTH: i32 = 1024;
pub const DEFAULT_IMAGE_HEIGHT: i32 = 768;
