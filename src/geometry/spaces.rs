//! The nested coordinate spaces of the scene, outer to inner:
//!
//! - **Screen**: OS screen points, y-down.
//! - **Window**: points relative to the window's top-left corner, y-down.
//!   This is the space Bevy reports cursor positions in.
//! - **View**: the scroll area content, window space minus the ruler inset.
//!   The inset is an explicit constant added and subtracted here, never
//!   baked into a transform, so toggling the rulers is a single field.
//! - **Wrapper**: continuous document space, y-up, one unit per image
//!   pixel. This is also Bevy world space, so gizmos draw in it directly.
//!   The y-flip of the chain happens between view and wrapper.
//! - **Pixel**: integer image pixels, y-down from the image's top-left.
//!
//! Every conversion is pure and composes with its inverse within floating
//! tolerance for any point inside the visible region.

use bevy::prelude::*;

use super::{PixelCoordinate, PixelRect, PixelSize};

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpaces {
    /// Window top-left in screen coordinates.
    pub window_origin: Vec2,
    /// Window client size in points, rulers included.
    pub view_size: Vec2,
    /// Thickness reserved for the rulers at the left and top edges.
    /// Zero when rulers are hidden.
    pub ruler_inset: f32,
    /// Wrapper units per view point.
    pub magnification: f32,
    /// Wrapper coordinates of the bottom-left visible corner.
    pub visible_origin: Vec2,
    /// Document dimensions in pixels.
    pub image_size: PixelSize,
}

impl SceneSpaces {
    pub fn new(image_size: PixelSize) -> Self {
        Self {
            window_origin: Vec2::ZERO,
            view_size: Vec2::new(1280.0, 800.0),
            ruler_inset: 0.0,
            magnification: 1.0,
            visible_origin: Vec2::ZERO,
            image_size,
        }
    }

    /// View area size in points, rulers excluded.
    pub fn content_size(&self) -> Vec2 {
        (self.view_size - Vec2::splat(self.ruler_inset)).max(Vec2::ONE)
    }

    /// Size of the visible region in wrapper units.
    pub fn visible_wrapper_size(&self) -> Vec2 {
        self.content_size() / self.magnification
    }

    /// Visible region in wrapper space.
    pub fn visible_wrapper_rect(&self) -> Rect {
        Rect::from_corners(
            self.visible_origin,
            self.visible_origin + self.visible_wrapper_size(),
        )
    }

    /// Full document bounds in wrapper space.
    pub fn wrapper_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.image_size.width as f32,
            self.image_size.height as f32,
        )
    }

    // Screen <-> window

    pub fn screen_to_window(&self, p: Vec2) -> Vec2 {
        p - self.window_origin
    }

    pub fn window_to_screen(&self, p: Vec2) -> Vec2 {
        p + self.window_origin
    }

    // Window <-> view

    pub fn window_to_view(&self, p: Vec2) -> Vec2 {
        p - Vec2::splat(self.ruler_inset)
    }

    pub fn view_to_window(&self, p: Vec2) -> Vec2 {
        p + Vec2::splat(self.ruler_inset)
    }

    /// Whether a view point lies inside the tracked content area
    /// (the visible rect excluding the rulers).
    pub fn view_contains(&self, p: Vec2) -> bool {
        let size = self.content_size();
        p.x >= 0.0 && p.y >= 0.0 && p.x < size.x && p.y < size.y
    }

    // View <-> wrapper (the y-flip)

    pub fn view_to_wrapper(&self, p: Vec2) -> Vec2 {
        let visible = self.visible_wrapper_size();
        Vec2::new(
            self.visible_origin.x + p.x / self.magnification,
            self.visible_origin.y + visible.y - p.y / self.magnification,
        )
    }

    pub fn wrapper_to_view(&self, p: Vec2) -> Vec2 {
        let visible = self.visible_wrapper_size();
        Vec2::new(
            (p.x - self.visible_origin.x) * self.magnification,
            (visible.y - (p.y - self.visible_origin.y)) * self.magnification,
        )
    }

    pub fn wrapper_rect_to_view(&self, rect: Rect) -> Rect {
        let a = self.wrapper_to_view(rect.min);
        let b = self.wrapper_to_view(rect.max);
        Rect::from_corners(a, b)
    }

    pub fn view_rect_to_wrapper(&self, rect: Rect) -> Rect {
        let a = self.view_to_wrapper(rect.min);
        let b = self.view_to_wrapper(rect.max);
        Rect::from_corners(a, b)
    }

    pub fn window_to_wrapper(&self, p: Vec2) -> Vec2 {
        self.view_to_wrapper(self.window_to_view(p))
    }

    // Wrapper <-> pixel

    /// The pixel a wrapper point falls in.
    pub fn wrapper_to_pixel(&self, p: Vec2) -> PixelCoordinate {
        PixelCoordinate::new(
            p.x.floor() as i32,
            (self.image_size.height as f32 - p.y).floor() as i32,
        )
    }

    /// Wrapper coordinates of a pixel's center.
    pub fn pixel_center_to_wrapper(&self, c: PixelCoordinate) -> Vec2 {
        Vec2::new(
            c.x as f32 + 0.5,
            self.image_size.height as f32 - c.y as f32 - 0.5,
        )
    }

    pub fn pixel_rect_to_wrapper(&self, rect: PixelRect) -> Rect {
        let h = self.image_size.height as f32;
        Rect::new(
            rect.min_x() as f32,
            h - rect.max_y() as f32,
            rect.max_x() as f32,
            h - rect.min_y() as f32,
        )
    }

    /// Smallest pixel rect enclosing a wrapper-space rect.
    pub fn wrapper_rect_to_pixel_wrapping(&self, rect: Rect) -> PixelRect {
        PixelRect::wrapping(self.flip_wrapper_rect(rect))
    }

    /// Largest pixel rect enclosed by a wrapper-space rect.
    pub fn wrapper_rect_to_pixel_wrapped(&self, rect: Rect) -> PixelRect {
        PixelRect::wrapped(self.flip_wrapper_rect(rect))
    }

    /// Whether a pixel coordinate lies within the document.
    pub fn pixel_in_bounds(&self, c: PixelCoordinate) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.image_size.width && c.y < self.image_size.height
    }

    // Wrapper rect (y-up) to continuous pixel rect (y-down).
    fn flip_wrapper_rect(&self, rect: Rect) -> Rect {
        let h = self.image_size.height as f32;
        Rect::new(rect.min.x, h - rect.max.y, rect.max.x, h - rect.min.y)
    }
}
