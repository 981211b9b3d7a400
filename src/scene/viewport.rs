//! Viewport state: magnification, scroll position, and the camera that
//! realizes them.
//!
//! The viewport owns a [`SceneSpaces`] value; everything else reads its
//! conversions through here. Zoom changes run through a short timed
//! animation during which overlays are hidden, then snapped back in place
//! from fresh geometry.

use bevy::camera::visibility::RenderLayers;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::annotator::AnnotatorIndex;
use crate::config::InteractionSettings;
use crate::constants::{
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, MAX_ZOOM, MIN_ZOOM, RULER_INSET,
    VIEWPORT_ANIMATION_SECS, ZOOM_LADDER,
};
use crate::geometry::spaces::SceneSpaces;
use crate::geometry::PixelSize;

#[derive(Component)]
pub struct SceneCamera;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportAnimation {
    from_origin: Vec2,
    from_magnification: f32,
    to_origin: Vec2,
    to_magnification: f32,
    elapsed: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct SceneViewport {
    pub spaces: SceneSpaces,
    animation: Option<ViewportAnimation>,
}

impl Default for SceneViewport {
    fn default() -> Self {
        Self {
            spaces: SceneSpaces::new(PixelSize::new(DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT)),
            animation: None,
        }
    }
}

impl SceneViewport {
    pub fn magnification(&self) -> f32 {
        self.spaces.magnification
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// New document: show it at 1:1 from the top-left corner.
    pub fn reset_for_image(&mut self, size: PixelSize) {
        self.animation = None;
        self.spaces.image_size = size;
        self.spaces.magnification = 1.0;
        let visible = self.spaces.visible_wrapper_size();
        self.spaces.visible_origin = Vec2::new(0.0, size.height as f32 - visible.y);
        self.clamp_origin();
    }

    /// Scroll by a view-space delta (y-down). Interrupts any animation.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.snap_to_end();
        let m = self.spaces.magnification;
        self.spaces.visible_origin.x -= delta.x / m;
        self.spaces.visible_origin.y += delta.y / m;
        self.clamp_origin();
    }

    /// Next ladder step above the current magnification, if any.
    pub fn next_ladder_step(&self) -> Option<f32> {
        ZOOM_LADDER
            .iter()
            .copied()
            .find(|step| *step > self.magnification() + 1e-3)
    }

    /// Previous ladder step below the current magnification, if any.
    pub fn prev_ladder_step(&self) -> Option<f32> {
        ZOOM_LADDER
            .iter()
            .rev()
            .copied()
            .find(|step| *step < self.magnification() - 1e-3)
    }

    /// Animate to a magnification, keeping the wrapper point under
    /// `anchor` (view space) stationary on screen.
    pub fn begin_zoom(&mut self, to_magnification: f32, anchor: Option<Vec2>) {
        self.snap_to_end();
        let to_magnification = to_magnification.clamp(MIN_ZOOM, MAX_ZOOM);
        let anchor = anchor.unwrap_or_else(|| self.spaces.content_size() / 2.0);
        let fixed = self.spaces.view_to_wrapper(anchor);

        let content = self.spaces.content_size();
        let visible_after = content / to_magnification;
        let to_origin = Vec2::new(
            fixed.x - anchor.x / to_magnification,
            fixed.y - (visible_after.y - anchor.y / to_magnification),
        );
        self.start_animation(to_origin, to_magnification);
    }

    /// Animate so a wrapper-space rect fills the view.
    pub fn begin_magnify_to_fit(&mut self, rect: Rect) {
        self.snap_to_end();
        let size = rect.size().max(Vec2::ONE);
        let content = self.spaces.content_size();
        let to_magnification = (content.x / size.x).min(content.y / size.y).clamp(MIN_ZOOM, MAX_ZOOM);
        let visible_after = content / to_magnification;
        let to_origin = rect.center() - visible_after / 2.0;
        self.start_animation(to_origin, to_magnification);
    }

    fn start_animation(&mut self, to_origin: Vec2, to_magnification: f32) {
        let mut target = self.clone();
        target.spaces.magnification = to_magnification;
        target.spaces.visible_origin = to_origin;
        target.clamp_origin();

        self.animation = Some(ViewportAnimation {
            from_origin: self.spaces.visible_origin,
            from_magnification: self.spaces.magnification,
            to_origin: target.spaces.visible_origin,
            to_magnification,
            elapsed: 0.0,
        });
    }

    /// Advance the animation. Returns true while one is running.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(animation) = &mut self.animation else {
            return false;
        };
        animation.elapsed += dt;
        let t = (animation.elapsed / VIEWPORT_ANIMATION_SECS).min(1.0);
        // Ease-out quad.
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.spaces.magnification = animation.from_magnification
            + (animation.to_magnification - animation.from_magnification) * eased;
        self.spaces.visible_origin =
            animation.from_origin.lerp(animation.to_origin, eased);
        if t >= 1.0 {
            self.animation = None;
        }
        self.animation.is_some()
    }

    /// Jump an in-flight animation straight to its end state.
    pub fn snap_to_end(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.spaces.magnification = animation.to_magnification;
            self.spaces.visible_origin = animation.to_origin;
        }
    }

    /// Keep at least half the view overlapping the document.
    fn clamp_origin(&mut self) {
        let visible = self.spaces.visible_wrapper_size();
        let image = Vec2::new(
            self.spaces.image_size.width as f32,
            self.spaces.image_size.height as f32,
        );
        let min = -visible / 2.0;
        let max = (image - visible / 2.0).max(min);
        self.spaces.visible_origin = self.spaces.visible_origin.clamp(min, max);
    }
}

pub fn spawn_scene_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        SceneCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
        RenderLayers::from_layers(&[0, 1]),
    ));
}

/// Track window size and ruler visibility into the conversion chain.
pub fn sync_viewport_with_window(
    window_query: Query<&Window, With<PrimaryWindow>>,
    settings: Res<InteractionSettings>,
    mut viewport: ResMut<SceneViewport>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    let inset = if settings.rulers_visible { RULER_INSET } else { 0.0 };
    if viewport.spaces.view_size != size || viewport.spaces.ruler_inset != inset {
        viewport.spaces.view_size = size;
        viewport.spaces.ruler_inset = inset;
        viewport.clamp_origin();
    }
}

/// Run the zoom animation; overlays stay hidden until it settles.
pub fn advance_viewport_animation(
    time: Res<Time>,
    mut viewport: ResMut<SceneViewport>,
    mut index: ResMut<AnnotatorIndex>,
) {
    if !viewport.is_animating() {
        return;
    }
    let still_running = viewport.tick(time.delta_secs());
    index.overlays_hidden = still_running;
}

/// Mirror the viewport into the orthographic camera. Wrapper space is
/// world space, so the camera just centers on the visible rect.
pub fn apply_viewport_to_camera(
    viewport: Res<SceneViewport>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<SceneCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };
    // The rulers eat into the window's left and top edges, so the camera
    // centers on whatever wrapper point sits under the window center.
    let window_center = viewport.spaces.window_to_wrapper(viewport.spaces.view_size / 2.0);
    transform.translation.x = window_center.x;
    transform.translation.y = window_center.y;
    if let Projection::Orthographic(ref mut ortho) = *projection {
        ortho.scale = 1.0 / viewport.spaces.magnification;
    }
}

/// Zero the minor axis of a scroll delta.
fn predominant_axis(delta: Vec2) -> Vec2 {
    if delta.x.abs() >= delta.y.abs() {
        Vec2::new(delta.x, 0.0)
    } else {
        Vec2::new(0.0, delta.y)
    }
}

/// Scroll wheel pans; the zoom tools own magnification.
pub fn scroll_wheel_pan(
    mut scroll_events: MessageReader<MouseWheel>,
    settings: Res<InteractionSettings>,
    mut viewport: ResMut<SceneViewport>,
) {
    let mut delta = Vec2::ZERO;
    for event in scroll_events.read() {
        let step = match event.unit {
            MouseScrollUnit::Line => Vec2::new(event.x, event.y) * 24.0,
            MouseScrollUnit::Pixel => Vec2::new(event.x, event.y),
        };
        delta += step;
    }
    if settings.predominant_axis_scrolling {
        delta = predominant_axis(delta);
    }
    if delta != Vec2::ZERO {
        // Wheel-up scrolls the content down, matching scroll views.
        viewport.pan_by(Vec2::new(delta.x, -delta.y));
    }
}
