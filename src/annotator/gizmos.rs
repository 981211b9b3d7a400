//! Gizmo drawing for overlays, the rubber band, drag previews, and ruler
//! marker ticks.
//!
//! Drawing happens in wrapper (world) space. Overlay frames are kept in
//! view space, so each draw converts back through the viewport; handle and
//! stroke sizes are specified in view points and divided by the
//! magnification so they stay constant on screen.

use bevy::camera::visibility::RenderLayers;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::constants::{OVERLAY_BADGE_SIZE, OVERLAY_HANDLE_RADIUS, RULER_THICKNESS};
use crate::content::ItemKind;
use crate::geometry::spaces::SceneSpaces;
use crate::scene::state::{Manipulation, SceneState};
use crate::scene::viewport::SceneViewport;

use super::overlay::{handle_positions, RevealStyle};
use super::rulers::{MarkerGlyph, RulerAxis};
use super::{Annotator, AnnotatorIndex};

const IMAGE_BORDER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);
const RUBBER_BAND_COLOR: Color = Color::srgba(0.2, 0.6, 1.0, 0.8);
const RUBBER_BAND_FILL: Color = Color::srgba(0.2, 0.6, 1.0, 0.1);
const PREVIEW_COLOR: Color = Color::srgba(1.0, 0.85, 0.2, 0.9);

/// Custom gizmo group for scene overlays (overlay-only rendering)
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SceneGizmoGroup;

/// Configure the overlay gizmo group to only render to the overlay layer
pub fn configure_gizmo_group(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<SceneGizmoGroup>();
    config.render_layers = RenderLayers::layer(1);
}

pub fn draw_image_border(mut gizmos: Gizmos<SceneGizmoGroup>, viewport: Res<SceneViewport>) {
    let bounds = viewport.spaces.wrapper_bounds();
    gizmos.rect_2d(
        Isometry2d::from_translation(bounds.center()),
        bounds.size(),
        IMAGE_BORDER_COLOR,
    );
}

pub fn draw_overlays(
    mut gizmos: Gizmos<SceneGizmoGroup>,
    index: Res<AnnotatorIndex>,
    viewport: Res<SceneViewport>,
    state: Res<SceneState>,
) {
    if index.overlays_hidden {
        return;
    }
    let spaces = &viewport.spaces;

    let mut ordered: Vec<&Annotator> = index.iter_ordered().collect();
    ordered.sort_by_key(|a| a.z);

    let dragged = match state.manipulation() {
        Manipulation::AnnotatorDragging { target, .. } => Some(*target),
        _ => None,
    };

    for annotator in ordered {
        // The dragged item shows its preview instead of the stale frame.
        if dragged == Some(annotator.item.id) {
            continue;
        }
        draw_annotator(&mut gizmos, annotator, spaces);
    }

    match state.manipulation() {
        Manipulation::AreaDragging { begin, current, .. } => {
            draw_rubber_band(&mut gizmos, spaces, *begin, *current);
        }
        Manipulation::AnnotatorDragging { preview, .. } => {
            draw_preview(&mut gizmos, spaces, preview);
        }
        _ => {}
    }
}

fn draw_annotator(gizmos: &mut Gizmos<SceneGizmoGroup>, annotator: &Annotator, spaces: &SceneSpaces) {
    let m = spaces.magnification;
    let color = if annotator.selected {
        annotator.color
    } else {
        annotator.color.with_alpha(0.55)
    };
    let frame = spaces.view_rect_to_wrapper(annotator.frame);

    match annotator.style {
        RevealStyle::TracksBounds => {
            gizmos.rect_2d(Isometry2d::from_translation(frame.center()), frame.size(), color);
            if annotator.selected {
                for (_, position) in handle_positions(annotator.frame) {
                    let world = spaces.view_to_wrapper(position);
                    gizmos.circle_2d(
                        Isometry2d::from_translation(world),
                        OVERLAY_HANDLE_RADIUS / m,
                        color,
                    );
                }
            }
        }
        RevealStyle::FixedBadge => {
            gizmos.circle_2d(
                Isometry2d::from_translation(frame.center()),
                OVERLAY_BADGE_SIZE / 2.0 / m,
                color,
            );
            if annotator.focused {
                gizmos.circle_2d(
                    Isometry2d::from_translation(frame.center()),
                    (OVERLAY_BADGE_SIZE / 2.0 + 2.0) / m,
                    color,
                );
            }
        }
    }
}

fn draw_rubber_band(
    gizmos: &mut Gizmos<SceneGizmoGroup>,
    spaces: &SceneSpaces,
    begin: Vec2,
    current: Vec2,
) {
    let a = spaces.view_to_wrapper(begin);
    let b = spaces.view_to_wrapper(current);
    let center = (a + b) / 2.0;
    let size = (b - a).abs();
    gizmos.rect_2d(Isometry2d::from_translation(center), size, RUBBER_BAND_COLOR);

    // Gizmos have no filled rectangles; suggest a fill with scanlines.
    let min = a.min(b);
    let max = a.max(b);
    let step = 10.0 / spaces.magnification;
    let mut y = min.y + step;
    while y < max.y {
        gizmos.line_2d(Vec2::new(min.x, y), Vec2::new(max.x, y), RUBBER_BAND_FILL);
        y += step;
    }
}

fn draw_preview(gizmos: &mut Gizmos<SceneGizmoGroup>, spaces: &SceneSpaces, preview: &ItemKind) {
    match preview {
        ItemKind::Point { coordinate, .. } => {
            let center = spaces.pixel_center_to_wrapper(*coordinate);
            gizmos.circle_2d(
                Isometry2d::from_translation(center),
                OVERLAY_BADGE_SIZE / 2.0 / spaces.magnification,
                PREVIEW_COLOR,
            );
        }
        ItemKind::Area { rect } => {
            let world = spaces.pixel_rect_to_wrapper(*rect);
            gizmos.rect_2d(
                Isometry2d::from_translation(world.center()),
                world.size(),
                PREVIEW_COLOR,
            );
        }
    }
}

/// Tick marks along the visible top and left edges where annotations
/// project onto the rulers.
pub fn draw_ruler_markers(
    mut gizmos: Gizmos<SceneGizmoGroup>,
    index: Res<AnnotatorIndex>,
    viewport: Res<SceneViewport>,
) {
    let spaces = &viewport.spaces;
    if spaces.ruler_inset == 0.0 || index.overlays_hidden {
        return;
    }
    let visible = spaces.visible_wrapper_rect();
    let image_h = spaces.image_size.height as f32;

    for annotator in index.iter_ordered() {
        if !annotator.selected {
            continue;
        }
        let color = annotator.color;
        for marker in &annotator.markers {
            // Trailing edges get shorter ticks than leading edges.
            let tick = match marker.glyph {
                MarkerGlyph::Origin => RULER_THICKNESS / 2.0,
                MarkerGlyph::Opposite => RULER_THICKNESS / 4.0,
            } / spaces.magnification;
            match marker.axis {
                RulerAxis::Horizontal => {
                    let x = marker.location as f32;
                    gizmos.line_2d(
                        Vec2::new(x, visible.max.y),
                        Vec2::new(x, visible.max.y - tick),
                        color,
                    );
                }
                RulerAxis::Vertical => {
                    let y = image_h - marker.location as f32;
                    gizmos.line_2d(
                        Vec2::new(visible.min.x, y),
                        Vec2::new(visible.min.x + tick, y),
                        color,
                    );
                }
            }
        }
    }
}
