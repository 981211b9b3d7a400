//! Ruler markers: the tick glyphs annotations project onto the rulers.

use crate::content::{ContentItem, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerGlyph {
    /// Marks a point coordinate or an area's leading edge.
    Origin,
    /// Marks an area's trailing edge.
    Opposite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulerMarker {
    pub axis: RulerAxis,
    /// Pixel-space location along the axis.
    pub location: i32,
    pub glyph: MarkerGlyph,
}

/// Markers an item projects: two for a point (one per axis), four for an
/// area (both edges per axis).
pub fn markers_for(item: &ContentItem) -> Vec<RulerMarker> {
    match &item.kind {
        ItemKind::Point { coordinate, .. } => vec![
            RulerMarker {
                axis: RulerAxis::Horizontal,
                location: coordinate.x,
                glyph: MarkerGlyph::Origin,
            },
            RulerMarker {
                axis: RulerAxis::Vertical,
                location: coordinate.y,
                glyph: MarkerGlyph::Origin,
            },
        ],
        ItemKind::Area { rect } => vec![
            RulerMarker {
                axis: RulerAxis::Horizontal,
                location: rect.min_x(),
                glyph: MarkerGlyph::Origin,
            },
            RulerMarker {
                axis: RulerAxis::Horizontal,
                location: rect.max_x(),
                glyph: MarkerGlyph::Opposite,
            },
            RulerMarker {
                axis: RulerAxis::Vertical,
                location: rect.min_y(),
                glyph: MarkerGlyph::Origin,
            },
            RulerMarker {
                axis: RulerAxis::Vertical,
                location: rect.max_y(),
                glyph: MarkerGlyph::Opposite,
            },
        ],
    }
}
