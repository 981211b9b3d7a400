//! Pure resize policies for area annotations.
//!
//! All math is in integer pixel space. The caller standardizes nothing:
//! the returned rect is already standardized, and degenerate results are
//! legal here because the store owns the accept/reject decision.

use crate::common::DragHandle;
use crate::geometry::{PixelCoordinate, PixelRect};

use super::state::ManipulationOptions;

/// Resize `original` so `handle` follows the pointer, honoring the active
/// scaling options.
///
/// - Plain corner: the diagonally opposite corner stays fixed and the rect
///   is the bounding box of that anchor and the pointer.
/// - Centered: the rect center stays fixed, the pointer's displacement is
///   mirrored to the far side.
/// - Proportional (corners only): the horizontal displacement drives both
///   axes so the original aspect ratio is preserved, and the grown side
///   stays on the grabbed corner's original side of the anchor. Edge
///   handles ignore the proportional flag.
/// - Edge: only that axis moves; the opposite edge and the full extent of
///   the other axis stay fixed.
pub fn resize_area(
    original: PixelRect,
    handle: DragHandle,
    pointer: PixelCoordinate,
    options: ManipulationOptions,
) -> PixelRect {
    if handle.is_corner() {
        return resize_corner(original, handle, pointer, options);
    }
    if handle.is_edge() {
        return resize_edge(original, handle, pointer, options);
    }
    original
}

fn resize_corner(
    original: PixelRect,
    handle: DragHandle,
    pointer: PixelCoordinate,
    options: ManipulationOptions,
) -> PixelRect {
    let anchor = if options.centered_scaling {
        // Integer center times two, so mirroring needs no rounding.
        PixelCoordinate::new(
            original.min_x() + original.max_x(),
            original.min_y() + original.max_y(),
        )
    } else {
        match handle.anchor_corner(original) {
            Some(anchor) => anchor,
            None => return original,
        }
    };

    let corner = if options.proportional_scaling {
        proportional_corner(original, handle, anchor_point(anchor, options), pointer)
    } else {
        pointer
    };

    if options.centered_scaling {
        // `anchor` holds the doubled center; the far corner mirrors.
        let mirrored = PixelCoordinate::new(anchor.x - corner.x, anchor.y - corner.y);
        PixelRect::from_coordinates(corner, mirrored)
    } else {
        PixelRect::from_coordinates(anchor, corner)
    }
}

fn anchor_point(anchor: PixelCoordinate, options: ManipulationOptions) -> PixelCoordinate {
    if options.centered_scaling {
        // Doubled-center representation; halve for the ratio math. The
        // remainder is at most half a pixel and the driving axis still
        // comes straight from the pointer.
        PixelCoordinate::new(anchor.x / 2, anchor.y / 2)
    } else {
        anchor
    }
}

/// The pointer's x displacement from the anchor drives both axes. The
/// vertical sign is the product of the drive direction and the grabbed
/// corner's original side of the anchor, so the pointer crossing the
/// anchor row alone never flips the rect.
fn proportional_corner(
    original: PixelRect,
    handle: DragHandle,
    anchor: PixelCoordinate,
    pointer: PixelCoordinate,
) -> PixelCoordinate {
    if original.height() == 0 {
        return pointer;
    }
    let ratio = original.ratio();
    let dx = pointer.x - anchor.x;
    let dy_magnitude = ((dx.abs() as f32) / ratio).round() as i32;
    // North handles grab the min-y side of the anchor.
    let original_side = match handle {
        DragHandle::ResizeNE | DragHandle::ResizeNW => -1,
        _ => 1,
    };
    let dy_sign = match dx.signum() {
        0 => original_side,
        sign => sign * original_side,
    };
    PixelCoordinate::new(pointer.x, anchor.y + dy_sign * dy_magnitude)
}

fn resize_edge(
    original: PixelRect,
    handle: DragHandle,
    pointer: PixelCoordinate,
    options: ManipulationOptions,
) -> PixelRect {
    let (min_x, max_x, min_y, max_y) = (
        original.min_x(),
        original.max_x(),
        original.min_y(),
        original.max_y(),
    );

    let (new_min_x, new_max_x, new_min_y, new_max_y) = if options.centered_scaling {
        match handle {
            // Mirror the moved edge about the axis center.
            DragHandle::ResizeW | DragHandle::ResizeE => {
                let sum = min_x + max_x;
                (pointer.x.min(sum - pointer.x), pointer.x.max(sum - pointer.x), min_y, max_y)
            }
            DragHandle::ResizeN | DragHandle::ResizeS => {
                let sum = min_y + max_y;
                (min_x, max_x, pointer.y.min(sum - pointer.y), pointer.y.max(sum - pointer.y))
            }
            _ => (min_x, max_x, min_y, max_y),
        }
    } else {
        match handle {
            DragHandle::ResizeW => (pointer.x.min(max_x), pointer.x.max(max_x), min_y, max_y),
            DragHandle::ResizeE => (min_x.min(pointer.x), min_x.max(pointer.x), min_y, max_y),
            DragHandle::ResizeN => (min_x, max_x, pointer.y.min(max_y), pointer.y.max(max_y)),
            DragHandle::ResizeS => (min_x, max_x, min_y.min(pointer.y), min_y.max(pointer.y)),
            _ => (min_x, max_x, min_y, max_y),
        }
    };

    PixelRect::new(
        new_min_x,
        new_min_y,
        new_max_x - new_min_x,
        new_max_y - new_min_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: ManipulationOptions = ManipulationOptions {
        proportional_scaling: false,
        centered_scaling: false,
    };
    const PROPORTIONAL: ManipulationOptions = ManipulationOptions {
        proportional_scaling: true,
        centered_scaling: false,
    };
    const CENTERED: ManipulationOptions = ManipulationOptions {
        proportional_scaling: false,
        centered_scaling: true,
    };

    #[test]
    fn test_plain_corner_anchors_opposite_corner() {
        let original = PixelRect::new(10, 10, 20, 20);
        // Grab SE (max,max), drag outward.
        let result = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(50, 40),
            PLAIN,
        );
        assert_eq!(result, PixelRect::new(10, 10, 40, 30));
        // Drag across the anchor: the rect flips but stays standardized.
        let flipped = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(4, 2),
            PLAIN,
        );
        assert_eq!(flipped, PixelRect::new(4, 2, 6, 8));
    }

    #[test]
    fn test_plain_nw_corner_anchors_se() {
        let original = PixelRect::new(10, 10, 20, 20);
        let result = resize_area(
            original,
            DragHandle::ResizeNW,
            PixelCoordinate::new(5, 8),
            PLAIN,
        );
        assert_eq!(result, PixelRect::new(5, 8, 25, 22));
    }

    #[test]
    fn test_proportional_square_stays_square() {
        let original = PixelRect::new(0, 0, 10, 10);
        let result = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(16, 3),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, 0, 16, 16));
    }

    #[test]
    fn test_proportional_16_9() {
        let original = PixelRect::new(0, 0, 16, 9);
        let result = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(32, 100),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, 0, 32, 18));
    }

    #[test]
    fn test_proportional_3_4_and_4_3() {
        let tall = PixelRect::new(0, 0, 3, 4);
        let result = resize_area(
            tall,
            DragHandle::ResizeSE,
            PixelCoordinate::new(6, 1),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, 0, 6, 8));

        let wide = PixelRect::new(0, 0, 4, 3);
        let result = resize_area(
            wide,
            DragHandle::ResizeSE,
            PixelCoordinate::new(8, 1),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, 0, 8, 6));
    }

    #[test]
    fn test_proportional_keeps_the_original_vertical_side() {
        let original = PixelRect::new(0, 0, 10, 10);
        // SE drag with the pointer above the anchor row: the rect stays
        // below it instead of flipping across.
        let result = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(16, -3),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, 0, 16, 16));

        // NE anchors SW (0,10); the corner stays above the anchor even
        // with the pointer dragged well below it.
        let result = resize_area(
            original,
            DragHandle::ResizeNE,
            PixelCoordinate::new(20, 30),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(0, -10, 20, 20));

        // Crossing the anchor column mirrors both axes together.
        let result = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(-8, 3),
            PROPORTIONAL,
        );
        assert_eq!(result, PixelRect::new(-8, -8, 8, 8));
    }

    #[test]
    fn test_centered_corner_mirrors_about_center() {
        let original = PixelRect::new(10, 10, 20, 20);
        // Center (20,20). Pointer in each quadrant yields the same rect
        // for symmetric displacements.
        let a = resize_area(
            original,
            DragHandle::ResizeSE,
            PixelCoordinate::new(35, 32),
            CENTERED,
        );
        assert_eq!(a, PixelRect::new(5, 8, 30, 24));
        let b = resize_area(
            original,
            DragHandle::ResizeNW,
            PixelCoordinate::new(5, 8),
            CENTERED,
        );
        assert_eq!(b, a);
        let c = resize_area(
            original,
            DragHandle::ResizeNE,
            PixelCoordinate::new(35, 8),
            CENTERED,
        );
        assert_eq!(c, a);
        let d = resize_area(
            original,
            DragHandle::ResizeSW,
            PixelCoordinate::new(5, 32),
            CENTERED,
        );
        assert_eq!(d, a);
        assert_eq!(a.center(), original.center());
    }

    #[test]
    fn test_plain_edges_fix_other_axis() {
        let original = PixelRect::new(10, 10, 20, 20);
        let east = resize_area(
            original,
            DragHandle::ResizeE,
            PixelCoordinate::new(45, 999),
            PLAIN,
        );
        assert_eq!(east, PixelRect::new(10, 10, 35, 20));
        let north = resize_area(
            original,
            DragHandle::ResizeN,
            PixelCoordinate::new(-999, 4),
            PLAIN,
        );
        assert_eq!(north, PixelRect::new(10, 4, 20, 26));
    }

    #[test]
    fn test_edge_dragged_across_opposite_edge_standardizes() {
        let original = PixelRect::new(10, 10, 20, 20);
        let result = resize_area(
            original,
            DragHandle::ResizeW,
            PixelCoordinate::new(50, 0),
            PLAIN,
        );
        assert_eq!(result, PixelRect::new(30, 10, 20, 20));
    }

    #[test]
    fn test_edges_ignore_proportional_flag() {
        let original = PixelRect::new(10, 10, 20, 20);
        let plain = resize_area(
            original,
            DragHandle::ResizeE,
            PixelCoordinate::new(45, 0),
            PLAIN,
        );
        let proportional = resize_area(
            original,
            DragHandle::ResizeE,
            PixelCoordinate::new(45, 0),
            PROPORTIONAL,
        );
        assert_eq!(plain, proportional);
    }

    #[test]
    fn test_centered_edge_keeps_axis_center() {
        let original = PixelRect::new(10, 10, 20, 20);
        let result = resize_area(
            original,
            DragHandle::ResizeE,
            PixelCoordinate::new(38, 0),
            CENTERED,
        );
        assert_eq!(result, PixelRect::new(2, 10, 36, 20));
    }

    #[test]
    fn test_move_and_none_are_identity() {
        let original = PixelRect::new(1, 2, 3, 4);
        let pointer = PixelCoordinate::new(50, 50);
        assert_eq!(resize_area(original, DragHandle::Move, pointer, PLAIN), original);
        assert_eq!(resize_area(original, DragHandle::None, pointer, PLAIN), original);
    }
}
