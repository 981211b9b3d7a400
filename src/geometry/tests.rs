#![cfg(test)]

use bevy::prelude::*;

use super::spaces::SceneSpaces;
use super::{PixelCoordinate, PixelRect, PixelSize};

fn spaces_1024x768() -> SceneSpaces {
    SceneSpaces::new(PixelSize::new(1024, 768))
}

#[test]
fn from_coordinates_standardizes_any_corner_pair() {
    let a = PixelCoordinate::new(10, 40);
    let b = PixelCoordinate::new(4, 8);
    let expected = PixelRect::new(4, 8, 6, 32);
    assert_eq!(PixelRect::from_coordinates(a, b), expected);
    assert_eq!(PixelRect::from_coordinates(b, a), expected);
    assert_eq!(
        PixelRect::from_coordinates(PixelCoordinate::new(4, 40), PixelCoordinate::new(10, 8)),
        expected
    );
}

#[test]
fn from_coordinates_of_equal_points_is_empty() {
    let p = PixelCoordinate::new(7, 7);
    let r = PixelRect::from_coordinates(p, p);
    assert!(r.is_empty());
    assert_eq!(r.origin, p);
}

#[test]
fn standardized_flips_negative_extents() {
    let r = PixelRect {
        origin: PixelCoordinate::new(10, 10),
        size: PixelSize::new(-4, -6),
    }
    .standardized();
    assert_eq!(r, PixelRect::new(6, 4, 4, 6));
}

#[test]
fn wrapping_encloses_and_wrapped_is_enclosed() {
    let r = Rect::new(1.2, 2.7, 5.9, 6.1);
    let outer = PixelRect::wrapping(r);
    let inner = PixelRect::wrapped(r);
    assert_eq!(outer, PixelRect::new(1, 2, 5, 5));
    assert_eq!(inner, PixelRect::new(2, 3, 3, 3));
    assert!(outer.contains_rect(inner));
}

#[test]
fn wrapped_degenerates_when_nothing_whole_fits() {
    let r = Rect::new(3.1, 3.1, 3.9, 3.9);
    let inner = PixelRect::wrapped(r);
    assert!(inner.is_empty());
    assert!(inner.size.is_valid());
}

#[test]
fn wrapping_of_integer_rect_is_identity() {
    let r = PixelRect::new(3, 4, 10, 20);
    assert_eq!(PixelRect::wrapping(r.to_rect()), r);
    assert_eq!(PixelRect::wrapped(r.to_rect()), r);
}

#[test]
fn contains_coordinate_is_half_open() {
    let r = PixelRect::new(0, 0, 4, 4);
    assert_eq!(r.opposite(), PixelCoordinate::new(4, 4));
    assert!(r.contains_coordinate(PixelCoordinate::new(0, 0)));
    assert!(r.contains_coordinate(PixelCoordinate::new(3, 3)));
    assert!(!r.contains_coordinate(PixelCoordinate::new(4, 3)));
    assert!(!r.contains_coordinate(PixelCoordinate::new(3, 4)));
}

#[test]
fn intersection_of_disjoint_rects_is_none() {
    let a = PixelRect::new(0, 0, 4, 4);
    let b = PixelRect::new(4, 0, 4, 4);
    assert_eq!(a.intersection(b), None);
    let c = PixelRect::new(2, 2, 4, 4);
    assert_eq!(a.intersection(c), Some(PixelRect::new(2, 2, 2, 2)));
}

#[test]
fn view_wrapper_round_trip() {
    let mut spaces = spaces_1024x768();
    spaces.magnification = 3.0;
    spaces.visible_origin = Vec2::new(100.0, 50.0);
    spaces.ruler_inset = 31.0;
    spaces.view_size = Vec2::new(1600.0, 900.0);

    for p in [
        Vec2::new(0.0, 0.0),
        Vec2::new(123.5, 456.25),
        Vec2::new(1569.0, 869.0),
    ] {
        let w = spaces.view_to_wrapper(p);
        let back = spaces.wrapper_to_view(w);
        assert!((back - p).length() < 1e-3, "{p:?} -> {w:?} -> {back:?}");
    }
}

#[test]
fn view_to_wrapper_flips_y() {
    let mut spaces = spaces_1024x768();
    spaces.view_size = Vec2::new(800.0, 600.0);
    spaces.magnification = 1.0;
    spaces.visible_origin = Vec2::ZERO;

    // Top of the view maps above the bottom of the view in wrapper space.
    let top = spaces.view_to_wrapper(Vec2::new(10.0, 0.0));
    let bottom = spaces.view_to_wrapper(Vec2::new(10.0, 599.0));
    assert!(top.y > bottom.y);
    assert_eq!(top.y, 600.0);
}

#[test]
fn ruler_inset_shifts_view_space_only() {
    let mut with_rulers = spaces_1024x768();
    with_rulers.ruler_inset = 31.0;
    let mut without = with_rulers.clone();
    without.ruler_inset = 0.0;

    let window_point = Vec2::new(200.0, 150.0);
    let a = with_rulers.window_to_view(window_point);
    let b = without.window_to_view(window_point);
    assert_eq!(a + Vec2::splat(31.0), b);

    // Points under the rulers fall outside the content area.
    assert!(!with_rulers.view_contains(with_rulers.window_to_view(Vec2::new(10.0, 10.0))));
    assert!(without.view_contains(without.window_to_view(Vec2::new(10.0, 10.0))));
}

#[test]
fn screen_window_view_chain_composes() {
    let mut spaces = spaces_1024x768();
    spaces.window_origin = Vec2::new(120.0, 80.0);
    spaces.ruler_inset = 31.0;

    let screen = Vec2::new(500.0, 400.0);
    let window = spaces.screen_to_window(screen);
    assert_eq!(window, Vec2::new(380.0, 320.0));
    assert_eq!(spaces.window_to_screen(window), screen);

    let view = spaces.window_to_view(window);
    assert_eq!(spaces.view_to_window(view), window);
}

#[test]
fn wrapper_to_pixel_floors_into_the_containing_pixel() {
    let spaces = spaces_1024x768();
    // Wrapper y-up: the top-left image pixel (0,0) spans wrapper y in (767,768].
    assert_eq!(
        spaces.wrapper_to_pixel(Vec2::new(0.5, 767.5)),
        PixelCoordinate::new(0, 0)
    );
    assert_eq!(
        spaces.wrapper_to_pixel(Vec2::new(1023.9, 0.1)),
        PixelCoordinate::new(1023, 767)
    );
}

#[test]
fn pixel_center_round_trips_through_wrapper() {
    let spaces = spaces_1024x768();
    for c in [
        PixelCoordinate::new(0, 0),
        PixelCoordinate::new(1023, 767),
        PixelCoordinate::new(512, 384),
    ] {
        let w = spaces.pixel_center_to_wrapper(c);
        assert_eq!(spaces.wrapper_to_pixel(w), c);
    }
}

#[test]
fn pixel_rect_to_wrapper_flips_vertically() {
    let spaces = spaces_1024x768();
    let r = PixelRect::new(10, 20, 30, 40);
    let w = spaces.pixel_rect_to_wrapper(r);
    assert_eq!(w.min, Vec2::new(10.0, 768.0 - 60.0));
    assert_eq!(w.max, Vec2::new(40.0, 768.0 - 20.0));
    // And back.
    assert_eq!(spaces.wrapper_rect_to_pixel_wrapping(w), r);
}

#[test]
fn visible_rect_scales_with_magnification() {
    let mut spaces = spaces_1024x768();
    spaces.view_size = Vec2::new(831.0, 631.0);
    spaces.ruler_inset = 31.0;
    spaces.magnification = 4.0;
    assert_eq!(spaces.visible_wrapper_size(), Vec2::new(200.0, 150.0));
    spaces.magnification = 0.5;
    assert_eq!(spaces.visible_wrapper_size(), Vec2::new(1600.0, 1200.0));
}
