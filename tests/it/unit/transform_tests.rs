//! Unit tests for the transform store and coordinate conversion.

use crate::helpers::assert_close;
use schemacanvas::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use schemacanvas::geometry::{Coord, Point};
use schemacanvas::transform::{
    TransformPatch, TransformState, TransformStore, TransformUpdate, normalize,
};
use schemacanvas::viewport::Viewport;

fn state(zoom: f64, x: f64, y: f64) -> TransformState {
    TransformState {
        zoom,
        pan: Point::new(x, y),
    }
}

#[test]
fn test_normalized_zoom_always_in_range() {
    let prev = TransformState::default();
    for zoom in [
        -1.0,
        0.0,
        0.001,
        MIN_ZOOM,
        1.0,
        MAX_ZOOM,
        50.0,
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ] {
        let next = normalize(TransformPatch::zoom(zoom), &prev);
        assert!(
            (MIN_ZOOM..=MAX_ZOOM).contains(&next.zoom),
            "zoom {zoom} normalized to {}",
            next.zoom
        );
    }
}

#[test]
fn test_clamps_out_of_range_zoom() {
    let prev = TransformState::default();
    assert_eq!(normalize(TransformPatch::zoom(100.0), &prev).zoom, MAX_ZOOM);
    assert_eq!(normalize(TransformPatch::zoom(0.0), &prev).zoom, MIN_ZOOM);
}

#[test]
fn test_non_finite_pan_falls_back_per_axis() {
    let prev = state(1.0, 7.0, 9.0);
    let patch = TransformPatch {
        zoom: None,
        pan_x: Some(f64::NAN),
        pan_y: Some(3.0),
    };
    assert_eq!(normalize(patch, &prev).pan, Point::new(7.0, 3.0));
}

#[test]
fn test_non_finite_everything_recovers_to_defaults() {
    let prev = state(f64::NAN, f64::NAN, f64::INFINITY);
    let patch = TransformPatch {
        zoom: Some(f64::INFINITY),
        pan_x: Some(f64::NAN),
        pan_y: None,
    };
    assert_eq!(normalize(patch, &prev), state(DEFAULT_ZOOM, 0.0, 0.0));
}

#[test]
fn test_only_last_update_per_frame_is_applied() {
    let mut store = TransformStore::new();
    store.set_transform(TransformPatch::zoom(2.0));
    store.set_transform(TransformPatch::zoom(3.0));
    store.set_transform(TransformPatch::pan(Point::new(5.0, 5.0)));
    assert!(store.has_pending());

    assert!(store.tick());
    // The zoom requests were superseded, so zoom is unchanged
    assert_eq!(store.get(), state(1.0, 5.0, 5.0));
    assert_eq!(store.stats().coalesced(), 2);
    assert_eq!(store.stats().applied(), 1);
}

#[test]
fn test_map_update_sees_state_at_flush_time() {
    let mut store = TransformStore::with_state(state(2.0, 0.0, 0.0));
    store.set_transform(TransformUpdate::map(|prev| TransformPatch::zoom(prev.zoom * 2.0)));
    store.tick();
    assert_eq!(store.zoom(), 4.0);

    store.set_transform(TransformUpdate::map(|prev| TransformPatch::zoom(prev.zoom * 2.0)));
    store.tick();
    assert_eq!(store.zoom(), MAX_ZOOM);
}

#[test]
fn test_tick_without_request_reports_no_change() {
    let mut store = TransformStore::new();
    assert!(!store.tick());
    store.set_transform(TransformState::default());
    // Applied, but identical to the current state
    assert!(!store.tick());
    assert_eq!(store.stats().applied(), 1);
    assert_eq!(store.stats().ticks(), 2);
}

#[test]
fn test_with_state_normalizes() {
    let store = TransformStore::with_state(state(40.0, f64::NAN, 2.0));
    assert_eq!(store.get(), state(MAX_ZOOM, 0.0, 2.0));
}

#[test]
fn test_teardown_drops_pending_and_later_updates() {
    let mut store = TransformStore::new();
    store.set_transform(TransformPatch::zoom(2.0));
    store.teardown();
    assert!(!store.has_pending());
    assert!(!store.tick());

    store.set_transform(TransformPatch::zoom(3.0));
    assert!(!store.has_pending());
    assert_eq!(store.zoom(), 1.0);
}

#[test]
fn test_screen_diagram_round_trip() {
    let vp = Viewport::new(Point::new(800.0, 600.0), state(1.7, -123.0, 45.5));
    for p in [Point::new(0.0, 0.0), Point::new(800.0, 600.0), Point::new(317.0, 42.0)] {
        let back = vp.point_to_screen(vp.point_to_diagram(p));
        assert_close(back.x, p.x);
        assert_close(back.y, p.y);
    }
}

#[test]
fn test_partial_coords_convert_present_axis_only() {
    let vp = Viewport::new(Point::new(800.0, 600.0), state(2.0, 100.0, 50.0));

    let y_only = vp.to_diagram_space(Coord::new(None, Some(300.0)));
    assert_eq!(y_only, Coord::new(None, Some(50.0)));

    let x_only = vp.to_screen_space(Coord::new(Some(100.0), None));
    assert_eq!(x_only, Coord::new(Some(400.0), None));

    assert_eq!(vp.to_diagram_space(Coord::default()), Coord::default());
}

#[test]
fn test_zero_size_container_stays_finite() {
    let vp = Viewport::new(Point::ZERO, state(1.0, 10.0, 20.0));
    let p = vp.point_to_diagram(Point::new(5.0, 5.0));
    assert!(p.is_finite());
    assert_eq!(p, Point::new(15.0, 25.0));
}
