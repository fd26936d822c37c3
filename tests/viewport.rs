use flowcanvas::geometry::{Point, Vector};
use flowcanvas::viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};

#[test]
/// Zoom by 1.1 three times from z=1 then by 0.9 once gives exactly
/// clamp(1 × 1.1³ × 0.9), verifying multiplicative composition.
fn test_zoom_composes_multiplicatively() {
    let mut viewport = Viewport::new();
    for _ in 0..3 {
        viewport.zoom_by(1.1);
    }
    viewport.zoom_by(0.9);
    let expected = (1.0_f64 * 1.1 * 1.1 * 1.1 * 0.9).clamp(MIN_ZOOM, MAX_ZOOM);
    assert!((viewport.zoom() - expected).abs() < 1e-12);
}

#[test]
/// Repeated small zoom-outs converge on the floor instead of overshooting.
fn test_zoom_clamps_at_bounds() {
    let mut viewport = Viewport::new();
    for _ in 0..200 {
        viewport.zoom_by(0.9);
    }
    assert_eq!(viewport.zoom(), MIN_ZOOM);
    for _ in 0..200 {
        viewport.zoom_by(1.1);
    }
    assert_eq!(viewport.zoom(), MAX_ZOOM);
}

#[test]
fn test_transforms_are_inverse() {
    let mut viewport = Viewport::new();
    viewport.zoom_by(1.3);
    viewport.pan_by(Vector::new(240.0, -80.0));

    for point in [
        Point::new(0.0, 0.0),
        Point::new(-350.5, 1200.0),
        Point::new(87.25, -14.75),
    ] {
        let there = viewport.screen_to_graph(point);
        let back = viewport.graph_to_screen(there);
        assert!((back.x - point.x).abs() < 1e-9);
        assert!((back.y - point.y).abs() < 1e-9);
    }
}

#[test]
/// Pan and zoom only move the viewing transform; graph-space math shows pan
/// offsets divide out by the zoom factor.
fn test_pan_offsets_scale_with_zoom() {
    let mut viewport = Viewport::new();
    viewport.pan_by(Vector::new(100.0, 0.0));
    assert_eq!(viewport.screen_to_graph(Point::new(100.0, 0.0)), Point::new(0.0, 0.0));

    viewport.zoom_by(2.0);
    assert_eq!(viewport.screen_to_graph(Point::new(100.0, 0.0)), Point::new(0.0, 0.0));
    assert_eq!(viewport.screen_to_graph(Point::new(300.0, 0.0)), Point::new(100.0, 0.0));
}
