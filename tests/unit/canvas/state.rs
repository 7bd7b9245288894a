use super::*;
use crate::foundation::error::InkError;

const WHITE: u32 = 0xFFFF_FFFF;
const INK: u32 = 0xFF72_5136;

fn small_config() -> CanvasConfig {
    CanvasConfig {
        max_width: 64,
        max_height: 48,
        initial_view_scale: 4,
        min_view_scale: 1,
        brush_radius: 3,
        persistent_points: 4096,
        persistent_chunks: 256,
        transient_points: 4096,
        ..CanvasConfig::default()
    }
}

fn canvas() -> Canvas {
    Canvas::new(small_config()).unwrap()
}

fn draw(c: &mut Canvas, points: &[(i64, i64)]) {
    for &(x, y) in points {
        assert!(c.update(&FrameInput::pointer(x, y)).unwrap());
    }
    assert!(c.update(&FrameInput::release()).unwrap());
}

fn px(c: &Canvas, x: u32, y: u32) -> u32 {
    c.raster().pixel(x, y).unwrap()
}

#[test]
fn idle_update_clears_to_background() {
    let mut c = canvas();
    assert!(c.update(&FrameInput::default()).unwrap());
    assert!(c.raster().pixels().iter().all(|&p| p == WHITE));
    assert_eq!(c.stroke_count(), 0);
    assert_eq!(c.capture_state(), CaptureState::Idle);
}

#[test]
fn idle_frames_do_not_grow_history() {
    let mut c = canvas();
    for _ in 0..10 {
        c.update(&FrameInput::release()).unwrap();
    }
    assert_eq!(c.stroke_count(), 0);
    assert_eq!(c.arena_stats().persistent_chunks.used, 0);
}

#[test]
fn live_point_is_drawn_before_release() {
    let mut c = canvas();
    c.update(&FrameInput::pointer(20, 20)).unwrap();
    assert_eq!(c.capture_state(), CaptureState::Accumulating);
    assert_eq!(c.stroke_count(), 0);
    assert_eq!(c.in_progress_points().len(), 1);
    assert_eq!(px(&c, 20, 20), INK);
    assert_eq!(px(&c, 24, 20), WHITE);
}

#[test]
fn release_finalizes_a_stroke_that_keeps_being_painted() {
    let mut c = canvas();
    draw(&mut c, &[(10, 10), (20, 10), (30, 10)]);

    assert_eq!(c.stroke_count(), 1);
    assert_eq!(c.capture_state(), CaptureState::Idle);
    let stroke = c.strokes().next().unwrap();
    assert_eq!(stroke.point_count(), 3);
    assert_eq!(
        stroke.brush(),
        Brush {
            view_scale: 4,
            radius: 3
        }
    );

    // Repainted from history on the next idle frame.
    c.update(&FrameInput::release()).unwrap();
    assert_eq!(px(&c, 15, 10), INK);
    assert_eq!(px(&c, 15, 12), INK);
    assert_eq!(px(&c, 15, 13), WHITE);
    assert_eq!(px(&c, 34, 10), WHITE);
}

#[test]
fn chunks_freeze_while_drawing() {
    let mut c = canvas();
    c.update(&FrameInput::pointer(10, 10)).unwrap();
    c.update(&FrameInput::pointer(20, 10)).unwrap();
    assert_eq!(c.in_progress_chunk_count(), 0);

    // 10 x 10 raster box, above the 20 px² threshold.
    c.update(&FrameInput::pointer(20, 20)).unwrap();
    assert_eq!(c.in_progress_chunk_count(), 1);
    assert!(c.in_progress_points().is_empty());
    // The frozen chunk is repainted from the pending list.
    assert_eq!(px(&c, 20, 15), INK);

    c.update(&FrameInput::pointer(20, 21)).unwrap();
    assert_eq!(c.in_progress_points().len(), 1);
    c.update(&FrameInput::release()).unwrap();

    let stroke = c.strokes().next().unwrap();
    assert_eq!(stroke.chunk_count(), 2);
    assert_eq!(stroke.point_count(), 4);
}

#[test]
fn reset_is_idempotent_and_keeps_history() {
    let mut c = canvas();
    draw(&mut c, &[(10, 10), (12, 10)]);
    c.update(&FrameInput::zoom(-1)).unwrap();
    c.update(&FrameInput::pointer(40, 40)).unwrap();
    assert_ne!(c.view_scale(), 4);

    c.update(&FrameInput {
        reset: true,
        pointer: Some(V2i::new(41, 40)),
        ..FrameInput::default()
    })
    .unwrap();
    assert_eq!(c.view_scale(), 4);
    assert!(c.in_progress_points().is_empty());
    assert_eq!(c.in_progress_chunk_count(), 0);
    assert_eq!(c.capture_state(), CaptureState::Idle);
    assert_eq!(c.stroke_count(), 1);

    let before = c.snapshot();
    c.update(&FrameInput::reset()).unwrap();
    let after = c.snapshot();
    assert_eq!(before.view_scale, after.view_scale);
    assert_eq!(before.strokes, after.strokes);
    assert!(c.in_progress_points().is_empty());
    assert_eq!(c.in_progress_chunk_count(), 0);
}

#[test]
fn zoom_steps_are_clamped() {
    let mut c = canvas();
    c.update(&FrameInput::zoom(1)).unwrap();
    assert_eq!(c.view_scale(), 3);
    c.update(&FrameInput::zoom(1)).unwrap();
    assert_eq!(c.view_scale(), 2);
    c.update(&FrameInput::zoom(1)).unwrap();
    assert_eq!(c.view_scale(), 1);
    c.update(&FrameInput::zoom(1)).unwrap();
    assert_eq!(c.view_scale(), 1);
    c.update(&FrameInput::zoom(-1)).unwrap();
    assert_eq!(c.view_scale(), 2);
}

#[test]
fn strokes_keep_apparent_thickness_across_zoom() {
    let mut c = canvas();
    // A single-point stroke at the canvas origin (viewport center).
    draw(&mut c, &[(32, 24)]);
    assert_eq!(px(&c, 34, 24), INK);
    assert_eq!(px(&c, 35, 24), WHITE);

    // Zooming out to scale 6 shrinks the 3 px disc to 2 px.
    c.update(&FrameInput::zoom(-1)).unwrap();
    assert_eq!(c.view_scale(), 6);
    assert_eq!(px(&c, 33, 24), INK);
    assert_eq!(px(&c, 34, 24), WHITE);
}

#[test]
fn later_strokes_cover_earlier_ones() {
    let mut c = canvas();
    c.set_brush_color(Rgb::new(1.0, 0.0, 0.0));
    draw(&mut c, &[(10, 20), (30, 20)]);
    c.set_brush_color(Rgb::new(0.0, 0.0, 1.0));
    draw(&mut c, &[(20, 10), (20, 30)]);

    c.update(&FrameInput::release()).unwrap();
    assert_eq!(px(&c, 12, 20), 0xFFFF_0000);
    assert_eq!(px(&c, 20, 20), 0xFF00_00FF);
}

#[test]
fn viewport_is_bounded_by_capacity() {
    let mut c = canvas();
    assert!(c.set_viewport(Viewport::new(65, 10)).is_err());
    c.set_viewport(Viewport::new(32, 16)).unwrap();
    c.update(&FrameInput::pointer(16, 8)).unwrap();
    assert_eq!(c.raster().pixels().len(), 32 * 16);
    // The new center is the canvas origin.
    assert_eq!(c.in_progress_points(), &[V2i::ZERO]);
}

#[test]
fn transient_region_is_reset_every_update() {
    let mut c = canvas();
    draw(&mut c, &[(10, 10), (20, 20), (30, 30)]);
    let stats = c.arena_stats();
    assert_eq!(stats.transient_points.resets, 4);
    assert_eq!(stats.transient_points.used, 0);
    assert!(stats.persistent_points.used >= 3);
}

#[test]
fn snapshot_serializes_history() {
    let mut c = canvas();
    draw(&mut c, &[(10, 10), (11, 10)]);
    let json = serde_json::to_value(c.snapshot()).unwrap();
    assert_eq!(json["view_scale"], 4);
    assert_eq!(json["capture"], "Idle");
    assert_eq!(json["strokes"].as_array().unwrap().len(), 1);
    assert_eq!(json["strokes"][0]["brush"]["radius"], 3);
    assert_eq!(json["strokes"][0]["chunks"][0]["points"][0], serde_json::json!([-88, -56]));
}

#[test]
fn stroke_in_progress_is_painted_over_history() {
    let mut c = canvas();
    c.set_brush_color(Rgb::new(1.0, 0.0, 0.0));
    draw(&mut c, &[(10, 20), (30, 20)]);
    c.set_brush_color(Rgb::new(0.0, 0.0, 1.0));

    c.update(&FrameInput::pointer(20, 10)).unwrap();
    c.update(&FrameInput::pointer(20, 30)).unwrap();
    assert_eq!(c.capture_state(), CaptureState::Accumulating);
    assert_eq!(px(&c, 20, 20), 0xFF00_00FF);
    assert_eq!(px(&c, 12, 20), 0xFFFF_0000);

    c.update(&FrameInput::release()).unwrap();
    assert_eq!(px(&c, 20, 20), 0xFF00_00FF);
}

fn one_chunk_config() -> CanvasConfig {
    CanvasConfig {
        max_pending_chunks: 1,
        ..small_config()
    }
}

#[test]
fn capacity_error_drops_the_stroke_and_recovers() {
    let mut c = Canvas::new(one_chunk_config()).unwrap();
    draw(&mut c, &[(50, 40)]);

    // Second sample freezes the only allowed chunk; the tail cannot be frozen on release.
    c.update(&FrameInput::pointer(10, 10)).unwrap();
    c.update(&FrameInput::pointer(20, 20)).unwrap();
    c.update(&FrameInput::pointer(30, 30)).unwrap();
    let err = c.update(&FrameInput::release()).unwrap_err();
    assert!(matches!(err, InkError::Capacity(_)));

    assert_eq!(c.capture_state(), CaptureState::Idle);
    assert_eq!(c.in_progress_chunk_count(), 0);
    assert!(c.in_progress_points().is_empty());
    assert_eq!(c.stroke_count(), 1);
    // The failing frame still shows history.
    assert_eq!(px(&c, 50, 40), INK);
    assert_eq!(px(&c, 20, 15), WHITE);

    assert!(c.update(&FrameInput::release()).unwrap());
    draw(&mut c, &[(40, 10)]);
    assert_eq!(c.stroke_count(), 2);
}

#[test]
fn reset_applies_on_a_frame_whose_capture_fails() {
    let mut c = Canvas::new(one_chunk_config()).unwrap();
    c.update(&FrameInput::zoom(1)).unwrap();
    assert_eq!(c.view_scale(), 3);

    c.update(&FrameInput::pointer(10, 10)).unwrap();
    c.update(&FrameInput::pointer(20, 20)).unwrap();
    c.update(&FrameInput::pointer(30, 30)).unwrap();
    assert!(c.update(&FrameInput::reset()).is_err());

    assert_eq!(c.view_scale(), 4);
    assert_eq!(c.capture_state(), CaptureState::Idle);
    assert!(c.update(&FrameInput::release()).unwrap());
    assert_eq!(c.stroke_count(), 0);
}
