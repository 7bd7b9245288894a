use super::*;
use crate::capture::stroke::Brush;
use crate::foundation::core::{Rect, Rgb};

#[test]
fn frozen_chunk_keeps_points_and_bounds() {
    let mut store = PersistentArena::new(64, 8);
    let pts = [V2i::new(1, 2), V2i::new(-3, 5), V2i::new(4, 0)];
    let chunk = store.freeze_chunk(&pts).unwrap();
    let view = store.view(&chunk);
    assert_eq!(view.points, &pts);
    assert_eq!(view.bounds, Rect::new(-3, 0, 4, 5));
}

#[test]
fn freezing_nothing_is_rejected() {
    let mut store = PersistentArena::new(64, 8);
    assert!(store.freeze_chunk(&[]).is_err());
}

#[test]
fn stroke_ref_walks_chunks_in_order() {
    let mut store = PersistentArena::new(64, 8);
    let a = store
        .freeze_chunk(&[V2i::new(0, 0), V2i::new(10, 0)])
        .unwrap();
    let b = store
        .freeze_chunk(&[V2i::new(20, 5), V2i::new(30, -5)])
        .unwrap();
    let stroke = Stroke {
        brush: Brush {
            view_scale: 4,
            radius: 2,
        },
        color: Rgb::new(0.1, 0.2, 0.3),
        chunks: store.store_chunks(&[a, b]).unwrap(),
    };

    let r = store.stroke_ref(&stroke);
    assert_eq!(r.chunk_count(), 2);
    assert_eq!(r.point_count(), 4);
    let pts: Vec<V2i> = r.points().collect();
    assert_eq!(
        pts,
        vec![
            V2i::new(0, 0),
            V2i::new(10, 0),
            V2i::new(20, 5),
            V2i::new(30, -5)
        ]
    );
    assert_eq!(r.bounds(), Some(Rect::new(0, -5, 30, 5)));

    let snap = r.snapshot();
    assert_eq!(snap.chunks.len(), 2);
    assert_eq!(snap.chunks[1].points, vec![V2i::new(20, 5), V2i::new(30, -5)]);
}

#[test]
fn point_capacity_is_enforced() {
    let mut store = PersistentArena::new(3, 8);
    store.freeze_chunk(&[V2i::ZERO, V2i::ZERO]).unwrap();
    let err = store.freeze_chunk(&[V2i::ZERO, V2i::ZERO]).unwrap_err();
    assert!(matches!(err, InkError::Capacity(_)));
    let (points, _) = store.stats();
    assert_eq!(points.used, 2);
}

#[test]
fn stroke_without_chunks_has_no_bounds() {
    let mut store = PersistentArena::new(16, 4);
    let stroke = Stroke {
        brush: Brush {
            view_scale: 1,
            radius: 1,
        },
        color: Rgb::new(0.0, 0.0, 0.0),
        chunks: store.store_chunks(&[]).unwrap(),
    };
    assert_eq!(store.stroke_ref(&stroke).bounds(), None);
}
