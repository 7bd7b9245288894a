use crate::capture::stroke::Brush;
use crate::foundation::core::{Rect, V2i};

/// Minimal rectangle enclosing every point.
///
/// # Panics
///
/// Panics when `points` is empty.
pub fn bounds_of(points: &[V2i]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        panic!("bounds_of called with zero points");
    };

    rest.iter().fold(Rect::from_corners(*first, *first), |r, p| {
        Rect::new(
            r.left.min(p.x),
            r.top.min(p.y),
            r.right.max(p.x),
            r.bottom.max(p.y),
        )
    })
}

/// Grow all four edges outwards by `offset`.
pub fn enlarge(rect: Rect, offset: i64) -> Rect {
    Rect::new(
        rect.left - offset,
        rect.top - offset,
        rect.right + offset,
        rect.bottom + offset,
    )
}

/// Minkowski sum of `rect` with an origin-centered `footprint`.
pub fn expand_by(rect: Rect, footprint: Rect) -> Rect {
    Rect::new(
        rect.left + footprint.left,
        rect.top + footprint.top,
        rect.right + footprint.right,
        rect.bottom + footprint.bottom,
    )
}

/// Origin-centered square covering the brush disc at `relative_scale`.
///
/// Only good for coarse culling; coverage is decided by the capsule test.
pub fn brush_footprint(brush: &Brush, relative_scale: f32) -> Rect {
    let r = (brush.radius as f32 * relative_scale) as i64;
    Rect::new(-r, -r, r, r)
}

/// `true` if a disc of `radius` centered at `point` can touch the half-open `rect`.
pub fn point_in_bounds(point: V2i, radius: i64, rect: Rect) -> bool {
    point.x + radius >= rect.left
        && point.x - radius < rect.right
        && point.y + radius >= rect.top
        && point.y - radius < rect.bottom
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bounds.rs"]
mod tests;
