use crate::arena::region::Region;
use crate::capture::stroke::{Brush, ChunkView};
use crate::foundation::core::{Rect, Rgb, V2i};
use crate::foundation::error::InkResult;
use crate::foundation::math::srgb_to_linear;
use crate::geometry::bounds::{brush_footprint, enlarge, expand_by, point_in_bounds};
use crate::render::raster::RasterBuffer;
use crate::transform::view::ViewTransform;

/// Per-stroke constants shared by every chunk.
#[derive(Clone, Copy, Debug)]
struct StrokePass {
    raster_radius: i64,
    test_radius: i64,
    /// Scan padding on top of the radius.
    margin: i64,
    footprint: Rect,
    pixel: u32,
}

/// Paints strokes into a [`RasterBuffer`] by testing pixels against chains of capsules.
///
/// Scratch polylines live in the transient region and are released after every chunk.
pub(crate) struct Rasterizer<'a> {
    target: &'a mut RasterBuffer,
    scratch: &'a mut Region<V2i>,
    view: ViewTransform,
}

impl<'a> Rasterizer<'a> {
    pub(crate) fn new(
        target: &'a mut RasterBuffer,
        scratch: &'a mut Region<V2i>,
        view: ViewTransform,
    ) -> Self {
        Self {
            target,
            scratch,
            view,
        }
    }

    /// Paint the chunks of one stroke, in order.
    ///
    /// Consecutive chunks are stitched: each chunk's polyline starts at the previous chunk's last
    /// point and ends at the next chunk's first point.
    pub(crate) fn paint_stroke<'c>(
        &mut self,
        brush: Brush,
        color: Rgb,
        chunks: impl IntoIterator<Item = ChunkView<'c>>,
    ) -> InkResult<()> {
        let relative_scale = brush.view_scale as f32 / self.view.view_scale() as f32;
        let raster_radius = (brush.radius as f32 * relative_scale) as i64;
        let test_radius = raster_radius * raster_radius;
        if test_radius == 0 {
            return Ok(());
        }

        let pass = StrokePass {
            raster_radius,
            test_radius,
            margin: 3 + (3.0 * relative_scale) as i64,
            footprint: brush_footprint(&brush, relative_scale),
            pixel: self.target.layout().pack(srgb_to_linear(color), 1.0),
        };

        let view = self.view;
        let mut prev_last = None;
        let mut chunks = chunks.into_iter().peekable();
        while let Some(chunk) = chunks.next() {
            let next_first = chunks
                .peek()
                .and_then(|c| c.points.first())
                .map(|&p| view.to_raster(p));
            self.paint_chunk(&pass, chunk, prev_last, next_first)?;
            if let Some(&last) = chunk.points.last() {
                prev_last = Some(view.to_raster(last));
            }
        }
        Ok(())
    }

    fn paint_chunk(
        &mut self,
        pass: &StrokePass,
        chunk: ChunkView<'_>,
        prev: Option<V2i>,
        next: Option<V2i>,
    ) -> InkResult<()> {
        let view = self.view;
        let bounds = Rect::from_corners(
            view.to_raster(chunk.bounds.top_left()),
            view.to_raster(chunk.bounds.bot_right()),
        );
        let scan = enlarge(bounds, pass.raster_radius + pass.margin).clip_to(view.viewport().rect());
        if scan.is_empty() {
            return Ok(());
        }

        let mark = self.scratch.mark();
        let retained = chunk
            .points
            .iter()
            .map(|&p| view.to_raster(p))
            .filter(|&p| point_in_bounds(p, pass.raster_radius, scan));
        let polyline = self
            .scratch
            .alloc_iter(prev.into_iter().chain(retained).chain(next))?;
        let stitched = usize::from(prev.is_some()) + usize::from(next.is_some());

        if polyline.len() > stitched {
            fill_scan(self.target, scan, self.scratch.get(polyline), pass);
        }
        self.scratch.rewind(mark);
        Ok(())
    }
}

fn fill_scan(target: &mut RasterBuffer, scan: Rect, polyline: &[V2i], pass: &StrokePass) {
    for y in scan.top..scan.bottom {
        for x in scan.left..scan.right {
            let p = V2i::new(x, y);
            let covered = match polyline {
                [only] => disc_covers(p, *only, pass.test_radius),
                _ => polyline.windows(2).any(|seg| {
                    segment_reach(seg[0], seg[1], pass.footprint).contains(p)
                        && capsule_covers(p, seg[0], seg[1], pass.test_radius)
                }),
            };
            if covered {
                target.put(x as usize, y as usize, pass.pixel);
            }
        }
    }
}

/// Segment bounds grown by the brush footprint; nothing outside can be covered.
fn segment_reach(a: V2i, b: V2i, footprint: Rect) -> Rect {
    let bounds = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
    expand_by(bounds, footprint)
}

pub(crate) fn disc_covers(p: V2i, center: V2i, radius_sq: i64) -> bool {
    (p - center).length_squared() < radius_sq
}

/// Distance test against the segment `a -> b` thickened by `sqrt(radius_sq)`.
///
/// The projection is clamped to the segment and truncated to integer pixels; a zero-length
/// segment is a disc around `a`.
pub(crate) fn capsule_covers(p: V2i, a: V2i, b: V2i, radius_sq: i64) -> bool {
    let ab = (b - a).to_vec2();
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return disc_covers(p, a, radius_sq);
    }

    let len = len_sq.sqrt();
    let dir = ab / len;
    let along = dir.dot((p - a).to_vec2());
    let proj = if along <= 0.0 {
        a
    } else if along >= len {
        b
    } else {
        V2i::new(
            a.x + (along * dir.x) as i64,
            a.y + (along * dir.y) as i64,
        )
    };
    disc_covers(p, proj, radius_sq)
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
