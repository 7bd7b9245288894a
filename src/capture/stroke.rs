use crate::arena::region::Span;
use crate::foundation::core::{Rect, Rgb, V2i};

/// Brush snapshot attached to a stroke.
///
/// `view_scale` is the zoom at creation time; the rasterizer divides it by the current view
/// scale so a stroke keeps its apparent thickness as the user zooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Brush {
    /// View scale when the brush was snapshotted.
    pub view_scale: i64,
    /// Radius in pixels at `view_scale`.
    pub radius: i64,
}

/// Frozen span of a stroke trajectory, stored in the persistent region.
#[derive(Clone, Copy, Debug)]
pub struct StrokeChunk {
    pub(crate) points: Span<V2i>,
    /// Canvas-space bounds of the chunk's points.
    pub bounds: Rect,
}

/// Finalized stroke: brush, color and an ordered run of chunks.
#[derive(Clone, Copy, Debug)]
pub struct Stroke {
    /// Brush snapshot taken at pointer release.
    pub brush: Brush,
    /// sRGB stroke color.
    pub color: Rgb,
    pub(crate) chunks: Span<StrokeChunk>,
}

/// Borrowed view of one chunk: canvas points in temporal order plus their bounds.
#[derive(Clone, Copy, Debug)]
pub struct ChunkView<'a> {
    /// Canvas-space points.
    pub points: &'a [V2i],
    /// Canvas-space bounds of `points`.
    pub bounds: Rect,
}

/// Read access to a finalized stroke, for inspection and serialization.
#[derive(Clone, Copy)]
pub struct StrokeRef<'a> {
    pub(crate) stroke: &'a Stroke,
    pub(crate) chunks: &'a [StrokeChunk],
    pub(crate) points: &'a crate::arena::region::Region<V2i>,
}

impl<'a> StrokeRef<'a> {
    /// Brush snapshot.
    pub fn brush(&self) -> Brush {
        self.stroke.brush
    }

    /// sRGB color.
    pub fn color(&self) -> Rgb {
        self.stroke.color
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Chunks in drawing order.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkView<'a>> + 'a {
        let points = self.points;
        let chunks = self.chunks;
        chunks.iter().map(move |c| ChunkView {
            points: points.get(c.points),
            bounds: c.bounds,
        })
    }

    /// Every point of the stroke in temporal order.
    pub fn points(&self) -> impl Iterator<Item = V2i> + 'a {
        self.chunks().flat_map(|c| c.points.iter().copied())
    }

    /// Total number of points.
    pub fn point_count(&self) -> usize {
        self.chunks.iter().map(|c| c.points.len()).sum()
    }

    /// Canvas-space bounds of the whole stroke, `None` for a stroke without points.
    pub fn bounds(&self) -> Option<Rect> {
        self.chunks.iter().map(|c| c.bounds).reduce(|a, b| {
            Rect::new(
                a.left.min(b.left),
                a.top.min(b.top),
                a.right.max(b.right),
                a.bottom.max(b.bottom),
            )
        })
    }

    /// Owned, serializable copy.
    pub fn snapshot(&self) -> StrokeSnapshot {
        StrokeSnapshot {
            brush: self.brush(),
            color: self.color(),
            bounds: self.bounds(),
            chunks: self
                .chunks()
                .map(|c| ChunkSnapshot {
                    bounds: c.bounds,
                    points: c.points.to_vec(),
                })
                .collect(),
        }
    }
}

/// Serializable copy of a chunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChunkSnapshot {
    /// Canvas-space bounds.
    pub bounds: Rect,
    /// Canvas-space points.
    pub points: Vec<V2i>,
}

/// Serializable copy of a finalized stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeSnapshot {
    /// Brush snapshot.
    pub brush: Brush,
    /// sRGB color.
    pub color: Rgb,
    /// Whole-stroke canvas bounds.
    pub bounds: Option<Rect>,
    /// Chunks in drawing order.
    pub chunks: Vec<ChunkSnapshot>,
}
