use crate::arena::region::{Region, RegionStats, Span};
use crate::capture::stroke::{ChunkView, Stroke, StrokeChunk, StrokeRef};
use crate::foundation::core::V2i;
use crate::foundation::error::{InkError, InkResult};
use crate::geometry::bounds::bounds_of;

/// Session-lifetime storage for frozen chunks and the chunk lists of finalized strokes.
pub(crate) struct PersistentArena {
    points: Region<V2i>,
    chunks: Region<StrokeChunk>,
}

impl PersistentArena {
    pub(crate) fn new(point_capacity: usize, chunk_capacity: usize) -> Self {
        Self {
            points: Region::new("persistent points", point_capacity),
            chunks: Region::new("persistent chunks", chunk_capacity),
        }
    }

    /// Copy `points` into the region and record their bounds.
    pub(crate) fn freeze_chunk(&mut self, points: &[V2i]) -> InkResult<StrokeChunk> {
        if points.is_empty() {
            return Err(InkError::validation("cannot freeze an empty chunk"));
        }
        let bounds = bounds_of(points);
        let points = self.points.alloc_slice(points)?;
        Ok(StrokeChunk { points, bounds })
    }

    pub(crate) fn store_chunks(&mut self, chunks: &[StrokeChunk]) -> InkResult<Span<StrokeChunk>> {
        self.chunks.alloc_slice(chunks)
    }

    pub(crate) fn view(&self, chunk: &StrokeChunk) -> ChunkView<'_> {
        ChunkView {
            points: self.points.get(chunk.points),
            bounds: chunk.bounds,
        }
    }

    pub(crate) fn chunks_of(&self, stroke: &Stroke) -> &[StrokeChunk] {
        self.chunks.get(stroke.chunks)
    }

    pub(crate) fn stroke_ref<'a>(&'a self, stroke: &'a Stroke) -> StrokeRef<'a> {
        StrokeRef {
            stroke,
            chunks: self.chunks_of(stroke),
            points: &self.points,
        }
    }

    pub(crate) fn stats(&self) -> (RegionStats, RegionStats) {
        (self.points.stats(), self.chunks.stats())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/arena/persistent.rs"]
mod tests;
