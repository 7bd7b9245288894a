use crate::arena::persistent::PersistentArena;
use crate::capture::stroke::{Brush, ChunkView, Stroke, StrokeChunk};
use crate::foundation::core::{Rect, Rgb, V2i};
use crate::foundation::error::{InkError, InkResult};
use crate::geometry::bounds::bounds_of;
use crate::transform::view::ViewTransform;

/// Pointer contact state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CaptureState {
    /// No pointer contact.
    Idle,
    /// Pointer down, points are being collected.
    Accumulating,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CaptureLimits {
    /// Raster px² area of the in-progress bounds that freezes a chunk.
    pub(crate) area_threshold: i64,
    pub(crate) max_points: usize,
    pub(crate) max_pending_chunks: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SampleOutcome {
    Extended,
    /// The in-progress span must be frozen once it has been drawn.
    FreezeDue,
}

/// Accumulates pointer samples into chunks and chunks into strokes.
pub(crate) struct StrokeCapture {
    limits: CaptureLimits,
    state: CaptureState,
    points: Vec<V2i>,
    pending: Vec<StrokeChunk>,
}

impl StrokeCapture {
    pub(crate) fn new(limits: CaptureLimits) -> Self {
        Self {
            limits,
            state: CaptureState::Idle,
            points: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> CaptureState {
        self.state
    }

    pub(crate) fn points(&self) -> &[V2i] {
        &self.points
    }

    pub(crate) fn pending(&self) -> &[StrokeChunk] {
        &self.pending
    }

    /// Append a canvas-space sample and test the in-progress bounds against the threshold.
    pub(crate) fn push(&mut self, canvas_point: V2i, view: &ViewTransform) -> SampleOutcome {
        self.state = CaptureState::Accumulating;
        self.points.push(canvas_point);

        let bounds = bounds_of(&self.points);
        let raster = Rect::from_corners(
            view.to_raster(bounds.top_left()),
            view.to_raster(bounds.bot_right()),
        );
        if raster.area() > self.limits.area_threshold {
            return SampleOutcome::FreezeDue;
        }
        if self.points.len() >= self.limits.max_points {
            tracing::warn!(
                points = self.points.len(),
                "in-progress point buffer full, flushing early"
            );
            return SampleOutcome::FreezeDue;
        }
        SampleOutcome::Extended
    }

    /// The unfrozen tail of the current stroke.
    pub(crate) fn live_chunk(&self) -> Option<ChunkView<'_>> {
        if self.points.is_empty() {
            return None;
        }
        Some(ChunkView {
            points: &self.points,
            bounds: bounds_of(&self.points),
        })
    }

    /// Move the in-progress points into a persistent chunk. No-op without points.
    pub(crate) fn freeze(&mut self, store: &mut PersistentArena) -> InkResult<()> {
        if self.points.is_empty() {
            return Ok(());
        }
        if self.pending.len() >= self.limits.max_pending_chunks {
            return Err(InkError::capacity(format!(
                "stroke exceeds {} chunks",
                self.limits.max_pending_chunks
            )));
        }

        let chunk = store.freeze_chunk(&self.points)?;
        tracing::debug!(
            points = self.points.len(),
            chunk = self.pending.len(),
            "froze stroke chunk"
        );
        self.pending.push(chunk);
        self.points.clear();
        Ok(())
    }

    /// Pointer released: flush the tail and wrap the pending chunks into a stroke.
    ///
    /// Returns `None` when nothing was drawn since the last release.
    pub(crate) fn finish(
        &mut self,
        store: &mut PersistentArena,
        brush: Brush,
        color: Rgb,
    ) -> InkResult<Option<Stroke>> {
        self.freeze(store)?;
        self.state = CaptureState::Idle;
        if self.pending.is_empty() {
            return Ok(None);
        }

        let chunks = store.store_chunks(&self.pending)?;
        tracing::debug!(
            chunks = self.pending.len(),
            view_scale = brush.view_scale,
            "finalized stroke"
        );
        self.pending.clear();
        Ok(Some(Stroke {
            brush,
            color,
            chunks,
        }))
    }

    /// Drop the in-progress points and chunks without producing a stroke.
    pub(crate) fn discard(&mut self) {
        self.points.clear();
        self.pending.clear();
        self.state = CaptureState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/machine.rs"]
mod tests;
