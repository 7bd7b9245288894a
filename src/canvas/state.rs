use crate::arena::persistent::PersistentArena;
use crate::arena::region::{Region, RegionStats};
use crate::canvas::config::CanvasConfig;
use crate::capture::machine::{CaptureLimits, CaptureState, SampleOutcome, StrokeCapture};
use crate::capture::stroke::{Brush, Stroke, StrokeRef, StrokeSnapshot};
use crate::foundation::core::{Rgb, V2i, Viewport};
use crate::foundation::error::InkResult;
use crate::render::raster::RasterBuffer;
use crate::render::rasterizer::Rasterizer;
use crate::transform::view::{ViewTransform, ZoomPolicy};

/// Input for one update, as delivered by the platform layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Raster-space pointer position while in contact; `None` means released.
    pub pointer: Option<V2i>,
    /// `> 0` zooms in one step, `< 0` zooms out one step.
    pub zoom: i32,
    /// Restore the initial view scale and drop the in-progress stroke.
    pub reset: bool,
    /// Accepted for compatibility; every update repaints the full buffer.
    pub full_refresh: bool,
}

impl FrameInput {
    /// Pointer in contact at `(x, y)`.
    pub fn pointer(x: i64, y: i64) -> Self {
        Self {
            pointer: Some(V2i::new(x, y)),
            ..Self::default()
        }
    }

    /// Pointer released, nothing else.
    pub fn release() -> Self {
        Self::default()
    }

    /// Pointer released with one zoom step.
    pub fn zoom(delta: i32) -> Self {
        Self {
            zoom: delta,
            ..Self::default()
        }
    }

    /// Pointer released with a reset request.
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }
}

/// Region usage across both arenas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArenaStats {
    /// Persistent chunk points.
    pub persistent_points: RegionStats,
    /// Persistent chunk records.
    pub persistent_chunks: RegionStats,
    /// Per-update scratch points.
    pub transient_points: RegionStats,
}

/// Serializable summary of the canvas, for inspection and persistence collaborators.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CanvasSnapshot {
    /// Current view scale.
    pub view_scale: i64,
    /// Current viewport.
    pub viewport: Viewport,
    /// Capture state.
    pub capture: CaptureState,
    /// Number of updates run so far.
    pub frames: u64,
    /// Finalized strokes, oldest first.
    pub strokes: Vec<StrokeSnapshot>,
    /// Arena usage.
    pub arena: ArenaStats,
}

/// Root aggregate: raster target, view, capture state, stroke history and both arenas.
pub struct Canvas {
    config: CanvasConfig,
    brush_color: Rgb,
    zoom: ZoomPolicy,
    view: ViewTransform,
    raster: RasterBuffer,
    capture: StrokeCapture,
    strokes: Vec<Stroke>,
    store: PersistentArena,
    scratch: Region<V2i>,
    frames: u64,
}

impl Canvas {
    /// Create a canvas sized for `config.max_width x config.max_height`.
    ///
    /// The viewport starts at full capacity; the platform layer narrows it with
    /// [`Canvas::set_viewport`].
    pub fn new(config: CanvasConfig) -> InkResult<Self> {
        config.validate()?;
        let capacity = Viewport::new(config.max_width, config.max_height);
        let raster = RasterBuffer::new(capacity)?;
        let view = ViewTransform::new(config.initial_view_scale, capacity)?;

        Ok(Self {
            brush_color: config.brush_color.to_rgb(),
            zoom: ZoomPolicy {
                factor: config.zoom_factor,
                min_view_scale: config.min_view_scale,
                max_view_scale: config.max_view_scale,
            },
            view,
            raster,
            capture: StrokeCapture::new(CaptureLimits {
                area_threshold: config.chunk_area_threshold,
                max_points: config.max_stroke_points,
                max_pending_chunks: config.max_pending_chunks,
            }),
            strokes: Vec::new(),
            store: PersistentArena::new(config.persistent_points, config.persistent_chunks),
            scratch: Region::new("transient points", config.transient_points),
            frames: 0,
            config,
        })
    }

    /// Resize the visible raster. Must fit the capacity chosen at construction.
    pub fn set_viewport(&mut self, viewport: Viewport) -> InkResult<()> {
        self.raster.set_viewport(viewport)?;
        self.view.set_viewport(viewport);
        Ok(())
    }

    /// Change the color used for strokes finalized from now on.
    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush_color = color;
    }

    /// Run one update: zoom, clear, capture, then repaint everything.
    ///
    /// Returns whether the raster changed. The buffer is cleared on every call, so this is
    /// always `true` on success.
    ///
    /// A capture failure (a full chunk list or persistent region) drops the stroke in progress
    /// and is returned after the frame has been repainted from history; later updates proceed
    /// normally.
    #[tracing::instrument(skip(self), fields(frame = self.frames))]
    pub fn update(&mut self, input: &FrameInput) -> InkResult<bool> {
        self.scratch.reset();
        self.frames += 1;

        if input.zoom != 0 {
            let before = self.view.view_scale();
            let after = self.zoom.step(before, input.zoom);
            if after != before {
                tracing::debug!(before, after, "view scale changed");
                self.view.set_view_scale(after);
            }
        }

        self.raster.clear(self.config.background);

        let brush = self.current_brush();
        let color = self.brush_color;
        let captured = match input.pointer {
            Some(raster_point) => self.capture_sample(raster_point),
            None => self.finish_stroke(brush, color),
        };
        if let Err(err) = &captured {
            tracing::warn!(error = %err, "dropping stroke in progress");
            self.capture.discard();
        }

        if input.reset {
            self.reset();
        }

        // Oldest first, the stroke in progress last: it is the newest.
        self.paint_history()?;
        self.paint_in_progress(brush, color)?;
        captured.map(|()| true)
    }

    /// Restore the initial view scale and drop the in-progress stroke.
    ///
    /// Finalized strokes are kept.
    pub fn reset(&mut self) {
        self.view.set_view_scale(self.config.initial_view_scale);
        self.capture.discard();
    }

    /// The raster target.
    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    /// Current view transform.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Current view scale.
    pub fn view_scale(&self) -> i64 {
        self.view.view_scale()
    }

    /// Active configuration.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Whether a stroke is being captured.
    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Canvas points not yet frozen into a chunk.
    pub fn in_progress_points(&self) -> &[V2i] {
        self.capture.points()
    }

    /// Chunks frozen for the stroke currently being drawn.
    pub fn in_progress_chunk_count(&self) -> usize {
        self.capture.pending().len()
    }

    /// Number of finalized strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Finalized strokes in drawing order (oldest first).
    pub fn strokes(&self) -> impl ExactSizeIterator<Item = StrokeRef<'_>> + '_ {
        self.strokes.iter().map(|s| self.store.stroke_ref(s))
    }

    /// Region usage.
    pub fn arena_stats(&self) -> ArenaStats {
        let (persistent_points, persistent_chunks) = self.store.stats();
        ArenaStats {
            persistent_points,
            persistent_chunks,
            transient_points: self.scratch.stats(),
        }
    }

    /// Owned summary of the canvas.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            view_scale: self.view.view_scale(),
            viewport: self.view.viewport(),
            capture: self.capture.state(),
            frames: self.frames,
            strokes: self.strokes().map(|s| s.snapshot()).collect(),
            arena: self.arena_stats(),
        }
    }

    fn current_brush(&self) -> Brush {
        Brush {
            view_scale: self.view.view_scale(),
            radius: self.config.brush_radius,
        }
    }

    fn capture_sample(&mut self, raster_point: V2i) -> InkResult<()> {
        let canvas_point = self.view.to_canvas(raster_point);
        if self.capture.push(canvas_point, &self.view) == SampleOutcome::FreezeDue {
            self.capture.freeze(&mut self.store)?;
        }
        Ok(())
    }

    fn finish_stroke(&mut self, brush: Brush, color: Rgb) -> InkResult<()> {
        if let Some(stroke) = self.capture.finish(&mut self.store, brush, color)? {
            self.strokes.push(stroke);
        }
        Ok(())
    }

    /// Frozen chunks of the current stroke followed by its live tail, stitched as one stroke.
    fn paint_in_progress(&mut self, brush: Brush, color: Rgb) -> InkResult<()> {
        let store = &self.store;
        let capture = &self.capture;
        if capture.pending().is_empty() && capture.points().is_empty() {
            return Ok(());
        }
        let chunks = capture
            .pending()
            .iter()
            .map(|c| store.view(c))
            .chain(capture.live_chunk());
        Rasterizer::new(&mut self.raster, &mut self.scratch, self.view)
            .paint_stroke(brush, color, chunks)
    }

    fn paint_history(&mut self) -> InkResult<()> {
        let store = &self.store;
        let mut rasterizer = Rasterizer::new(&mut self.raster, &mut self.scratch, self.view);
        for stroke in &self.strokes {
            rasterizer.paint_stroke(
                stroke.brush,
                stroke.color,
                store.chunks_of(stroke).iter().map(|c| store.view(c)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/state.rs"]
mod tests;
