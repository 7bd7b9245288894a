use crate::foundation::core::{V2i, Viewport};
use crate::foundation::error::{InkError, InkResult};

/// Mapping between the infinite integer canvas and the visible raster.
///
/// `view_scale` is the number of canvas units per raster pixel; larger is more zoomed out.
/// The canvas origin sits at the viewport center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransform {
    view_scale: i64,
    viewport: Viewport,
}

impl ViewTransform {
    /// Create a validated transform (`view_scale >= 1`).
    pub fn new(view_scale: i64, viewport: Viewport) -> InkResult<Self> {
        if view_scale < 1 {
            return Err(InkError::validation("view_scale must be >= 1"));
        }
        Ok(Self {
            view_scale,
            viewport,
        })
    }

    /// Current canvas units per raster pixel.
    pub fn view_scale(&self) -> i64 {
        self.view_scale
    }

    /// Current raster viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub(crate) fn set_view_scale(&mut self, view_scale: i64) {
        debug_assert!(view_scale >= 1);
        self.view_scale = view_scale.max(1);
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// `canvas / view_scale + center`, truncating toward zero.
    #[inline]
    pub fn to_raster(&self, canvas: V2i) -> V2i {
        canvas / self.view_scale + self.viewport.center()
    }

    /// `(raster - center) * view_scale`.
    #[inline]
    pub fn to_canvas(&self, raster: V2i) -> V2i {
        (raster - self.viewport.center()) * self.view_scale
    }
}

/// One-step multiplicative zoom with integer clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPolicy {
    /// Multiplicative factor per step, `> 1`.
    pub factor: f64,
    /// Smallest reachable view scale (most zoomed in).
    pub min_view_scale: i64,
    /// Largest reachable view scale (most zoomed out).
    pub max_view_scale: i64,
}

impl ZoomPolicy {
    /// Apply one zoom step. `delta > 0` zooms in, `delta < 0` zooms out, `0` is a no-op.
    pub fn step(&self, view_scale: i64, delta: i32) -> i64 {
        match delta.signum() {
            1 if view_scale > self.min_view_scale => {
                ((view_scale as f64 / self.factor) as i64).max(self.min_view_scale)
            }
            -1 if view_scale < self.max_view_scale => {
                ((view_scale as f64 * self.factor) as i64 + 1).min(self.max_view_scale)
            }
            _ => view_scale,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/view.rs"]
mod tests;
