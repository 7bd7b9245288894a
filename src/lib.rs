//! inkfield is the rendering core of an infinite-canvas painting tool.
//!
//! Pointer samples arrive in raster space, are mapped onto an integer canvas whose extent is
//! limited only by `i64`, and are grouped into strokes. Every update repaints the whole visible
//! window into a packed 32-bit raster buffer from the stroke history.
//!
//! # Update overview
//!
//! 1. **Zoom**: apply one zoom step to the view scale (canvas units per pixel).
//! 2. **Clear**: fill the visible raster with the background color.
//! 3. **Capture**: map the pointer to canvas space and append it to the stroke in progress,
//!    freezing a chunk once its raster bounding box grows past a small area.
//! 4. **Paint**: rasterize the in-progress chunks, then every finalized stroke oldest first,
//!    by testing pixels against chains of capsules.
//!
//! Points and chunk records live in a bounded persistent region that is never reset during a
//! session; per-update scratch lives in a transient region reset at the start of every update.
//!
//! # Getting started
//!
//! Drive a [`Canvas`] directly with [`FrameInput`]s, or record them in a [`Script`] and replay it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod arena;
mod canvas;
mod capture;
mod foundation;
mod geometry;
mod render;
mod session;
mod transform;

pub use crate::foundation::core::{Rect, Rgb, V2i, Vec2, Viewport};
pub use crate::foundation::error::{InkError, InkResult};
pub use crate::foundation::math::{
    PixelLayout, hsv_to_rgb, srgb_channel_to_linear, srgb_to_linear,
};

pub use crate::arena::region::RegionStats;
pub use crate::canvas::config::{CanvasConfig, ColorSpec};
pub use crate::canvas::state::{ArenaStats, Canvas, CanvasSnapshot, FrameInput};
pub use crate::capture::machine::CaptureState;
pub use crate::capture::stroke::{Brush, ChunkSnapshot, ChunkView, StrokeRef, StrokeSnapshot};
pub use crate::geometry::bounds::{bounds_of, brush_footprint, enlarge, expand_by, point_in_bounds};
pub use crate::render::raster::RasterBuffer;
pub use crate::session::replay::{Replay, Script};
pub use crate::transform::view::{ViewTransform, ZoomPolicy};
