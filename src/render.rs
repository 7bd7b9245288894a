//! CPU raster target and stroke rasterization.

pub(crate) mod raster;
pub(crate) mod rasterizer;
