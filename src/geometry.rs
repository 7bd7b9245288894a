//! Bounding-rectangle helpers shared by capture and rasterization.

pub(crate) mod bounds;
