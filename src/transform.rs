//! Canvas <-> raster coordinate mapping.

pub(crate) mod view;
