//! Canvas state and the per-frame update driver.

pub(crate) mod config;
pub(crate) mod state;
