//! Bump-allocated storage regions.
//!
//! The canvas owns two kinds of region:
//!
//! - **persistent**: finalized chunk points and chunk records. Never reset during a session.
//! - **transient**: per-update scratch. Reset at the start of every update; spans handed out
//!   before the reset are stale and must not be resolved again.

pub(crate) mod persistent;
pub(crate) mod region;
