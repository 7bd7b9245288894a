//! Pointer capture: the stroke model and the chunking state machine.

pub(crate) mod machine;
pub(crate) mod stroke;
