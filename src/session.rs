//! Scripted input replay, used by the command line front-end and end-to-end tests.

pub(crate) mod replay;
