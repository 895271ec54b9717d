//! Per-instruction animations: easing, sub-effects, and the staged job that runs them.

pub(crate) mod ease;
pub(crate) mod effect;
pub(crate) mod job;
