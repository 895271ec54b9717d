//! The instruction trace: what the tree engine emits and the playback engine replays.

pub(crate) mod instruction;
pub(crate) mod log;
