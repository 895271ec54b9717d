//! AVL tree model, the instruction-emitting engine, and instruction replay.

pub(crate) mod avl;
pub(crate) mod engine;
pub(crate) mod replay;
