//! Step-by-step playback of AVL tree insertions.
//!
//! Inserting values into a [`TreeEngine`] yields a [`Trace`]: one [`Command`] per value, each an
//! ordered list of self-describing [`Instruction`]s (compare, create, found, rotate). A
//! [`Driver`] plays that trace back one animated instruction at a time:
//!
//! - Insert values with [`Driver::insert_command`] and advance with [`Driver::tick`]
//! - Pause, skip a command or the whole trace, or jump to any earlier position; earlier states
//!   come back from a [`SnapshotCache`] instead of being recomputed
//! - Observe the scene, step log and progress through a [`PlaybackSink`] such as [`Recorder`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod trace;
pub(crate) mod tree;

pub use crate::foundation::core::{Affine, NodeId, Point, Rgba8, Vec2};
pub use crate::foundation::error::{PlaybackError, PlaybackResult};

pub use crate::animation::ease::{Ease, Lerp};
pub use crate::animation::effect::{Effect, Palette, Progress};
pub use crate::animation::job::{
    AnimationState, InstructionAnimation, Outcome, SceneEdit, Stage, Timing,
};
pub use crate::playback::clock::FixedTicker;
pub use crate::playback::cursor::{Cursor, PlaybackCursor};
pub use crate::playback::driver::{Driver, DriverStatus};
pub use crate::playback::opts::PlaybackOpts;
pub use crate::playback::sink::{
    PlaybackSink, ProgressSink, Recorder, RenderSink, StepLogCommand, StepLogSink,
};
pub use crate::playback::snapshot::{Snapshot, SnapshotCache};
pub use crate::render::camera::Camera;
pub use crate::render::scene::{
    Disc, EdgeObject, EffectTag, NodeObject, NodeSprite, Scene, Stroke, StyleOpts,
};
pub use crate::render::svg::scene_to_svg;
pub use crate::trace::instruction::{Instruction, Link, NodeMove, RotateDir};
pub use crate::trace::log::{Command, Trace};
pub use crate::tree::avl::{Node, Tree};
pub use crate::tree::engine::{LayoutOpts, TreeEngine};
