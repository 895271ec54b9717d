//! Playback: cursor, snapshots, sinks, options, tick source, and the driver that ties them
//! together.

pub(crate) mod clock;
pub(crate) mod cursor;
pub(crate) mod driver;
pub(crate) mod opts;
pub(crate) mod sink;
pub(crate) mod snapshot;
