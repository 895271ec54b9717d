use std::collections::HashMap;

use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::playback::cursor::Cursor;
use crate::render::scene::Scene;
use crate::tree::avl::Tree;

/// Tree and scene as they were before the instruction at some position ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub tree: Tree,
    pub scene: Scene,
}

/// Snapshots by position. A position is captured at most once and never recomputed.
#[derive(Clone, Debug, Default)]
pub struct SnapshotCache {
    entries: HashMap<Cursor, Snapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store copies of `tree` and `scene` for `at`. Returns `false` if `at` was already captured,
    /// in which case nothing changes.
    pub fn capture(&mut self, at: Cursor, tree: &Tree, scene: &Scene) -> bool {
        if self.entries.contains_key(&at) {
            return false;
        }
        self.insert(
            at,
            Snapshot {
                tree: tree.clone(),
                scene: scene.clone(),
            },
        )
    }

    /// Store an already owned snapshot; same first-wins rule as [`capture`](Self::capture).
    pub fn insert(&mut self, at: Cursor, snapshot: Snapshot) -> bool {
        if self.entries.contains_key(&at) {
            return false;
        }
        tracing::debug!(position = %at, nodes = snapshot.tree.len(), "snapshot captured");
        self.entries.insert(at, snapshot);
        true
    }

    pub fn lookup(&self, at: Cursor) -> PlaybackResult<&Snapshot> {
        self.entries
            .get(&at)
            .ok_or(PlaybackError::MissingSnapshot(at))
    }

    /// Fresh copies of the state stored for `at`.
    pub fn restore(&self, at: Cursor) -> PlaybackResult<Snapshot> {
        self.lookup(at).cloned()
    }

    pub fn contains(&self, at: Cursor) -> bool {
        self.entries.contains_key(&at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/snapshot.rs"]
mod tests;
