use std::fmt;

use crate::playback::sink::StepLogSink;
use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::trace::log::Trace;

/// Position in a trace: command index, then instruction index within that command.
///
/// Ordering is lexicographic on `(command, step)`. `(trace.len(), 0)` is the end sentinel.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Cursor {
    pub command: usize,
    pub step: usize,
}

impl Cursor {
    pub const START: Cursor = Cursor::new(0, 0);

    pub const fn new(command: usize, step: usize) -> Self {
        Self { command, step }
    }

    pub fn is_end(self, trace: &Trace) -> bool {
        self.command >= trace.len()
    }

    /// Next instruction position, rolling into the next command and clamping at the end sentinel.
    pub fn next(self, trace: &Trace) -> Cursor {
        if self.is_end(trace) {
            return trace.end();
        }
        if self.step + 1 < trace.command_len(self.command) {
            Cursor::new(self.command, self.step + 1)
        } else {
            Cursor::new(self.command + 1, 0)
        }
    }

    /// Previous instruction position, clamping at `(0, 0)`.
    pub fn prev(self, trace: &Trace) -> Cursor {
        if self.is_end(trace) {
            return trace.last_position().unwrap_or(Cursor::START);
        }
        if self.step > 0 {
            return Cursor::new(self.command, self.step - 1);
        }
        match self.command.checked_sub(1) {
            Some(command) => {
                Cursor::new(command, trace.command_len(command).saturating_sub(1))
            }
            None => Cursor::START,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.command, self.step)
    }
}

/// The playback position plus the furthest position reached by stepping forward.
///
/// Every non-silent mutation announces the new position to the step log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    position: Cursor,
    furthest: Cursor,
}

impl PlaybackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Cursor {
        self.position
    }

    pub fn furthest(&self) -> Cursor {
        self.furthest
    }

    pub fn increment(&mut self, trace: &Trace, log: &mut impl StepLogSink) {
        self.increment_silent(trace);
        self.publish(trace, log);
    }

    pub fn increment_silent(&mut self, trace: &Trace) {
        self.position = self.position.next(trace);
        if self.position > self.furthest {
            self.furthest = self.position;
        }
        tracing::trace!(position = %self.position, "cursor advanced");
    }

    pub fn decrement(&mut self, trace: &Trace, log: &mut impl StepLogSink) {
        self.decrement_silent(trace);
        self.publish(trace, log);
    }

    pub fn decrement_silent(&mut self, trace: &Trace) {
        self.position = self.position.prev(trace);
    }

    /// Jump to `position`. Does not move `furthest`.
    pub fn set(
        &mut self,
        position: Cursor,
        trace: &Trace,
        log: &mut impl StepLogSink,
    ) -> PlaybackResult<()> {
        self.set_silent(position, trace)?;
        self.publish(trace, log);
        Ok(())
    }

    pub fn set_silent(&mut self, position: Cursor, trace: &Trace) -> PlaybackResult<()> {
        if !trace.contains(position) {
            return Err(PlaybackError::InvalidPointer(position));
        }
        self.position = position;
        Ok(())
    }

    pub fn at_end(&self, trace: &Trace) -> bool {
        self.position.is_end(trace)
    }

    pub fn at_furthest(&self) -> bool {
        self.position >= self.furthest
    }

    /// Select the current position in the step log, or the final instruction when at the end.
    pub fn publish(&self, trace: &Trace, log: &mut impl StepLogSink) {
        let shown = if self.at_end(trace) {
            trace.last_position()
        } else {
            Some(self.position)
        };
        if let Some(shown) = shown {
            log.select(shown);
        }
    }

    /// Number of instructions before the cursor.
    pub fn flat_index(&self, trace: &Trace) -> usize {
        if self.at_end(trace) {
            return trace.total_instructions();
        }
        let before: usize = trace.commands()[..self.position.command]
            .iter()
            .map(|command| command.len())
            .sum();
        before + self.position.step
    }

    /// Completed fraction of the trace in `[0, 1]`; zero for an empty trace.
    pub fn progress(&self, trace: &Trace) -> f64 {
        let total = trace.total_instructions();
        if total == 0 {
            return 0.0;
        }
        self.flat_index(trace) as f64 / total as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/cursor.rs"]
mod tests;
