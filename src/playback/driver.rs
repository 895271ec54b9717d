use std::time::Duration;

use crate::animation::job::{AnimationState, InstructionAnimation, Outcome};
use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::playback::cursor::{Cursor, PlaybackCursor};
use crate::playback::opts::PlaybackOpts;
use crate::playback::sink::{PlaybackSink, StepLogCommand};
use crate::playback::snapshot::{Snapshot, SnapshotCache};
use crate::render::scene::Scene;
use crate::trace::log::Trace;
use crate::tree::avl::Tree;
use crate::tree::engine::TreeEngine;

/// What the driver is doing after a call to [`Driver::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverStatus {
    /// Not playing, and not at the end of the trace.
    Idle,
    /// An instruction is animating, or the next one starts on the next tick.
    Animating,
    Paused,
    /// The cursor is at the end of the trace.
    Finished,
}

/// The running animation and the tree it leads to.
#[derive(Debug)]
struct ActiveJob {
    animation: InstructionAnimation,
    staged_tree: Tree,
}

/// Playback engine: walks the cursor through the trace, animating one instruction at a time and
/// serving navigation requests.
///
/// Every operation takes `&mut self`; a navigation request first cancels the running animation,
/// so no two jobs ever overlap. Operations that fail leave tree, scene and cursor unchanged.
pub struct Driver<S: PlaybackSink> {
    engine: TreeEngine,
    trace: Trace,
    cursor: PlaybackCursor,
    cache: SnapshotCache,
    /// Tree at the cursor, advanced by replaying instructions.
    tree: Tree,
    scene: Scene,
    active: Option<ActiveJob>,
    running: bool,
    paused: bool,
    sink: S,
    opts: PlaybackOpts,
}

impl<S: PlaybackSink> Driver<S> {
    pub fn new(opts: PlaybackOpts, sink: S) -> PlaybackResult<Self> {
        opts.validate()?;
        Ok(Self {
            engine: TreeEngine::new(opts.layout),
            trace: Trace::new(),
            cursor: PlaybackCursor::new(),
            cache: SnapshotCache::new(),
            tree: Tree::new(),
            scene: Scene::new(),
            active: None,
            running: false,
            paused: false,
            sink,
            opts,
        })
    }

    pub fn engine(&self) -> &TreeEngine {
        &self.engine
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Tree as of the cursor position.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn position(&self) -> Cursor {
        self.cursor.position()
    }

    pub fn furthest(&self) -> Cursor {
        self.cursor.furthest()
    }

    pub fn progress(&self) -> f64 {
        self.cursor.progress(&self.trace)
    }

    pub fn snapshots(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.opts.tick_ms)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// State of the running animation, if any.
    pub fn animation_state(&self) -> Option<AnimationState> {
        self.active.as_ref().map(|job| job.animation.state())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn status(&self) -> DriverStatus {
        if self.paused {
            DriverStatus::Paused
        } else if self.active.is_some() {
            DriverStatus::Animating
        } else if self.cursor.at_end(&self.trace) {
            DriverStatus::Finished
        } else if self.running {
            DriverStatus::Animating
        } else {
            DriverStatus::Idle
        }
    }

    /// Insert `values`, one command each, and start playing them.
    ///
    /// Whatever is left of the trace is skipped first, so the new commands start from the final
    /// tree. Non-finite values are dropped. Clears a pending pause.
    #[tracing::instrument(skip(self))]
    pub fn insert_command(&mut self, values: &[f64]) -> PlaybackResult<usize> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() != values.len() {
            tracing::warn!(
                dropped = values.len() - finite.len(),
                "ignoring non-finite values"
            );
        }

        self.settle();
        self.skip_while(|_| true)?;
        let commands = self.engine.insert_values(&finite);
        let added = commands.len();
        self.trace.extend(commands);
        if self.engine.detect_crowding() {
            tracing::debug!("layout is crowded");
        }

        self.paused = false;
        self.running = true;
        self.announce();
        Ok(added)
    }

    /// Pausing cancels the running animation and leaves the scene at the last completed
    /// instruction; unpausing resumes playback from there.
    #[tracing::instrument(skip(self))]
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.settle();
            self.paused = true;
        } else {
            self.paused = false;
            self.running = true;
        }
    }

    /// Start (or keep) playing, unless paused.
    pub fn run(&mut self) {
        if !self.paused {
            self.running = true;
        }
    }

    /// Advance playback by one frame.
    pub fn tick(&mut self) -> PlaybackResult<DriverStatus> {
        if self.paused {
            return Ok(DriverStatus::Paused);
        }
        if self.active.is_none() {
            if self.cursor.at_end(&self.trace) {
                self.running = false;
                return Ok(DriverStatus::Finished);
            }
            if !self.running {
                return Ok(DriverStatus::Idle);
            }
            self.start_job()?;
        }

        let Some(job) = self.active.as_mut() else {
            return Ok(self.status());
        };
        let state = job.animation.tick(&mut self.scene);
        self.sink.present(&self.scene);

        if state == AnimationState::Done
            && let Some(job) = self.active.take()
            && job.animation.outcome() == Some(Outcome::Completed)
        {
            self.tree = job.staged_tree;
            self.cursor.increment_silent(&self.trace);
            self.announce();
        }
        Ok(self.status())
    }

    /// Tick until the driver stops animating, at most `max_ticks` times.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> PlaybackResult<DriverStatus> {
        for _ in 0..max_ticks {
            let status = self.tick()?;
            if status != DriverStatus::Animating {
                return Ok(status);
            }
        }
        Ok(self.status())
    }

    /// Finish the current command instantly.
    #[tracing::instrument(skip(self), fields(at = %self.cursor.position()))]
    pub fn skip_step(&mut self) -> PlaybackResult<()> {
        self.settle();
        let command = self.cursor.position().command;
        self.skip_while(|at| at.command == command)?;
        self.run();
        Ok(())
    }

    /// Skip to the end of the trace.
    #[tracing::instrument(skip(self), fields(at = %self.cursor.position()))]
    pub fn skip_all(&mut self) -> PlaybackResult<()> {
        self.settle();
        self.skip_while(|_| true)?;
        self.run();
        Ok(())
    }

    /// Move to `to`: restored from its snapshot when there is one, otherwise reached by skipping
    /// forward.
    #[tracing::instrument(skip(self), fields(from = %self.cursor.position()))]
    pub fn jump_to_step(&mut self, to: Cursor) -> PlaybackResult<()> {
        if !self.trace.contains(to) {
            return Err(PlaybackError::InvalidPointer(to));
        }
        let known = self.cache.contains(to);
        if !known && to < self.cursor.position() {
            return Err(PlaybackError::MissingSnapshot(to));
        }

        self.settle();
        if known {
            let Snapshot { tree, scene } = self.cache.restore(to)?;
            self.cursor.set_silent(to, &self.trace)?;
            self.tree = tree;
            self.scene = scene;
            tracing::debug!(position = %to, "restored snapshot");
            self.announce();
        } else {
            self.skip_while(|at| at < to)?;
        }
        self.run();
        Ok(())
    }

    pub fn go_back(&mut self) -> PlaybackResult<()> {
        let to = self.cursor.position().prev(&self.trace);
        self.jump_to_step(to)
    }

    pub fn go_forward(&mut self) -> PlaybackResult<()> {
        let to = self.cursor.position().next(&self.trace);
        self.jump_to_step(to)
    }

    /// Cancel and drop the running animation, reverting the scene to where it started.
    fn settle(&mut self) {
        if let Some(mut job) = self.active.take() {
            job.animation.cancel(&mut self.scene);
            tracing::debug!(position = %self.cursor.position(), "cancelled animation");
            self.sink.present(&self.scene);
        }
    }

    fn start_job(&mut self) -> PlaybackResult<()> {
        let at = self.cursor.position();
        let Some(instruction) = self.trace.get(at) else {
            return Ok(());
        };
        self.cache.capture(at, &self.tree, &self.scene);
        tracing::debug!(position = %at, kind = instruction.kind(), "starting animation");

        let mut job = self
            .tree
            .applied(instruction)
            .and_then(|staged_tree| {
                let animation = InstructionAnimation::new(
                    instruction,
                    &self.scene,
                    self.opts.timing(),
                    &self.opts.style,
                )?;
                Ok(ActiveJob {
                    animation,
                    staged_tree,
                })
            })
            .inspect_err(|err| tracing::warn!(position = %at, %err, "cannot play instruction"))?;

        self.sync_step_log();
        self.cursor.publish(&self.trace, &mut self.sink);
        job.animation.start(&mut self.scene);
        self.active = Some(job);
        Ok(())
    }

    /// Skip instructions while `keep_going` holds for the cursor, working on copies that replace
    /// the live state only if every instruction applies.
    fn skip_while(&mut self, mut keep_going: impl FnMut(Cursor) -> bool) -> PlaybackResult<usize> {
        let timing = self.opts.timing();
        let mut tree = self.tree.clone();
        let mut scene = self.scene.clone();
        let mut cursor = self.cursor;
        let mut captured = Vec::new();
        let mut skipped = 0;

        while !cursor.at_end(&self.trace) && keep_going(cursor.position()) {
            let at = cursor.position();
            let Some(instruction) = self.trace.get(at) else {
                break;
            };
            if !self.cache.contains(at) {
                captured.push((
                    at,
                    Snapshot {
                        tree: tree.clone(),
                        scene: scene.clone(),
                    },
                ));
            }
            InstructionAnimation::new(instruction, &scene, timing, &self.opts.style)
                .and_then(|mut animation| {
                    animation.skip(&mut scene);
                    tree.apply(instruction)
                })
                .inspect_err(|err| tracing::warn!(position = %at, %err, "cannot skip instruction"))?;
            cursor.increment_silent(&self.trace);
            skipped += 1;
        }

        for (at, snapshot) in captured {
            self.cache.insert(at, snapshot);
        }
        tracing::debug!(from = %self.cursor.position(), to = %cursor.position(), "skipped");
        self.tree = tree;
        self.scene = scene;
        self.cursor = cursor;
        self.announce();
        Ok(skipped)
    }

    /// Push step log, selection, progress and scene to the sink.
    fn announce(&mut self) {
        self.sync_step_log();
        self.cursor.publish(&self.trace, &mut self.sink);
        self.sink.set_progress(self.cursor.progress(&self.trace));
        self.sink.present(&self.scene);
    }

    /// Send command names and explanations up to the cursor, but only when the cursor is at the
    /// furthest position reached.
    fn sync_step_log(&mut self) {
        if !self.cursor.at_furthest() {
            return;
        }
        let at = self.cursor.position();
        let commands: Vec<StepLogCommand> = self
            .trace
            .commands()
            .iter()
            .take(at.command.saturating_add(1))
            .enumerate()
            .map(|(i, command)| {
                let shown = if i == at.command {
                    at.step + 1
                } else {
                    command.len()
                };
                StepLogCommand {
                    name: command.name.clone(),
                    steps: command
                        .steps
                        .iter()
                        .take(shown)
                        .map(|step| step.explanation().to_string())
                        .collect(),
                }
            })
            .collect();
        self.sink.set_commands(&commands);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
