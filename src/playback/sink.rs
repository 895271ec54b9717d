use crate::playback::cursor::Cursor;
use crate::render::scene::Scene;

/// A command and its step explanations, as listed in the step log.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepLogCommand {
    pub name: String,
    pub steps: Vec<String>,
}

/// Receives the scene buckets, wholesale after each completed instruction and on every animation
/// frame in between.
pub trait RenderSink {
    fn present(&mut self, scene: &Scene);
}

/// Ordered command/step descriptions plus the currently selected step.
pub trait StepLogSink {
    fn set_commands(&mut self, commands: &[StepLogCommand]);
    fn select(&mut self, at: Cursor);
}

pub trait ProgressSink {
    /// Completed instructions over total instructions, in `[0, 1]`.
    fn set_progress(&mut self, progress: f64);
}

/// Everything the playback driver reports to.
pub trait PlaybackSink: RenderSink + StepLogSink + ProgressSink {}

impl<T: RenderSink + StepLogSink + ProgressSink> PlaybackSink for T {}

/// In-memory sink for tests and the CLI.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Number of `present` calls.
    pub frames: usize,
    pub scene: Scene,
    pub step_log: Vec<StepLogCommand>,
    pub selected: Option<Cursor>,
    /// Every selection in order.
    pub selections: Vec<Cursor>,
    pub progress: Vec<f64>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.progress.last().copied()
    }
}

impl RenderSink for Recorder {
    fn present(&mut self, scene: &Scene) {
        self.frames += 1;
        self.scene.clone_from(scene);
    }
}

impl StepLogSink for Recorder {
    fn set_commands(&mut self, commands: &[StepLogCommand]) {
        self.step_log = commands.to_vec();
    }

    fn select(&mut self, at: Cursor) {
        self.selected = Some(at);
        self.selections.push(at);
    }
}

impl ProgressSink for Recorder {
    fn set_progress(&mut self, progress: f64) {
        self.progress.push(progress);
    }
}
