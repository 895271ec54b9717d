use crate::animation::ease::Ease;
use crate::animation::effect::{Effect, Palette, Progress};
use crate::foundation::core::{NodeId, Point};
use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::render::scene::{EffectTag, NodeSprite, Scene, StyleOpts};
use crate::trace::instruction::{Instruction, Link};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Cancelling,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Persistent scene change made when a stage's effects are complete.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEdit {
    AddLink(Link),
    RemoveLink(Link),
    AddNode(NodeSprite),
    SetPosition(NodeId, Point),
}

impl SceneEdit {
    fn apply(&self, scene: &mut Scene) {
        match self {
            Self::AddLink(link) => scene.add_link(*link),
            Self::RemoveLink(link) => {
                scene.remove_link(*link);
            }
            Self::AddNode(sprite) => scene.add_sprite(sprite.clone()),
            Self::SetPosition(id, to) => {
                if let Some(sprite) = scene.sprite_mut(*id) {
                    sprite.position = *to;
                }
            }
        }
    }
}

/// Effects that run in parallel, followed by the edits they lead to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stage {
    pub effects: Vec<Effect>,
    pub commits: Vec<SceneEdit>,
}

/// Timing shared by every effect of an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Ticks per effect.
    pub effect_ticks: u32,
    pub ease: Ease,
}

/// The visual effect of one instruction, as a sequence of stages driven one tick at a time.
#[derive(Clone, Debug)]
pub struct InstructionAnimation {
    stages: Vec<Stage>,
    /// Stage in progress; every stage before it has been committed.
    current: usize,
    begun: bool,
    state: AnimationState,
    outcome: Option<Outcome>,
    before: Option<Scene>,
    ease: Ease,
}

impl InstructionAnimation {
    /// Plan the animation of `instruction` on `scene`.
    ///
    /// Every node and link the instruction refers to is checked against the scene; nothing is
    /// touched until [`start`](Self::start).
    pub fn new(
        instruction: &Instruction,
        scene: &Scene,
        timing: Timing,
        style: &StyleOpts,
    ) -> PlaybackResult<Self> {
        let stages = plan(instruction, scene, timing.effect_ticks, style)?;
        Ok(Self {
            stages,
            current: 0,
            begun: false,
            state: AnimationState::Idle,
            outcome: None,
            before: None,
            ease: timing.ease,
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn start(&mut self, scene: &mut Scene) {
        if self.state != AnimationState::Idle {
            return;
        }
        self.before = Some(scene.clone());
        self.state = AnimationState::Running;
    }

    /// Ask for cancellation; it is carried out by the next [`tick`](Self::tick).
    pub fn request_cancel(&mut self) {
        if matches!(self.state, AnimationState::Idle | AnimationState::Running) {
            self.state = AnimationState::Cancelling;
        }
    }

    /// Advance by one tick and report the resulting state.
    pub fn tick(&mut self, scene: &mut Scene) -> AnimationState {
        match self.state {
            AnimationState::Idle => self.start(scene),
            AnimationState::Cancelling => {
                self.cancel(scene);
                return self.state;
            }
            AnimationState::Done => return self.state,
            AnimationState::Running => {}
        }

        while let Some(stage) = self.stages.get_mut(self.current) {
            if !self.begun {
                for effect in &mut stage.effects {
                    effect.begin(scene);
                }
                self.begun = true;
                if !stage.effects.is_empty() {
                    // Effects show their first frame on the next tick.
                    return self.state;
                }
            }

            let mut all_done = true;
            for effect in &mut stage.effects {
                if !effect.progress().is_done() {
                    all_done &= effect.step(scene, self.ease);
                }
            }
            if !all_done {
                return self.state;
            }
            for edit in &stage.commits {
                edit.apply(scene);
            }
            self.current += 1;
            self.begun = false;
            if self.current < self.stages.len() {
                return self.state;
            }
        }

        self.complete();
        self.state
    }

    /// Jump straight to the final state, exactly as if every remaining tick had run.
    pub fn skip(&mut self, scene: &mut Scene) {
        if self.state == AnimationState::Done {
            return;
        }
        if self.state == AnimationState::Cancelling {
            self.cancel(scene);
            return;
        }
        for stage in &mut self.stages[self.current..] {
            for effect in &mut stage.effects {
                effect.finish(scene);
            }
            for edit in &stage.commits {
                edit.apply(scene);
            }
        }
        self.current = self.stages.len();
        self.begun = false;
        self.complete();
    }

    /// Revert to the scene as it was before the animation started.
    pub fn cancel(&mut self, scene: &mut Scene) {
        if self.state == AnimationState::Done {
            return;
        }
        self.state = AnimationState::Cancelling;
        if self.begun
            && let Some(stage) = self.stages.get_mut(self.current)
        {
            for effect in &mut stage.effects {
                effect.cancel(scene);
            }
        }
        if let Some(before) = self.before.take() {
            *scene = before;
        }
        self.begun = false;
        self.state = AnimationState::Done;
        self.outcome = Some(Outcome::Cancelled);
    }

    /// Tick until done. Bounded by the number of ticks the stages can take.
    pub fn run_to_completion(&mut self, scene: &mut Scene) -> Outcome {
        let limit: u32 = self
            .stages
            .iter()
            .map(|stage| {
                stage
                    .effects
                    .iter()
                    .map(|effect| effect.progress().total)
                    .max()
                    .unwrap_or(0)
                    + 2
            })
            .sum::<u32>()
            + 2;
        for _ in 0..limit {
            if self.tick(scene) == AnimationState::Done {
                break;
            }
        }
        if self.state != AnimationState::Done {
            self.skip(scene);
        }
        self.outcome.unwrap_or(Outcome::Completed)
    }

    fn complete(&mut self) {
        self.before = None;
        self.state = AnimationState::Done;
        self.outcome = Some(Outcome::Completed);
    }
}

fn sprite_at(scene: &Scene, id: NodeId) -> PlaybackResult<&NodeSprite> {
    scene
        .sprite(id)
        .ok_or_else(|| PlaybackError::malformed(format!("node {id} is not in the scene")))
}

fn plan(
    instruction: &Instruction,
    scene: &Scene,
    ticks: u32,
    style: &StyleOpts,
) -> PlaybackResult<Vec<Stage>> {
    let glow = |id: NodeId| Effect::Glow {
        id,
        target: Palette {
            fill: style.glow_fill,
            border: style.glow_border,
            text: style.glow_text,
        },
        saved: None,
        progress: Progress::new(ticks),
    };

    match instruction {
        Instruction::CreateNode {
            id,
            attached_to,
            value,
            position,
            ..
        } => {
            if scene.sprite(*id).is_some() {
                return Err(PlaybackError::malformed(format!(
                    "node {id} is already in the scene"
                )));
            }
            let mut stages = Vec::with_capacity(2);
            if let Some(parent) = attached_to {
                let from = sprite_at(scene, *parent)?.position;
                stages.push(Stage {
                    effects: vec![Effect::DrawLine {
                        tag: EffectTag(0),
                        from,
                        to: *position,
                        color: style.create,
                        progress: Progress::new(ticks),
                    }],
                    commits: vec![SceneEdit::AddLink(Link::new(*parent, *id))],
                });
            }
            stages.push(Stage {
                effects: vec![Effect::ExpandDisc {
                    tag: EffectTag(1),
                    center: *position,
                    radius: style.node_radius,
                    color: style.create,
                    progress: Progress::new(ticks / 2),
                }],
                commits: vec![SceneEdit::AddNode(NodeSprite::new(
                    *id, *value, *position, style,
                ))],
            });
            Ok(stages)
        }
        Instruction::CompareWith { id, go_to, .. } => {
            let from = sprite_at(scene, *id)?.position;
            let mut stages = vec![Stage {
                effects: vec![glow(*id)],
                commits: Vec::new(),
            }];
            if let Some(go_to) = go_to {
                let to = sprite_at(scene, *go_to)?.position;
                stages.push(Stage {
                    effects: vec![Effect::DrawLine {
                        tag: EffectTag(0),
                        from,
                        to,
                        color: style.compare,
                        progress: Progress::new(ticks),
                    }],
                    commits: Vec::new(),
                });
            }
            Ok(stages)
        }
        Instruction::ValueFound { id, .. } => {
            sprite_at(scene, *id)?;
            Ok(vec![Stage {
                effects: vec![glow(*id)],
                commits: Vec::new(),
            }])
        }
        Instruction::Rotate {
            links_removed,
            links_added,
            movements,
            ..
        } => {
            if let Some(link) = links_removed.iter().find(|link| !scene.has_link(**link)) {
                return Err(PlaybackError::malformed(format!(
                    "link {link} is not in the scene"
                )));
            }
            for link in links_added {
                sprite_at(scene, link.parent)?;
                sprite_at(scene, link.child)?;
            }
            for movement in movements {
                sprite_at(scene, movement.id)?;
            }

            let relink = Stage {
                effects: Vec::new(),
                commits: links_removed
                    .iter()
                    .map(|link| SceneEdit::RemoveLink(*link))
                    .chain(links_added.iter().map(|link| SceneEdit::AddLink(*link)))
                    .collect(),
            };
            let moves = Stage {
                effects: movements
                    .iter()
                    .map(|movement| Effect::MoveNode {
                        id: movement.id,
                        to: movement.to,
                        from: None,
                        progress: Progress::new(ticks),
                    })
                    .collect(),
                commits: movements
                    .iter()
                    .map(|movement| SceneEdit::SetPosition(movement.id, movement.to))
                    .collect(),
            };
            Ok(vec![relink, moves])
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/job.rs"]
mod tests;
