use crate::animation::ease::{Ease, Lerp};
use crate::foundation::core::{NodeId, Point, Rgba8};
use crate::render::scene::{Disc, EffectTag, Scene, Stroke};

/// Tick counter for one effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub elapsed: u32,
    pub total: u32,
}

impl Progress {
    pub fn new(total: u32) -> Self {
        Self {
            elapsed: 0,
            total: total.max(1),
        }
    }

    /// Advance one tick and return the linear fraction reached.
    fn advance(&mut self) -> f64 {
        self.elapsed = (self.elapsed + 1).min(self.total);
        self.fraction()
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.elapsed) / f64::from(self.total)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.total
    }
}

/// Fill, border and text colors of a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub fill: Rgba8,
    pub border: Rgba8,
    pub text: Rgba8,
}

impl Palette {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            fill: Rgba8::lerp(&a.fill, &b.fill, t),
            border: Rgba8::lerp(&a.border, &b.border, t),
            text: Rgba8::lerp(&a.text, &b.text, t),
        }
    }
}

/// One visual sub-effect of an instruction.
///
/// `begin` installs whatever the effect animates, `step` advances it one tick, `finish` leaves the
/// scene in the effect's final state and `cancel` puts back what `begin` changed. `finish` and
/// `cancel` are idempotent and may be called on an effect that never began.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Line growing from `from` to `to`; removed once complete.
    DrawLine {
        tag: EffectTag,
        from: Point,
        to: Point,
        color: Rgba8,
        progress: Progress,
    },
    /// Disc expanding to `radius`; removed once complete.
    ExpandDisc {
        tag: EffectTag,
        center: Point,
        radius: f64,
        color: Rgba8,
        progress: Progress,
    },
    /// Node colors fade toward `target`, then snap back.
    Glow {
        id: NodeId,
        target: Palette,
        saved: Option<Palette>,
        progress: Progress,
    },
    MoveNode {
        id: NodeId,
        to: Point,
        from: Option<Point>,
        progress: Progress,
    },
}

impl Effect {
    pub fn begin(&mut self, scene: &mut Scene) {
        match self {
            Self::DrawLine {
                tag, from, color, ..
            } => {
                scene.remove_transient(*tag);
                scene.push_stroke(Stroke {
                    tag: *tag,
                    from: *from,
                    to: *from,
                    color: *color,
                });
            }
            Self::ExpandDisc {
                tag, center, color, ..
            } => {
                scene.remove_transient(*tag);
                scene.push_disc(Disc {
                    tag: *tag,
                    center: *center,
                    radius: 0.0,
                    color: *color,
                });
            }
            Self::Glow { id, saved, .. } => {
                if saved.is_none()
                    && let Some(sprite) = scene.sprite(*id)
                {
                    *saved = Some(Palette {
                        fill: sprite.fill,
                        border: sprite.border,
                        text: sprite.text,
                    });
                }
            }
            Self::MoveNode { id, from, .. } => {
                if from.is_none() {
                    *from = scene.sprite(*id).map(|sprite| sprite.position);
                }
            }
        }
    }

    /// Advance one tick. Returns `true` once the effect has finished.
    pub fn step(&mut self, scene: &mut Scene, ease: Ease) -> bool {
        let done = {
            let progress = self.progress_mut();
            progress.advance();
            progress.is_done()
        };
        if done {
            self.finish(scene);
            return true;
        }

        let t = ease.apply(self.progress().fraction());
        match self {
            Self::DrawLine { tag, from, to, .. } => {
                if let Some(stroke) = scene.stroke_mut(*tag) {
                    stroke.to = from.lerp(*to, t);
                }
            }
            Self::ExpandDisc { tag, radius, .. } => {
                if let Some(disc) = scene.disc_mut(*tag) {
                    disc.radius = *radius * t;
                }
            }
            Self::Glow {
                id, target, saved, ..
            } => {
                if let (Some(saved), Some(sprite)) = (saved, scene.sprite_mut(*id)) {
                    let p = Palette::lerp(saved, target, t);
                    sprite.fill = p.fill;
                    sprite.border = p.border;
                    sprite.text = p.text;
                }
            }
            Self::MoveNode { id, to, from, .. } => {
                if let (Some(from), Some(sprite)) = (from, scene.sprite_mut(*id)) {
                    sprite.position = from.lerp(*to, t);
                }
            }
        }
        false
    }

    pub fn finish(&mut self, scene: &mut Scene) {
        match self {
            Self::DrawLine { tag, progress, .. } | Self::ExpandDisc { tag, progress, .. } => {
                scene.remove_transient(*tag);
                progress.elapsed = progress.total;
            }
            Self::Glow {
                id,
                saved,
                progress,
                ..
            } => {
                restore_palette(scene, *id, saved.take());
                progress.elapsed = progress.total;
            }
            Self::MoveNode {
                id, to, progress, ..
            } => {
                if let Some(sprite) = scene.sprite_mut(*id) {
                    sprite.position = *to;
                }
                progress.elapsed = progress.total;
            }
        }
    }

    pub fn cancel(&mut self, scene: &mut Scene) {
        match self {
            Self::DrawLine { tag, .. } | Self::ExpandDisc { tag, .. } => {
                scene.remove_transient(*tag);
            }
            Self::Glow { id, saved, .. } => restore_palette(scene, *id, saved.take()),
            Self::MoveNode { id, from, .. } => {
                if let (Some(from), Some(sprite)) = (from.take(), scene.sprite_mut(*id)) {
                    sprite.position = from;
                }
            }
        }
        self.progress_mut().elapsed = 0;
    }

    pub fn progress(&self) -> &Progress {
        match self {
            Self::DrawLine { progress, .. }
            | Self::ExpandDisc { progress, .. }
            | Self::Glow { progress, .. }
            | Self::MoveNode { progress, .. } => progress,
        }
    }

    fn progress_mut(&mut self) -> &mut Progress {
        match self {
            Self::DrawLine { progress, .. }
            | Self::ExpandDisc { progress, .. }
            | Self::Glow { progress, .. }
            | Self::MoveNode { progress, .. } => progress,
        }
    }
}

fn restore_palette(scene: &mut Scene, id: NodeId, saved: Option<Palette>) {
    if let (Some(saved), Some(sprite)) = (saved, scene.sprite_mut(id)) {
        sprite.fill = saved.fill;
        sprite.border = saved.border;
        sprite.text = saved.text;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/effect.rs"]
mod tests;
