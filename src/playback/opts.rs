use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::animation::job::Timing;
use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::render::scene::StyleOpts;
use crate::tree::engine::LayoutOpts;

/// Options controlling playback timing, layout and style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackOpts {
    /// Interval between driver ticks, in milliseconds.
    pub tick_ms: u64,
    /// Duration of one effect in seconds. Node discs take half of it.
    pub effect_secs: f64,
    /// Easing applied to effect progress.
    pub ease: Ease,
    pub layout: LayoutOpts,
    pub style: StyleOpts,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            effect_secs: 0.5,
            ease: Ease::Linear,
            layout: LayoutOpts::default(),
            style: StyleOpts::default(),
        }
    }
}

impl PlaybackOpts {
    /// Load options from a JSON file. Missing fields keep their defaults.
    pub fn from_path(path: &Path) -> PlaybackResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read playback options '{}'", path.display()))?;
        let opts: Self = serde_json::from_str(&text)
            .map_err(|e| PlaybackError::serde(format!("{}: {e}", path.display())))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> PlaybackResult<()> {
        if self.tick_ms == 0 {
            return Err(PlaybackError::validation("tick_ms must be > 0"));
        }
        if !self.effect_secs.is_finite() || self.effect_secs <= 0.0 {
            return Err(PlaybackError::validation(
                "effect_secs must be finite and > 0",
            ));
        }
        for (name, value) in [
            ("layout.half_width", self.layout.half_width),
            ("layout.level_height", self.layout.level_height),
            ("style.node_radius", self.style.node_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlaybackError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.layout.min_spacing.is_finite() || self.layout.min_spacing < 0.0 {
            return Err(PlaybackError::validation(
                "layout.min_spacing must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Ticks one effect lasts; at least one.
    pub fn effect_ticks(&self) -> u32 {
        let ticks = (self.effect_secs * 1000.0 / self.tick_ms.max(1) as f64).round();
        ticks.clamp(1.0, f64::from(u32::MAX)) as u32
    }

    pub fn timing(&self) -> Timing {
        Timing {
            effect_ticks: self.effect_ticks(),
            ease: self.ease,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/opts.rs"]
mod tests;
