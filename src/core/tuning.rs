//! Tunable constants of the progress engine.
//!
//! Every smoothing feature is optional: the idle skip, the snap correction
//! and the scroll throttle can each be switched off independently.

use std::time::Duration;

use serde::Deserialize;

use super::effect::EffectSpec;
use super::error::{Result, TimelineError};

/// Soft "magnetic" pull toward scene boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Distance from a scene edge (in local phase units) inside which the
    /// pull applies.
    pub threshold: f64,
    /// Fraction of the remaining distance to the boundary covered per tick.
    pub force: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            force: 0.08,
        }
    }
}

/// Engine configuration, loadable from the `[timeline]` table of the
/// user config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Exponential smoothing coefficient in `(0, 1]`.
    pub lerp_factor: f64,
    /// Ticks whose target/displayed gap is below this are skipped.
    /// `0` disables the skip.
    pub min_delta: f64,
    pub snap_enabled: bool,
    pub snap: SnapConfig,
    /// Scroll sampling window in milliseconds.  `0` samples every event.
    pub throttle_ms: u64,
    pub effect: EffectSpec,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            lerp_factor: 0.15,
            min_delta: 1e-4,
            snap_enabled: true,
            snap: SnapConfig::default(),
            throttle_ms: 10,
            effect: EffectSpec::default(),
        }
    }
}

impl TimelineConfig {
    /// The snap settings, if snapping is on.
    pub fn snap(&self) -> Option<SnapConfig> {
        self.snap_enabled.then_some(self.snap)
    }

    pub fn throttle(&self) -> Option<Duration> {
        (self.throttle_ms > 0).then(|| Duration::from_millis(self.throttle_ms))
    }

    /// Reject constants that would break the engine's invariants.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(TimelineError::InvalidTuning(msg));

        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return bad(format!("lerp_factor must be in (0, 1], got {}", self.lerp_factor));
        }
        if !(self.min_delta.is_finite() && self.min_delta >= 0.0) {
            return bad(format!("min_delta must be >= 0, got {}", self.min_delta));
        }
        if self.snap_enabled {
            let SnapConfig { threshold, force } = self.snap;
            if !(0.0..0.5).contains(&threshold) {
                return bad(format!("snap threshold must be in [0, 0.5), got {threshold}"));
            }
            // force == 1 would land exactly on the boundary and flip the index.
            if !(force > 0.0 && force < 1.0) {
                return bad(format!("snap force must be in (0, 1), got {force}"));
            }
        }
        if !(self.effect.duration.is_finite() && self.effect.duration >= 0.0) {
            return bad(format!(
                "effect duration must be >= 0, got {}",
                self.effect.duration
            ));
        }
        Ok(())
    }
}
