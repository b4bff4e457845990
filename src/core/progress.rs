//! Progress math: smoothing, scene derivation and the boundary snap.
//!
//! Pure functions over plain `f64`s.  The stateful side (which animation is
//! live, what the last index was) lives in [`super::timeline`].
//!
//! Per tick:
//! 1. skip when `|target - displayed|` is below `min_delta`,
//! 2. `displayed += (target - displayed) * lerp_factor`,
//! 3. `index = clamp(floor(displayed / step), 0, n - 1)` with `step = 1 / n`,
//! 4. `local = (displayed - index * step) / step`,
//! 5. near either edge of the scene, pull `displayed` toward that edge by
//!    `force` of the remaining distance and pin `local` to 0 or 1.

use super::tuning::{SnapConfig, TimelineConfig};

/// Width of one scene in progress units.
pub fn scene_step(scene_count: usize) -> f64 {
    1.0 / scene_count as f64
}

/// Scene index for a progress value, clamped to `[0, scene_count - 1]`.
pub fn scene_index(progress: f64, scene_count: usize) -> usize {
    let last = scene_count.saturating_sub(1);
    let raw = (progress / scene_step(scene_count)).floor();
    if raw <= 0.0 || raw.is_nan() {
        0
    } else {
        (raw as usize).min(last)
    }
}

/// Un-snapped phase of `progress` inside scene `index`, clamped to `[0, 1]`.
pub fn local_phase(progress: f64, index: usize, scene_count: usize) -> f64 {
    let step = scene_step(scene_count);
    ((progress - index as f64 * step) / step).clamp(0.0, 1.0)
}

/// One exponential-smoothing step of `current` toward `target`.
pub fn smooth(current: f64, target: f64, lerp_factor: f64) -> f64 {
    current + (target - current) * lerp_factor
}

/// Which edge, if any, the snap correction engaged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    Start,
    End,
}

/// Result of one progress step that was not skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Displayed progress after smoothing and snapping.
    pub displayed: f64,
    pub index: usize,
    /// Phase to seek the scene animation to, always in `[0, 1]`.
    pub local: f64,
    pub snapped: Option<SnapEdge>,
}

/// Outcome of [`advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Target and displayed progress already agree within `min_delta`.
    Idle,
    Moved(ProgressSample),
}

/// Run steps 1–5 of the per-tick algorithm.
pub fn advance(displayed: f64, target: f64, scene_count: usize, config: &TimelineConfig) -> Step {
    if (target - displayed).abs() < config.min_delta {
        return Step::Idle;
    }

    let displayed = smooth(displayed, target, config.lerp_factor).clamp(0.0, 1.0);
    let index = scene_index(displayed, scene_count);
    let local = local_phase(displayed, index, scene_count);

    let sample = ProgressSample {
        displayed,
        index,
        local,
        snapped: None,
    };
    Step::Moved(match config.snap() {
        Some(snap) => apply_snap(sample, scene_count, snap),
        None => sample,
    })
}

/// Pull `sample.displayed` toward the nearest scene edge when its phase is
/// within `snap.threshold` of it.
///
/// The pull is dropped when floating-point rounding would carry `displayed`
/// across the boundary, so the sample's index keeps matching its progress.
pub fn apply_snap(sample: ProgressSample, scene_count: usize, snap: SnapConfig) -> ProgressSample {
    let step = scene_step(scene_count);
    let (edge, boundary, local) = if sample.local > 1.0 - snap.threshold {
        (SnapEdge::End, (sample.index + 1) as f64 * step, 1.0)
    } else if sample.local < snap.threshold {
        (SnapEdge::Start, sample.index as f64 * step, 0.0)
    } else {
        return sample;
    };

    let pulled = smooth(sample.displayed, boundary.min(1.0), snap.force);
    let displayed = if scene_index(pulled, scene_count) == sample.index {
        pulled
    } else {
        sample.displayed
    };

    ProgressSample {
        displayed,
        index: sample.index,
        local,
        snapped: Some(edge),
    }
}
