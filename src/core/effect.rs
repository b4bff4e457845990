//! Scene effect description and easing curves.
//!
//! The timeline treats an [`EffectSpec`] as opaque apart from its
//! `duration`: it hands the spec to the animation backend and seeks the
//! resulting animation in `0..=duration`.  Backends use [`EffectSpec::sample`]
//! to turn a seek position into concrete visual values.

use serde::Deserialize;

/// Easing curve applied to the normalised animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    InOutQuad,
    #[default]
    InOutBounce,
}

impl Easing {
    /// Map `t ∈ [0, 1]` through the curve.  Input is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Per-scene animation: header and paragraph fade and drift together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectSpec {
    /// Total animation length in abstract time units.
    pub duration: f64,
    /// Opacity at the start and end of the animation.
    pub opacity_from: f64,
    pub opacity_to: f64,
    /// Vertical drift reached at the end (negative = upwards).
    pub translate_y: f64,
    pub easing: Easing,
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            duration: 10.0,
            opacity_from: 1.0,
            opacity_to: 0.0,
            translate_y: -200.0,
            easing: Easing::InOutBounce,
        }
    }
}

/// Visual values of an effect at one seek position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectFrame {
    pub opacity: f64,
    pub translate_y: f64,
}

impl EffectSpec {
    /// Evaluate the effect at `position ∈ [0, duration]`.
    pub fn sample(&self, position: f64) -> EffectFrame {
        let t = if self.duration > 0.0 {
            position / self.duration
        } else {
            1.0
        };
        let eased = self.easing.apply(t);
        EffectFrame {
            opacity: (self.opacity_from + (self.opacity_to - self.opacity_from) * eased)
                .clamp(0.0, 1.0),
            translate_y: self.translate_y * eased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_pin_endpoints() {
        for easing in [Easing::Linear, Easing::InOutQuad, Easing::InOutBounce] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-9, "{easing:?} at 0.5");
        }
    }

    #[test]
    fn default_effect_fades_out_and_drifts_up() {
        let spec = EffectSpec::default();
        let start = spec.sample(0.0);
        let end = spec.sample(spec.duration);
        assert_eq!(start.opacity, 1.0);
        assert_eq!(start.translate_y, 0.0);
        assert!(end.opacity.abs() < 1e-9);
        assert!((end.translate_y + 200.0).abs() < 1e-9);
    }

    #[test]
    fn easing_parses_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: Easing,
        }
        let w: Wrapper = toml::from_str("easing = \"in-out-quad\"").unwrap();
        assert_eq!(w.easing, Easing::InOutQuad);
    }
}
