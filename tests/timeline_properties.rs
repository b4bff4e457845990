//! Property-based tests for the progress engine.
//!
//! These tests verify:
//! - convergence of displayed progress and scene index to a steady scroll
//! - the local phase never leaving [0, 1]
//! - scene index monotonicity under monotonic scrolling

mod common;

use common::{config, timeline, Host};
use proptest::prelude::*;
use scroll_scenes::TimelineConfig;

const MAX_SCROLL: f64 = 1000.0;

fn expected_index(fraction: f64, n: usize) -> usize {
    ((fraction * n as f64).floor() as usize).min(n - 1)
}

/// Distance of `fraction` to the nearest scene boundary, in progress units.
fn boundary_distance(fraction: f64, n: usize) -> f64 {
    let scaled = fraction * n as f64;
    (scaled - scaled.round()).abs() / n as f64
}

proptest! {
    /// Without snapping, displayed progress converges onto the scroll fraction.
    #[test]
    fn converges_to_steady_scroll(n in 1usize..8, fraction in 0.0f64..=1.0) {
        prop_assume!(boundary_distance(fraction, n) > 1e-3);
        let config = TimelineConfig { snap_enabled: false, ..config() };
        let (mut tl, _log) = timeline(n, config, MAX_SCROLL);
        let mut host = Host::new();

        host.scroll_to(&mut tl, fraction * MAX_SCROLL);
        host.frames(&mut tl, 300);

        prop_assert!((tl.displayed_progress() - tl.target_progress()).abs() < 1e-3);
        prop_assert_eq!(tl.active_index(), expected_index(tl.target_progress(), n));
    }

    /// With snapping, the settled scene is still the one under the scroll.
    #[test]
    fn snapping_settles_on_scrolled_scene(n in 1usize..8, fraction in 0.0f64..=1.0) {
        prop_assume!(boundary_distance(fraction, n) > 1e-2);
        let (mut tl, _log) = timeline(n, config(), MAX_SCROLL);
        let mut host = Host::new();

        host.scroll_to(&mut tl, fraction * MAX_SCROLL);
        host.frames(&mut tl, 600);

        prop_assert_eq!(tl.active_index(), expected_index(tl.target_progress(), n));
    }

    /// Local phase stays in [0, 1] whatever the scroll history.
    #[test]
    fn local_phase_stays_in_range(
        n in 1usize..8,
        tops in prop::collection::vec(-100.0f64..1100.0, 1..20),
        lerp in 0.05f64..=1.0,
    ) {
        let config = TimelineConfig { lerp_factor: lerp, ..config() };
        let (mut tl, _log) = timeline(n, config, MAX_SCROLL);
        let mut host = Host::new();

        for top in tops {
            host.scroll_to(&mut tl, top);
            for _ in 0..10 {
                host.frame(&mut tl);
                let phase = tl.local_phase();
                prop_assert!((0.0..=1.0).contains(&phase), "phase {phase}");
                prop_assert!((0.0..=1.0).contains(&tl.displayed_progress()));
                prop_assert!(tl.active_index() < n);
            }
        }
    }

    /// Scrolling only down never moves back a scene; only up never forward.
    #[test]
    fn monotonic_scroll_gives_monotonic_index(
        n in 1usize..8,
        tops in prop::collection::vec(0.0f64..=MAX_SCROLL, 1..15),
        downward in any::<bool>(),
    ) {
        let mut tops = tops;
        tops.sort_by(|a, b| a.total_cmp(b));
        if !downward {
            tops.reverse();
        }
        let (mut tl, _log) = timeline(n, config(), MAX_SCROLL);
        let mut host = Host::new();
        if !downward {
            // Start from the bottom so upward scrolling has room.
            host.scroll_to(&mut tl, MAX_SCROLL);
            host.frames(&mut tl, 400);
        }

        let mut last = tl.active_index();
        for top in tops {
            host.scroll_to(&mut tl, top);
            for _ in 0..15 {
                host.frame(&mut tl);
                let index = tl.active_index();
                if downward {
                    prop_assert!(index >= last, "{last} -> {index}");
                } else {
                    prop_assert!(index <= last, "{last} -> {index}");
                }
                last = index;
            }
        }
    }
}
