//! End-to-end behaviour of the scroll timeline against recording fakes.

mod common;

use std::time::Duration;

use common::{calls, config, timeline, Call, FakeContainer, Host, RecordingBackend, DURATION};
use scroll_scenes::{ElementId, ScrollTimeline, TickReport, TimelineConfig, TransitionOutcome};

fn creates(log: &[Call]) -> Vec<(u32, usize)> {
    log.iter()
        .filter_map(|c| match c {
            Call::Create { anim, scene } => Some((*anim, *scene)),
            _ => None,
        })
        .collect()
}

fn anim_for_scene(log: &[Call], scene: usize) -> u32 {
    creates(log)
        .into_iter()
        .find(|(_, s)| *s == scene)
        .map(|(anim, _)| anim)
        .expect("scene animation was created")
}

#[test]
fn halfway_scroll_settles_on_middle_scene() {
    let (mut tl, _log) = timeline(5, config(), 1000.0);
    let mut host = Host::new();

    host.frame(&mut tl);
    host.scroll_to(&mut tl, 500.0);
    assert_eq!(tl.target_progress(), 0.5);

    host.frames(&mut tl, 200);
    assert_eq!(tl.active_index(), 2);
    assert!((tl.displayed_progress() - 0.5).abs() < 1e-3);
    assert_eq!(tl.current_header(), "Header 2");
    assert_eq!(tl.current_paragraph(), "Paragraph 2");
    assert!(tl.live_animation().is_some());
}

#[test]
fn near_scene_end_snaps_toward_boundary() {
    let config = TimelineConfig {
        lerp_factor: 1.0,
        ..config()
    };
    let (mut tl, log) = timeline(3, config, 1000.0);
    let mut host = Host::new();
    host.draw_and_settle(&mut tl);

    host.scroll_to(&mut tl, 320.0);
    tl.tick(host.now);

    let boundary = 1.0 / 3.0;
    let expected = 0.32 + (boundary - 0.32) * 0.08;
    assert_eq!(tl.active_index(), 0);
    assert_eq!(tl.local_phase(), 1.0);
    assert!((tl.displayed_progress() - expected).abs() < 1e-12);
    assert_eq!(
        calls(&log).last(),
        Some(&Call::Seek {
            anim: 1,
            position: DURATION
        })
    );
}

#[test]
fn scene_change_releases_previous_animation_once() {
    let (mut tl, log) = timeline(5, config(), 1000.0);
    let mut host = Host::new();

    host.scroll_to(&mut tl, 300.0);
    host.frames(&mut tl, 120);
    assert_eq!(tl.active_index(), 1);
    let previous = anim_for_scene(&calls(&log), 1);

    host.scroll_to(&mut tl, 500.0);
    let reports: Vec<TickReport> = (0..120).map(|_| host.frame(&mut tl)).collect();
    assert_eq!(tl.active_index(), 2);

    let changes: Vec<(usize, usize)> = reports.iter().filter_map(|r| r.scene_change).collect();
    assert_eq!(changes, vec![(1, 2)]);
    let change_tick = reports
        .iter()
        .find(|r| r.scene_change.is_some())
        .unwrap();
    assert!(change_tick.moved);
    assert!(!change_tick.seeked, "the released animation is not seeked");

    let log = calls(&log);
    let next = anim_for_scene(&log, 2);
    let pauses: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Call::Pause { anim: previous })
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pauses.len(), 1, "exactly one release");

    let released_at = pauses[0];
    let created_at = log
        .iter()
        .position(|c| *c == Call::Create { anim: next, scene: 2 })
        .unwrap();
    assert!(released_at < created_at);
    assert!(
        !log[released_at..]
            .iter()
            .any(|c| matches!(c, Call::Seek { anim, .. } if *anim == previous)),
        "no seek reaches a released animation"
    );
}

#[test]
fn steady_scroll_does_not_rebuild_animation() {
    let (mut tl, log) = timeline(4, config(), 1000.0);
    let mut host = Host::new();

    host.scroll_to(&mut tl, 375.0); // middle of scene 1
    host.frames(&mut tl, 300);

    let scenes: Vec<usize> = creates(&calls(&log)).into_iter().map(|(_, s)| s).collect();
    assert_eq!(scenes, vec![0, 1]);
}

#[test]
fn converged_timeline_ticks_idle() {
    let (mut tl, log) = timeline(3, config(), 1000.0);
    let mut host = Host::new();

    host.scroll_to(&mut tl, 320.0);
    host.frames(&mut tl, 3000);
    assert!((tl.displayed_progress() - tl.target_progress()).abs() < tl.config().min_delta);

    let before = calls(&log).len();
    for _ in 0..100 {
        assert_eq!(host.frame(&mut tl), TickReport::default());
    }
    assert_eq!(calls(&log).len(), before, "idle ticks never seek");
    assert!(!tl.is_settling());
}

#[test]
fn missing_container_keeps_timeline_static() {
    let log = common::CallLog::default();
    let mut tl: ScrollTimeline<FakeContainer, RecordingBackend> = ScrollTimeline::activate(
        common::scenes(4),
        config(),
        None,
        RecordingBackend::new(log.clone()),
    )
    .unwrap();
    let mut host = Host::new();

    host.scroll_to(&mut tl, 900.0);
    host.frames(&mut tl, 50);

    assert!(!tl.is_active());
    assert_eq!(tl.active_index(), 0);
    assert_eq!(tl.displayed_progress(), 0.0);
    assert!(tl.frame_token().is_cancelled());
    assert!(calls(&log).is_empty());

    tl.teardown();
    assert!(calls(&log).is_empty());
}

#[test]
fn teardown_is_idempotent_and_clears_all_hints() {
    let (mut tl, log) = timeline(5, config(), 1000.0);
    let mut host = Host::new();
    host.scroll_to(&mut tl, 300.0);
    host.frames(&mut tl, 120);
    let live = anim_for_scene(&calls(&log), 1);
    let before = calls(&log).len();

    tl.teardown();
    let after_first = calls(&log);
    tl.teardown();
    assert_eq!(calls(&log), after_first, "second teardown is a no-op");

    let teardown_calls = &after_first[before..];
    assert_eq!(teardown_calls[0], Call::Pause { anim: live });
    for scene in 0..5 {
        for id in ElementId::targets_of(scene) {
            assert!(teardown_calls.contains(&Call::Hint { id, enabled: false }));
        }
    }
    assert!(!teardown_calls.iter().any(|c| matches!(c, Call::Hint { enabled: true, .. })));

    assert!(!tl.is_active());
    assert!(tl.frame_token().is_cancelled());
    assert!(tl.live_animation().is_none());

    // Nothing reaches the backend after teardown.
    host.scroll_to(&mut tl, 900.0);
    host.frames(&mut tl, 20);
    assert_eq!(calls(&log), after_first);
}

#[test]
fn rapid_scene_changes_bind_only_the_latest() {
    let config = TimelineConfig {
        lerp_factor: 1.0,
        snap_enabled: false,
        ..config()
    };
    let (mut tl, log) = timeline(5, config, 1000.0);
    let mut host = Host::new();
    host.draw_and_settle(&mut tl);

    host.scroll_to(&mut tl, 300.0);
    tl.tick(host.now);
    let first = tl.pending_transition().unwrap();
    assert_eq!(first.scene(), 1);

    host.scroll_to(&mut tl, 500.0);
    tl.tick(host.now);
    let second = tl.pending_transition().unwrap();
    assert_eq!(second.scene(), 2);

    tl.backend_mut().present(1);
    assert_eq!(tl.complete_transition(first), TransitionOutcome::Superseded);

    host.draw_and_settle(&mut tl);
    assert!(tl.live_animation().is_some());
    assert_eq!(
        creates(&calls(&log)).into_iter().map(|(_, s)| s).collect::<Vec<_>>(),
        vec![0, 2]
    );
    let pauses = calls(&log)
        .iter()
        .filter(|c| matches!(c, Call::Pause { .. }))
        .count();
    assert_eq!(pauses, 1);
}

#[test]
fn missing_elements_leave_scene_unanimated_until_next_change() {
    let config = TimelineConfig {
        lerp_factor: 1.0,
        snap_enabled: false,
        ..config()
    };
    let (mut tl, log) = timeline(4, config, 1000.0);
    let mut host = Host::new();

    tl.backend_mut().render_disabled = true;
    tl.backend_mut().present(0);
    assert_eq!(
        tl.settle(),
        Some(TransitionOutcome::MissingElements(vec![
            ElementId::header(0),
            ElementId::paragraph(0)
        ]))
    );
    assert!(tl.live_animation().is_none());

    // Seeks are no-ops while the scene has no animation.
    host.scroll_to(&mut tl, 100.0);
    tl.tick(host.now);
    assert!(calls(&log).is_empty());

    tl.backend_mut().render_disabled = false;
    host.scroll_to(&mut tl, 375.0);
    tl.tick(host.now);
    host.draw_and_settle(&mut tl);
    assert!(tl.live_animation().is_some());
    assert_eq!(creates(&calls(&log)), vec![(1, 1)]);
}

#[test]
fn teardown_mid_transition_discards_pending_ticket() {
    let (mut tl, log) = timeline(3, config(), 1000.0);
    let ticket = tl.pending_transition().unwrap();
    tl.backend_mut().present(0);

    tl.teardown();
    assert_eq!(tl.complete_transition(ticket), TransitionOutcome::Superseded);
    assert_eq!(tl.pending_transition(), None);
    assert!(creates(&calls(&log)).is_empty());
}

#[test]
fn throttled_notifications_publish_latest_position() {
    let config = TimelineConfig {
        throttle_ms: 10,
        ..TimelineConfig::default()
    };
    let (mut tl, _log) = timeline(4, config, 1000.0);
    let mut host = Host::new();
    let t0 = host.now;

    host.scroll_to(&mut tl, 100.0);
    host.now = t0 + Duration::from_millis(3);
    host.scroll_to(&mut tl, 200.0);
    host.now = t0 + Duration::from_millis(6);
    host.scroll_to(&mut tl, 600.0);

    tl.tick(t0 + Duration::from_millis(8));
    assert_eq!(tl.target_progress(), 0.0);

    tl.tick(t0 + Duration::from_millis(10));
    assert_eq!(tl.target_progress(), 0.6);
}
