//! The progress engine: smooths scroll progress every frame, derives the
//! active scene and keeps that scene's animation seeked to the local phase.
//!
//! Scene changes are a two-phase transition.  The tick that observes a new
//! index releases the old animation and queues a [`TransitionTicket`]; the
//! host completes the ticket once it has rendered the new scene's elements.
//! Each queued transition bumps a generation counter, so a ticket that was
//! overtaken by a later index change is recognised as stale and dropped
//! without touching the backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::effect::EffectSpec;
use super::error::Result;
use super::progress::{self, Step};
use super::sampler::{scroll_fraction, ScrollContainer, ScrollSampler};
use super::scene::{ElementId, SceneList, SceneStyle};
use super::tuning::TimelineConfig;

// ───────────────────────────────────────── collaborators ─────

/// A seekable, externally driven animation for one scene.
pub trait SceneAnimation {
    /// Total length; seek positions range over `0..=duration`.
    fn duration(&self) -> f64;
    /// Render the animation at `position` without advancing time.
    fn seek(&mut self, position: f64);
    /// Stop the animation.  It receives no further calls afterwards.
    fn pause(&mut self);
}

/// Element lookup and animation construction for the presentation layer.
pub trait AnimationBackend {
    /// Handle to an already-rendered element.
    type Target;
    type Animation: SceneAnimation;

    /// Look up a rendered element.  `None` when the presentation layer has
    /// not rendered it (yet).
    fn resolve(&mut self, id: ElementId) -> Option<Self::Target>;

    /// Build a paused animation over `targets`.
    fn create(&mut self, targets: Vec<Self::Target>, effect: &EffectSpec) -> Self::Animation;

    /// Toggle a transient rendering hint on an element.  Clearing a hint
    /// that was never set must be harmless.
    fn set_hint(&mut self, id: ElementId, enabled: bool);
}

// ───────────────────────────────────────── handles ───────────

/// Cancellation flag for the host's per-frame scheduling loop.
#[derive(Debug, Clone, Default)]
pub struct FrameToken(Arc<AtomicBool>);

impl FrameToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A queued scene transition.  Only the most recently issued ticket can be
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    generation: u64,
    scene: usize,
}

impl TransitionTicket {
    /// Scene the transition will bind an animation for.
    pub fn scene(&self) -> usize {
        self.scene
    }
}

/// What completing a transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A new animation is live for the ticket's scene.
    Bound,
    /// Some elements were not rendered; the scene runs without animation.
    MissingElements(Vec<ElementId>),
    /// A later transition (or teardown) made this ticket stale.
    Superseded,
}

/// Summary of one [`ScrollTimeline::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Displayed progress changed this tick.
    pub moved: bool,
    /// `(from, to)` when the active scene changed.
    pub scene_change: Option<(usize, usize)>,
    /// The live animation was seeked.
    pub seeked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Activated without a container; state is frozen at its initial values.
    Inactive,
    Running,
    TornDown,
}

struct LiveAnimation<A> {
    scene: usize,
    animation: A,
}

/// Motion below this per tick counts as settled.
const SETTLE_EPSILON: f64 = 1e-5;

// ───────────────────────────────────────── engine ────────────

/// Scroll-linked scene timeline over container `C` and backend `B`.
pub struct ScrollTimeline<C, B: AnimationBackend> {
    scenes: SceneList,
    config: TimelineConfig,
    sampler: Option<ScrollSampler<C>>,
    backend: B,
    lifecycle: Lifecycle,
    target: f64,
    displayed: f64,
    active_index: usize,
    local: f64,
    last_motion: f64,
    live: Option<LiveAnimation<B::Animation>>,
    generation: u64,
    pending: Option<TransitionTicket>,
    frame: FrameToken,
}

impl<C: ScrollContainer, B: AnimationBackend> ScrollTimeline<C, B> {
    /// Build a timeline and, when a container is available, start it.
    ///
    /// Invalid tuning is an error.  A missing container is not: the timeline
    /// logs a warning and stays inactive, reporting scene 0 forever.
    pub fn activate(
        scenes: SceneList,
        config: TimelineConfig,
        container: Option<C>,
        backend: B,
    ) -> Result<Self> {
        config.validate()?;

        let mut timeline = Self {
            scenes,
            sampler: None,
            backend,
            lifecycle: Lifecycle::Inactive,
            target: 0.0,
            displayed: 0.0,
            active_index: 0,
            local: 0.0,
            last_motion: 0.0,
            live: None,
            generation: 0,
            pending: None,
            frame: FrameToken::default(),
            config,
        };

        let Some(container) = container else {
            tracing::warn!("scroll container not found; timeline stays inactive");
            timeline.frame.cancel();
            return Ok(timeline);
        };

        timeline.target = scroll_fraction(&container);
        timeline.sampler = Some(ScrollSampler::new(container, timeline.config.throttle()));
        timeline.lifecycle = Lifecycle::Running;
        // Scene 0 binds through the same deferred path as every later scene.
        timeline.queue_transition(0);
        tracing::debug!(
            scenes = timeline.scenes.len(),
            target = timeline.target,
            "timeline activated"
        );
        Ok(timeline)
    }

    // ── inputs ──────────────────────────────────────────────────

    /// Scroll notification from the container.
    pub fn notify_scroll(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        if let Some(sampler) = self.sampler.as_mut() {
            sampler.on_scroll(now, &mut self.target);
        }
    }

    /// Per-frame update.  Never fails; anything odd degrades to an idle tick.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        if self.lifecycle != Lifecycle::Running {
            return report;
        }

        if let Some(sampler) = self.sampler.as_mut() {
            sampler.flush(now, &mut self.target);
        }

        if !self.displayed.is_finite() || !self.target.is_finite() {
            tracing::debug!(
                displayed = self.displayed,
                target = self.target,
                "non-finite progress, skipping tick"
            );
            self.target = sanitize(self.target);
            self.displayed = sanitize(self.displayed);
            self.last_motion = 0.0;
            return report;
        }

        let sample = match progress::advance(
            self.displayed,
            self.target,
            self.scenes.len(),
            &self.config,
        ) {
            Step::Idle => {
                self.last_motion = 0.0;
                return report;
            }
            Step::Moved(sample) => sample,
        };

        self.last_motion = (sample.displayed - self.displayed).abs();
        self.displayed = sample.displayed;
        self.local = sample.local;
        report.moved = self.last_motion > 0.0;
        tracing::trace!(
            displayed = self.displayed,
            index = sample.index,
            local = self.local,
            snapped = ?sample.snapped,
            "tick"
        );

        if sample.index != self.active_index {
            report.scene_change = Some((self.active_index, sample.index));
            self.begin_transition(sample.index);
        } else if let Some(live) = self.live.as_mut() {
            let duration = live.animation.duration();
            live.animation.seek(self.local * duration);
            report.seeked = true;
        }

        report
    }

    // ── transitions ─────────────────────────────────────────────

    /// The transition waiting for the presentation layer, if any.
    pub fn pending_transition(&self) -> Option<TransitionTicket> {
        self.pending
    }

    /// Second phase of a scene change: bind an animation to the scene's
    /// rendered elements.
    pub fn complete_transition(&mut self, ticket: TransitionTicket) -> TransitionOutcome {
        if self.lifecycle != Lifecycle::Running
            || ticket.generation != self.generation
            || self.pending != Some(ticket)
        {
            tracing::debug!(scene = ticket.scene, "transition superseded");
            return TransitionOutcome::Superseded;
        }
        self.pending = None;

        let ids = ElementId::targets_of(ticket.scene);
        let mut targets = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.backend.resolve(id) {
                Some(target) => targets.push(target),
                None => missing.push(id),
            }
        }

        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            tracing::warn!(
                scene = ticket.scene,
                missing = %names.join(", "),
                "scene elements not rendered; running without animation"
            );
            return TransitionOutcome::MissingElements(missing);
        }

        let mut animation = self.backend.create(targets, &self.config.effect);
        animation.seek(0.0);
        if self.local > 0.0 {
            // Catch up in case progress already came to rest inside the scene.
            let duration = animation.duration();
            animation.seek(self.local * duration);
        }
        for id in ids {
            self.backend.set_hint(id, true);
        }
        self.live = Some(LiveAnimation {
            scene: ticket.scene,
            animation,
        });
        tracing::debug!(scene = ticket.scene, "scene animation bound");
        TransitionOutcome::Bound
    }

    /// Complete the pending transition, if there is one.
    pub fn settle(&mut self) -> Option<TransitionOutcome> {
        let ticket = self.pending?;
        Some(self.complete_transition(ticket))
    }

    fn begin_transition(&mut self, index: usize) {
        tracing::debug!(from = self.active_index, to = index, "scene change");
        self.active_index = index;
        self.release_live();
        self.queue_transition(index);
    }

    fn queue_transition(&mut self, scene: usize) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(TransitionTicket {
            generation: self.generation,
            scene,
        });
    }

    fn release_live(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.animation.pause();
            for id in ElementId::targets_of(live.scene) {
                self.backend.set_hint(id, false);
            }
        }
    }

    // ── teardown ────────────────────────────────────────────────

    /// Stop everything.  Safe to call at any point, any number of times.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        let was_running = self.lifecycle == Lifecycle::Running;
        self.lifecycle = Lifecycle::TornDown;

        self.frame.cancel();
        if let Some(sampler) = self.sampler.as_mut() {
            sampler.detach();
        }
        self.release_live();
        // Invalidate any ticket the host may still hold.
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);

        if was_running {
            for scene in 0..self.scenes.len() {
                for id in ElementId::targets_of(scene) {
                    self.backend.set_hint(id, false);
                }
            }
        }
        tracing::debug!("timeline torn down");
    }

    // ── read-only state ─────────────────────────────────────────

    pub fn displayed_progress(&self) -> f64 {
        self.displayed
    }

    pub fn target_progress(&self) -> f64 {
        self.target
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Phase within the active scene after snap correction.
    pub fn local_phase(&self) -> f64 {
        self.local
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn current_header(&self) -> &str {
        self.scenes
            .get(self.active_index)
            .map_or("", |scene| scene.header.as_str())
    }

    pub fn current_paragraph(&self) -> &str {
        self.scenes
            .get(self.active_index)
            .map_or("", |scene| scene.paragraph.as_str())
    }

    pub fn current_style(&self) -> Option<&SceneStyle> {
        self.scenes.get(self.active_index).map(|scene| &scene.style)
    }

    /// `true` once activated with a container and until teardown.
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// `true` while the last tick still moved the displayed progress.
    pub fn is_settling(&self) -> bool {
        self.is_active() && self.last_motion > SETTLE_EPSILON
    }

    pub fn live_animation(&self) -> Option<&B::Animation> {
        self.live.as_ref().map(|live| &live.animation)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Token the host's frame loop polls; cancelled by teardown.
    pub fn frame_token(&self) -> FrameToken {
        self.frame.clone()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn container(&self) -> Option<&C> {
        self.sampler.as_ref().map(ScrollSampler::container)
    }

    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.sampler.as_mut().map(ScrollSampler::container_mut)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
