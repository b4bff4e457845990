//! Scroll sampler: turns container scroll metrics into a target progress.
//!
//! With a throttle configured, the first scroll notification opens a sampling
//! window and every further notification inside it is coalesced.  When the
//! window elapses the container is read once, so the published value always
//! reflects its most recent state.

use std::time::{Duration, Instant};

/// A scrollable region the sampler reads from.  Not owned by the timeline's
/// caller once attached; the timeline keeps it until teardown.
pub trait ScrollContainer {
    fn scroll_top(&self) -> f64;
    fn scroll_height(&self) -> f64;
    fn client_height(&self) -> f64;
}

/// Normalised scroll fraction of `container`.
///
/// Returns `0` for content that does not scroll (or reports nonsense).
pub fn scroll_fraction(container: &impl ScrollContainer) -> f64 {
    let max_scroll = container.scroll_height() - container.client_height();
    if !(max_scroll > 0.0) {
        return 0.0;
    }
    let fraction = container.scroll_top() / max_scroll;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Throttled scroll listener writing into a target-progress cell.
#[derive(Debug)]
pub struct ScrollSampler<C> {
    container: C,
    throttle: Option<Duration>,
    /// Deadline of the open sampling window, if any.
    pending: Option<Instant>,
    attached: bool,
}

impl<C: ScrollContainer> ScrollSampler<C> {
    pub fn new(container: C, throttle: Option<Duration>) -> Self {
        Self {
            container,
            throttle,
            pending: None,
            attached: true,
        }
    }

    /// Handle a scroll notification.  Writes `target` immediately when
    /// unthrottled; otherwise opens (or joins) a sampling window.
    pub fn on_scroll(&mut self, now: Instant, target: &mut f64) {
        if !self.attached {
            return;
        }
        match self.throttle {
            None => *target = scroll_fraction(&self.container),
            Some(window) => {
                if self.pending.is_none() {
                    self.pending = Some(now + window);
                }
            }
        }
    }

    /// Publish the coalesced sample if the open window has elapsed.
    /// Returns `true` when `target` was written.
    pub fn flush(&mut self, now: Instant, target: &mut f64) -> bool {
        match self.pending {
            Some(deadline) if self.attached && now >= deadline => {
                self.pending = None;
                *target = scroll_fraction(&self.container);
                tracing::trace!(target_progress = *target, "throttle window flushed");
                true
            }
            _ => false,
        }
    }

    /// Stop listening and drop any open window.  Idempotent.
    pub fn detach(&mut self) {
        self.attached = false;
        self.pending = None;
    }

    pub fn has_pending_window(&self) -> bool {
        self.pending.is_some()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }
}
