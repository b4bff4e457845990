//! Central application state.
//!
//! All mutable state lives here so that rendering can read `&AppState` and
//! event handling can mutate `&mut AppState`.

use crate::app::document::ScrollDocument;
use crate::config::AppConfig;
use crate::core::timeline::{ScrollTimeline, TickReport, TransitionOutcome};
use crate::ui::stage::TerminalStage;

/// The timeline as hosted by the terminal app.
pub type TerminalTimeline = ScrollTimeline<ScrollDocument, TerminalStage>;

/// Top-level application state.
pub struct AppState {
    pub timeline: TerminalTimeline,
    /// Keybindings (tuning has already been handed to the timeline).
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Overrides the key hint in the status bar.
    pub status_message: Option<String>,
    /// Frames in which the progress moved (drives the spinner).
    pub frame_count: u64,
    /// Rows moved per wheel notch or arrow key.
    pub scroll_step: f64,
}

impl AppState {
    pub fn new(timeline: TerminalTimeline, config: AppConfig) -> Self {
        let status_message = (!timeline.is_active())
            .then(|| "scroll container unavailable; scenes are static".to_string());
        Self {
            timeline,
            config,
            should_quit: false,
            status_message,
            frame_count: 0,
            scroll_step: 2.0,
        }
    }

    /// Fold one tick's report into the UI state.
    pub fn record_tick(&mut self, report: TickReport) {
        if report.moved {
            self.frame_count = self.frame_count.wrapping_add(1);
        }
        if let Some((from, to)) = report.scene_change {
            tracing::trace!(from, to, "active scene changed");
        }
    }

    /// Surface the outcome of a settled transition in the status bar.
    pub fn record_transition(&mut self, outcome: Option<TransitionOutcome>) {
        match outcome {
            Some(TransitionOutcome::MissingElements(missing)) => {
                let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
                self.status_message = Some(format!("not rendered: {}", names.join(", ")));
            }
            // Only a running timeline binds, so any message left is stale.
            Some(TransitionOutcome::Bound) => self.status_message = None,
            Some(TransitionOutcome::Superseded) | None => {}
        }
    }
}
