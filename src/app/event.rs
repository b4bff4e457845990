//! Terminal event abstraction.
//!
//! Two producers feed one channel: a blocking reader that forwards crossterm
//! input, and a frame ticker that emits [`AppEvent::Frame`] at the display
//! rate.  The ticker stops once the timeline's [`FrameToken`] is cancelled,
//! so timeline teardown halts the frame loop; input keeps flowing until
//! [`EventSources::shutdown`].

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::timeline::FrameToken;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Display refresh: run one timeline tick.
    Frame,
}

/// How long the input reader blocks before re-checking cancellation.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// The running event producers and the receiving end of their channel.
pub struct EventSources {
    pub events: mpsc::UnboundedReceiver<AppEvent>,
    ticker: JoinHandle<()>,
    input_stop: FrameToken,
}

impl EventSources {
    /// Spawn the input reader and a frame ticker bound to `frame_token`.
    pub fn spawn(frame_period: Duration, frame_token: FrameToken) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let input_stop = FrameToken::default();
        spawn_input_reader(tx.clone(), input_stop.clone());
        let ticker = spawn_frame_ticker(frame_period, frame_token, tx);
        Self {
            events,
            ticker,
            input_stop,
        }
    }

    /// Stop reading input and wait for the frame ticker, which exits once
    /// its token has been cancelled.
    pub async fn shutdown(self) {
        self.input_stop.cancel();
        let _ = self.ticker.await;
    }
}

/// Forward terminal input until cancelled or the receiver is dropped.
fn spawn_input_reader(tx: mpsc::UnboundedSender<AppEvent>, token: FrameToken) {
    // crossterm's poll blocks, so keep it off the async workers.
    tokio::task::spawn_blocking(move || {
        while !token.is_cancelled() {
            if !event::poll(INPUT_POLL).unwrap_or(false) {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            let app_event = match ev {
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });
}

/// Emit one [`AppEvent::Frame`] per `period` until cancelled.
pub fn spawn_frame_ticker(
    period: Duration,
    token: FrameToken,
    tx: mpsc::UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // A late frame is dropped, not replayed in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if token.is_cancelled() || tx.send(AppEvent::Frame).is_err() {
                break;
            }
        }
        tracing::debug!("frame ticker stopped");
    })
}
