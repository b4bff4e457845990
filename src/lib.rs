//! Scroll-linked scene timeline.
//!
//! Scroll position is sampled into a target progress, smoothed every frame
//! into a displayed progress, and split into an active scene plus a local
//! phase that drives a seekable per-scene animation.  [`core`] holds the
//! engine; [`app`] and [`ui`] host it in a terminal.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::error::TimelineError;
pub use crate::core::scene::{ElementId, Scene, SceneList};
pub use crate::core::timeline::{
    AnimationBackend, FrameToken, SceneAnimation, ScrollTimeline, TickReport, TransitionOutcome,
    TransitionTicket,
};
pub use crate::core::sampler::ScrollContainer;
pub use crate::core::tuning::{SnapConfig, TimelineConfig};
