//! Core engine: scene records, scroll sampling, progress smoothing and the
//! scene-animation lifecycle.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The
//! container and the animation backend are traits implemented by the host.

pub mod effect;
pub mod error;
pub mod progress;
pub mod sampler;
pub mod scene;
pub mod timeline;
pub mod tuning;
