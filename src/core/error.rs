//! Error taxonomy for timeline construction.
//!
//! Only *invalid input* is an error.  Degraded-but-running situations
//! (container missing, scene elements not rendered yet) are logged with
//! `tracing::warn!` and show up in the timeline's observable state instead.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems detected while building a timeline or loading its inputs.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// A timeline needs at least one scene to derive a scene step from.
    #[error("scene list is empty; at least one scene is required")]
    NoScenes,

    /// A scene record is missing one of its required text fields.
    #[error("scene {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// A tuning constant is outside its valid range.
    #[error("invalid timeline tuning: {0}")]
    InvalidTuning(String),

    /// The scenes file could not be read.
    #[error("cannot read scenes file {}: {source}", path.display())]
    SceneFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scenes file is not valid TOML (or has the wrong shape).
    #[error("malformed scenes file: {0}")]
    SceneParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
