//! Scene records: the immutable, ordered input of a timeline.
//!
//! A [`SceneList`] is validated once at construction and never mutated
//! afterwards, so the scene count (and therefore the scene step) is fixed for
//! the lifetime of the timeline that owns it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::error::{Result, TimelineError};

// ───────────────────────────────────────── scene ─────────────

/// Opaque per-scene style map (`color = "cyan"`, `align = "center"`, …).
pub type SceneStyle = BTreeMap<String, String>;

/// One content unit in the presentation sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub header: String,
    pub paragraph: String,
    pub style: SceneStyle,
}

impl Scene {
    pub fn new(header: impl Into<String>, paragraph: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            paragraph: paragraph.into(),
            style: SceneStyle::new(),
        }
    }

    /// Builder-style helper for attaching a single style entry.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }
}

// ───────────────────────────────────────── element ids ───────

/// Which rendered element of a scene an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRole {
    Header,
    Paragraph,
}

/// Identifier of a rendered scene element, e.g. `header-2`.
///
/// The presentation layer registers elements under these ids; the timeline
/// only ever looks them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub role: ElementRole,
    pub scene: usize,
}

impl ElementId {
    pub fn header(scene: usize) -> Self {
        Self {
            role: ElementRole::Header,
            scene,
        }
    }

    pub fn paragraph(scene: usize) -> Self {
        Self {
            role: ElementRole::Paragraph,
            scene,
        }
    }

    /// The elements a scene animation is bound to, in binding order.
    pub fn targets_of(scene: usize) -> [ElementId; 2] {
        [Self::header(scene), Self::paragraph(scene)]
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.role {
            ElementRole::Header => "header",
            ElementRole::Paragraph => "paragraph",
        };
        write!(f, "{prefix}-{}", self.scene)
    }
}

// ───────────────────────────────────────── scene list ────────

/// A validated, non-empty, fixed-length list of scenes.
#[derive(Debug, Clone)]
pub struct SceneList {
    scenes: Vec<Scene>,
}

impl SceneList {
    /// Wrap `scenes`, rejecting an empty list.
    pub fn new(scenes: Vec<Scene>) -> Result<Self> {
        if scenes.is_empty() {
            return Err(TimelineError::NoScenes);
        }
        Ok(Self { scenes })
    }

    /// Parse a TOML document of `[[scene]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: SceneFile = toml::from_str(source)?;
        let scenes = file
            .scene
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_scene(index))
            .collect::<Result<Vec<_>>>()?;
        Self::new(scenes)
    }

    /// Read and parse a scenes file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| TimelineError::SceneFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Small built-in sequence used when no scenes file is supplied.
    pub fn demo() -> Self {
        Self {
            scenes: vec![
                Scene::new(
                    "The Shore",
                    "Scroll slowly. Each scene fades as you move through it.",
                )
                .with_style("color", "cyan")
                .with_style("align", "center"),
                Scene::new(
                    "The Harbour",
                    "Progress is smoothed every frame, so the text follows the wheel with a little inertia.",
                )
                .with_style("color", "yellow"),
                Scene::new(
                    "The Lighthouse",
                    "Near a scene edge the timeline leans toward the boundary instead of jittering across it.",
                )
                .with_style("color", "magenta")
                .with_style("align", "right"),
                Scene::new(
                    "The Open Sea",
                    "Scroll back up and every scene replays in reverse.",
                )
                .with_style("color", "green")
                .with_style("align", "center"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }
}

// ───────────────────────────────────────── file format ───────

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    scene: Vec<RawScene>,
}

/// Scene as it appears on disk; required fields are checked per index so
/// the error can name the offending scene.
#[derive(Debug, Deserialize)]
struct RawScene {
    header: Option<String>,
    paragraph: Option<String>,
    #[serde(default)]
    style: SceneStyle,
}

impl RawScene {
    fn into_scene(self, index: usize) -> Result<Scene> {
        let header = self.header.ok_or(TimelineError::MissingField {
            index,
            field: "header",
        })?;
        let paragraph = self.paragraph.ok_or(TimelineError::MissingField {
            index,
            field: "paragraph",
        })?;
        Ok(Scene {
            header,
            paragraph,
            style: self.style,
        })
    }
}
