//! Terminal stage: the element registry and animation backend the timeline
//! binds to.
//!
//! Each draw "renders" the active scene by registering its element ids with
//! [`TerminalStage::present`].  The timeline resolves elements only from this
//! registry, so an animation is never bound before its scene is on screen.

use std::collections::HashSet;

use crate::core::effect::{EffectFrame, EffectSpec};
use crate::core::scene::ElementId;
use crate::core::timeline::{AnimationBackend, SceneAnimation};

/// Registry of rendered scene elements and their drift hints.
#[derive(Debug, Default)]
pub struct TerminalStage {
    rendered: HashSet<ElementId>,
    /// Elements currently animating; only these get a row offset applied.
    hinted: HashSet<ElementId>,
}

impl TerminalStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `scene` is what the last draw put on screen.
    pub fn present(&mut self, scene: usize) {
        self.rendered.clear();
        self.rendered.extend(ElementId::targets_of(scene));
    }

    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.rendered.contains(&id)
    }

    pub fn has_hint(&self, id: ElementId) -> bool {
        self.hinted.contains(&id)
    }

    pub fn hint_count(&self) -> usize {
        self.hinted.len()
    }
}

impl AnimationBackend for TerminalStage {
    type Target = ElementId;
    type Animation = TerminalAnimation;

    fn resolve(&mut self, id: ElementId) -> Option<ElementId> {
        self.rendered.contains(&id).then_some(id)
    }

    fn create(&mut self, _targets: Vec<ElementId>, effect: &EffectSpec) -> TerminalAnimation {
        TerminalAnimation {
            effect: effect.clone(),
            position: 0.0,
            paused: false,
        }
    }

    fn set_hint(&mut self, id: ElementId, enabled: bool) {
        if enabled {
            self.hinted.insert(id);
        } else {
            self.hinted.remove(&id);
        }
    }
}

/// A scene animation sampled on demand by the scene widget.
#[derive(Debug, Clone)]
pub struct TerminalAnimation {
    effect: EffectSpec,
    position: f64,
    paused: bool,
}

impl TerminalAnimation {
    /// Visual values at the current seek position.
    pub fn frame(&self) -> EffectFrame {
        self.effect.sample(self.position)
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl SceneAnimation for TerminalAnimation {
    fn duration(&self) -> f64 {
        self.effect.duration
    }

    fn seek(&mut self, position: f64) {
        if self.paused {
            return;
        }
        self.position = position.clamp(0.0, self.effect.duration);
    }

    fn pause(&mut self) {
        self.paused = true;
    }
}
