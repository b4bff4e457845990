//! Virtual scrollable document: the terminal stand-in for a scroll
//! container.
//!
//! Every scene owns `screens_per_scene` viewport heights of scroll distance,
//! so the whole document is `client_height × screens_per_scene × scenes` rows
//! tall.  Input handlers move `scroll_top`; the timeline only reads it.

use crate::core::sampler::ScrollContainer;

#[derive(Debug, Clone)]
pub struct ScrollDocument {
    scroll_top: f64,
    client_height: f64,
    scenes: usize,
    screens_per_scene: f64,
}

impl ScrollDocument {
    pub fn new(scenes: usize, client_height: u16, screens_per_scene: f64) -> Self {
        Self {
            scroll_top: 0.0,
            client_height: f64::from(client_height),
            scenes,
            screens_per_scene: screens_per_scene.max(1.0),
        }
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.client_height).max(0.0)
    }

    /// Move by `rows` (positive = down), clamped to the document.
    pub fn scroll_by(&mut self, rows: f64) {
        self.scroll_top = (self.scroll_top + rows).clamp(0.0, self.max_scroll());
    }

    /// Move by a fraction of the viewport height.
    pub fn scroll_pages(&mut self, pages: f64) {
        self.scroll_by(pages * self.client_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll();
    }

    /// Track a terminal resize, keeping the same relative position.
    pub fn resize(&mut self, client_height: u16) {
        let max_before = self.max_scroll();
        let fraction = if max_before > 0.0 {
            self.scroll_top / max_before
        } else {
            0.0
        };
        self.client_height = f64::from(client_height);
        self.scroll_top = fraction * self.max_scroll();
    }
}

impl ScrollContainer for ScrollDocument {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn scroll_height(&self) -> f64 {
        self.client_height * self.screens_per_scene * self.scenes as f64
    }

    fn client_height(&self) -> f64 {
        self.client_height
    }
}
