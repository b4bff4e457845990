//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: scene pane, progress line and status bar.
pub struct AppLayout {
    pub scene_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // scene pane (takes all remaining space)
                Constraint::Length(1), // progress line
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            scene_area: chunks[0],
            progress_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Rows of the scene pane inside its border: the scroll viewport.
    pub fn viewport_rows(area: Rect) -> u16 {
        Self::from_area(area).scene_area.height.saturating_sub(2).max(1)
    }
}
