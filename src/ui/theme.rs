//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── scene ──────────────────────────────────────────────────
    /// Foreground used when a scene has no `color` style entry.
    pub const SCENE_FG: Color = Color::White;

    pub fn header_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn paragraph_style() -> Style {
        Style::default()
    }

    /// Fully faded text that is still laid out.
    pub fn faded_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn progress_filled_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn progress_empty_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn settle_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
