//! Progress line, status bar and the settling indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each frame.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// One-row bar showing displayed progress, with scene boundaries marked.
pub struct ProgressLine {
    pub progress: f64,
    pub scenes: usize,
}

impl Widget for ProgressLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = usize::from(area.width);
        let filled = ((self.progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
        let scenes = self.scenes.max(1);

        let spans: Vec<Span> = (0..width)
            .map(|col| {
                let boundary = col > 0 && (col * scenes) % width < scenes;
                let glyph = if boundary { "┼" } else if col < filled { "━" } else { "─" };
                let style = if col < filled {
                    Theme::progress_filled_style()
                } else {
                    Theme::progress_empty_style()
                };
                Span::styled(glyph, style)
            })
            .collect();
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Bottom bar: position summary on the left, key hint after it.
pub struct StatusBar<'a> {
    pub progress: f64,
    pub scene: usize,
    pub scenes: usize,
    pub hint: &'a str,
    /// Overrides the hint (warnings, e.g. an inactive timeline).
    pub message: Option<&'a str>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format!(
            " {:>3.0}%  scene {}/{}  │ {}",
            self.progress * 100.0,
            self.scene + 1,
            self.scenes,
            self.message.unwrap_or(self.hint),
        );
        Paragraph::new(text)
            .style(Theme::status_bar_style())
            .render(area, buf);
    }
}

/// A small "settling…" indicator with a spinning icon.
///
/// Render this on top of the scene pane's border.  It picks its own
/// position (top-right of `area`) and is invisible when `visible` is false.
pub struct SettleIndicator {
    pub visible: bool,
    /// Monotonically increasing frame counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for SettleIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 16 || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} settling ");

        let label_width = label.chars().count() as u16;
        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let line = Line::from(Span::styled(label, Theme::settle_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}
