//! Scene widget: draws the active scene's header and paragraph with the
//! live animation's effect frame applied.
//!
//! Terminals have no alpha channel, so opacity is bucketed into styles:
//! normal, dimmed, greyed out, and not drawn.  Vertical drift is converted
//! from effect units to whole rows.

use std::str::FromStr;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::core::effect::EffectFrame;
use crate::core::scene::SceneStyle;

use super::theme::Theme;

/// Effect units per terminal row for `translate_y`.
const UNITS_PER_ROW: f64 = 20.0;

/// Rows reserved for the paragraph below the header.
const PARAGRAPH_ROWS: u16 = 6;

pub struct SceneView<'a> {
    header: &'a str,
    paragraph: &'a str,
    style: Option<&'a SceneStyle>,
    frame: Option<EffectFrame>,
    drift: bool,
    block: Option<Block<'a>>,
}

impl<'a> SceneView<'a> {
    pub fn new(header: &'a str, paragraph: &'a str) -> Self {
        Self {
            header,
            paragraph,
            style: None,
            frame: None,
            drift: false,
            block: None,
        }
    }

    pub fn style(mut self, style: Option<&'a SceneStyle>) -> Self {
        self.style = style;
        self
    }

    /// Effect values to apply; `None` draws the scene at rest.
    pub fn frame(mut self, frame: Option<EffectFrame>) -> Self {
        self.frame = frame;
        self
    }

    /// Apply the frame's vertical drift (only for hinted elements).
    pub fn drift(mut self, drift: bool) -> Self {
        self.drift = drift;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn style_value(&self, key: &str) -> Option<&'a str> {
        self.style.and_then(|s| s.get(key)).map(String::as_str)
    }

    fn alignment(&self) -> Alignment {
        match self.style_value("align") {
            Some("center") => Alignment::Center,
            Some("right") => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    fn base_style(&self) -> Style {
        let mut style = Style::default().fg(
            self.style_value("color")
                .and_then(|c| Color::from_str(c).ok())
                .unwrap_or(Theme::SCENE_FG),
        );
        if let Some(bg) = self.style_value("background").and_then(|c| Color::from_str(c).ok()) {
            style = style.bg(bg);
        }
        style
    }
}

/// Map opacity onto a terminal style.  `None` means "do not draw".
pub fn opacity_style(base: Style, opacity: f64) -> Option<Style> {
    if opacity > 0.66 {
        Some(base)
    } else if opacity > 0.33 {
        Some(base.add_modifier(Modifier::DIM))
    } else if opacity > 0.08 {
        Some(base.patch(Theme::faded_style()))
    } else {
        None
    }
}

/// Whole-row drift for a `translate_y` value.
pub fn drift_rows(translate_y: f64) -> i32 {
    (translate_y / UNITS_PER_ROW).round() as i32
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let base = self.base_style();
        if let Some(bg) = base.bg {
            buf.set_style(inner, Style::default().bg(bg));
        }

        let opacity = self.frame.map_or(1.0, |f| f.opacity);
        let Some(text_style) = opacity_style(base, opacity) else {
            return;
        };
        let offset = match self.frame {
            Some(f) if self.drift => drift_rows(f.translate_y),
            _ => 0,
        };

        // Rest position: header a third of the way down the pane.
        let rest = i32::from(inner.y) + i32::from(inner.height / 3);
        let header_y = rest + offset;
        let top = i32::from(inner.y);
        let bottom = i32::from(inner.y) + i32::from(inner.height);
        let alignment = self.alignment();

        if (top..bottom).contains(&header_y) {
            let row = Rect::new(inner.x, header_y as u16, inner.width, 1);
            Paragraph::new(Line::from(self.header))
                .style(text_style.patch(Theme::header_style()))
                .alignment(alignment)
                .render(row, buf);
        }

        let para_y = header_y + 2;
        let visible_top = para_y.max(top);
        let visible_bottom = (para_y + i32::from(PARAGRAPH_ROWS)).min(bottom);
        if visible_top < visible_bottom {
            // Skip the rows that drifted above the pane.
            let scroll = (visible_top - para_y) as u16;
            let rect = Rect::new(
                inner.x,
                visible_top as u16,
                inner.width,
                (visible_bottom - visible_top) as u16,
            );
            Paragraph::new(self.paragraph)
                .style(text_style.patch(Theme::paragraph_style()))
                .alignment(alignment)
                .wrap(Wrap { trim: true })
                .scroll((scroll, 0))
                .render(rect, buf);
        }
    }
}
