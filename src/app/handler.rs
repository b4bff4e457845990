//! Input handling: maps key/mouse events to scroll movements.
//!
//! Every movement of the document is followed by a scroll notification to
//! the timeline, exactly like a container firing its scroll event.

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::app::document::ScrollDocument;
use crate::config::Action;

use super::state::AppState;

/// Process a key press.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let step = state.scroll_step;
    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollDown => scroll(state, now, |doc| doc.scroll_by(step)),
        Action::ScrollUp => scroll(state, now, |doc| doc.scroll_by(-step)),
        Action::PageDown => scroll(state, now, |doc| doc.scroll_pages(1.0)),
        Action::PageUp => scroll(state, now, |doc| doc.scroll_pages(-1.0)),
        Action::Top => scroll(state, now, ScrollDocument::scroll_to_top),
        Action::Bottom => scroll(state, now, ScrollDocument::scroll_to_bottom),
    }
}

/// Mouse wheel scrolls the document; everything else is ignored.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    let step = state.scroll_step;
    match mouse.kind {
        MouseEventKind::ScrollDown => scroll(state, now, |doc| doc.scroll_by(step)),
        MouseEventKind::ScrollUp => scroll(state, now, |doc| doc.scroll_by(-step)),
        _ => {}
    }
}

/// Track the new viewport height.  A resize moves `scroll_top`, so it
/// notifies like any other scroll.
pub fn handle_resize(state: &mut AppState, viewport_rows: u16, now: Instant) {
    scroll(state, now, |doc| doc.resize(viewport_rows));
}

fn scroll(state: &mut AppState, now: Instant, apply: impl FnOnce(&mut ScrollDocument)) {
    // No container → nothing to scroll.
    let Some(doc) = state.timeline.container_mut() else {
        return;
    };
    apply(doc);
    state.timeline.notify_scroll(now);
}
