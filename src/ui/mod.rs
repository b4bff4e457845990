//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads timeline state and turns it into cells on the terminal.
//! It also hosts the animation backend, since "rendered elements" only
//! exist here.

pub mod layout;
pub mod scene_view;
pub mod stage;
pub mod status;
pub mod theme;
