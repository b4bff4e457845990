//! Application orchestration: state, event sources and input handling for
//! the terminal host of the timeline.

pub mod document;
pub mod event;
pub mod handler;
pub mod state;
