//! Input actions: raw window events are mapped into a small action set that
//! the application state consumes.
//!
//! # Invariants
//! - No dependency on the windowing crate; the desktop app does the mapping.
//! - Applying an action is the only way input changes application state.

pub mod action;

pub use action::{Action, PIXELS_PER_LINE, ScrollDelta};

pub fn crate_info() -> &'static str {
    "randomwalk-input v0.1.0"
}
