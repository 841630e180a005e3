//! Shared types used across the random walk crates.

pub mod types;

pub use types::{LineColor, PALETTE, Trajectory};

pub fn crate_info() -> &'static str {
    "randomwalk-common v0.1.0"
}
