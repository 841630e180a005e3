//! Walk generation: random walk trajectories and the scene that reveals them.
//!
//! # Invariants
//! - Every trajectory starts at the origin.
//! - Consecutive points are exactly one step size apart.
//! - The random generator is always passed in by the caller; nothing here
//!   holds global RNG state.

pub mod scene;
pub mod trajectory;

pub use scene::{Walk, WalkScene};
pub use trajectory::{
    DirectionSampler, MAX_STEPS, MAX_TRAJECTORIES, WalkConfig, WalkConfigError, generate_trajectory,
    generate_trajectory_with, generate_walks,
};

pub fn crate_info() -> &'static str {
    "randomwalk-walk v0.1.0"
}
