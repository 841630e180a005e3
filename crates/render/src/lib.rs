//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the walk scene; they never change it.
//! - Reveal progress is owned by the scene, not by the renderer.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "randomwalk-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
