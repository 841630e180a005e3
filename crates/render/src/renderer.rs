use glam::Vec3;
use randomwalk_walk::WalkScene;
use std::fmt::Write as _;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Rotation of the scene about +Y, in radians.
    pub orbit_angle: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            orbit_angle: 0.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view configuration, then produces
/// output. It never advances the reveal; the frame loop does that.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &WalkScene, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable summary of a walk scene.
///
/// Used by the CLI and by tests of the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &WalkScene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Walk Scene (walks={}, revealed={}/{}) ===",
            scene.walk_count(),
            scene.revealed(),
            scene.max_len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} orbit={:.2}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees,
            view.orbit_angle
        );

        for (i, walk) in scene.walks().iter().enumerate() {
            let t = &walk.trajectory;
            let visible = scene.visible_points(i).len();
            let end = t.last().unwrap_or(Vec3::ZERO);
            let step_error = match t.step_lengths().next() {
                // Error is measured against the first step, which every step should match.
                Some(first) => t
                    .step_lengths()
                    .map(|len| (len - first).abs())
                    .fold(0.0, f32::max),
                None => 0.0,
            };
            let _ = writeln!(
                out,
                "  [{i}] {:<6} points={} visible={} end=({:.2}, {:.2}, {:.2}) max_radius={:.2} step_spread={:.2e}",
                walk.color.name,
                t.len(),
                visible,
                end.x,
                end.y,
                end.z,
                t.max_radius(),
                step_error
            );
        }

        out
    }
}
