use glam::Vec3;

/// An ordered sequence of 3D points forming a random walk.
///
/// Point order is walk order: each point is derived from the one before it.
/// A trajectory is built once and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Vec3>,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Leading points, capped at the trajectory length.
    pub fn prefix(&self, count: usize) -> &[Vec3] {
        &self.points[..count.min(self.points.len())]
    }

    /// Euclidean distance between each pair of consecutive points.
    pub fn step_lengths(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.windows(2).map(|pair| pair[0].distance(pair[1]))
    }

    /// Largest distance of any point from the origin.
    pub fn max_radius(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}

/// A named RGB line color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineColor {
    pub name: &'static str,
    pub rgb: [f32; 3],
}

impl LineColor {
    pub const fn new(name: &'static str, r: f32, g: f32, b: f32) -> Self {
        Self { name, rgb: [r, g, b] }
    }

    /// Opaque RGBA, as uploaded to the fragment stage.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.rgb[0], self.rgb[1], self.rgb[2], 1.0]
    }
}

/// Colors assigned to walks in order; walk `i` uses `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [LineColor; 5] = [
    LineColor::new("red", 1.0, 0.0, 0.0),
    LineColor::new("green", 0.0, 1.0, 0.0),
    LineColor::new("blue", 0.0, 0.0, 1.0),
    LineColor::new("yellow", 1.0, 1.0, 0.0),
    LineColor::new("cyan", 0.0, 1.0, 1.0),
];
