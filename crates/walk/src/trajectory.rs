use glam::Vec3;
use rand::Rng;
use randomwalk_common::Trajectory;
use std::f32::consts::{PI, TAU};

/// How the direction of each step is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionSampler {
    /// Two angles drawn from `[0, π)`; the first is doubled to cover `[0, 2π)`.
    ///
    /// Directions are unit length but NOT uniform over the sphere: density
    /// collects around the ±Z poles.
    #[default]
    Legacy,
    /// Uniform over the unit sphere (uniform height, uniform azimuth).
    UniformSphere,
}

impl DirectionSampler {
    /// Draw one unit direction vector.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec3 {
        match self {
            DirectionSampler::Legacy => {
                let theta = 2.0 * rng.random_range(0.0..PI);
                let phi = rng.random_range(0.0..PI);
                Vec3::new(
                    theta.cos() * phi.cos(),
                    theta.cos() * phi.sin(),
                    theta.sin(),
                )
            }
            DirectionSampler::UniformSphere => {
                let z: f32 = rng.random_range(-1.0..=1.0);
                let azimuth = rng.random_range(0.0..TAU);
                let r = (1.0 - z * z).max(0.0).sqrt();
                Vec3::new(r * azimuth.cos(), r * azimuth.sin(), z)
            }
        }
    }
}

/// Largest number of points a single walk may have.
pub const MAX_STEPS: usize = 1 << 24;

/// Largest number of walks in one batch.
pub const MAX_TRAJECTORIES: usize = 1024;

/// A `WalkConfig` that cannot be generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalkConfigError {
    #[error("steps must be at most {max}, got {steps}")]
    TooManySteps { steps: usize, max: usize },
    #[error("trajectory count must be at most {max}, got {count}")]
    TooManyTrajectories { count: usize, max: usize },
    #[error("velocity must be a positive finite number, got {0}")]
    InvalidVelocity(f32),
}

/// Parameters for a batch of walks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    /// Number of independent walks.
    pub trajectory_count: usize,
    /// Points per walk, origin included.
    pub steps: usize,
    /// Distance between consecutive points.
    pub velocity: f32,
    pub sampler: DirectionSampler,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            trajectory_count: 5,
            steps: 1 << 16,
            velocity: 0.1,
            sampler: DirectionSampler::Legacy,
        }
    }
}

impl WalkConfig {
    /// Check the parameters before any memory is reserved for the walks.
    pub fn validate(&self) -> Result<(), WalkConfigError> {
        if self.steps > MAX_STEPS {
            return Err(WalkConfigError::TooManySteps {
                steps: self.steps,
                max: MAX_STEPS,
            });
        }
        if self.trajectory_count > MAX_TRAJECTORIES {
            return Err(WalkConfigError::TooManyTrajectories {
                count: self.trajectory_count,
                max: MAX_TRAJECTORIES,
            });
        }
        if !(self.velocity.is_finite() && self.velocity > 0.0) {
            return Err(WalkConfigError::InvalidVelocity(self.velocity));
        }
        Ok(())
    }
}

/// Generate a random walk of `count` points with step size `velocity`,
/// using the legacy direction sampler.
///
/// The first point is the origin. `count == 0` yields an empty trajectory.
pub fn generate_trajectory<R: Rng + ?Sized>(rng: &mut R, count: usize, velocity: f32) -> Trajectory {
    generate_trajectory_with(rng, count, velocity, DirectionSampler::Legacy)
}

/// Generate a random walk with an explicit direction sampler.
pub fn generate_trajectory_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    velocity: f32,
    sampler: DirectionSampler,
) -> Trajectory {
    if count == 0 {
        return Trajectory::new();
    }

    let mut points = Vec::with_capacity(count);
    let mut current = Vec3::ZERO;
    points.push(current);
    while points.len() < count {
        current += sampler.sample(rng) * velocity;
        points.push(current);
    }
    Trajectory::from_points(points)
}

/// Generate `config.trajectory_count` independent walks from one generator.
pub fn generate_walks<R: Rng + ?Sized>(rng: &mut R, config: &WalkConfig) -> Vec<Trajectory> {
    let _span = tracing::debug_span!(
        "generate_walks",
        walks = config.trajectory_count,
        steps = config.steps
    )
    .entered();

    let walks: Vec<Trajectory> = (0..config.trajectory_count)
        .map(|_| generate_trajectory_with(rng, config.steps, config.velocity, config.sampler))
        .collect();

    tracing::debug!(
        sampler = ?config.sampler,
        velocity = config.velocity,
        "generated {} walks",
        walks.len()
    );
    walks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_steps(t: &Trajectory, velocity: f32, tolerance: f32) {
        for (i, len) in t.step_lengths().enumerate() {
            assert!(
                (len - velocity).abs() <= tolerance,
                "step {i} has length {len}, expected {velocity}"
            );
        }
    }

    #[test]
    fn single_point_is_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = generate_trajectory(&mut rng, 1, 0.1);
        assert_eq!(t.points(), &[Vec3::ZERO]);
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = generate_trajectory(&mut rng, 0, 0.1);
        assert!(t.is_empty());
    }

    #[test]
    fn five_unit_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        let t = generate_trajectory(&mut rng, 5, 1.0);
        assert_eq!(t.len(), 5);
        assert_eq!(t.first(), Some(Vec3::ZERO));
        assert_steps(&t, 1.0, 1e-5);
    }

    #[test]
    fn length_and_origin_for_many_counts() {
        let mut rng = StdRng::seed_from_u64(99);
        for count in 1..64 {
            let t = generate_trajectory(&mut rng, count, 0.5);
            assert_eq!(t.len(), count);
            assert_eq!(t.first(), Some(Vec3::ZERO));
        }
    }

    #[test]
    fn long_walk_keeps_step_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let t = generate_trajectory(&mut rng, 10_000, 0.1);
        // Positions drift away from the origin, so allow for f32 cancellation.
        assert_steps(&t, 0.1, 1e-4);
    }

    #[test]
    fn uniform_sampler_keeps_step_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let t = generate_trajectory_with(&mut rng, 500, 2.0, DirectionSampler::UniformSphere);
        assert_eq!(t.len(), 500);
        assert_steps(&t, 2.0, 1e-4);
    }

    #[test]
    fn sampled_directions_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(5);
        for sampler in [DirectionSampler::Legacy, DirectionSampler::UniformSphere] {
            for _ in 0..1_000 {
                let d = sampler.sample(&mut rng);
                assert!((d.length() - 1.0).abs() < 1e-5, "{sampler:?} gave {d}");
            }
        }
    }

    #[test]
    fn legacy_sampler_favours_poles() {
        // |z| = |sin(theta)| with theta uniform, so the mean of |z| is 2/π (~0.64);
        // a uniform sphere would give 0.5.
        let mut rng = StdRng::seed_from_u64(21);
        let n = 20_000;
        let legacy: f32 = (0..n)
            .map(|_| DirectionSampler::Legacy.sample(&mut rng).z.abs())
            .sum::<f32>()
            / n as f32;
        let uniform: f32 = (0..n)
            .map(|_| DirectionSampler::UniformSphere.sample(&mut rng).z.abs())
            .sum::<f32>()
            / n as f32;
        assert!((legacy - 2.0 / PI).abs() < 0.02, "legacy mean |z| = {legacy}");
        assert!((uniform - 0.5).abs() < 0.02, "uniform mean |z| = {uniform}");
    }

    #[test]
    fn same_seed_reproduces_walk() {
        let a = generate_trajectory(&mut StdRng::seed_from_u64(42), 100, 0.1);
        let b = generate_trajectory(&mut StdRng::seed_from_u64(42), 100, 0.1);
        assert_eq!(a, b);
    }

    #[test]
    fn walks_from_shared_generator_differ() {
        let mut rng = StdRng::seed_from_u64(8);
        let config = WalkConfig {
            steps: 50,
            ..WalkConfig::default()
        };
        let walks = generate_walks(&mut rng, &config);
        assert_eq!(walks.len(), 5);
        assert!(walks.iter().all(|w| w.len() == 50));
        assert_ne!(walks[0], walks[1]);
    }

    #[test]
    fn oversized_step_count_is_rejected() {
        let config = WalkConfig {
            steps: usize::MAX,
            ..WalkConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(WalkConfigError::TooManySteps {
                steps: usize::MAX,
                max: MAX_STEPS
            })
        );
        let at_limit = WalkConfig {
            steps: MAX_STEPS,
            ..WalkConfig::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));
    }

    #[test]
    fn oversized_trajectory_count_is_rejected() {
        let config = WalkConfig {
            trajectory_count: usize::MAX,
            ..WalkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WalkConfigError::TooManyTrajectories { .. })
        ));
    }

    #[test]
    fn non_positive_velocity_is_rejected() {
        for velocity in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = WalkConfig {
                velocity,
                ..WalkConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(WalkConfigError::InvalidVelocity(_))
            ));
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(WalkConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_config_matches_visualizer() {
        let config = WalkConfig::default();
        assert_eq!(config.trajectory_count, 5);
        assert_eq!(config.steps, 65_536);
        assert_eq!(config.velocity, 0.1);
        assert_eq!(config.sampler, DirectionSampler::Legacy);
    }
}
