use glam::Vec3;
use rand::Rng;
use randomwalk_common::{LineColor, PALETTE, Trajectory};

use crate::trajectory::{WalkConfig, generate_walks};

/// One trajectory and the color it is drawn with.
#[derive(Debug, Clone)]
pub struct Walk {
    pub trajectory: Trajectory,
    pub color: LineColor,
}

/// The set of walks being displayed, plus how much of each is revealed.
///
/// Walks are fixed once the scene is built. The only thing that changes is
/// `revealed`, the number of leading points drawn for every walk, which grows
/// by one per rendered frame until the longest walk is fully shown.
#[derive(Debug, Clone, Default)]
pub struct WalkScene {
    walks: Vec<Walk>,
    revealed: usize,
}

impl WalkScene {
    /// Wrap already generated trajectories, assigning palette colors in order.
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        let walks = trajectories
            .into_iter()
            .enumerate()
            .map(|(i, trajectory)| Walk {
                trajectory,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self { walks, revealed: 0 }
    }

    /// Generate every walk up front and wrap them in a scene.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &WalkConfig) -> Self {
        let scene = Self::new(generate_walks(rng, config));
        tracing::info!(
            "generated {} walks of {} points (step {})",
            scene.walk_count(),
            scene.max_len(),
            config.velocity
        );
        scene
    }

    pub fn walks(&self) -> &[Walk] {
        &self.walks
    }

    pub fn walk_count(&self) -> usize {
        self.walks.len()
    }

    /// Length of the longest walk; the reveal counter never exceeds it.
    pub fn max_len(&self) -> usize {
        self.walks
            .iter()
            .map(|w| w.trajectory.len())
            .max()
            .unwrap_or(0)
    }

    /// Number of leading points currently revealed.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Reveal one more point, capped at the longest walk. Returns the new count.
    pub fn advance_reveal(&mut self) -> usize {
        if self.revealed < self.max_len() {
            self.revealed += 1;
        }
        self.revealed
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed >= self.max_len()
    }

    /// The revealed prefix of walk `index`, or an empty slice for an unknown index.
    pub fn visible_points(&self, index: usize) -> &[Vec3] {
        self.walks
            .get(index)
            .map(|w| w.trajectory.prefix(self.revealed))
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::generate_trajectory;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene_with_lengths(lengths: &[usize]) -> WalkScene {
        let mut rng = StdRng::seed_from_u64(0);
        WalkScene::new(
            lengths
                .iter()
                .map(|&n| generate_trajectory(&mut rng, n, 1.0))
                .collect(),
        )
    }

    #[test]
    fn starts_with_nothing_revealed() {
        let scene = scene_with_lengths(&[4, 4]);
        assert_eq!(scene.revealed(), 0);
        assert!(scene.visible_points(0).is_empty());
        assert!(!scene.is_fully_revealed());
    }

    #[test]
    fn reveal_grows_one_per_frame_and_caps() {
        let mut scene = scene_with_lengths(&[3]);
        assert_eq!(scene.advance_reveal(), 1);
        assert_eq!(scene.advance_reveal(), 2);
        assert_eq!(scene.advance_reveal(), 3);
        assert_eq!(scene.advance_reveal(), 3);
        assert!(scene.is_fully_revealed());
        assert_eq!(scene.visible_points(0).len(), 3);
    }

    #[test]
    fn shorter_walks_stop_at_their_length() {
        let mut scene = scene_with_lengths(&[2, 6]);
        for _ in 0..10 {
            scene.advance_reveal();
        }
        assert_eq!(scene.revealed(), 6);
        assert_eq!(scene.visible_points(0).len(), 2);
        assert_eq!(scene.visible_points(1).len(), 6);
    }

    #[test]
    fn first_visible_point_is_origin() {
        let mut scene = scene_with_lengths(&[5]);
        scene.advance_reveal();
        assert_eq!(scene.visible_points(0), &[Vec3::ZERO]);
    }

    #[test]
    fn unknown_walk_is_empty() {
        let mut scene = scene_with_lengths(&[5]);
        scene.advance_reveal();
        assert!(scene.visible_points(9).is_empty());
    }

    #[test]
    fn colors_follow_palette_and_wrap() {
        let scene = scene_with_lengths(&[1; 7]);
        assert_eq!(scene.walks()[0].color, PALETTE[0]);
        assert_eq!(scene.walks()[4].color, PALETTE[4]);
        assert_eq!(scene.walks()[5].color, PALETTE[0]);
        assert_eq!(scene.walks()[6].color, PALETTE[1]);
    }

    #[test]
    fn empty_scene_is_fully_revealed() {
        let mut scene = WalkScene::default();
        assert_eq!(scene.max_len(), 0);
        assert_eq!(scene.advance_reveal(), 0);
        assert!(scene.is_fully_revealed());
    }

    #[test]
    fn generate_uses_config() {
        let mut rng = StdRng::seed_from_u64(12);
        let config = WalkConfig {
            trajectory_count: 3,
            steps: 20,
            ..WalkConfig::default()
        };
        let scene = WalkScene::generate(&mut rng, &config);
        assert_eq!(scene.walk_count(), 3);
        assert_eq!(scene.max_len(), 20);
    }
}
