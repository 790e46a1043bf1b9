//! Weighted-random factory for falling objects

use glam::Vec2;
use rand::Rng;

use super::object::{FallingObject, GemKind};
use crate::consts::*;

/// Produces falling objects with randomized position, speed and kind.
///
/// Kind selection rolls a uniform integer in [1, 100] against fixed
/// cumulative weights: 5% Diamond, 8% Ruby, 12% Amethyst, 25% GoldBar,
/// 30% SilverBar, 20% Dynamite.
#[derive(Debug, Default)]
pub struct Spawner;

impl Spawner {
    pub fn new() -> Self {
        Self
    }

    /// Spawn an object of weighted-random kind above the top edge
    pub fn spawn(&self, rng: &mut impl Rng, screen_w: f32) -> FallingObject {
        let kind = roll_kind(rng);
        let (position, speed) = self.roll_drop(rng, screen_w);
        FallingObject::new(position, speed, kind)
    }

    /// Spawn an object of a specific kind, keeping the randomized
    /// position and speed. Not used by the frame loop; this exists for
    /// tests and tooling that need a known kind.
    pub fn spawn_kind(&self, rng: &mut impl Rng, screen_w: f32, kind: GemKind) -> FallingObject {
        let (position, speed) = self.roll_drop(rng, screen_w);
        FallingObject::new(position, speed, kind)
    }

    /// Roll the delay until the next spawn, in seconds
    pub fn roll_interval(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX) as f32 / 100.0
    }

    fn roll_drop(&self, rng: &mut impl Rng, screen_w: f32) -> (Vec2, f32) {
        let x = rng.random_range(SPAWN_EDGE_MARGIN..=(screen_w as i32 - SPAWN_EDGE_MARGIN));
        let speed = rng.random_range(FALL_SPEED_MIN..=FALL_SPEED_MAX) as f32 / 100.0;
        (Vec2::new(x as f32, SPAWN_HEIGHT), speed)
    }
}

fn roll_kind(rng: &mut impl Rng) -> GemKind {
    let roll: i32 = rng.random_range(1..=100);
    if roll <= 5 {
        GemKind::Diamond
    } else if roll <= 13 {
        GemKind::Ruby
    } else if roll <= 25 {
        GemKind::Amethyst
    } else if roll <= 50 {
        GemKind::GoldBar
    } else if roll <= 80 {
        GemKind::SilverBar
    } else {
        GemKind::Dynamite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_geometry() {
        let spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let obj = spawner.spawn(&mut rng, 800.0);
            assert!(obj.position.x >= 20.0 && obj.position.x <= 780.0);
            assert_eq!(obj.position.y, -50.0);
            assert!(obj.speed >= 1.5 && obj.speed <= 3.5);
            assert_eq!(obj.size, 50.0);
            assert!(obj.active);
            assert_eq!(obj.rotation, 0.0);
        }
    }

    #[test]
    fn test_spawn_kind_override() {
        let spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let obj = spawner.spawn_kind(&mut rng, 800.0, GemKind::Dynamite);
            assert_eq!(obj.kind, GemKind::Dynamite);
            assert_eq!(obj.value, 0);
            assert!(obj.position.x >= 20.0 && obj.position.x <= 780.0);
        }
        let gold = spawner.spawn_kind(&mut rng, 800.0, GemKind::GoldBar);
        assert_eq!(gold.kind, GemKind::GoldBar);
        assert_eq!(gold.value, 8);
    }

    #[test]
    fn test_interval_range() {
        let spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            let interval = spawner.roll_interval(&mut rng);
            assert!((0.5..=2.0).contains(&interval));
        }
    }

    #[test]
    fn test_weighted_distribution() {
        let spawner = Spawner::new();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 6];
        const DRAWS: u32 = 10_000;
        for _ in 0..DRAWS {
            let idx = match spawner.spawn(&mut rng, 800.0).kind {
                GemKind::Diamond => 0,
                GemKind::Ruby => 1,
                GemKind::Amethyst => 2,
                GemKind::GoldBar => 3,
                GemKind::SilverBar => 4,
                GemKind::Dynamite => 5,
            };
            counts[idx] += 1;
        }

        let expected = [0.05, 0.08, 0.12, 0.25, 0.30, 0.20];
        for (count, want) in counts.iter().zip(expected) {
            let got = *count as f64 / DRAWS as f64;
            // 2 percentage points of slack is generous at 10k draws
            assert!(
                (got - want).abs() < 0.02,
                "frequency {got:.3} too far from {want:.3}"
            );
        }
    }
}
