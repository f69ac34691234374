//! Flare spawner near the Sun

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::flare::Flare;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Chance of one new flare per frame
    pub probability: f64,
    /// Spawn box size: x in [0, w), y in [-h/2, h/2) around the source
    pub offset: Vec2,
    /// Random speed added on top of the base speed, [0, jitter)
    pub speed_jitter: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            probability: SPAWN_PROBABILITY,
            offset: Vec2::new(SPAWN_OFFSET_WIDTH, SPAWN_OFFSET_HEIGHT),
            speed_jitter: FLARE_SPEED_JITTER,
        }
    }
}

impl Spawner {
    /// Roll for a spawn this frame. `id` is only consumed if a flare is made.
    pub fn maybe_spawn<R: Rng>(
        &self,
        rng: &mut R,
        source: Vec2,
        base_speed: f32,
        id: impl FnOnce() -> u32,
    ) -> Option<Flare> {
        let p = self.probability;
        if p.is_nan() {
            log::warn!("Spawn probability is NaN - skipping spawn roll");
            return None;
        }
        if !rng.random_bool(p.clamp(0.0, 1.0)) {
            return None;
        }
        Some(self.spawn(rng, source, base_speed, id()))
    }

    /// Create a flare unconditionally
    pub fn spawn<R: Rng>(&self, rng: &mut R, source: Vec2, base_speed: f32, id: u32) -> Flare {
        let dx = sample_unit(rng) * self.offset.x;
        let dy = (sample_unit(rng) - 0.5) * self.offset.y;
        let speed = base_speed + sample_unit(rng) * self.speed_jitter;
        let heading = rng.random_range(0.0..TAU);
        Flare::new(id, source + Vec2::new(dx, dy), speed, heading)
    }
}

/// Uniform sample in [0, 1)
fn sample_unit<R: Rng>(rng: &mut R) -> f32 {
    rng.random::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_box() {
        let spawner = Spawner::default();
        let source = Vec2::new(98.0, 360.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let flare = spawner.spawn(&mut rng, source, 0.5, id);
            let d = flare.pos - source;
            assert!((0.0..100.0).contains(&d.x));
            assert!((-100.0..100.0).contains(&d.y));
            assert!(flare.speed() >= 0.5 && flare.speed() < 2.5);
            assert!(flare.heading >= 0.0 && flare.heading < TAU);
            assert_eq!(flare.radius, FLARE_RADIUS);
        }
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = Pcg32::seed_from_u64(1);
        let never = Spawner {
            probability: 0.0,
            ..Default::default()
        };
        let always = Spawner {
            probability: 1.0,
            ..Default::default()
        };
        for _ in 0..100 {
            assert!(never.maybe_spawn(&mut rng, Vec2::ZERO, 1.0, || 0).is_none());
            assert!(always.maybe_spawn(&mut rng, Vec2::ZERO, 1.0, || 0).is_some());
        }
    }

    #[test]
    fn test_nan_probability_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(3);
        let broken = Spawner {
            probability: f64::NAN,
            ..Default::default()
        };
        for _ in 0..100 {
            assert!(broken.maybe_spawn(&mut rng, Vec2::ZERO, 1.0, || 0).is_none());
        }
    }

    #[test]
    fn test_spawn_rate_is_roughly_two_percent() {
        let spawner = Spawner::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let spawned = (0..50_000)
            .filter(|_| spawner.maybe_spawn(&mut rng, Vec2::ZERO, 1.0, || 0).is_some())
            .count();
        // Expected 1000, sd ~31
        assert!((800..1200).contains(&spawned), "spawned {spawned}");
    }
}
