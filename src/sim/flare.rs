//! Solar flare entity
//!
//! A flare homes in on the Earth while the shield is down. With the shield up
//! it flies along its own heading and gets scattered to a random heading every
//! frame it spends inside the shield ring.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::FLARE_RADIUS;
use crate::{direction_to, distance, heading_to_vec};

/// Raised when an unshielded flare reaches the Earth's core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub flare_id: u32,
    /// Where the flare was when it struck
    pub pos: Vec2,
}

/// A flare entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flare {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame, fixed for the flare's lifetime
    speed: f32,
    /// Direction of travel in radians, [0, TAU). Only used while shielded
    pub heading: f32,
}

impl Flare {
    pub fn new(id: u32, pos: Vec2, speed: f32, heading: f32) -> Self {
        debug_assert!(speed > 0.0, "flare speed must be positive");
        // rem_euclid rounds tiny negatives up to exactly TAU
        let heading = heading.rem_euclid(TAU);
        Self {
            id,
            pos,
            radius: FLARE_RADIUS,
            speed,
            heading: if heading >= TAU { 0.0 } else { heading },
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one frame
    ///
    /// Distance to the target is sampled before moving, so a flare already
    /// inside the core (including one sitting exactly on the target) strikes
    /// without needing a direction.
    pub fn update<R: Rng>(
        &mut self,
        shield_active: bool,
        target: Vec2,
        shield_radius: f32,
        core_radius: f32,
        rng: &mut R,
    ) -> Option<CollisionEvent> {
        let dist = distance(self.pos, target);

        if shield_active {
            self.pos += heading_to_vec(self.heading) * self.speed;
            if dist < shield_radius {
                self.heading = rng.random_range(0.0..TAU);
            }
            return None;
        }

        if dist < core_radius {
            return Some(self.strike());
        }

        match direction_to(self.pos, target) {
            // Never step past the target
            Some(dir) => {
                self.pos += dir * self.speed.min(dist);
                None
            }
            None => Some(self.strike()),
        }
    }

    /// Pointer hit test (strict)
    pub fn is_hit(&self, pointer: Vec2) -> bool {
        distance(pointer, self.pos) < self.radius
    }

    fn strike(&self) -> CollisionEvent {
        CollisionEvent {
            flare_id: self.id,
            pos: self.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CORE_RADIUS, SHIELD_RADIUS};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const TARGET: Vec2 = Vec2::new(1000.0, 500.0);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_unshielded_flare_moves_toward_target() {
        let mut flare = Flare::new(1, Vec2::new(100.0, 500.0), 2.0, 0.0);
        let hit = flare.update(false, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng());
        assert!(hit.is_none());
        assert!((flare.pos.x - 102.0).abs() < 1e-4);
        assert!((flare.pos.y - 500.0).abs() < 1e-4);
    }

    #[test]
    fn test_flare_on_target_strikes_without_nan() {
        let mut flare = Flare::new(9, TARGET, 1.0, 0.0);
        let hit = flare.update(false, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng());
        let hit = hit.expect("flare on target must strike");
        assert_eq!(hit.flare_id, 9);
        assert!(flare.pos.is_finite());
    }

    #[test]
    fn test_degenerate_direction_with_zero_core() {
        // Core radius 0 means only the direction guard can catch this
        let mut flare = Flare::new(3, TARGET, 1.0, 0.0);
        let hit = flare.update(false, TARGET, SHIELD_RADIUS, 0.0, &mut rng());
        assert!(hit.is_some());
        assert!(flare.pos.is_finite());
    }

    #[test]
    fn test_flare_inside_core_strikes() {
        let mut flare = Flare::new(2, TARGET - Vec2::new(99.0, 0.0), 1.0, 0.0);
        assert!(
            flare
                .update(false, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng())
                .is_some()
        );
    }

    #[test]
    fn test_shielded_flare_never_strikes() {
        let mut flare = Flare::new(2, TARGET, 1.0, 0.0);
        let mut rng = rng();
        for _ in 0..50 {
            assert!(
                flare
                    .update(true, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_shielded_flare_follows_heading_outside_ring() {
        let start = Vec2::new(100.0, 100.0);
        let mut flare = Flare::new(4, start, 2.0, std::f32::consts::FRAC_PI_2);
        flare.update(true, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng());
        assert!((flare.pos.x - 100.0).abs() < 1e-4);
        assert!((flare.pos.y - 102.0).abs() < 1e-4);
        assert_eq!(flare.heading, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_heading_wraps_into_range() {
        let flare = Flare::new(1, Vec2::ZERO, 1.0, -1e-8);
        assert!(flare.heading >= 0.0 && flare.heading < TAU);

        let flare = Flare::new(2, Vec2::ZERO, 1.0, TAU + 1.0);
        assert!((flare.heading - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_is_hit_is_strict() {
        let flare = Flare::new(1, Vec2::new(50.0, 50.0), 1.0, 0.0);
        assert!(flare.is_hit(Vec2::new(50.0, 50.0)));
        assert!(flare.is_hit(Vec2::new(69.9, 50.0)));
        assert!(!flare.is_hit(Vec2::new(70.0, 50.0)));
    }

    proptest! {
        #[test]
        fn prop_unshielded_update_approaches_target(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            speed in 0.5f32..2.5,
        ) {
            let pos = Vec2::new(x, y);
            let before = pos.distance(TARGET);
            prop_assume!(before >= CORE_RADIUS);

            let mut flare = Flare::new(1, pos, speed, 0.0);
            let hit = flare.update(false, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng());
            prop_assert!(hit.is_none());
            prop_assert!(flare.pos.distance(TARGET) < before);
            prop_assert_eq!(flare.speed(), speed);
        }

        #[test]
        fn prop_deflected_heading_in_range(
            r in 0.0f32..SHIELD_RADIUS,
            theta in 0.0f32..TAU,
            heading in 0.0f32..TAU,
            seed in any::<u64>(),
        ) {
            let pos = TARGET + heading_to_vec(theta) * r;
            prop_assume!(pos.distance(TARGET) < SHIELD_RADIUS);

            let mut flare = Flare::new(1, pos, 1.5, heading);
            let mut rng = Pcg32::seed_from_u64(seed);
            flare.update(true, TARGET, SHIELD_RADIUS, CORE_RADIUS, &mut rng);
            prop_assert!(flare.heading >= 0.0 && flare.heading < TAU);
        }
    }
}
