//! Physics capabilities the player controller depends on.
//!
//! `PhysicsWorld` implements both traits on top of Rapier; tests substitute
//! their own recording implementations.

use crate::RaycastHit;
use engine_core::Vec3;
use rapier3d::prelude::RigidBodyHandle;

/// Nearest-hit ray queries against the collision world.
pub trait RayQuery {
    /// Cast a ray and return the nearest hit within `max_distance`.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit>;
}

/// Per-body state changes: kinematic toggling, kinematic carry and one-shot impulses.
pub trait BodyControl {
    /// Whether the body is currently kinematic. `None` if the body no longer exists.
    fn is_kinematic(&self, body: RigidBodyHandle) -> Option<bool>;

    /// Switch the body between kinematic (simulation suspended) and dynamic.
    fn set_kinematic(&mut self, body: RigidBodyHandle, kinematic: bool);

    /// Move a kinematic body to `position` on the next physics step.
    fn move_kinematic(&mut self, body: RigidBodyHandle, position: Vec3);

    /// Push the body away from `explosion.center`. Returns true if an impulse was applied.
    fn apply_explosion_force(&mut self, body: RigidBodyHandle, explosion: &ExplosionForce) -> bool;
}

/// A radial push applied once, for a single physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionForce {
    /// Force magnitude at the centre.
    pub force: f32,
    /// World position of the explosion.
    pub center: Vec3,
    /// Bodies further than this receive nothing. Zero means unlimited range without falloff.
    pub radius: f32,
    /// Lowers the effective centre so the push gains an upward component.
    pub upwards_modifier: f32,
}

impl ExplosionForce {
    /// Impulse delivered to a body whose centre of mass is at `body_center`,
    /// assuming the force acts for one step of `dt` seconds.
    pub fn impulse_at(&self, body_center: Vec3, up: Vec3, dt: f32) -> Option<Vec3> {
        let effective_center = self.center - up * self.upwards_modifier;
        let offset = body_center - effective_center;
        let distance = offset.length();

        let falloff = if self.radius > 0.0 {
            if distance > self.radius {
                return None;
            }
            1.0 - (distance / self.radius)
        } else {
            1.0
        };

        let direction = if distance > 1e-5 { offset / distance } else { up };
        Some(direction * self.force * falloff * dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explosion_impulse_points_away_from_center() {
        let explosion = ExplosionForce {
            force: 100.0,
            center: Vec3::ZERO,
            radius: 2.0,
            upwards_modifier: 0.0,
        };
        let impulse = explosion
            .impulse_at(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, 1.0)
            .unwrap();
        assert!((impulse - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn explosion_outside_radius_has_no_effect() {
        let explosion = ExplosionForce {
            force: 100.0,
            center: Vec3::ZERO,
            radius: 0.5,
            upwards_modifier: 0.0,
        };
        assert!(explosion.impulse_at(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, 1.0).is_none());
    }

    #[test]
    fn explosion_upwards_modifier_lifts_push() {
        let explosion = ExplosionForce {
            force: 100.0,
            center: Vec3::ZERO,
            radius: 0.0,
            upwards_modifier: 0.5,
        };
        let impulse = explosion
            .impulse_at(Vec3::new(0.5, 0.0, 0.0), Vec3::Y, 0.1)
            .unwrap();
        assert!(impulse.y > 0.0);
        assert!((impulse.length() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn explosion_at_body_center_pushes_up() {
        let explosion = ExplosionForce {
            force: 10.0,
            center: Vec3::ONE,
            radius: 1.0,
            upwards_modifier: 0.0,
        };
        let impulse = explosion.impulse_at(Vec3::ONE, Vec3::Y, 1.0).unwrap();
        assert!((impulse - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
    }
}
