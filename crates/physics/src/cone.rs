//! Cone casting: approximates a cone-shaped detection volume with a fixed
//! bundle of rays.
//!
//! Ray 0 runs along the cone axis. The others follow a golden-angle spiral
//! whose polar angle grows with `sqrt(i / (n - 1))`, which spreads them
//! evenly over the cone's cross-section. The layout is computed once at
//! construction and only rotated onto the cast direction per query.

use crate::{RayQuery, RaycastHit};
use engine_core::Vec3;
use thiserror::Error;

/// Golden angle in radians (pi * (3 - sqrt(5))).
const GOLDEN_ANGLE: f32 = 2.399_963_2;

#[derive(Debug, Error, PartialEq)]
pub enum ConeCastError {
    #[error("cone cast needs at least one ray")]
    NoRays,
    #[error("cone half-angle must be finite and within [0, 90) degrees, got {0}")]
    InvalidAngle(f32),
}

/// One ray of the layout, expressed relative to the cone axis.
#[derive(Debug, Clone, Copy)]
struct RaySlot {
    /// Angle away from the axis, in radians.
    polar: f32,
    /// Angle around the axis, in radians.
    azimuth: f32,
}

/// Casts a fixed bundle of rays inside a cone and collects their nearest hits.
#[derive(Debug, Clone)]
pub struct ConeCastDetector {
    half_angle_degrees: f32,
    slots: Vec<RaySlot>,
}

impl ConeCastDetector {
    pub fn new(half_angle_degrees: f32, ray_count: usize) -> Result<Self, ConeCastError> {
        if ray_count == 0 {
            return Err(ConeCastError::NoRays);
        }
        if !half_angle_degrees.is_finite() || !(0.0..90.0).contains(&half_angle_degrees) {
            return Err(ConeCastError::InvalidAngle(half_angle_degrees));
        }

        let half_angle = half_angle_degrees.to_radians();
        let slots = (0..ray_count)
            .map(|i| {
                if ray_count == 1 {
                    return RaySlot { polar: 0.0, azimuth: 0.0 };
                }
                let t = i as f32 / (ray_count - 1) as f32;
                RaySlot {
                    polar: half_angle * t.sqrt(),
                    azimuth: i as f32 * GOLDEN_ANGLE,
                }
            })
            .collect();

        Ok(Self {
            half_angle_degrees,
            slots,
        })
    }

    pub fn ray_count(&self) -> usize {
        self.slots.len()
    }

    pub fn half_angle_degrees(&self) -> f32 {
        self.half_angle_degrees
    }

    /// World-space ray directions for a cone around `direction`, in cast order.
    /// Empty if `direction` has no usable length.
    pub fn directions(&self, direction: Vec3) -> Vec<Vec3> {
        let Some(axis) = direction.try_normalize() else {
            return Vec::new();
        };
        let (u, v) = axis.any_orthonormal_pair();

        self.slots
            .iter()
            .map(|slot| {
                let (sin_p, cos_p) = slot.polar.sin_cos();
                let (sin_a, cos_a) = slot.azimuth.sin_cos();
                (axis * cos_p + (u * cos_a + v * sin_a) * sin_p).normalize()
            })
            .collect()
    }

    /// Cast every ray from `origin` and return each ray's nearest hit, in ray order.
    /// Rays that hit nothing are omitted. Unusable inputs yield no hits.
    pub fn cone_cast<Q: RayQuery + ?Sized>(
        &self,
        physics: &Q,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Vec<RaycastHit> {
        if !origin.is_finite() || !(max_distance > 0.0) {
            return Vec::new();
        }

        self.directions(direction)
            .into_iter()
            .filter_map(|dir| physics.cast_ray(origin, dir, max_distance))
            .collect()
    }
}
