//! Camera zoom smoothing.
//!
//! Raw wheel deltas are averaged over a short window so single noisy frames
//! do not jerk the camera. The averaged value moves a target distance, and
//! the current distance eases toward it. Offset depth and pitch are then
//! read off two fitted quadratics so the camera sweeps along a fixed arc.

use engine_core::{EulerRot, Quat, Vec3};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of raw zoom deltas.
#[derive(Debug, Clone)]
pub struct ZoomInputBuffer {
    values: VecDeque<f32>,
    capacity: usize,
}

impl ZoomInputBuffer {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a delta, evicting the oldest one when full.
    pub fn push(&mut self, delta: f32) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(delta);
    }

    /// Mean of the buffered deltas, or zero when empty.
    pub fn average(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Buffered deltas, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }
}

/// Depth component of the follow offset for a given zoom distance.
pub fn camera_zoom_z(y: f32) -> f32 {
    (0.1375 * y * y) - (2.149 * y) + 4.196
}

/// Camera pitch in degrees for a given zoom distance.
pub fn camera_pitch_degrees(y: f32) -> f32 {
    (0.6286 * y * y) - (7.124 * y) + 78.95
}

/// Where the camera rig should sit relative to its target, and how it is aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub follow_offset: Vec3,
    /// Euler angles (x, y, z) in degrees. Only pitch is ever non-zero.
    pub rotation_euler_degrees: Vec3,
}

impl CameraPose {
    pub fn for_zoom(zoom: f32) -> Self {
        Self {
            follow_offset: Vec3::new(0.0, zoom, camera_zoom_z(zoom)),
            rotation_euler_degrees: Vec3::new(camera_pitch_degrees(zoom), 0.0, 0.0),
        }
    }

    pub fn rotation(&self) -> Quat {
        let r = self.rotation_euler_degrees;
        Quat::from_euler(
            EulerRot::XYZ,
            r.x.to_radians(),
            r.y.to_radians(),
            r.z.to_radians(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ZoomSmoother {
    buffer: ZoomInputBuffer,
    current: f32,
    min_zoom: f32,
    max_zoom: f32,
    speed: f32,
    dead_zone: f32,
}

impl ZoomSmoother {
    /// `initial` is clamped into `[min_zoom, max_zoom]`.
    pub fn new(
        initial: f32,
        min_zoom: f32,
        max_zoom: f32,
        speed: f32,
        buffer_size: usize,
        dead_zone: f32,
    ) -> Self {
        Self {
            buffer: ZoomInputBuffer::new(buffer_size),
            current: initial.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            speed,
            dead_zone,
        }
    }

    /// Feed this frame's raw delta. Returns the new camera pose when the zoom
    /// moved, `None` when the averaged input sits inside the dead zone.
    pub fn update(&mut self, raw_delta: f32, dt: f32) -> Option<CameraPose> {
        self.buffer.push(if raw_delta.is_finite() { raw_delta } else { 0.0 });

        let average = self.buffer.average();
        if average.abs() <= self.dead_zone {
            return None;
        }

        let target = (self.current - average).clamp(self.min_zoom, self.max_zoom);
        let t = if dt.is_finite() {
            (self.speed * dt).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.current = lerp(self.current, target, t).clamp(self.min_zoom, self.max_zoom);

        Some(CameraPose::for_zoom(self.current))
    }

    pub fn current_zoom(&self) -> f32 {
        self.current
    }

    /// Pose for the current zoom, whether or not it changed this frame.
    pub fn pose(&self) -> CameraPose {
        CameraPose::for_zoom(self.current)
    }

    pub fn buffer(&self) -> &ZoomInputBuffer {
        &self.buffer
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
