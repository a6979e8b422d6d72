//! Mathematical utilities and nalgebra extensions for the dead-reckoning core

use nalgebra::Vector3;

/// Standard gravity in m/s², for converting sensor readings reported in g.
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Extension trait for per-axis threshold operations on `Vector3`.
///
/// Noise rejection and saturation are applied independently to each axis,
/// never to the vector magnitude.
pub trait Vector3Ext {
    /// Calculate the magnitude of the vector.
    fn magnitude(&self) -> f32;

    /// Zero every component whose magnitude is below `floor`.
    fn apply_noise_floor(&self, floor: f32) -> Vector3<f32>;

    /// Clamp every component to the symmetric range `[-limit, limit]`.
    fn clamp_saturation(&self, limit: f32) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    fn apply_noise_floor(&self, floor: f32) -> Vector3<f32> {
        self.map(|c| if c.abs() < floor { 0.0 } else { c })
    }

    fn clamp_saturation(&self, limit: f32) -> Vector3<f32> {
        self.map(|c| c.clamp(-limit, limit))
    }
}

/// Trapezoidal step: area under the segment between two samples.
///
/// `(prev + curr) / 2 * dt`, per axis. A zero `dt` contributes nothing.
#[inline]
pub(crate) fn trapezoid(prev: Vector3<f32>, curr: Vector3<f32>, dt: f32) -> Vector3<f32> {
    (prev + curr) * (0.5 * dt)
}
