//! Acceleration frame correction for the dead-reckoning core

use nalgebra::{Matrix3, Vector3};

/// Applies frame correction to a raw acceleration reading.
///
/// Order is fixed: `rotation * ((raw - gravity_bias) * unit_scale)`. The
/// bias is expressed in raw sensor units and subtracted before scaling;
/// the rotation, when supplied, maps the scaled vector from the sensor
/// frame into the reference frame.
///
/// # Arguments
/// * `raw` - Raw acceleration reading in sensor units
/// * `gravity_bias` - Constant bias to subtract, in sensor units
/// * `unit_scale` - Multiplier converting sensor units to m/s²
/// * `orientation` - Optional rotation from sensor frame to reference frame
///
/// # Returns
/// Corrected acceleration in m/s², in the reference frame when a rotation
/// was supplied.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dead_reckon::{correct_acceleration, STANDARD_GRAVITY};
///
/// // A resting sensor reporting 1 g upward, samples in g.
/// let raw = Vector3::new(0.0, 0.0, 1.0);
/// let bias = Vector3::new(0.0, 0.0, 1.0);
///
/// let corrected = correct_acceleration(raw, bias, STANDARD_GRAVITY, None);
/// assert_eq!(corrected, Vector3::zeros());
/// ```
pub fn correct_acceleration(
    raw: Vector3<f32>,
    gravity_bias: Vector3<f32>,
    unit_scale: f32,
    orientation: Option<&Matrix3<f32>>,
) -> Vector3<f32> {
    let scaled = (raw - gravity_bias) * unit_scale;
    match orientation {
        Some(rotation) => rotation * scaled,
        None => scaled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_subtracted_before_scaling() {
        let raw = Vector3::new(1.5, 0.0, 1.0);
        let bias = Vector3::new(0.0, 0.0, 1.0);

        let corrected = correct_acceleration(raw, bias, 2.0, None);
        // (1.5, 0, 0) * 2, not (3, 0, 1) - bias
        assert_eq!(corrected, Vector3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_identity_rotation_is_a_noop() {
        let raw = Vector3::new(0.3, -0.7, 1.1);
        let identity = Matrix3::identity();

        let with = correct_acceleration(raw, Vector3::zeros(), 1.0, Some(&identity));
        let without = correct_acceleration(raw, Vector3::zeros(), 1.0, None);
        assert_eq!(with, without);
    }

    #[test]
    fn test_rotation_applied_after_scaling() {
        // 90 degrees about Z: x maps to y.
        let rotation = Matrix3::new(
            0.0, -1.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0,
        );
        let raw = Vector3::new(1.0, 0.0, 0.0);

        let corrected = correct_acceleration(raw, Vector3::zeros(), 2.0, Some(&rotation));
        assert_eq!(corrected, Vector3::new(0.0, 2.0, 0.0));
    }
}
