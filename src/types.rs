//! Core types for the dead-reckoning pipeline

use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};

/// One instant of sensor data from the acquirer.
///
/// The core consumes only the acceleration vector, a monotonic timestamp,
/// and an optional rotation from the sensor frame into the reference frame.
/// It has no knowledge of ports, device handles, or calibration commands.
///
/// # Example
/// ```
/// use nalgebra::{Matrix3, Vector3};
/// use dead_reckon::Sample;
///
/// let plain = Sample::new(Vector3::new(0.0, 0.0, 9.81), 0.01);
/// let oriented = Sample::with_orientation(
///     Vector3::new(0.0, 0.0, 9.81),
///     0.02,
///     Matrix3::identity(),
/// );
/// assert!(plain.orientation.is_none());
/// assert!(oriented.orientation.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Acceleration in the sensor frame. Units are whatever the sensor
    /// reports; `IntegratorConfig::unit_scale` converts them to m/s².
    pub acceleration: Vector3<f32>,
    /// Monotonic timestamp in seconds.
    pub timestamp: f32,
    /// Optional rotation from the sensor frame to the reference frame.
    pub orientation: Option<Matrix3<f32>>,
}

impl Sample {
    /// Create a sample without orientation data.
    pub fn new(acceleration: Vector3<f32>, timestamp: f32) -> Self {
        Self {
            acceleration,
            timestamp,
            orientation: None,
        }
    }

    /// Create a sample carrying an orientation matrix.
    pub fn with_orientation(
        acceleration: Vector3<f32>,
        timestamp: f32,
        orientation: Matrix3<f32>,
    ) -> Self {
        Self {
            acceleration,
            timestamp,
            orientation: Some(orientation),
        }
    }
}

/// A timestamped 3-vector state.
///
/// Used uniformly for acceleration, velocity, and position entries. This
/// is the structured record the output boundary consumes; writing it to
/// CSV or anywhere else is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    /// The vector value (m/s², m/s, or m depending on the trace kind).
    pub value: Vector3<f32>,
    /// Timestamp in seconds, matching the sample that produced this state.
    pub timestamp: f32,
}

impl KinematicState {
    /// Create a new state.
    pub fn new(value: Vector3<f32>, timestamp: f32) -> Self {
        Self { value, timestamp }
    }

    /// A zero-vector state at the given timestamp.
    pub fn zero(timestamp: f32) -> Self {
        Self::new(Vector3::zeros(), timestamp)
    }
}

/// Which kinematic quantity a trace holds.
///
/// The label feeds the `{Label}X, {Label}Y, {Label}Z, Time` column
/// convention used when traces are exported one file per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Corrected acceleration, m/s².
    Acceleration,
    /// Integrated velocity, m/s.
    Velocity,
    /// Integrated position, m.
    Position,
}

impl TraceKind {
    /// Short column-name prefix for exported records.
    pub fn label(&self) -> &'static str {
        match self {
            TraceKind::Acceleration => "Accel",
            TraceKind::Velocity => "Vel",
            TraceKind::Position => "Pos",
        }
    }
}

/// A chronologically ordered sequence of [`KinematicState`]s.
///
/// Insertion order is chronological order and timestamps are
/// non-decreasing; the integrator is the only writer and enforces both.
/// Previously appended entries are never mutated.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    states: Vec<KinematicState>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states in the trace.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the trace holds no states yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The most recently appended state.
    pub fn last(&self) -> Option<&KinematicState> {
        self.states.last()
    }

    /// Iterate over states in chronological order.
    pub fn iter(&self) -> core::slice::Iter<'_, KinematicState> {
        self.states.iter()
    }

    /// View the trace as a slice.
    pub fn as_slice(&self) -> &[KinematicState] {
        &self.states
    }

    /// Append a state. Crate-internal: the integrator has already
    /// checked the timestamp against the trace tail.
    pub(crate) fn push(&mut self, state: KinematicState) {
        debug_assert!(
            self.states
                .last()
                .is_none_or(|prev| state.timestamp >= prev.timestamp)
        );
        self.states.push(state);
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a KinematicState;
    type IntoIter = core::slice::Iter<'a, KinematicState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Dead-reckoning integrator configuration.
///
/// The noise floor and saturation bounds are deployment constants, not
/// universal truths; the defaults below are one sane, documented set for
/// a sensor configured to a ±2 g accelerometer range reporting in m/s².
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dead_reckon::{IntegratorConfig, STANDARD_GRAVITY};
///
/// // Sensor reporting in g with 1 g resting on the vertical axis.
/// let config = IntegratorConfig {
///     unit_scale: STANDARD_GRAVITY,
///     gravity_bias: Vector3::new(0.0, 0.0, 1.0),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorConfig {
    /// Acceleration components with magnitude below this (m/s²) are
    /// treated as sensor noise and zeroed.
    pub noise_floor: f32,
    /// Velocity components with magnitude below this (m/s) are zeroed
    /// after integration. Same rule as `noise_floor`, separate value.
    pub velocity_noise_floor: f32,
    /// Acceleration components are clamped to ±this magnitude (m/s²).
    /// Readings beyond it are outside the sensor's reliable range.
    pub saturation_limit: f32,
    /// Constant bias subtracted from raw acceleration before scaling,
    /// in raw sensor units (e.g. 1 g on the vertical axis).
    pub gravity_bias: Vector3<f32>,
    /// Multiplier converting raw sensor units to m/s². Use
    /// [`STANDARD_GRAVITY`](crate::STANDARD_GRAVITY) for sensors
    /// reporting in g; leave at 1.0 for sensors reporting in m/s².
    pub unit_scale: f32,
    /// Whether to rotate corrected acceleration into the reference frame
    /// using the sample's orientation matrix, when present.
    pub apply_rotation: bool,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            noise_floor: 0.05,
            velocity_noise_floor: 0.05,
            // ±2 g expressed in m/s², matching the accelerometer range
            // the sensor is typically configured to.
            saturation_limit: 19.613,
            gravity_bias: Vector3::zeros(),
            unit_scale: 1.0,
            apply_rotation: false,
        }
    }
}

impl IntegratorConfig {
    /// Check the configuration before any samples are processed.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] when `unit_scale` or
    /// `saturation_limit` is not a positive finite number, or either
    /// noise floor is negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(Error::InvalidConfiguration {
                reason: format!("unit_scale must be positive, got {}", self.unit_scale),
            });
        }
        if !(self.saturation_limit.is_finite() && self.saturation_limit > 0.0) {
            return Err(Error::InvalidConfiguration {
                reason: format!(
                    "saturation_limit must be positive, got {}",
                    self.saturation_limit
                ),
            });
        }
        for (name, floor) in [
            ("noise_floor", self.noise_floor),
            ("velocity_noise_floor", self.velocity_noise_floor),
        ] {
            if !(floor.is_finite() && floor >= 0.0) {
                return Err(Error::InvalidConfiguration {
                    reason: format!("{name} must be non-negative, got {floor}"),
                });
            }
        }
        Ok(())
    }
}
