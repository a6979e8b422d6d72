//! Dead-reckoning integrator: acceleration samples to velocity and position traces

use nalgebra::Vector3;

use crate::correction::correct_acceleration;
use crate::error::{Error, Result};
use crate::math::{Vector3Ext, trapezoid};
use crate::types::{IntegratorConfig, KinematicState, Sample, Trace};

/// State carried between consecutive accepted samples.
#[derive(Debug, Clone, Copy)]
struct PrevState {
    timestamp: f32,
    acceleration: Vector3<f32>,
    velocity: Vector3<f32>,
    position: Vector3<f32>,
}

/// Dead-reckoning integrator.
///
/// Converts an incoming stream of acceleration [`Sample`]s into parallel
/// acceleration, velocity, and position [`Trace`]s via trapezoidal
/// integration, applying per-axis noise rejection and saturation before
/// each step and optionally rotating acceleration into a reference frame
/// first.
///
/// Each [`ingest`](DeadReckoner::ingest) call is a pure, bounded O(1)
/// computation; the full pipeline is deterministic given the same sample
/// sequence and configuration. The integrator is not thread-safe by
/// contract: it is meant to be driven from a single control loop, and
/// callers needing concurrency must serialize access externally.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dead_reckon::{DeadReckoner, Sample};
///
/// let mut reckoner = DeadReckoner::new();
///
/// reckoner.ingest(&Sample::new(Vector3::zeros(), 0.0)).unwrap();
/// let (velocity, position) = reckoner
///     .ingest(&Sample::new(Vector3::new(2.0, 0.0, 0.0), 1.0))
///     .unwrap();
///
/// assert_eq!(velocity.value.x, 1.0);
/// assert_eq!(position.value.x, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct DeadReckoner {
    config: IntegratorConfig,
    prev: Option<PrevState>,
    acceleration: Trace,
    velocity: Trace,
    position: Trace,
}

impl DeadReckoner {
    /// Create an integrator with the default configuration.
    pub fn new() -> Self {
        // The default configuration is known-valid.
        Self {
            config: IntegratorConfig::default(),
            prev: None,
            acceleration: Trace::new(),
            velocity: Trace::new(),
            position: Trace::new(),
        }
    }

    /// Create an integrator with the given configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] when the configuration fails
    /// validation; see [`IntegratorConfig::validate`].
    pub fn with_config(config: IntegratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            prev: None,
            acceleration: Trace::new(),
            velocity: Trace::new(),
            position: Trace::new(),
        })
    }

    /// Ingest one sample and return the new velocity and position states.
    ///
    /// The very first sample seeds the integrator: velocity and position
    /// are the zero vector and no integration occurs. Subsequent samples
    /// advance both integrals by one trapezoidal step using the time delta
    /// between consecutive accepted samples. A repeated timestamp yields a
    /// zero time delta and contributes exactly nothing to either integral.
    ///
    /// # Errors
    /// [`Error::NonMonotonicTime`] when the sample's timestamp precedes
    /// the previous accepted sample's. The failed call leaves all traces
    /// unmodified; supplying well-formed samples is the acquirer's
    /// responsibility and the integrator never retries.
    pub fn ingest(&mut self, sample: &Sample) -> Result<(KinematicState, KinematicState)> {
        if let Some(prev) = &self.prev {
            if sample.timestamp < prev.timestamp {
                return Err(Error::NonMonotonicTime {
                    timestamp: sample.timestamp,
                    previous: prev.timestamp,
                });
            }
        }

        let corrected = self.correct(sample);

        let (velocity, position) = match &self.prev {
            None => (Vector3::zeros(), Vector3::zeros()),
            Some(prev) => {
                let dt = sample.timestamp - prev.timestamp;
                let velocity = (prev.velocity + trapezoid(prev.acceleration, corrected, dt))
                    .apply_noise_floor(self.config.velocity_noise_floor);
                let position = prev.position + trapezoid(prev.velocity, velocity, dt);
                (velocity, position)
            }
        };

        self.acceleration
            .push(KinematicState::new(corrected, sample.timestamp));
        let velocity_state = KinematicState::new(velocity, sample.timestamp);
        let position_state = KinematicState::new(position, sample.timestamp);
        self.velocity.push(velocity_state);
        self.position.push(position_state);

        self.prev = Some(PrevState {
            timestamp: sample.timestamp,
            acceleration: corrected,
            velocity,
            position,
        });

        Ok((velocity_state, position_state))
    }

    /// Current configuration.
    pub fn config(&self) -> IntegratorConfig {
        self.config
    }

    /// Trace of corrected acceleration states.
    pub fn acceleration(&self) -> &Trace {
        &self.acceleration
    }

    /// Trace of integrated velocity states.
    pub fn velocity(&self) -> &Trace {
        &self.velocity
    }

    /// Trace of integrated position states.
    pub fn position(&self) -> &Trace {
        &self.position
    }

    /// The most recent position state, if any samples have been ingested.
    pub fn last_position(&self) -> Option<&KinematicState> {
        self.position.last()
    }

    /// Clear all traces and the integration seed, keeping the configuration.
    pub fn reset(&mut self) {
        self.prev = None;
        self.acceleration.clear();
        self.velocity.clear();
        self.position.clear();
    }

    /// Apply frame correction, noise rejection, and saturation to a raw sample.
    fn correct(&self, sample: &Sample) -> Vector3<f32> {
        let orientation = if self.config.apply_rotation {
            sample.orientation.as_ref()
        } else {
            None
        };

        let corrected = correct_acceleration(
            sample.acceleration,
            self.config.gravity_bias,
            self.config.unit_scale,
            orientation,
        )
        .apply_noise_floor(self.config.noise_floor);

        let clamped = corrected.clamp_saturation(self.config.saturation_limit);
        if clamped != corrected {
            log::debug!(
                "acceleration clamped to saturation limit {} at t={}s",
                self.config.saturation_limit,
                sample.timestamp
            );
        }
        clamped
    }
}

impl Default for DeadReckoner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> IntegratorConfig {
        IntegratorConfig {
            noise_floor: 0.0,
            velocity_noise_floor: 0.0,
            saturation_limit: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_sample_only_seeds() {
        let mut reckoner = DeadReckoner::with_config(quiet_config()).unwrap();

        let (velocity, position) = reckoner
            .ingest(&Sample::new(Vector3::new(5.0, -2.0, 1.0), 0.5))
            .unwrap();

        assert_eq!(velocity.value, Vector3::zeros());
        assert_eq!(position.value, Vector3::zeros());
        assert_eq!(velocity.timestamp, 0.5);
        assert_eq!(reckoner.velocity().len(), 1);
        assert_eq!(reckoner.position().len(), 1);
        assert_eq!(reckoner.acceleration().len(), 1);
    }

    #[test]
    fn test_non_monotonic_time_leaves_traces_unmodified() {
        let mut reckoner = DeadReckoner::with_config(quiet_config()).unwrap();

        reckoner
            .ingest(&Sample::new(Vector3::zeros(), 1.0))
            .unwrap();
        let err = reckoner
            .ingest(&Sample::new(Vector3::new(1.0, 0.0, 0.0), 0.5))
            .unwrap_err();

        assert_eq!(
            err,
            Error::NonMonotonicTime {
                timestamp: 0.5,
                previous: 1.0,
            }
        );
        assert_eq!(reckoner.velocity().len(), 1);
        assert_eq!(reckoner.position().len(), 1);

        // The integrator continues normally from the last accepted sample.
        reckoner
            .ingest(&Sample::new(Vector3::zeros(), 1.5))
            .unwrap();
        assert_eq!(reckoner.velocity().len(), 2);
    }

    #[test]
    fn test_zero_dt_contributes_nothing() {
        let mut reckoner = DeadReckoner::with_config(quiet_config()).unwrap();

        reckoner
            .ingest(&Sample::new(Vector3::new(1.0, 0.0, 0.0), 0.0))
            .unwrap();
        let (v1, p1) = reckoner
            .ingest(&Sample::new(Vector3::new(3.0, 0.0, 0.0), 1.0))
            .unwrap();
        let (v2, p2) = reckoner
            .ingest(&Sample::new(Vector3::new(9.0, 9.0, 9.0), 1.0))
            .unwrap();

        assert_eq!(v1.value, v2.value);
        assert_eq!(p1.value, p2.value);
        assert!(v2.value.iter().all(|c| c.is_finite()));
        assert!(p2.value.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_acceleration_trace_holds_corrected_values() {
        let config = IntegratorConfig {
            noise_floor: 0.0,
            velocity_noise_floor: 0.0,
            saturation_limit: 2.0,
            ..Default::default()
        };
        let mut reckoner = DeadReckoner::with_config(config).unwrap();

        reckoner
            .ingest(&Sample::new(Vector3::new(10.0, 0.0, 0.0), 0.0))
            .unwrap();

        let stored = reckoner.acceleration().last().unwrap();
        assert_eq!(stored.value, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset_clears_traces_and_seed() {
        let mut reckoner = DeadReckoner::with_config(quiet_config()).unwrap();
        reckoner
            .ingest(&Sample::new(Vector3::new(1.0, 0.0, 0.0), 0.0))
            .unwrap();
        reckoner
            .ingest(&Sample::new(Vector3::new(1.0, 0.0, 0.0), 1.0))
            .unwrap();

        reckoner.reset();
        assert!(reckoner.velocity().is_empty());
        assert!(reckoner.last_position().is_none());

        // An earlier timestamp is fine after reset; the seed is gone.
        let (velocity, _) = reckoner
            .ingest(&Sample::new(Vector3::new(1.0, 0.0, 0.0), 0.0))
            .unwrap();
        assert_eq!(velocity.value, Vector3::zeros());
    }

    #[test]
    fn test_with_config_validates() {
        let config = IntegratorConfig {
            unit_scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            DeadReckoner::with_config(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rotation_requires_flag_and_matrix() {
        use nalgebra::Matrix3;

        // 90 degrees about Z.
        let rotation = Matrix3::new(
            0.0, -1.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0,
        );

        let config = IntegratorConfig {
            apply_rotation: true,
            ..quiet_config()
        };
        let mut reckoner = DeadReckoner::with_config(config).unwrap();

        reckoner
            .ingest(&Sample::with_orientation(Vector3::zeros(), 0.0, rotation))
            .unwrap();
        reckoner
            .ingest(&Sample::with_orientation(
                Vector3::new(2.0, 0.0, 0.0),
                1.0,
                rotation,
            ))
            .unwrap();

        // Acceleration along sensor x integrates along reference y.
        let velocity = reckoner.velocity().last().unwrap().value;
        assert_eq!(velocity, Vector3::new(0.0, 1.0, 0.0));

        // Without the flag, the matrix is ignored.
        let mut plain = DeadReckoner::with_config(quiet_config()).unwrap();
        plain
            .ingest(&Sample::with_orientation(Vector3::zeros(), 0.0, rotation))
            .unwrap();
        plain
            .ingest(&Sample::with_orientation(
                Vector3::new(2.0, 0.0, 0.0),
                1.0,
                rotation,
            ))
            .unwrap();
        assert_eq!(
            plain.velocity().last().unwrap().value,
            Vector3::new(1.0, 0.0, 0.0)
        );
    }
}
