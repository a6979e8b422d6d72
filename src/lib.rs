//! dead-reckon - a dead-reckoning core for IMU acceleration streams
//!
//! This library turns a stream of accelerometer samples into velocity and
//! position estimates by double trapezoidal integration, with per-axis
//! noise rejection and saturation clamping at each stage, optional
//! rotation of acceleration into a reference frame, and coarse
//! grid-square classification of the final position.
//!
//! Device discovery, sensor calibration commands, and file I/O are
//! external collaborators: the acquirer hands the core one [`Sample`] at
//! a time, and the core exposes its results as in-memory [`Trace`]s of
//! structured [`KinematicState`] records for the caller to persist.
//!
//! # Features
//!
//! - Trapezoidal integration of acceleration to velocity to position
//! - Per-axis noise floors and saturation clamps, all configurable
//! - Gravity-bias removal and raw-unit scaling before integration
//! - Optional sensor-to-reference frame correction via a rotation matrix
//! - Bounded lettered/numbered grid classification of a position fix
//! - Explicit, inspectable errors; nothing is swallowed or defaulted
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use dead_reckon::{DeadReckoner, GridSpec, Sample, classify};
//!
//! let mut reckoner = DeadReckoner::new();
//!
//! // One call per sample from the acquirer.
//! reckoner.ingest(&Sample::new(Vector3::zeros(), 0.0))?;
//! reckoner.ingest(&Sample::new(Vector3::new(2.0, 0.0, 0.0), 1.0))?;
//! let (velocity, position) = reckoner.ingest(&Sample::new(Vector3::new(2.0, 0.0, 0.0), 2.0))?;
//!
//! assert_eq!(velocity.value.x, 3.0);
//! assert_eq!(position.value.x, 2.5);
//!
//! // Map the final fix onto the default 20x20 grid.
//! let cell = classify(&position.value, &GridSpec::default())?;
//! assert_eq!(cell, "K11");
//! # Ok::<(), dead_reckon::Error>(())
//! ```

mod correction;
mod error;
mod grid;
mod integrator;
mod math;
mod types;

pub use correction::correct_acceleration;
pub use error::{Error, Result};
pub use grid::{GridSpec, classify};
pub use integrator::DeadReckoner;
pub use math::{STANDARD_GRAVITY, Vector3Ext};
pub use types::{IntegratorConfig, KinematicState, Sample, Trace, TraceKind};
