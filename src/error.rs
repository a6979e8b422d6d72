//! Error types for the dead-reckoning core

use thiserror::Error;

/// Errors surfaced by the integrator and classifier.
///
/// Every failure is returned to the caller as a distinct, inspectable
/// value. Nothing is retried internally and no default value is ever
/// substituted for a failed operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample's timestamp precedes the previous accepted sample.
    ///
    /// Time must be monotonic non-decreasing within a trace. The failed
    /// ingest leaves all traces unmodified.
    #[error("non-monotonic time: sample at {timestamp}s precedes previous sample at {previous}s")]
    NonMonotonicTime {
        /// Timestamp of the rejected sample in seconds.
        timestamp: f32,
        /// Timestamp of the previous accepted sample in seconds.
        previous: f32,
    },

    /// A position lies outside the configured grid bounds.
    ///
    /// No partial label is returned; classification is all-or-nothing.
    #[error("position {value} on {axis} axis is outside grid range [{min}, {max}]")]
    OutOfRange {
        /// Which axis was out of range (`'x'` or `'z'`).
        axis: char,
        /// The offending coordinate.
        value: f32,
        /// Lower bound of the grid on this axis.
        min: f32,
        /// Upper bound of the grid on this axis.
        max: f32,
    },

    /// A configuration value failed validation.
    ///
    /// Raised before any sample is processed, at `DeadReckoner::with_config`
    /// or `GridSpec` validation time.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

/// Crate-local result alias.
pub type Result<T> = core::result::Result<T, Error>;
