//! Error types for the concord-core crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! The pipeline performs no I/O, so the only failure classes are invalid
//! session configuration, out-of-range injected signal values, and
//! counter exhaustion.

/// Errors that can occur inside the voting pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The session configuration is invalid (empty proposal set, zero
    /// agents, zero-sized history window, duplicate proposal names).
    /// Detected at session construction, never lazily inside a round.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of what is wrong with the configuration.
        reason: String,
    },

    /// An injected agent state carried a signal outside `[0, 1]`.
    /// Rejected before the value can corrupt the collective index mean.
    #[error("value out of range: {field} = {value} (expected 0.0..=1.0)")]
    ValueOutOfRange {
        /// The name of the offending signal field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The round counter would overflow `u64::MAX`.
    #[error("round counter overflow: cannot advance beyond u64::MAX")]
    RoundOverflow,
}
