//! Error types for ripple analysis.

use thiserror::Error;

/// Errors raised by the ripple analysis pipeline.
///
/// Missing measurement data is not an error: teeth with too few samples are
/// skipped and a side/direction without a usable curve yields `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RippleError {
    /// Gear parameters cannot describe a real gear.
    #[error("invalid gear geometry: {0}")]
    InvalidGeometry(String),

    /// Input arrays violate a precondition of the computation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Analysis configuration value is out of range.
    #[error("invalid configuration '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RippleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry_display() {
        let err = RippleError::InvalidGeometry("teeth count must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid gear geometry: teeth count must be positive"
        );
    }

    #[test]
    fn invalid_config_display() {
        let err = RippleError::InvalidConfig {
            field: "amplitude_scale",
            reason: "must be finite".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration 'amplitude_scale': must be finite"
        );
    }
}
