/*
 * Error Module
 *
 * Error types for flock registry operations and configuration loading.
 * Degenerate numeric cases inside a step are handled by guards; only
 * caller mistakes (full registry, bad handles) and bad configuration
 * surface as errors.
 */

use thiserror::Error;

use crate::firefly::FireflyId;

/// Result type for flock operations.
pub type Result<T> = std::result::Result<T, FlockError>;

/// Errors raised by the flock registry and the simulation step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    /// The registry already holds `max` fireflies.
    #[error("flock is full ({max} fireflies)")]
    Capacity { max: usize },
    /// A leader was added after the leader prefix was complete, or a
    /// follower before it was.
    #[error("firefly at index {index} breaks the leaders-first ordering")]
    LeaderOutOfOrder { index: usize },
    /// The handle does not refer to a firefly in this flock.
    #[error("no firefly with id {0}")]
    UnknownFirefly(FireflyId),
    /// Leaders never follow anyone.
    #[error("firefly {0} is a leader and cannot be led")]
    NotAFollower(FireflyId),
    /// Only leaders can be followed.
    #[error("firefly {0} is not a leader")]
    NotALeader(FireflyId),
    /// A velocity integrated to zero length and has no direction.
    #[error("velocity has zero length")]
    DegenerateVelocity,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for `SimulationParams`.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The containment volume is malformed.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
    /// A tunable is out of its allowed range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn capacity_error_names_the_limit() {
        let err = FlockError::Capacity { max: 50 };
        assert_eq!(err.to_string(), "flock is full (50 fireflies)");
    }

    #[test]
    fn config_parse_error_keeps_its_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }
}
