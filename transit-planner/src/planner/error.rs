//! Planning errors.

use std::fmt;

use crate::domain::{DomainError, StopId};

/// Which end of a query a stop id was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRole {
    Source,
    Target,
}

impl fmt::Display for StopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRole::Source => f.write_str("source"),
            StopRole::Target => f.write_str("target"),
        }
    }
}

/// Error from journey planning.
///
/// Malformed trip segments are not errors: the engine skips them and
/// carries on with the remaining data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Source or target is not in the timetable; planning never starts
    #[error("{role} stop {stop} is not in the timetable")]
    InvalidStop { role: StopRole, stop: StopId },

    /// The target was never reached; callers must check before reconstructing
    #[error("no journey reaches stop {target}")]
    Unreachable { target: StopId },

    /// A predecessor record does not match the timetable
    #[error("predecessor chain is broken at stop {stop}")]
    BrokenChain { stop: StopId },

    /// Reconstructed rides failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::InvalidStop {
            role: StopRole::Source,
            stop: StopId(42),
        };
        assert_eq!(err.to_string(), "source stop 42 is not in the timetable");

        let err = PlanError::InvalidStop {
            role: StopRole::Target,
            stop: StopId(7),
        };
        assert_eq!(err.to_string(), "target stop 7 is not in the timetable");

        let err = PlanError::Unreachable { target: StopId(3) };
        assert_eq!(err.to_string(), "no journey reaches stop 3");

        let err = PlanError::BrokenChain { stop: StopId(1) };
        assert_eq!(err.to_string(), "predecessor chain is broken at stop 1");
    }
}
