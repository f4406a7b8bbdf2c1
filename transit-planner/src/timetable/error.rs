//! Timetable construction errors.

use crate::domain::{RouteId, StopId, TimeFormatError};

/// Errors that can occur while assembling a timetable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A stop time refers to a stop that was never interned
    #[error("unknown stop id {0}")]
    UnknownStop(StopId),

    /// A trip refers to a route that was never registered
    #[error("unknown route id {0}")]
    UnknownRoute(RouteId),

    /// Trip ids must be unique across the whole dataset
    #[error("duplicate trip id: {0}")]
    DuplicateTrip(String),

    /// A trip must serve at least one stop
    #[error("trip {0} has no stop times")]
    EmptyTrip(String),

    /// A recorded time could not be parsed
    #[error(transparent)]
    Time(#[from] TimeFormatError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::to_minutes;

    #[test]
    fn error_display() {
        assert_eq!(
            TimetableError::UnknownStop(StopId(9)).to_string(),
            "unknown stop id 9"
        );
        assert_eq!(
            TimetableError::UnknownRoute(RouteId(2)).to_string(),
            "unknown route id 2"
        );
        assert_eq!(
            TimetableError::DuplicateTrip("T1_WEEKDAY".into()).to_string(),
            "duplicate trip id: T1_WEEKDAY"
        );
        assert_eq!(
            TimetableError::EmptyTrip("T2".into()).to_string(),
            "trip T2 has no stop times"
        );

        let err: TimetableError = to_minutes("8am").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid time: expected HH:MM format");
    }
}
