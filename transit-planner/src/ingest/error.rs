//! Timetable loading errors.

use crate::timetable::TimetableError;

/// Errors that can occur while loading a timetable file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    /// The rows describe an inconsistent timetable
    #[error("invalid timetable: {0}")]
    Timetable(#[from] TimetableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            LoadError::MissingColumn("route").to_string(),
            "missing required column: route"
        );

        let err: LoadError = TimetableError::DuplicateTrip("T1_WEEKDAY".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid timetable: duplicate trip id: T1_WEEKDAY"
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: LoadError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
