//! Error types for the visit planner.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("no locations to schedule")]
    EmptyLocations,
    #[error("no transport modes available")]
    EmptyTransportModes,
    #[error("duplicate location name: {0}")]
    DuplicateLocation(String),
    #[error("schedule references unknown location: {0}")]
    UnknownLocation(String),
    #[error("invalid record in {file} at line {line}: {reason}")]
    InvalidRecord {
        file: String,
        line: usize,
        reason: String,
    },
    #[error("invalid time format: {0}")]
    InvalidTime(String),
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
    #[error("invalid time window: {0}")]
    InvalidWindow(String),
    #[error("invalid solve options: {0}")]
    InvalidOptions(String),
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// Malformed time or calendar input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidTime(_)
                | PlannerError::UnknownWeekday(_)
                | PlannerError::InvalidWindow(_)
        )
    }

    /// Missing, empty or inconsistent input data. Fatal before scheduling starts.
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            PlannerError::EmptyLocations
                | PlannerError::EmptyTransportModes
                | PlannerError::DuplicateLocation(_)
                | PlannerError::UnknownLocation(_)
                | PlannerError::InvalidRecord { .. }
                | PlannerError::Csv(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(PlannerError::InvalidTime("24:00".into()).is_validation());
        assert!(!PlannerError::InvalidTime("24:00".into()).is_data());
        assert!(PlannerError::EmptyLocations.is_data());
        assert!(!PlannerError::InvalidOptions("restarts".into()).is_data());
    }

    #[test]
    fn test_record_message_names_line() {
        let err = PlannerError::InvalidRecord {
            file: "relatives.csv".into(),
            line: 3,
            reason: "duration must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid record in relatives.csv at line 3: duration must be positive"
        );
    }
}
