//! Unified error hierarchy for LiftRS
//!
//! Policy rejections such as marking a rest day are not errors; they are
//! reported through `CompletionOutcome`. Everything here is a real failure
//! the caller has to route around.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn, Level};

/// Top-level error type for all LiftRS operations
#[derive(Debug, Error)]
pub enum LiftRsError {
    /// Schedule search failures
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Storage collaborator failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation needs a profile and program
    #[error("No profile yet, onboarding has not been completed")]
    NotOnboarded,
}

/// Direction of a scheduled-day search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::Forward => f.write_str("forward"),
            SearchDirection::Backward => f.write_str("backward"),
        }
    }
}

/// Schedule policy errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// No scheduled day within the search bound
    #[error("No scheduled day found searching {direction} from {from} within {limit} days")]
    SearchExhausted {
        from: NaiveDate,
        direction: SearchDirection,
        limit: u32,
    },
}

/// Storage collaborator errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure
    #[error("Storage IO failure for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backing store
    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    /// Backend refused the operation
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Result type alias for LiftRS operations
pub type Result<T> = std::result::Result<T, LiftRsError>;

impl LiftRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftRsError::Validation(_) => ErrorSeverity::Warning,
            LiftRsError::NotOnboarded => ErrorSeverity::Info,
            LiftRsError::Storage(_) => ErrorSeverity::Warning,
            LiftRsError::Schedule(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftRsError::NotOnboarded => {
                "No program yet. Run onboarding first to create one.".to_string()
            }
            LiftRsError::Schedule(ScheduleError::SearchExhausted { .. }) => {
                "The selected schedule has no training days. Please onboard again.".to_string()
            }
            LiftRsError::Storage(_) => {
                "Saved data could not be accessed; continuing with what is in memory.".to_string()
            }
            LiftRsError::Validation(_) => self.to_string(),
        }
    }

    /// Emit a tracing event at this error's severity
    pub fn log(&self) {
        let level = self.severity().to_tracing_level();
        if level == Level::ERROR {
            error!(error = %self, "Operation failed");
        } else if level == Level::WARN {
            warn!(error = %self, "Operation failed");
        } else {
            info!(error = %self, "Operation not available");
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Misconfiguration that makes the schedule unusable
    Critical,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> Level {
        match self {
            ErrorSeverity::Critical => Level::ERROR,
            ErrorSeverity::Warning => Level::WARN,
            ErrorSeverity::Info => Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = LiftRsError::Schedule(ScheduleError::SearchExhausted {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            direction: SearchDirection::Forward,
            limit: 365,
        });
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), Level::ERROR);

        let err = LiftRsError::Validation("day 9".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), Level::WARN);

        let err = LiftRsError::Storage(StorageError::Unavailable {
            reason: "locked".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        assert_eq!(
            LiftRsError::NotOnboarded.severity().to_tracing_level(),
            Level::INFO
        );
    }

    #[test]
    fn test_search_exhausted_message() {
        let err = ScheduleError::SearchExhausted {
            from: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            direction: SearchDirection::Backward,
            limit: 365,
        };
        assert_eq!(
            err.to_string(),
            "No scheduled day found searching backward from 2024-03-04 within 365 days"
        );
    }

    #[test]
    fn test_user_messages() {
        let message = LiftRsError::NotOnboarded.user_message();
        assert!(message.contains("onboarding"));
        assert_ne!(message, LiftRsError::NotOnboarded.to_string());

        let err = LiftRsError::Validation("day 9 does not exist, program has 3".to_string());
        assert_eq!(err.user_message(), err.to_string());

        let err = LiftRsError::from(ScheduleError::SearchExhausted {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            direction: SearchDirection::Forward,
            limit: 365,
        });
        assert!(err.user_message().contains("no training days"));
    }
}
