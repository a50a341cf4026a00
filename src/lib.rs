// Library interface for LiftRS modules
// The CLI in main.rs is a thin shell over `session`

pub mod adherence;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod program;
pub mod schedule;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience
pub use models::*;
pub use adherence::{AdherenceTracker, CompletionOutcome};
pub use catalog::ExerciseCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use program::ProgramGenerator;
pub use session::{CabinetSummary, ResetOutcome, Session};
pub use storage::{FileStore, MemoryStore, StateStore, STATE_KEY};
pub use error::{LiftRsError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
