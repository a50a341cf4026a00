//! Attendance streak tracking against the schedule policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScheduleError;
use crate::models::{AdherenceState, Cadence};
use crate::schedule;

/// Result of a "mark today complete" request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "outcome")]
pub enum CompletionOutcome {
    /// Completion stored
    Recorded { streak: u32, continued: bool },
    /// Today is a rest day under the cadence
    NotTrainingDay,
    /// Today was already marked
    AlreadyRecorded,
    /// Clock is earlier than the stored completion
    BeforeLastCompletion { last_completed: NaiveDate },
}

impl CompletionOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, CompletionOutcome::Recorded { .. })
    }
}

/// Streak state machine. The only event is a completion for `today`.
pub struct AdherenceTracker;

impl AdherenceTracker {
    /// Record a completion for `today`.
    ///
    /// Rejections leave `state` untouched and come back as `Ok` outcomes.
    /// An `Err` only means the schedule search failed.
    pub fn mark_complete(
        state: &mut AdherenceState,
        today: NaiveDate,
        cadence: Cadence,
    ) -> Result<CompletionOutcome, ScheduleError> {
        if !schedule::is_scheduled_day(today, cadence) {
            debug!(%today, ?cadence, "Rejected completion on rest day");
            return Ok(CompletionOutcome::NotTrainingDay);
        }

        let (streak, continued) = match state.last_completed {
            None => (1, false),
            Some(last) if last == today => {
                debug!(%today, "Completion already recorded");
                return Ok(CompletionOutcome::AlreadyRecorded);
            }
            Some(last) if last > today => {
                debug!(%today, %last, "Rejected completion dated before the last one");
                return Ok(CompletionOutcome::BeforeLastCompletion {
                    last_completed: last,
                });
            }
            Some(last) => {
                if Self::continues_streak(last, today, cadence)? {
                    (state.streak.saturating_add(1), true)
                } else {
                    (1, false)
                }
            }
        };

        state.last_completed = Some(today);
        state.streak = streak;

        info!(%today, streak, continued, "Workout completion recorded");
        Ok(CompletionOutcome::Recorded { streak, continued })
    }

    /// Whether `mark_complete` would record a completion today.
    ///
    /// Dates before `last_completed` are refused so a clock set back cannot
    /// extend the streak.
    pub fn can_mark(state: &AdherenceState, today: NaiveDate, cadence: Cadence) -> bool {
        schedule::is_scheduled_day(today, cadence)
            && state.last_completed.map_or(true, |last| last < today)
    }

    /// No scheduled day lies strictly between `last` and `today`.
    ///
    /// Checked first against the immediately preceding training day, then by
    /// scanning the gap; the scan also covers a `last` that is not itself a
    /// training day under `cadence`.
    pub fn continues_streak(
        last: NaiveDate,
        today: NaiveDate,
        cadence: Cadence,
    ) -> Result<bool, ScheduleError> {
        let prev = schedule::prev_scheduled_before(today, cadence)?;
        if prev == last {
            return Ok(true);
        }

        let missed = schedule::count_scheduled_between(last, today, cadence);
        if missed > 0 {
            debug!(%last, %today, missed, "Scheduled sessions missed, streak resets");
        }
        Ok(missed == 0)
    }
}
