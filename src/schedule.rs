//! Schedule policy: which calendar dates are training days.
//!
//! Everything here depends only on the weekday of a date. Searches are a
//! bounded day-by-day scan so a cadence without any training weekday fails
//! loudly instead of looping.

use chrono::{Datelike, NaiveDate};

use crate::error::{ScheduleError, SearchDirection};
use crate::models::Cadence;

/// Upper bound on days visited by a scheduled-day search
pub const SEARCH_LIMIT: u32 = 365;

/// Length of the Monday-anchored two-on/two-off cycle
const TWO_BY_TWO_CYCLE: u32 = 4;

/// Monday = 1 ... Sunday = 7
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Is `date` a training day under `cadence`
pub fn is_scheduled_day(date: NaiveDate, cadence: Cadence) -> bool {
    let weekday = weekday_index(date);
    match cadence {
        Cadence::ThreeDay => matches!(weekday, 1 | 3 | 5),
        // Restarts every Monday, so Friday and Saturday are "on" again.
        Cadence::TwoByTwo => matches!((weekday - 1) % TWO_BY_TWO_CYCLE, 0 | 1),
    }
}

/// First training day at or after `date`
pub fn next_scheduled_on_or_after(
    date: NaiveDate,
    cadence: Cadence,
) -> Result<NaiveDate, ScheduleError> {
    scan(date, SearchDirection::Forward, |d| is_scheduled_day(d, cadence))
}

/// Last training day strictly before `date`
pub fn prev_scheduled_before(
    date: NaiveDate,
    cadence: Cadence,
) -> Result<NaiveDate, ScheduleError> {
    let exhausted = || ScheduleError::SearchExhausted {
        from: date,
        direction: SearchDirection::Backward,
        limit: SEARCH_LIMIT,
    };
    let start = date.pred_opt().ok_or_else(exhausted)?;
    scan(start, SearchDirection::Backward, |d| is_scheduled_day(d, cadence))
        .map_err(|_| exhausted())
}

/// Training days strictly between `after` and `before`
pub fn count_scheduled_between(after: NaiveDate, before: NaiveDate, cadence: Cadence) -> usize {
    after
        .iter_days()
        .skip(1)
        .take_while(|d| *d < before)
        .filter(|d| is_scheduled_day(*d, cadence))
        .count()
}

/// Visit at most `SEARCH_LIMIT` days starting at `start` (inclusive)
fn scan<F>(
    start: NaiveDate,
    direction: SearchDirection,
    is_scheduled: F,
) -> Result<NaiveDate, ScheduleError>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut current = Some(start);
    for _ in 0..SEARCH_LIMIT {
        let Some(day) = current else { break };
        if is_scheduled(day) {
            return Ok(day);
        }
        current = match direction {
            SearchDirection::Forward => day.succ_opt(),
            SearchDirection::Backward => day.pred_opt(),
        };
    }

    Err(ScheduleError::SearchExhausted {
        from: start,
        direction,
        limit: SEARCH_LIMIT,
    })
}
