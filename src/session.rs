//! The persisted session aggregate.
//!
//! `Session` owns the in-memory `SessionState`, which is authoritative while
//! the process runs. Every mutation overwrites the stored copy on a best-effort
//! basis; a failed write is logged and otherwise ignored.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adherence::{AdherenceTracker, CompletionOutcome};
use crate::error::{LiftRsError, Result};
use crate::models::{AdherenceState, DayPlan, Profile, Program, SessionState};
use crate::program::ProgramGenerator;
use crate::schedule;
use crate::storage::{StateStore, STATE_KEY};

/// What the cabinet view needs for "today"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinetSummary {
    pub next_training: NaiveDate,
    pub streak: u32,
    pub last_completed: Option<NaiveDate>,
    pub can_mark_today: bool,
}

/// Outcome of a reset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Cleared,
    /// The caller did not confirm; nothing changed
    Declined,
}

pub struct Session<S: StateStore> {
    store: S,
    key: String,
    generator: ProgramGenerator,
    state: SessionState,
}

impl<S: StateStore> Session<S> {
    /// Restore the session stored under the default key
    pub fn load(store: S) -> Self {
        Self::load_with(store, STATE_KEY, ProgramGenerator::new())
    }

    /// Restore a session. Missing, unreadable or malformed documents all
    /// start a fresh session.
    pub fn load_with(store: S, key: impl Into<String>, generator: ProgramGenerator) -> Self {
        let key = key.into();
        let state = match store.get(&key) {
            Ok(Some(raw)) => Self::decode(&raw).unwrap_or_else(|reason| {
                warn!(%key, %reason, "Discarding stored session state");
                SessionState::default()
            }),
            Ok(None) => {
                debug!(%key, "No stored session, starting fresh");
                SessionState::default()
            }
            Err(e) => {
                warn!(%key, error = %e, "Failed to read session state, starting fresh");
                SessionState::default()
            }
        };

        Self {
            store,
            key,
            generator,
            state,
        }
    }

    /// Parse and validate a stored document
    pub fn decode(raw: &str) -> std::result::Result<SessionState, String> {
        let state: SessionState = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        state.validate()?;
        Ok(state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile.as_ref()
    }

    pub fn program(&self) -> Option<&Program> {
        self.state.program.as_ref()
    }

    pub fn adherence(&self) -> &AdherenceState {
        &self.state.adherence
    }

    pub fn is_onboarded(&self) -> bool {
        self.state.is_onboarded()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored copy. Failures are logged, never returned.
    pub fn save(&self) {
        let document = match serde_json::to_string(&self.state) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Failed to encode session state");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &document) {
            warn!(key = %self.key, error = %e, "Failed to persist session state");
        }
    }

    /// Accept a new profile and generate its program.
    ///
    /// Streak history belongs to the previous schedule and is cleared with it.
    pub fn onboard<R: Rng + ?Sized>(&mut self, profile: Profile, rng: &mut R) {
        let program = self.generator.generate(&profile, rng);
        info!(cadence = ?profile.cadence, training_type = ?profile.training_type, "Onboarding complete");

        self.state = SessionState {
            profile: Some(profile),
            program: Some(program),
            adherence: AdherenceState::default(),
        };
        self.save();
    }

    /// Replace the program with a fresh one for the stored profile.
    /// Manual exercise edits are lost.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let profile = self.state.profile.as_ref().ok_or(LiftRsError::NotOnboarded)?;
        let program = self.generator.generate(profile, rng);
        info!(days = program.len(), "Program regenerated");

        self.state.program = Some(program);
        self.save();
        Ok(())
    }

    /// Replace one day's exercises from multi-line text
    pub fn edit_day(&mut self, index: usize, text: &str) -> Result<&DayPlan> {
        let program = self.state.program.as_mut().ok_or(LiftRsError::NotOnboarded)?;
        let days = program.len();
        let day = program.get_mut(index).ok_or_else(|| {
            LiftRsError::Validation(format!("day {} does not exist, program has {}", index + 1, days))
        })?;

        day.replace_exercises(text);
        debug!(day = index, exercises = day.exercises.len(), "Day edited");

        self.save();
        let program = self.state.program.as_ref().ok_or(LiftRsError::NotOnboarded)?;
        Ok(&program[index])
    }

    /// Mark `today` as completed under the profile's cadence
    pub fn mark_complete(&mut self, today: NaiveDate) -> Result<CompletionOutcome> {
        let cadence = self
            .state
            .profile
            .as_ref()
            .map(|p| p.cadence)
            .ok_or(LiftRsError::NotOnboarded)?;

        let outcome = AdherenceTracker::mark_complete(&mut self.state.adherence, today, cadence)?;
        if outcome.is_recorded() {
            self.save();
        }
        Ok(outcome)
    }

    /// First training day on or after `today`
    pub fn next_training_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        let profile = self.profile().ok_or(LiftRsError::NotOnboarded)?;
        Ok(schedule::next_scheduled_on_or_after(today, profile.cadence)?)
    }

    pub fn cabinet(&self, today: NaiveDate) -> Result<CabinetSummary> {
        let profile = self.profile().ok_or(LiftRsError::NotOnboarded)?;
        let adherence = self.state.adherence;

        Ok(CabinetSummary {
            next_training: schedule::next_scheduled_on_or_after(today, profile.cadence)?,
            streak: adherence.streak,
            last_completed: adherence.last_completed,
            can_mark_today: AdherenceTracker::can_mark(&adherence, today, profile.cadence),
        })
    }

    /// Drop profile, program and streak in one step.
    ///
    /// `confirmed` is the user's answer to the shell's confirmation prompt.
    pub fn reset(&mut self, confirmed: bool) -> ResetOutcome {
        if !confirmed {
            return ResetOutcome::Declined;
        }

        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to remove stored session state");
        }
        self.state = SessionState::default();
        info!("Session reset");

        ResetOutcome::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorSeverity, StorageError};
    use crate::models::{Cadence, ExperienceLevel, TrainingType};
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable {
                reason: "disk gone".to_string(),
            })
        }

        fn set(&self, _key: &str, _document: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable {
                reason: "disk gone".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable {
                reason: "disk gone".to_string(),
            })
        }
    }

    fn profile() -> Profile {
        Profile {
            training_type: TrainingType::Hypertrophy,
            experience_level: ExperienceLevel::Under1y,
            cadence: Cadence::ThreeDay,
            focus_group: None,
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_operations_need_onboarding() {
        let mut session = Session::load(MemoryStore::new());
        assert!(!session.is_onboarded());
        assert!(matches!(
            session.mark_complete(monday()),
            Err(LiftRsError::NotOnboarded)
        ));
        assert!(matches!(
            session.regenerate(&mut StdRng::seed_from_u64(0)),
            Err(LiftRsError::NotOnboarded)
        ));
        assert!(matches!(
            session.edit_day(0, "Squat"),
            Err(LiftRsError::NotOnboarded)
        ));

        let err = session.next_training_date(monday()).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert!(err.user_message().contains("Run onboarding first"));
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut session = Session::load(BrokenStore);
        session.onboard(profile(), &mut StdRng::seed_from_u64(1));

        let outcome = session.mark_complete(monday()).unwrap();
        assert!(outcome.is_recorded());
        assert_eq!(session.adherence().streak, 1);

        assert_eq!(session.reset(true), ResetOutcome::Cleared);
        assert_eq!(session.state(), &SessionState::default());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut session = Session::load(MemoryStore::new());
        session.onboard(profile(), &mut StdRng::seed_from_u64(1));

        assert_eq!(session.reset(false), ResetOutcome::Declined);
        assert!(session.is_onboarded());
        assert!(session.store().get(STATE_KEY).unwrap().is_some());

        assert_eq!(session.reset(true), ResetOutcome::Cleared);
        assert!(!session.is_onboarded());
        assert_eq!(session.adherence(), &AdherenceState::default());
        assert!(session.store().get(STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_edit_day_out_of_range() {
        let mut session = Session::load(MemoryStore::new());
        session.onboard(profile(), &mut StdRng::seed_from_u64(1));

        assert!(matches!(
            session.edit_day(3, "Squat"),
            Err(LiftRsError::Validation(_))
        ));
        let day = session.edit_day(2, "Squat\n\n  Lunge ").unwrap();
        assert_eq!(day.exercises, vec!["Squat", "Lunge"]);
    }

    #[test]
    fn test_regenerate_discards_edits_and_keeps_streak() {
        let mut session = Session::load(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(5);
        session.onboard(profile(), &mut rng);
        session.mark_complete(monday()).unwrap();
        session.edit_day(0, "Custom movement").unwrap();

        session.regenerate(&mut rng).unwrap();
        let program = session.program().unwrap();
        assert_eq!(program.len(), 3);
        assert!(!program[0].exercises.contains(&"Custom movement".to_string()));
        assert_eq!(session.adherence().streak, 1);
    }

    #[test]
    fn test_onboarding_again_clears_streak() {
        let mut session = Session::load(MemoryStore::new());
        let mut rng = StdRng::seed_from_u64(5);
        session.onboard(profile(), &mut rng);
        session.mark_complete(monday()).unwrap();

        let two_by_two = Profile {
            cadence: Cadence::TwoByTwo,
            ..profile()
        };
        session.onboard(two_by_two, &mut rng);
        assert_eq!(session.program().unwrap().len(), 2);
        assert_eq!(session.adherence(), &AdherenceState::default());
    }

    #[test]
    fn test_cabinet_summary() {
        let mut session = Session::load(MemoryStore::new());
        session.onboard(profile(), &mut StdRng::seed_from_u64(1));

        let tuesday = monday().succ_opt().unwrap();
        let summary = session.cabinet(tuesday).unwrap();
        assert_eq!(summary.next_training, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert!(!summary.can_mark_today);

        assert!(session.cabinet(monday()).unwrap().can_mark_today);
        session.mark_complete(monday()).unwrap();
        let summary = session.cabinet(monday()).unwrap();
        assert!(!summary.can_mark_today);
        assert_eq!(summary.streak, 1);
        assert_eq!(summary.last_completed, Some(monday()));
    }

    #[test]
    fn test_decode_rejects_shape_mismatch() {
        assert!(Session::<MemoryStore>::decode("not json").is_err());
        assert!(Session::<MemoryStore>::decode("{\"streak\": \"many\"}").is_err());
        assert!(Session::<MemoryStore>::decode("{\"streak\": 2}").is_err());
        assert_eq!(
            Session::<MemoryStore>::decode("{}").unwrap(),
            SessionState::default()
        );
    }
}
