use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Training emphasis chosen at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrainingType {
    /// Bodybuilding-style volume work
    Hypertrophy,
    /// Low-rep heavy work
    Strength,
}

impl FromStr for TrainingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hypertrophy" | "bodybuilding" => Ok(Self::Hypertrophy),
            "strength" | "powerlifting" => Ok(Self::Strength),
            _ => Err(format!("Unknown training type: {}", s)),
        }
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceLevel {
    /// Less than one year
    Under1y,
    /// One to three years
    Y1to3,
    /// More than three years
    Over3y,
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "under1y" | "<1" | "beginner" => Ok(Self::Under1y),
            "y1to3" | "1-3" | "intermediate" => Ok(Self::Y1to3),
            "over3y" | ">3" | "advanced" => Ok(Self::Over3y),
            _ => Err(format!("Unknown experience level: {}", s)),
        }
    }
}

/// Weekly training-day pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cadence {
    /// Monday, Wednesday, Friday
    ThreeDay,
    /// Two on, two off over a Monday-anchored four day cycle
    TwoByTwo,
}

impl Cadence {
    /// Number of day plans in one generated week
    pub fn week_length(&self) -> usize {
        match self {
            Cadence::ThreeDay => 3,
            Cadence::TwoByTwo => 2,
        }
    }
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threeday" | "3day" | "three-day" => Ok(Self::ThreeDay),
            "twobytwo" | "2x2" | "two-by-two" => Ok(Self::TwoByTwo),
            _ => Err(format!("Unknown cadence: {}", s)),
        }
    }
}

/// Muscle-group tags used by the week structures and the exercise catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Abs,
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Abs => "abs",
        };
        f.write_str(name)
    }
}

/// Optional emphasis added to every day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusGroup {
    Back,
    Legs,
    Arms,
    Chest,
    Shoulders,
    ChestBack,
    ArmsShoulders,
}

impl FocusGroup {
    /// Muscle groups this focus contributes, in insertion order
    pub fn muscle_groups(&self) -> &'static [MuscleGroup] {
        match self {
            FocusGroup::Back => &[MuscleGroup::Back],
            FocusGroup::Legs => &[MuscleGroup::Legs],
            FocusGroup::Arms => &[MuscleGroup::Arms],
            FocusGroup::Chest => &[MuscleGroup::Chest],
            FocusGroup::Shoulders => &[MuscleGroup::Shoulders],
            FocusGroup::ChestBack => &[MuscleGroup::Chest, MuscleGroup::Back],
            FocusGroup::ArmsShoulders => &[MuscleGroup::Arms, MuscleGroup::Shoulders],
        }
    }
}

impl FromStr for FocusGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "back" => Ok(Self::Back),
            "legs" => Ok(Self::Legs),
            "arms" => Ok(Self::Arms),
            "chest" => Ok(Self::Chest),
            "shoulders" => Ok(Self::Shoulders),
            "chest+back" | "chestback" => Ok(Self::ChestBack),
            "arms+shoulders" | "armsshoulders" => Ok(Self::ArmsShoulders),
            _ => Err(format!("Unknown focus group: {}", s)),
        }
    }
}

/// Validated onboarding result. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub training_type: TrainingType,
    pub experience_level: ExperienceLevel,
    pub cadence: Cadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_group: Option<FocusGroup>,
}

/// Inclusive integer range rendered as `a–b`, or `a` when both ends agree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u8,
    pub max: u8,
}

impl CountRange {
    pub const fn exact(n: u8) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}–{}", self.min, self.max)
        }
    }
}

/// Set and rep targets for every exercise of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPolicy {
    pub set_count: CountRange,
    pub rep_range: CountRange,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.set_count, self.rep_range)
    }
}

/// One training day of a generated week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub label: String,
    /// First entry is the display focus of the day
    pub primary_groups: Vec<MuscleGroup>,
    pub exercises: Vec<String>,
    /// Snapshot taken at generation time
    pub load_policy: LoadPolicy,
}

impl DayPlan {
    pub fn focus(&self) -> Option<MuscleGroup> {
        self.primary_groups.first().copied()
    }

    /// Replace the exercise list from free text, one exercise per line.
    ///
    /// Lines are trimmed and blank lines dropped.
    pub fn replace_exercises(&mut self, text: &str) {
        self.exercises = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }
}

/// Ordered week of day plans, one per cadence slot
pub type Program = Vec<DayPlan>;

/// Streak bookkeeping. `streak == 0` exactly when `last_completed` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceState {
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
}

impl AdherenceState {
    pub fn is_consistent(&self) -> bool {
        (self.streak == 0) == self.last_completed.is_none()
    }
}

/// Everything the app persists, stored as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub program: Option<Program>,
    #[serde(flatten)]
    pub adherence: AdherenceState,
}

impl SessionState {
    pub fn is_onboarded(&self) -> bool {
        self.profile.is_some() && self.program.is_some()
    }

    /// Check the cross-field invariants of a decoded document
    pub fn validate(&self) -> Result<(), String> {
        if !self.adherence.is_consistent() {
            return Err(format!(
                "streak {} does not match last completed date {:?}",
                self.adherence.streak, self.adherence.last_completed
            ));
        }

        match (&self.profile, &self.program) {
            (Some(profile), Some(program)) => {
                let expected = profile.cadence.week_length();
                if program.len() != expected {
                    return Err(format!(
                        "program has {} days, cadence {:?} needs {}",
                        program.len(),
                        profile.cadence,
                        expected
                    ));
                }
                Ok(())
            }
            (None, None) => {
                if self.adherence.streak != 0 {
                    return Err("streak recorded without a profile".to_string());
                }
                Ok(())
            }
            _ => Err("profile and program must be set together".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day() -> DayPlan {
        DayPlan {
            label: "Day 1".to_string(),
            primary_groups: vec![MuscleGroup::Chest, MuscleGroup::Arms],
            exercises: vec!["Bench press".to_string()],
            load_policy: LoadPolicy {
                set_count: CountRange::exact(3),
                rep_range: CountRange::between(10, 12),
            },
        }
    }

    #[test]
    fn test_replace_exercises_trims_and_drops_blank_lines() {
        let mut day = sample_day();
        day.replace_exercises("  Squat \n\n Deadlift\n   \nLunge");
        assert_eq!(day.exercises, vec!["Squat", "Deadlift", "Lunge"]);
    }

    #[test]
    fn test_replace_exercises_handles_crlf() {
        let mut day = sample_day();
        day.replace_exercises("Squat\r\nDeadlift\r\n");
        assert_eq!(day.exercises, vec!["Squat", "Deadlift"]);
    }

    #[test]
    fn test_count_range_display() {
        assert_eq!(CountRange::exact(4).to_string(), "4");
        assert_eq!(CountRange::between(3, 4).to_string(), "3–4");
        assert_eq!(sample_day().load_policy.to_string(), "3 x 10–12");
    }

    #[test]
    fn test_session_state_json_shape() {
        let state = SessionState {
            profile: Some(Profile {
                training_type: TrainingType::Strength,
                experience_level: ExperienceLevel::Y1to3,
                cadence: Cadence::TwoByTwo,
                focus_group: None,
            }),
            program: Some(vec![sample_day(), sample_day()]),
            adherence: AdherenceState {
                last_completed: NaiveDate::from_ymd_opt(2024, 1, 1),
                streak: 2,
            },
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["lastCompleted"], "2024-01-01");
        assert_eq!(json["streak"], 2);
        assert_eq!(json["profile"]["cadence"], "twoByTwo");
        assert_eq!(json["profile"]["experienceLevel"], "y1to3");
        assert_eq!(json["program"][0]["primaryGroups"][0], "chest");
    }

    #[test]
    fn test_validate_rejects_inconsistent_streak() {
        let state = SessionState {
            adherence: AdherenceState { last_completed: None, streak: 3 },
            ..Default::default()
        };
        assert!(state.validate().is_err());
        assert!(SessionState::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_program_length() {
        let state = SessionState {
            profile: Some(Profile {
                training_type: TrainingType::Hypertrophy,
                experience_level: ExperienceLevel::Under1y,
                cadence: Cadence::ThreeDay,
                focus_group: None,
            }),
            program: Some(vec![sample_day()]),
            adherence: AdherenceState::default(),
        };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_profile_field_parsing() {
        assert_eq!("2x2".parse::<Cadence>().unwrap(), Cadence::TwoByTwo);
        assert_eq!("threeDay".parse::<Cadence>().unwrap(), Cadence::ThreeDay);
        assert_eq!("1-3".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Y1to3);
        assert_eq!("Strength".parse::<TrainingType>().unwrap(), TrainingType::Strength);
        assert_eq!("chest+back".parse::<FocusGroup>().unwrap(), FocusGroup::ChestBack);
        assert!("daily".parse::<Cadence>().is_err());
    }

    #[test]
    fn test_focus_combinations_expand() {
        assert_eq!(
            FocusGroup::ChestBack.muscle_groups(),
            &[MuscleGroup::Chest, MuscleGroup::Back]
        );
        assert_eq!(FocusGroup::Legs.muscle_groups(), &[MuscleGroup::Legs]);
    }
}
