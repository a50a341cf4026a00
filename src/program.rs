use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::ExerciseCatalog;
use crate::models::{
    Cadence, CountRange, DayPlan, ExperienceLevel, LoadPolicy, MuscleGroup, Profile, Program,
    TrainingType,
};

/// Day label and primary groups for one slot of the week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTemplate {
    pub label: &'static str,
    pub groups: &'static [MuscleGroup],
}

const THREE_DAY_WEEK: [DayTemplate; 3] = [
    DayTemplate {
        label: "Day 1",
        groups: &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
    },
    DayTemplate {
        label: "Day 2",
        groups: &[MuscleGroup::Back, MuscleGroup::Arms],
    },
    DayTemplate {
        label: "Day 3",
        groups: &[MuscleGroup::Legs, MuscleGroup::Abs],
    },
];

const TWO_BY_TWO_WEEK: [DayTemplate; 2] = [
    DayTemplate {
        label: "Day A (Upper body)",
        groups: &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
        ],
    },
    DayTemplate {
        label: "Day B (Lower body)",
        groups: &[MuscleGroup::Legs, MuscleGroup::Abs],
    },
];

/// Builds a week of day plans from a profile.
///
/// Structure and load targets are fixed tables; only the choice of movements
/// within each muscle group is random, drawn from the caller's RNG.
#[derive(Debug, Clone, Default)]
pub struct ProgramGenerator {
    catalog: ExerciseCatalog,
}

impl ProgramGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ExerciseCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Generate a fresh program for `profile`
    pub fn generate<R: Rng + ?Sized>(&self, profile: &Profile, rng: &mut R) -> Program {
        let load_policy = Self::load_policy(profile.training_type, profile.experience_level);
        let per_group = Self::exercise_count(profile.experience_level);
        let base_ratio = Self::base_ratio(profile.experience_level);

        let program: Program = Self::week_structure(profile.cadence)
            .iter()
            .map(|template| {
                let mut groups = template.groups.to_vec();
                if let Some(focus) = profile.focus_group {
                    for group in focus.muscle_groups() {
                        if !groups.contains(group) {
                            groups.push(*group);
                        }
                    }
                }

                let exercises = groups
                    .iter()
                    .flat_map(|group| self.pick_exercises(*group, per_group, base_ratio, rng))
                    .collect();

                DayPlan {
                    label: template.label.to_string(),
                    primary_groups: groups,
                    exercises,
                    load_policy,
                }
            })
            .collect();

        debug!(
            cadence = ?profile.cadence,
            days = program.len(),
            exercises = program.iter().map(|d| d.exercises.len()).sum::<usize>(),
            "Program generated"
        );

        program
    }

    /// Fixed week layout for a cadence
    pub fn week_structure(cadence: Cadence) -> &'static [DayTemplate] {
        match cadence {
            Cadence::ThreeDay => &THREE_DAY_WEEK,
            Cadence::TwoByTwo => &TWO_BY_TWO_WEEK,
        }
    }

    /// Movements per muscle group
    pub fn exercise_count(experience: ExperienceLevel) -> usize {
        match experience {
            ExperienceLevel::Under1y => 2,
            ExperienceLevel::Y1to3 => 3,
            ExperienceLevel::Over3y => 4,
        }
    }

    /// Share of compound movements per group
    pub fn base_ratio(experience: ExperienceLevel) -> f64 {
        match experience {
            ExperienceLevel::Under1y => 0.7,
            _ => 0.5,
        }
    }

    /// (base, isolation) split of `count` movements
    pub fn split_counts(count: usize, base_ratio: f64) -> (usize, usize) {
        let base = ((count as f64) * base_ratio).round() as usize;
        let base = base.min(count);
        (base, count - base)
    }

    pub fn load_policy(training_type: TrainingType, experience: ExperienceLevel) -> LoadPolicy {
        let (set_count, rep_range) = match (training_type, experience) {
            (TrainingType::Strength, ExperienceLevel::Under1y) => {
                (CountRange::exact(3), CountRange::between(5, 8))
            }
            (TrainingType::Strength, ExperienceLevel::Y1to3) => {
                (CountRange::exact(4), CountRange::between(3, 6))
            }
            (TrainingType::Strength, ExperienceLevel::Over3y) => {
                (CountRange::exact(5), CountRange::between(1, 5))
            }
            (TrainingType::Hypertrophy, ExperienceLevel::Under1y) => {
                (CountRange::exact(3), CountRange::between(10, 12))
            }
            (TrainingType::Hypertrophy, ExperienceLevel::Y1to3) => {
                (CountRange::between(3, 4), CountRange::between(8, 12))
            }
            (TrainingType::Hypertrophy, ExperienceLevel::Over3y) => {
                (CountRange::exact(4), CountRange::between(6, 12))
            }
        };

        LoadPolicy {
            set_count,
            rep_range,
        }
    }

    /// Base movements first, then isolation. Short catalogs yield what they have.
    fn pick_exercises<R: Rng + ?Sized>(
        &self,
        group: MuscleGroup,
        count: usize,
        base_ratio: f64,
        rng: &mut R,
    ) -> Vec<String> {
        let Some(entry) = self.catalog.get(group) else {
            debug!(%group, "No catalog entry, skipping group");
            return Vec::new();
        };

        let (base_count, iso_count) = Self::split_counts(count, base_ratio);

        entry
            .base
            .choose_multiple(rng, base_count)
            .chain(entry.isolation.choose_multiple(rng, iso_count))
            .cloned()
            .collect()
    }
}
