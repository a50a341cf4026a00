//! Static exercise catalog.
//!
//! Reference data only: each muscle group lists compound ("base") and
//! single-joint ("isolation") movements. Groups without an entry simply
//! contribute nothing to a generated day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::MuscleGroup;

/// Movements available for one muscle group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCatalog {
    pub base: Vec<String>,
    pub isolation: Vec<String>,
}

impl GroupCatalog {
    fn new(base: &[&str], isolation: &[&str]) -> Self {
        Self {
            base: base.iter().map(|s| s.to_string()).collect(),
            isolation: isolation.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Muscle group to movement lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    groups: BTreeMap<MuscleGroup, GroupCatalog>,
}

impl ExerciseCatalog {
    pub fn builtin() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(
            MuscleGroup::Chest,
            GroupCatalog::new(
                &["Barbell bench press", "Dumbbell bench press"],
                &["Dumbbell fly", "Cable crossover"],
            ),
        );
        groups.insert(
            MuscleGroup::Back,
            GroupCatalog::new(
                &["Bent-over barbell row", "Pull-up"],
                &["Lat pulldown", "Pullover"],
            ),
        );
        groups.insert(
            MuscleGroup::Legs,
            GroupCatalog::new(&["Squat", "Leg press"], &["Leg extension", "Leg curl"]),
        );
        groups.insert(
            MuscleGroup::Shoulders,
            GroupCatalog::new(&["Standing overhead press"], &["Dumbbell lateral raise"]),
        );
        groups.insert(
            MuscleGroup::Arms,
            GroupCatalog::new(
                &["Barbell curl", "Skull crusher"],
                &["Dumbbell curl", "Cable pushdown"],
            ),
        );
        groups.insert(
            MuscleGroup::Abs,
            GroupCatalog::new(&["Hanging leg raise"], &["Crunch"]),
        );

        Self { groups }
    }

    /// Catalog with no groups at all
    pub fn empty() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: MuscleGroup, entry: GroupCatalog) -> Self {
        self.groups.insert(group, entry);
        self
    }

    pub fn get(&self, group: MuscleGroup) -> Option<&GroupCatalog> {
        self.groups.get(&group)
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_group() {
        let catalog = ExerciseCatalog::builtin();
        for group in [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
            MuscleGroup::Abs,
        ] {
            let entry = catalog.get(group).unwrap();
            assert!(!entry.base.is_empty(), "{group} has no base movements");
            assert!(!entry.isolation.is_empty(), "{group} has no isolation movements");
        }
    }

    #[test]
    fn test_small_groups() {
        let catalog = ExerciseCatalog::builtin();
        assert_eq!(catalog.get(MuscleGroup::Shoulders).unwrap().base.len(), 1);
        assert_eq!(catalog.get(MuscleGroup::Abs).unwrap().isolation.len(), 1);
    }

    #[test]
    fn test_empty_catalog_has_no_entries() {
        assert!(ExerciseCatalog::empty().get(MuscleGroup::Chest).is_none());
    }
}
