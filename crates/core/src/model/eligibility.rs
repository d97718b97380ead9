use std::collections::BTreeSet;

use crate::model::ids::StudentId;
use crate::model::roster::Student;

/// Ids of the students currently marked present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilitySet {
    ids: BTreeSet<StudentId>,
}

impl EligibilitySet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every student on the roster.
    #[must_use]
    pub fn all(students: &[Student]) -> Self {
        students.iter().map(|s| s.id.clone()).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &StudentId) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership and returns whether the id is now present.
    pub fn toggle(&mut self, id: &StudentId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn insert(&mut self, id: StudentId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: &StudentId) -> bool {
        self.ids.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<StudentId> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<StudentId> for EligibilitySet {
    fn from_iter<I: IntoIterator<Item = StudentId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Resolve which students are present given what was persisted last time.
///
/// Ids that are no longer on the roster are dropped. When nothing was
/// persisted, or nothing survives the pruning, every current student becomes
/// eligible.
#[must_use]
pub fn resolve_eligibility(
    persisted: Option<&[StudentId]>,
    students: &[Student],
) -> EligibilitySet {
    let Some(persisted) = persisted.filter(|ids| !ids.is_empty()) else {
        return EligibilitySet::all(students);
    };

    let kept: EligibilitySet = students
        .iter()
        .filter(|student| persisted.contains(&student.id))
        .map(|student| student.id.clone())
        .collect();

    if kept.is_empty() {
        EligibilitySet::all(students)
    } else {
        kept
    }
}
