use std::sync::Arc;

use draw_core::model::{Student, Term};
use storage::repository::{RosterRepository, StorageError};

/// Both roster lists as loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub terms: Vec<Term>,
    pub students: Vec<Student>,
}

impl Roster {
    #[must_use]
    pub fn new(terms: Vec<Term>, students: Vec<Student>) -> Self {
        Self { terms, students }
    }
}

/// Loads the roster, substituting an empty list for anything unreadable.
#[derive(Clone)]
pub struct RosterService {
    repo: Arc<dyn RosterRepository>,
}

impl RosterService {
    #[must_use]
    pub fn new(repo: Arc<dyn RosterRepository>) -> Self {
        Self { repo }
    }

    /// Load terms and students. A list that cannot be read comes back empty,
    /// which leaves the wheel unable to spin rather than failing startup.
    pub async fn load(&self) -> Roster {
        let terms = or_empty("terms", self.repo.load_terms().await);
        let students = or_empty("students", self.repo.load_students().await);
        tracing::info!(
            terms = terms.len(),
            students = students.len(),
            "roster loaded"
        );
        Roster { terms, students }
    }
}

fn or_empty<T>(list: &str, result: Result<Vec<T>, StorageError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(list, error = %err, "roster list unavailable; using an empty list");
        Vec::new()
    })
}
