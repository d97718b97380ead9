use std::sync::Arc;

use draw_core::model::{EligibilitySet, Student, StudentId, resolve_eligibility};
use storage::repository::{ELIGIBILITY_KEY, KeyValueRepository};
use tokio::sync::Mutex;

use crate::error::EligibilityError;

/// Persists which students are present between sessions.
///
/// The set is stored as a JSON array of ids under a single key. Saves are
/// serialized, so the last save to start is the last one written.
#[derive(Clone)]
pub struct EligibilityService {
    values: Arc<dyn KeyValueRepository>,
    save_gate: Arc<Mutex<()>>,
}

impl EligibilityService {
    #[must_use]
    pub fn new(values: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            values,
            save_gate: Arc::default(),
        }
    }

    /// Load the persisted set and reconcile it with the current roster.
    ///
    /// Unreadable or malformed data is treated as "nothing saved", which
    /// makes every student eligible.
    pub async fn load(&self, students: &[Student]) -> EligibilitySet {
        let persisted = self.load_persisted().await;
        resolve_eligibility(persisted.as_deref(), students)
    }

    async fn load_persisted(&self) -> Option<Vec<StudentId>> {
        let raw = match self.values.get_value(ELIGIBILITY_KEY).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "could not read eligible students");
                return None;
            }
        };
        match serde_json::from_str::<Vec<StudentId>>(&raw) {
            Ok(ids) => Some(ids),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed eligible students");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns `EligibilityError` if the set cannot be encoded or stored.
    pub async fn save(&self, eligible: &EligibilitySet) -> Result<(), EligibilityError> {
        self.save_latest(|| eligible.clone()).await
    }

    /// Wait for earlier saves, then store whatever `current` returns.
    ///
    /// `current` runs only once this save holds the gate, so a save started
    /// after a change always writes that change or a newer one.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityError` if the set cannot be encoded or stored.
    pub async fn save_latest(
        &self,
        current: impl FnOnce() -> EligibilitySet,
    ) -> Result<(), EligibilityError> {
        let _gate = self.save_gate.lock().await;
        let raw = serde_json::to_string(&current().to_vec())?;
        self.values.put_value(ELIGIBILITY_KEY, &raw).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn students() -> Vec<Student> {
        vec![Student::new("1", "X"), Student::new("2", "Y")]
    }

    fn ids(raw: &[&str]) -> Vec<StudentId> {
        raw.iter().map(|id| StudentId::new(*id)).collect()
    }

    #[tokio::test]
    async fn nonexistent_persisted_id_falls_back_to_everyone() {
        let repo = InMemoryRepository::new();
        repo.put_value(ELIGIBILITY_KEY, r#"["9"]"#).await.unwrap();
        let service = EligibilityService::new(Arc::new(repo));

        let set = service.load(&students()).await;
        assert_eq!(set.to_vec(), ids(&["1", "2"]));
    }

    #[tokio::test]
    async fn malformed_value_falls_back_to_everyone() {
        let repo = InMemoryRepository::new();
        repo.put_value(ELIGIBILITY_KEY, "{oops").await.unwrap();
        let service = EligibilityService::new(Arc::new(repo));

        assert_eq!(service.load(&students()).await.len(), 2);
    }

    #[tokio::test]
    async fn save_then_load_keeps_subset() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = EligibilityService::new(repo.clone());

        let subset: EligibilitySet = ids(&["2"]).into_iter().collect();
        service.save(&subset).await.unwrap();

        assert_eq!(
            repo.get_value(ELIGIBILITY_KEY).await.unwrap().as_deref(),
            Some(r#"["2"]"#)
        );
        assert_eq!(service.load(&students()).await, subset);
    }
}
