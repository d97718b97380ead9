use async_trait::async_trait;
use draw_core::model::{Student, Term};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the enabled student ids are stored.
pub const ELIGIBILITY_KEY: &str = "tirage-roue-double:students:enabled";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

/// String key/value store used for small pieces of UI state.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Source of the two roster lists.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the list is missing, or
    /// `StorageError::Serialization` if it cannot be decoded.
    async fn load_terms(&self) -> Result<Vec<Term>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the list is missing, or
    /// `StorageError::Serialization` if it cannot be decoded.
    async fn load_students(&self) -> Result<Vec<Student>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
    terms: Arc<Mutex<Option<Vec<Term>>>>,
    students: Arc<Mutex<Option<Vec<Student>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository preloaded with both roster lists.
    #[must_use]
    pub fn with_roster(terms: Vec<Term>, students: Vec<Student>) -> Self {
        Self {
            values: Arc::default(),
            terms: Arc::new(Mutex::new(Some(terms))),
            students: Arc::new(Mutex::new(Some(students))),
        }
    }

    /// Replace the student list, e.g. to simulate an edited roster file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_students(&self, students: Vec<Student>) -> Result<(), StorageError> {
        let mut guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(students);
        Ok(())
    }
}

#[async_trait]
impl KeyValueRepository for InMemoryRepository {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for InMemoryRepository {
    async fn load_terms(&self) -> Result<Vec<Term>, StorageError> {
        let guard = self
            .terms
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    async fn load_students(&self) -> Result<Vec<Student>, StorageError> {
        let guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub values: Arc<dyn KeyValueRepository>,
    pub roster: Arc<dyn RosterRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let values: Arc<dyn KeyValueRepository> = Arc::new(repo.clone());
        let roster: Arc<dyn RosterRepository> = Arc::new(repo);
        Self { values, roster }
    }
}
