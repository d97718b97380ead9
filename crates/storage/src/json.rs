//! Roster lists read from JSON files in a data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use draw_core::model::{Student, Term};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{RosterRepository, StorageError};

pub const TERMS_FILE: &str = "terms.json";
pub const STUDENTS_FILE: &str = "students.json";

/// Reads `terms.json` and `students.json` from `data_dir` on every load.
#[derive(Debug, Clone)]
pub struct JsonRosterRepository {
    data_dir: PathBuf,
}

impl JsonRosterRepository {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn terms_path(&self) -> PathBuf {
        self.data_dir.join(TERMS_FILE)
    }

    #[must_use]
    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(STUDENTS_FILE)
    }

    /// Write `terms.json` unless it already exists. Returns whether it was written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory or file cannot be written.
    pub async fn write_terms_if_absent(&self, terms: &[Term]) -> Result<bool, StorageError> {
        write_list_if_absent(&self.terms_path(), terms).await
    }

    /// Write `students.json` unless it already exists. Returns whether it was written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory or file cannot be written.
    pub async fn write_students_if_absent(
        &self,
        students: &[Student],
    ) -> Result<bool, StorageError> {
        write_list_if_absent(&self.students_path(), students).await
    }
}

async fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    tracing::debug!(path = %path.display(), "reading roster file");
    let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            StorageError::NotFound
        } else {
            StorageError::Io(format!("{}: {err}", path.display()))
        }
    })?;
    serde_json::from_str(&raw)
        .map_err(|err| StorageError::Serialization(format!("{}: {err}", path.display())))
}

async fn write_list_if_absent<T: Serialize>(
    path: &Path,
    items: &[T],
) -> Result<bool, StorageError> {
    let io_err = |err: std::io::Error| StorageError::Io(format!("{}: {err}", path.display()));
    if tokio::fs::try_exists(path).await.map_err(io_err)? {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(items)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    tokio::fs::write(path, body).await.map_err(io_err)?;
    tracing::info!(path = %path.display(), count = items.len(), "wrote roster file");
    Ok(true)
}

#[async_trait]
impl RosterRepository for JsonRosterRepository {
    async fn load_terms(&self) -> Result<Vec<Term>, StorageError> {
        read_list(&self.terms_path()).await
    }

    async fn load_students(&self) -> Result<Vec<Student>, StorageError> {
        read_list(&self.students_path()).await
    }
}
