//! Shared error types for the services crate.

use thiserror::Error;

use draw_core::model::SpinSettingsError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `EligibilityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EligibilityError {
    #[error("could not encode eligible students: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Settings(#[from] SpinSettingsError),
    #[error("no tokio runtime available for spin timers")]
    NoRuntime,
}
