use thiserror::Error;

use crate::model::SpinSettingsError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SpinSettings(#[from] SpinSettingsError),
}
