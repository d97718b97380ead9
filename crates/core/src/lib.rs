#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod wheel;

pub use error::Error;
pub use model::{
    Draw, EligibilitySet, SpinPhase, SpinSettings, SpinSettingsError, Student, StudentId, Term,
    resolve_eligibility,
};
