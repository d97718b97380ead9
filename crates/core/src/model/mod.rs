mod draw;
mod eligibility;
mod ids;
mod roster;
mod settings;

pub use ids::StudentId;

pub use draw::{Draw, SpinPhase};
pub use eligibility::{EligibilitySet, resolve_eligibility};
pub use roster::{Student, Term};
pub use settings::{SpinSettings, SpinSettingsError};
