#![forbid(unsafe_code)]

pub mod app_services;
pub mod eligibility_service;
pub mod error;
pub mod roster_service;
pub mod scheduler;
pub mod spin;

pub use app_services::AppServices;
pub use eligibility_service::EligibilityService;
pub use error::{AppServicesError, EligibilityError};
pub use roster_service::{Roster, RosterService};
pub use scheduler::{ManualScheduler, TimerCallback, TimerHandle, TimerScheduler, TokioScheduler};
pub use spin::{SpinController, SpinSnapshot};
