use std::path::PathBuf;
use std::sync::Arc;

use draw_core::model::SpinSettings;
use storage::repository::Storage;

use crate::eligibility_service::EligibilityService;
use crate::error::AppServicesError;
use crate::roster_service::RosterService;
use crate::scheduler::{TimerScheduler, TokioScheduler};
use crate::spin::SpinController;

/// Assembles app-facing services around one spin controller.
#[derive(Clone)]
pub struct AppServices {
    controller: Arc<SpinController>,
    roster: Arc<RosterService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the roster files in
    /// `data_dir`, with timers on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or no tokio
    /// runtime is running.
    pub async fn new_sqlite(
        db_url: &str,
        data_dir: impl Into<PathBuf>,
        settings: SpinSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, data_dir).await?;
        let scheduler = TokioScheduler::try_current().ok_or(AppServicesError::NoRuntime)?;
        Ok(Self::from_storage(&storage, Arc::new(scheduler), settings).await)
    }

    /// Build services over any storage backend and timer source.
    pub async fn from_storage(
        storage: &Storage,
        scheduler: Arc<dyn TimerScheduler>,
        settings: SpinSettings,
    ) -> Self {
        let roster_service = Arc::new(RosterService::new(Arc::clone(&storage.roster)));
        let eligibility = Arc::new(EligibilityService::new(Arc::clone(&storage.values)));
        let roster = roster_service.load().await;
        let controller = SpinController::load(roster, eligibility, scheduler, settings).await;
        Self {
            controller: Arc::new(controller),
            roster: roster_service,
        }
    }

    #[must_use]
    pub fn controller(&self) -> Arc<SpinController> {
        Arc::clone(&self.controller)
    }

    /// Re-read the roster files and hand them to the controller.
    pub async fn reload_roster(&self) {
        let roster = self.roster.load().await;
        self.controller.replace_roster(roster);
    }
}
