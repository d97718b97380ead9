use std::sync::Arc;

use services::SpinController;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn spin_controller(&self) -> Arc<SpinController>;
}

#[derive(Clone)]
pub struct AppContext {
    controller: Arc<SpinController>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            controller: app.spin_controller(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> Arc<SpinController> {
        Arc::clone(&self.controller)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
