use std::sync::Arc;

use services::{AuthService, DashboardService, LessonService, PlacementService, ProfileService};

/// What the composition root must hand the UI.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn placement(&self) -> Arc<PlacementService>;
    fn lessons(&self) -> Arc<LessonService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn profile(&self) -> Arc<ProfileService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    placement: Arc<PlacementService>,
    lessons: Arc<LessonService>,
    dashboard: Arc<DashboardService>,
    profile: Arc<ProfileService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            placement: app.placement(),
            lessons: app.lessons(),
            dashboard: app.dashboard(),
            profile: app.profile(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn placement(&self) -> Arc<PlacementService> {
        Arc::clone(&self.placement)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
