use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::assessment::{LevelAssessmentProvider, PlacementService, SimulatedAssessment};
use crate::auth_service::{AuthProvider, AuthService, SimulatedAuthProvider};
use crate::config::AppConfig;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::lessons::LessonService;
use crate::profile_service::ProfileService;

/// Assembles the app-facing services over one storage and provider set.
#[derive(Clone)]
pub struct AppServices {
    config: AppConfig,
    auth: Arc<AuthService>,
    placement: Arc<PlacementService>,
    lessons: Arc<LessonService>,
    dashboard: Arc<DashboardService>,
    profile: Arc<ProfileService>,
}

impl AppServices {
    #[must_use]
    pub fn new(
        storage: &Storage,
        config: AppConfig,
        auth: Arc<dyn AuthProvider>,
        assessment: Arc<dyn LevelAssessmentProvider>,
    ) -> Self {
        let timeout = config.provider_timeout();
        Self {
            config,
            auth: Arc::new(AuthService::new(auth, timeout)),
            placement: Arc::new(PlacementService::new(assessment, timeout)),
            lessons: Arc::new(LessonService::new(
                Arc::clone(&storage.lessons),
                Arc::clone(&storage.progress),
                config.lesson_time_budget_secs(),
                timeout,
            )),
            dashboard: Arc::new(DashboardService::new(
                Arc::clone(&storage.catalog),
                Arc::clone(&storage.progress),
                timeout,
            )),
            profile: Arc::new(ProfileService::new(
                Arc::clone(&storage.catalog),
                Arc::clone(&storage.progress),
                timeout,
            )),
        }
    }

    /// In-memory storage with the simulated sign-in and placement providers.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if `config` is invalid or the bundled content fails to load.
    pub fn simulated(config: AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        config.validate()?;
        let storage = Storage::in_memory()?;
        let auth = Arc::new(SimulatedAuthProvider::new(
            config.auth_delay(),
            config.social_auth_delay(),
            clock,
        ));
        let assessment = Arc::new(SimulatedAssessment::new(config.assessment_delay()));
        Ok(Self::new(&storage, config, auth, assessment))
    }

    #[must_use]
    pub fn config(&self) -> AppConfig {
        self.config
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
