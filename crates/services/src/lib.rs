#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment;
pub mod auth_service;
pub mod config;
mod deadline;
pub mod dashboard_service;
pub mod error;
pub mod lessons;
pub mod level_selection;
pub mod profile_service;

pub use flow_core::Clock;

pub use app_services::AppServices;
pub use assessment::{LevelAssessmentProvider, PlacementService, SimulatedAssessment};
pub use auth_service::{AuthProvider, AuthService, IdSource, SimulatedAuthProvider, SocialProvider};
pub use config::AppConfig;
pub use dashboard_service::{Dashboard, DashboardService, ProgressOverview};
pub use error::{
    AppServicesError, AuthError, CatalogError, ConfigError, LessonServiceError,
    LevelSelectionError, ProviderError,
};
pub use lessons::{LessonRunner, LessonService, LessonSnapshot};
pub use level_selection::{LevelOutcome, LevelSelectionFlow, LevelSelectionMode};
pub use profile_service::{Profile, ProfileService};
