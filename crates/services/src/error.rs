//! Shared error types for the services crate.

use thiserror::Error;

use flow_core::model::{LessonError, UserError};
use flow_core::validation::ValidationErrors;
use storage::repository::StorageError;

/// Failure reported by an external provider (sign-in, placement test).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error(transparent)]
    InvalidUser(#[from] UserError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("sign-in timed out after {0} ms")]
    Timeout(u64),
}

/// Errors emitted by `LevelSelectionFlow` and `PlacementService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelSelectionError {
    #[error("no level selected")]
    NothingSelected,

    #[error("level selection is not in the {expected} step")]
    WrongStep { expected: &'static str },

    #[error("level selection is already closed")]
    Closed,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("placement test timed out after {0} ms")]
    Timeout(u64),
}

/// Errors emitted by `LessonService` and `LessonRunner`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson content unavailable: {0}")]
    Content(StorageError),

    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error("could not record progress: {0}")]
    Progress(StorageError),

    #[error("loading the lesson timed out after {0} ms")]
    Timeout(u64),

    #[error("lesson state is unavailable")]
    StateUnavailable,
}

/// Errors emitted by `DashboardService` and `ProfileService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("loading the catalog timed out after {0} ms")]
    Timeout(u64),
}

/// Errors emitted while reading `AppConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} expects a whole number, got {raw:?}")]
    InvalidNumber { key: String, raw: String },

    #[error("lesson time budget must be > 0")]
    ZeroLessonBudget,

    #[error("provider timeout must be > 0")]
    ZeroTimeout,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
