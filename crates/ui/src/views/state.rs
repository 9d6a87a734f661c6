use dioxus::prelude::*;

use services::{AuthError, CatalogError, LessonServiceError, LevelSelectionError};
use storage::repository::StorageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    TimedOut,
    Unavailable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotFound => "We couldn't find that lesson.",
            ViewError::TimedOut => "This is taking too long. Please try again.",
            ViewError::Unavailable => "The service is unavailable right now. Please try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

fn from_storage(e: &StorageError) -> ViewError {
    match e {
        StorageError::NotFound => ViewError::NotFound,
        _ => ViewError::Unavailable,
    }
}

impl From<AuthError> for ViewError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Timeout(_) => ViewError::TimedOut,
            AuthError::Provider(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<LevelSelectionError> for ViewError {
    fn from(e: LevelSelectionError) -> Self {
        match e {
            LevelSelectionError::Timeout(_) => ViewError::TimedOut,
            LevelSelectionError::Provider(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<LessonServiceError> for ViewError {
    fn from(e: LessonServiceError) -> Self {
        match e {
            LessonServiceError::Timeout(_) => ViewError::TimedOut,
            LessonServiceError::Content(ref s) | LessonServiceError::Progress(ref s) => {
                from_storage(s)
            }
            _ => ViewError::Unknown,
        }
    }
}

impl From<CatalogError> for ViewError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Timeout(_) => ViewError::TimedOut,
            CatalogError::Storage(ref s) => from_storage(s),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
