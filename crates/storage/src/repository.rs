use async_trait::async_trait;
use flow_core::model::{
    Achievement, Course, ForumTopic, Goal, LessonHistoryEntry, LessonId, LessonResult, Level,
    PracticeActivity, Question, SpeakingClub, UserId,
};
use std::sync::Arc;
use thiserror::Error;

use crate::memory::{InMemoryCatalog, InMemoryProgressStore};

/// Errors surfaced by content and progress adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid content: {0}")]
    InvalidContent(String),
}

/// Source of question sets for lessons.
#[async_trait]
pub trait LessonContentProvider: Send + Sync {
    /// Load the ordered questions of a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the lesson does not exist, or other storage errors.
    async fn load_questions(&self, lesson_id: &LessonId) -> Result<Vec<Question>, StorageError>;
}

/// Read-only catalog behind the dashboard and profile screens.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Courses for exactly `level`; empty if the catalog has none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn courses_for_level(&self, level: Level) -> Result<Vec<Course>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn practice_activities(&self) -> Result<Vec<PracticeActivity>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn speaking_clubs(&self) -> Result<Vec<SpeakingClub>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn forum_topics(&self) -> Result<Vec<ForumTopic>, StorageError>;

    /// Achievements shown to users who have not earned any yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn default_achievements(&self) -> Result<Vec<Achievement>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn recent_lessons(&self) -> Result<Vec<LessonHistoryEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn current_goals(&self) -> Result<Vec<Goal>, StorageError>;
}

/// Sink for finished lesson attempts.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Record the outcome of a completed lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn record_lesson_result(
        &self,
        user_id: UserId,
        result: &LessonResult,
    ) -> Result<(), StorageError>;

    /// Results recorded for `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if results cannot be read.
    async fn results_for(&self, user_id: UserId) -> Result<Vec<LessonResult>, StorageError>;
}

/// Aggregates the adapters behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonContentProvider>,
    pub catalog: Arc<dyn CourseCatalog>,
    pub progress: Arc<dyn ProgressStore>,
}

impl Storage {
    /// In-memory storage seeded with the bundled catalog and lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidContent` if the bundled content fails validation.
    pub fn in_memory() -> Result<Self, StorageError> {
        let catalog = InMemoryCatalog::seeded()?;
        let lessons: Arc<dyn LessonContentProvider> = Arc::new(catalog.clone());
        let catalog: Arc<dyn CourseCatalog> = Arc::new(catalog);
        let progress: Arc<dyn ProgressStore> = Arc::new(InMemoryProgressStore::new());
        Ok(Self {
            lessons,
            catalog,
            progress,
        })
    }
}
