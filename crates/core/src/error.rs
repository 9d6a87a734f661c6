use thiserror::Error;

use crate::model::{CourseError, LessonError, LevelError, MediaError, QuestionError, UserError};
use crate::validation::ValidationErrors;

/// Umbrella error for callers that do not care which domain rule failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}
