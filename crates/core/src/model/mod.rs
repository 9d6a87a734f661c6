mod course;
mod ids;
mod lesson;
mod level;
mod media;
mod question;
mod user;

pub use ids::{CourseId, LessonId, ParseIdError, QuestionId, UserId};

pub use course::{
    Course, CourseError, ForumTopic, Goal, LessonHistoryEntry, PracticeActivity, SpeakingClub,
};
pub use lesson::{
    AnswerCheck, Completion, CompletionReason, DEFAULT_TIME_BUDGET_SECS, LessonError,
    LessonResult, LessonSession, LessonState, Step, Tick,
};
pub use level::{Level, LevelError, LevelInfo};
pub use media::{MediaError, MediaRef};
pub use question::{CorrectAnswer, Question, QuestionError, QuestionKind};
pub use user::{Achievement, User, UserError, UserProgress};
