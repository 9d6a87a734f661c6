mod auth_vm;
mod course_vm;
mod lesson_vm;
mod time_fmt;

pub use auth_vm::AuthFormVm;
pub use course_vm::{CourseCardVm, map_course_cards};
pub use lesson_vm::{AnswerInputVm, AnswerOptionVm, CompletionVm, FeedbackVm, LessonVm, QuestionVm};
pub use time_fmt::{format_countdown, format_day, format_member_since};
