mod runner;
mod service;

pub use runner::{LessonRunner, LessonSnapshot};
pub use service::LessonService;
