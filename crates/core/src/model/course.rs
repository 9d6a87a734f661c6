use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};
use crate::model::level::Level;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("completed lessons ({completed}) exceed lesson count ({lessons})")]
    CompletedExceedsLessons { completed: u32, lessons: u32 },
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A catalog entry shown on the dashboard for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    level: Level,
    title: String,
    description: String,
    lessons: u32,
    completed: u32,
    duration: String,
    difficulty: String,
    topics: Vec<String>,
}

impl Course {
    /// # Errors
    ///
    /// Returns `CourseError` for a blank title or more completed lessons than exist.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CourseId,
        level: Level,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: u32,
        completed: u32,
        duration: impl Into<String>,
        difficulty: impl Into<String>,
        topics: Vec<String>,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if completed > lessons {
            return Err(CourseError::CompletedExceedsLessons { completed, lessons });
        }
        Ok(Self {
            id,
            level,
            title,
            description: description.into(),
            lessons,
            completed,
            duration: duration.into(),
            difficulty: difficulty.into(),
            topics,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> u32 {
        self.lessons
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        crate::percent(self.completed, self.lessons)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.completed > 0
    }
}

//
// ─── STATIC DASHBOARD / PROFILE CONTENT ────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    /// Lesson bank behind the tile; `None` until the activity ships.
    pub lesson: Option<LessonId>,
}

impl PracticeActivity {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.lesson.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakingClub {
    pub title: String,
    pub time: String,
    pub participants: u32,
    pub min_level: Level,
    pub max_level: Level,
}

impl SpeakingClub {
    /// Level range label, e.g. `A1-A2`.
    #[must_use]
    pub fn level_range(&self) -> String {
        format!("{}-{}", self.min_level, self.max_level)
    }

    #[must_use]
    pub fn welcomes(&self, level: Level) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumTopic {
    pub title: String,
    pub author: String,
    pub replies: u32,
    pub posted: String,
}

/// One row of the profile's "recent lessons" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonHistoryEntry {
    pub title: String,
    pub category: String,
    pub progress: u32,
    pub date: NaiveDate,
}

/// A short-term personal target shown on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub title: String,
    pub current: u32,
    pub total: u32,
}

impl Goal {
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        crate::percent(self.current.min(self.total), self.total)
    }
}
