use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;
use crate::model::level::Level;
use crate::model::media::MediaRef;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("display name cannot be empty")]
    EmptyName,

    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("completed lessons ({completed}) exceed total lessons ({total})")]
    CompletedExceedsTotal { completed: u32, total: u32 },
}

/// Aggregate learning statistics for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    total_lessons: u32,
    completed_lessons: u32,
    current_streak: u32,
    total_hours: u32,
}

impl UserProgress {
    /// # Errors
    ///
    /// Returns `UserError::CompletedExceedsTotal` if more lessons are completed than exist.
    pub fn new(
        total_lessons: u32,
        completed_lessons: u32,
        current_streak: u32,
        total_hours: u32,
    ) -> Result<Self, UserError> {
        if completed_lessons > total_lessons {
            return Err(UserError::CompletedExceedsTotal {
                completed: completed_lessons,
                total: total_lessons,
            });
        }
        Ok(Self {
            total_lessons,
            completed_lessons,
            current_streak,
            total_hours,
        })
    }

    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn total_hours(&self) -> u32 {
        self.total_hours
    }

    /// Completed share of all lessons, rounded; 0 when there are no lessons.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        crate::percent(self.completed_lessons, self.total_lessons)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub earned_at: DateTime<Utc>,
}

/// A learner account as handed out by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    level: Option<Level>,
    avatar: Option<MediaRef>,
    progress: UserProgress,
    achievements: Vec<Achievement>,
    joined_at: DateTime<Utc>,
}

impl User {
    /// Creates a fresh account with no level, no avatar and zero progress.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the name or email is blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        Ok(Self {
            id,
            name,
            email,
            level: None,
            avatar: None,
            progress: UserProgress::default(),
            achievements: Vec::new(),
            joined_at,
        })
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: MediaRef) -> Self {
        self.avatar = Some(avatar);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: UserProgress) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn with_achievements(mut self, achievements: Vec<Achievement>) -> Self {
        self.achievements = achievements;
        self
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = Some(level);
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&MediaRef> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// First letter of the name, uppercased, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
