use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use flow_core::model::{
    Course, ForumTopic, LessonId, LessonResult, Level, PracticeActivity, SpeakingClub, User,
};
use storage::repository::{CourseCatalog, ProgressStore};

use crate::deadline::within;
use crate::error::CatalogError;

/// Level used when the learner has none, and when their level has no courses.
pub const FALLBACK_LEVEL: Level = Level::A1;

/// Headline numbers above the course list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOverview {
    pub lessons_completed: u32,
    pub streak_days: u32,
    pub hours: u32,
    /// Share of correct answers over recorded lessons; `None` before the first one.
    pub accuracy_percent: Option<u32>,
}

/// Lessons from the learner's imported progress plus those recorded in this app.
#[must_use]
pub fn lessons_completed(user: &User, results: &[LessonResult]) -> u32 {
    let recorded = u32::try_from(results.len()).unwrap_or(u32::MAX);
    user.progress().completed_lessons().saturating_add(recorded)
}

impl ProgressOverview {
    #[must_use]
    pub fn from_results(user: &User, results: &[LessonResult]) -> Self {
        let (correct, asked) = results.iter().fold((0u32, 0u32), |(c, a), r| {
            (c.saturating_add(r.score), a.saturating_add(r.total))
        });
        Self {
            lessons_completed: lessons_completed(user, results),
            streak_days: user.progress().current_streak(),
            hours: user.progress().total_hours(),
            accuracy_percent: (asked > 0).then(|| flow_core::percent(correct, asked)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// The learner's own level (or the fallback when unset).
    pub level: Level,
    /// The level the listed courses belong to.
    pub courses_level: Level,
    pub courses: Vec<Course>,
    pub activities: Vec<PracticeActivity>,
    pub clubs: Vec<SpeakingClub>,
    pub topics: Vec<ForumTopic>,
    pub overview: ProgressOverview,
}

impl Dashboard {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.courses_level != self.level
    }

    /// Lesson opened by the "quick lesson" shortcut: the first unfinished
    /// course, else the first course.
    #[must_use]
    pub fn quick_lesson(&self) -> Option<LessonId> {
        self.courses
            .iter()
            .find(|c| c.completed() < c.lessons())
            .or_else(|| self.courses.first())
            .map(|c| c.id().lesson_id())
    }

    /// Speaking clubs that welcome the learner's level.
    pub fn clubs_for_level(&self) -> impl Iterator<Item = &SpeakingClub> + '_ {
        self.clubs.iter().filter(|c| c.welcomes(self.level))
    }
}

/// Assembles the dashboard from the catalog and recorded progress.
#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<dyn CourseCatalog>,
    progress: Arc<dyn ProgressStore>,
    timeout: Duration,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CourseCatalog>,
        progress: Arc<dyn ProgressStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            progress,
            timeout,
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog or progress store fails or is too slow.
    pub async fn load(&self, user: &User) -> Result<Dashboard, CatalogError> {
        within(self.timeout, self.assemble(user))
            .await
            .map_err(CatalogError::Timeout)?
    }

    async fn assemble(&self, user: &User) -> Result<Dashboard, CatalogError> {
        let level = user.level().unwrap_or(FALLBACK_LEVEL);
        let mut courses_level = level;
        let mut courses = self.catalog.courses_for_level(level).await?;
        if courses.is_empty() && level != FALLBACK_LEVEL {
            debug!(%level, fallback = %FALLBACK_LEVEL, "no courses for level");
            courses_level = FALLBACK_LEVEL;
            courses = self.catalog.courses_for_level(FALLBACK_LEVEL).await?;
        }
        let results = self.progress.results_for(user.id()).await?;

        Ok(Dashboard {
            level,
            courses_level,
            courses,
            activities: self.catalog.practice_activities().await?,
            clubs: self.catalog.speaking_clubs().await?,
            topics: self.catalog.forum_topics().await?,
            overview: ProgressOverview::from_results(user, &results),
        })
    }
}
