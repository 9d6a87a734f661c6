use std::sync::Arc;
use std::time::Duration;

use flow_core::model::{Achievement, Goal, LessonHistoryEntry, LessonResult, User};
use storage::repository::{CourseCatalog, ProgressStore};

use crate::dashboard_service::lessons_completed;
use crate::deadline::within;
use crate::error::CatalogError;

/// Lesson target shown while the learner has no lesson count yet.
pub const DEFAULT_LESSON_TARGET: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub achievements: Vec<Achievement>,
    /// True when `achievements` are the catalog defaults, not the learner's own.
    pub default_achievements: bool,
    pub recent_lessons: Vec<LessonHistoryEntry>,
    pub goals: Vec<Goal>,
    pub results: Vec<LessonResult>,
}

impl Profile {
    /// Same count the dashboard shows.
    #[must_use]
    pub fn lessons_completed(&self) -> u32 {
        lessons_completed(&self.user, &self.results)
    }

    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        let target = self.lessons_target();
        flow_core::percent(self.lessons_completed().min(target), target)
    }

    #[must_use]
    pub fn lessons_target(&self) -> u32 {
        match self.user.progress().total_lessons() {
            0 => DEFAULT_LESSON_TARGET,
            n => n,
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    catalog: Arc<dyn CourseCatalog>,
    progress: Arc<dyn ProgressStore>,
    timeout: Duration,
}

impl ProfileService {
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
    pub async fn load(&self, user: &User) -> Result<Profile, CatalogError> {
        within(self.timeout, self.assemble(user))
            .await
            .map_err(CatalogError::Timeout)?
    }

    async fn assemble(&self, user: &User) -> Result<Profile, CatalogError> {
        let (achievements, default_achievements) = if user.achievements().is_empty() {
            (self.catalog.default_achievements().await?, true)
        } else {
            (user.achievements().to_vec(), false)
        };
        Ok(Profile {
            user: user.clone(),
            achievements,
            default_achievements,
            recent_lessons: self.catalog.recent_lessons().await?,
            goals: self.catalog.current_goals().await?,
            results: self.progress.results_for(user.id()).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::model::{UserId, UserProgress};
    use flow_core::time::fixed_now;
    use storage::Storage;

    fn service(storage: &Storage) -> ProfileService {
        ProfileService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
            Duration::from_secs(10),
        )
    }

    fn fresh_user() -> User {
        User::new(UserId::random(), "Anna", "anna@example.com", fixed_now()).unwrap()
    }

    #[tokio::test]
    async fn new_user_sees_default_achievements_and_target() {
        let storage = Storage::in_memory().unwrap();
        let profile = service(&storage).load(&fresh_user()).await.unwrap();
        assert!(profile.default_achievements);
        assert_eq!(profile.achievements.len(), 3);
        assert_eq!(profile.completion_percent(), 0);
        assert_eq!(profile.lessons_target(), 100);
        assert_eq!(profile.recent_lessons.len(), 4);
        assert_eq!(profile.goals.len(), 3);
    }

    #[tokio::test]
    async fn own_achievements_and_progress_win() {
        let storage = Storage::in_memory().unwrap();
        let own = Achievement {
            id: "own".into(),
            title: "Night owl".into(),
            description: "Studied after midnight".into(),
            icon: "Moon".into(),
            earned_at: fixed_now(),
        };
        let user = fresh_user()
            .with_progress(UserProgress::new(40, 10, 3, 12).unwrap())
            .with_achievements(vec![own.clone()]);

        let profile = service(&storage).load(&user).await.unwrap();
        assert!(!profile.default_achievements);
        assert_eq!(profile.achievements, vec![own]);
        assert_eq!(profile.completion_percent(), 25);
        assert_eq!(profile.lessons_target(), 40);
    }

    #[tokio::test]
    async fn recorded_lessons_count_like_the_dashboard() {
        let storage = Storage::in_memory().unwrap();
        let user = fresh_user().with_progress(UserProgress::new(40, 10, 3, 12).unwrap());
        let result = LessonResult {
            lesson_id: flow_core::model::LessonId::new("a1-basics").unwrap(),
            score: 3,
            total: 4,
            score_percent: 75,
            elapsed_secs: 120,
            timed_out: false,
        };
        storage
            .progress
            .record_lesson_result(user.id(), &result)
            .await
            .unwrap();

        let profile = service(&storage).load(&user).await.unwrap();
        let results = storage.progress.results_for(user.id()).await.unwrap();
        let overview = crate::ProgressOverview::from_results(&user, &results);
        assert_eq!(profile.lessons_completed(), 11);
        assert_eq!(profile.lessons_completed(), overview.lessons_completed);
        assert_eq!(profile.completion_percent(), 28);
    }
}
