use async_trait::async_trait;
use flow_core::model::{
    Achievement, Course, ForumTopic, Goal, LessonHistoryEntry, LessonId, LessonResult, Level,
    PracticeActivity, Question, SpeakingClub, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::repository::{CourseCatalog, LessonContentProvider, ProgressStore, StorageError};
use crate::seed;

/// Everything the catalog serves, held in memory.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub courses: Vec<Course>,
    pub lessons: HashMap<LessonId, Vec<Question>>,
    pub activities: Vec<PracticeActivity>,
    pub clubs: Vec<SpeakingClub>,
    pub topics: Vec<ForumTopic>,
    pub achievements: Vec<Achievement>,
    pub history: Vec<LessonHistoryEntry>,
    pub goals: Vec<Goal>,
}

/// In-memory catalog and lesson source for the desktop app and tests.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    data: Arc<Mutex<CatalogData>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(data: CatalogData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Catalog filled with the bundled courses and sample lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidContent` if the bundled content fails validation.
    pub fn seeded() -> Result<Self, StorageError> {
        Ok(Self::new(seed::bundled()?))
    }

    /// Adds or replaces the questions of one lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_lesson(&self, id: LessonId, questions: Vec<Question>) -> Result<(), StorageError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.lessons.insert(id, questions);
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&CatalogData) -> T) -> Result<T, StorageError> {
        let guard = self
            .data
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&guard))
    }
}

#[async_trait]
impl LessonContentProvider for InMemoryCatalog {
    async fn load_questions(&self, lesson_id: &LessonId) -> Result<Vec<Question>, StorageError> {
        self.read(|data| data.lessons.get(lesson_id).cloned())?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCatalog {
    async fn courses_for_level(&self, level: Level) -> Result<Vec<Course>, StorageError> {
        self.read(|data| {
            data.courses
                .iter()
                .filter(|c| c.level() == level)
                .cloned()
                .collect()
        })
    }

    async fn practice_activities(&self) -> Result<Vec<PracticeActivity>, StorageError> {
        self.read(|data| data.activities.clone())
    }

    async fn speaking_clubs(&self) -> Result<Vec<SpeakingClub>, StorageError> {
        self.read(|data| data.clubs.clone())
    }

    async fn forum_topics(&self) -> Result<Vec<ForumTopic>, StorageError> {
        self.read(|data| data.topics.clone())
    }

    async fn default_achievements(&self) -> Result<Vec<Achievement>, StorageError> {
        self.read(|data| data.achievements.clone())
    }

    async fn recent_lessons(&self) -> Result<Vec<LessonHistoryEntry>, StorageError> {
        self.read(|data| data.history.clone())
    }

    async fn current_goals(&self) -> Result<Vec<Goal>, StorageError> {
        self.read(|data| data.goals.clone())
    }
}

/// Keeps lesson results for the lifetime of the process only.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    results: Arc<Mutex<HashMap<UserId, Vec<LessonResult>>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn record_lesson_result(
        &self,
        user_id: UserId,
        result: &LessonResult,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(user_id).or_default().push(result.clone());
        Ok(())
    }

    async fn results_for(&self, user_id: UserId) -> Result<Vec<LessonResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::model::{QuestionId, QuestionKind};

    fn result(lesson: &str, percent: u32) -> LessonResult {
        LessonResult {
            lesson_id: LessonId::new(lesson).unwrap(),
            score: 1,
            total: 1,
            score_percent: percent,
            elapsed_secs: 10,
            timed_out: false,
        }
    }

    #[tokio::test]
    async fn progress_store_keeps_results_per_user() {
        let store = InMemoryProgressStore::new();
        let alice = UserId::random();
        let bob = UserId::random();

        store.record_lesson_result(alice, &result("a1-basics", 75)).await.unwrap();
        store.record_lesson_result(alice, &result("a1-grammar", 100)).await.unwrap();
        store.record_lesson_result(bob, &result("a1-basics", 25)).await.unwrap();

        let alice_results = store.results_for(alice).await.unwrap();
        assert_eq!(alice_results.len(), 2);
        assert_eq!(alice_results[0].score_percent, 75);
        assert_eq!(store.results_for(bob).await.unwrap().len(), 1);
        assert!(store.results_for(UserId::random()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_lesson_replaces_questions() {
        let catalog = InMemoryCatalog::default();
        let id = LessonId::new("custom").unwrap();
        assert_eq!(
            catalog.load_questions(&id).await.unwrap_err(),
            StorageError::NotFound
        );

        let q = Question::new(QuestionId::new(1), QuestionKind::FillBlank, "Q", Vec::new(), "a")
            .unwrap();
        catalog.put_lesson(id.clone(), vec![q]).unwrap();
        assert_eq!(catalog.load_questions(&id).await.unwrap().len(), 1);
    }
}
