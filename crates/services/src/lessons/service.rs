use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use flow_core::model::{LessonId, LessonResult, LessonSession, UserId};
use storage::repository::{LessonContentProvider, ProgressStore};

use crate::deadline::within;
use crate::error::LessonServiceError;
use crate::lessons::runner::LessonRunner;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Starts lessons from stored content and records their results.
#[derive(Clone)]
pub struct LessonService {
    lessons: Arc<dyn LessonContentProvider>,
    progress: Arc<dyn ProgressStore>,
    time_budget_secs: u32,
    timeout: Duration,
}

impl LessonService {
    #[must_use]
    pub fn new(
        lessons: Arc<dyn LessonContentProvider>,
        progress: Arc<dyn ProgressStore>,
        time_budget_secs: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            lessons,
            progress,
            time_budget_secs,
            timeout,
        }
    }

    #[must_use]
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    /// Loads `lesson_id` and starts its countdown.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Content` if the questions cannot be loaded,
    /// `LessonServiceError::Timeout` if loading takes too long, and
    /// `LessonServiceError::Lesson` if the question set is unusable.
    pub async fn start_lesson(
        &self,
        lesson_id: &LessonId,
    ) -> Result<LessonRunner, LessonServiceError> {
        let load = self.lessons.load_questions(lesson_id);
        let questions = match within(self.timeout, load).await {
            Ok(Ok(questions)) => questions,
            Ok(Err(e)) => {
                warn!(%lesson_id, error = %e, "lesson content unavailable");
                return Err(LessonServiceError::Content(e));
            }
            Err(ms) => {
                warn!(%lesson_id, timeout_ms = ms, "lesson content timed out");
                return Err(LessonServiceError::Timeout(ms));
            }
        };
        let session = LessonSession::new(lesson_id.clone(), questions, self.time_budget_secs)?;
        info!(
            %lesson_id,
            questions = session.total(),
            budget_secs = self.time_budget_secs,
            "lesson started"
        );
        Ok(LessonRunner::start(session, TICK_PERIOD))
    }

    /// Records `result` for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Progress` or `LessonServiceError::Timeout`.
    pub async fn record_result(
        &self,
        user_id: UserId,
        result: &LessonResult,
    ) -> Result<(), LessonServiceError> {
        let record = self.progress.record_lesson_result(user_id, result);
        match within(self.timeout, record).await {
            Ok(Ok(())) => {
                info!(
                    %user_id,
                    lesson_id = %result.lesson_id,
                    percent = result.score_percent,
                    timed_out = result.timed_out,
                    "lesson result recorded"
                );
                Ok(())
            }
            Ok(Err(e)) => Err(LessonServiceError::Progress(e)),
            Err(ms) => Err(LessonServiceError::Timeout(ms)),
        }
    }

    /// Records the runner's result if it completed and was not reported yet.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Progress` or `LessonServiceError::Timeout`.
    pub async fn finish(
        &self,
        user_id: UserId,
        runner: &LessonRunner,
    ) -> Result<Option<LessonResult>, LessonServiceError> {
        let Some(result) = runner.take_result() else {
            return Ok(None);
        };
        self.record_result(user_id, &result).await?;
        Ok(Some(result))
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Progress` if results cannot be read.
    pub async fn results_for(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LessonResult>, LessonServiceError> {
        self.progress
            .results_for(user_id)
            .await
            .map_err(LessonServiceError::Progress)
    }
}
