use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use flow_core::model::{
    AnswerCheck, LessonError, LessonId, LessonResult, LessonSession, LessonState, Question,
    QuestionId, Step, Tick,
};

use crate::error::LessonServiceError;

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Everything the lesson screen renders, captured after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSnapshot {
    pub lesson_id: LessonId,
    pub index: usize,
    pub total: usize,
    pub question: Question,
    pub answer: Option<String>,
    /// Graded outcome of the current question, once checked.
    pub outcome: Option<bool>,
    pub explanation_shown: bool,
    pub is_last: bool,
    pub score: u32,
    pub time_left: u32,
    pub progress_percent: u32,
    pub state: LessonState,
}

impl LessonSnapshot {
    #[must_use]
    pub fn capture(session: &LessonSession) -> Self {
        let question = session.current_question().clone();
        Self {
            lesson_id: session.lesson_id().clone(),
            index: session.index(),
            total: session.total(),
            answer: session.current_answer().map(str::to_owned),
            outcome: session.outcome_for(question.id()),
            question,
            explanation_shown: session.explanation_shown(),
            is_last: session.is_last(),
            score: session.score(),
            time_left: session.time_left(),
            progress_percent: session.progress_percent(),
            state: session.state(),
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state == LessonState::InProgress
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// Drives one `LessonSession` with a once-per-period countdown.
///
/// The countdown task shares the session with the runner only. It stops
/// itself when the lesson ends, and is aborted by `exit` and on drop.
pub struct LessonRunner {
    session: Arc<Mutex<LessonSession>>,
    updates: Arc<watch::Sender<LessonSnapshot>>,
    countdown: JoinHandle<()>,
    reported: AtomicBool,
}

impl LessonRunner {
    /// Starts the countdown for `session`. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(session: LessonSession, period: Duration) -> Self {
        let snapshot = LessonSnapshot::capture(&session);
        let session = Arc::new(Mutex::new(session));
        let (tx, _rx) = watch::channel(snapshot);
        let updates = Arc::new(tx);
        let countdown = tokio::spawn(count_down(
            Arc::clone(&session),
            Arc::clone(&updates),
            period,
        ));
        Self {
            session,
            updates,
            countdown,
            reported: AtomicBool::new(false),
        }
    }

    /// The latest published state.
    #[must_use]
    pub fn snapshot(&self) -> LessonSnapshot {
        self.updates.borrow().clone()
    }

    /// A receiver that wakes on every change, countdown ticks included.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LessonSnapshot> {
        self.updates.subscribe()
    }

    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        !self.countdown.is_finished()
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Lesson` when the session rejects the answer.
    pub fn select_answer(
        &self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<LessonSnapshot, LessonServiceError> {
        let value = value.into();
        self.apply(|s| s.select_answer(question_id, value))?;
        Ok(self.snapshot())
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Lesson` when nothing is selected or the
    /// answer was already checked.
    pub fn check_answer(&self) -> Result<AnswerCheck, LessonServiceError> {
        let check = self.apply(LessonSession::check_answer)?;
        debug!(question_id = ?check.question_id, correct = check.correct, "answer checked");
        Ok(check)
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Lesson` after the lesson ended.
    pub fn advance(&self) -> Result<Step, LessonServiceError> {
        let step = self.apply(LessonSession::advance)?;
        if let Step::Completed(completion) = step {
            info!(
                score = completion.score,
                total = completion.total,
                percent = completion.score_percent,
                "lesson finished"
            );
        }
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Lesson` after the lesson ended.
    pub fn retreat(&self) -> Result<bool, LessonServiceError> {
        self.apply(LessonSession::retreat)
    }

    /// Leaves the lesson. An unfinished lesson is abandoned without a result.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::StateUnavailable` if the session lock is poisoned.
    pub fn exit(&self) -> Result<(), LessonServiceError> {
        self.countdown.abort();
        let mut session = self
            .session
            .lock()
            .map_err(|_| LessonServiceError::StateUnavailable)?;
        if session.is_in_progress() {
            session.abandon()?;
            info!(lesson_id = %session.lesson_id(), "lesson abandoned");
        }
        self.updates.send_replace(LessonSnapshot::capture(&session));
        Ok(())
    }

    /// The lesson's result, handed out once after it completed.
    #[must_use]
    pub fn take_result(&self) -> Option<LessonResult> {
        let result = {
            let session = self.session.lock().ok()?;
            LessonResult::from_session(&session)?
        };
        if self.reported.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(result)
    }

    fn apply<T>(
        &self,
        f: impl FnOnce(&mut LessonSession) -> Result<T, LessonError>,
    ) -> Result<T, LessonServiceError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| LessonServiceError::StateUnavailable)?;
        let out = f(&mut *session)?;
        if !session.is_in_progress() {
            self.countdown.abort();
        }
        self.updates.send_replace(LessonSnapshot::capture(&session));
        Ok(out)
    }
}

impl Drop for LessonRunner {
    fn drop(&mut self) {
        self.countdown.abort();
    }
}

async fn count_down(
    session: Arc<Mutex<LessonSession>>,
    updates: Arc<watch::Sender<LessonSnapshot>>,
    period: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if !tick_once(&session, &updates) {
            break;
        }
    }
}

/// One countdown step. Returns whether the countdown should keep going.
fn tick_once(session: &Mutex<LessonSession>, updates: &watch::Sender<LessonSnapshot>) -> bool {
    let Ok(mut session) = session.lock() else {
        return false;
    };
    let Ok(tick) = session.tick() else {
        return false;
    };
    updates.send_replace(LessonSnapshot::capture(&session));
    match tick {
        Tick::Running { .. } => true,
        Tick::Expired(completion) => {
            info!(
                lesson_id = %session.lesson_id(),
                score = completion.score,
                total = completion.total,
                "lesson timed out"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::model::{CompletionReason, QuestionKind};

    fn session(budget: u32) -> LessonSession {
        let questions = (1..=2)
            .map(|i| {
                Question::new(
                    QuestionId::new(i),
                    QuestionKind::FillBlank,
                    format!("Q{i}"),
                    Vec::new(),
                    "yes",
                )
                .unwrap()
            })
            .collect();
        LessonSession::new(LessonId::new("runner-test").unwrap(), questions, budget).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_publishes_each_second() {
        let runner = LessonRunner::start(session(10), Duration::from_secs(1));
        let mut rx = runner.subscribe();
        assert_eq!(runner.snapshot().time_left, 10);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().time_left, 9);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().time_left, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_completes_and_stops_the_countdown() {
        let runner = LessonRunner::start(session(3), Duration::from_secs(1));
        runner.select_answer(QuestionId::new(1), "yes").unwrap();
        runner.check_answer().unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let snapshot = runner.snapshot();
        assert_eq!(snapshot.time_left, 0);
        match snapshot.state {
            LessonState::Completed(c) => {
                assert_eq!(c.reason, CompletionReason::TimedOut);
                assert_eq!(c.score, 1);
                assert_eq!(c.score_percent, 50);
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert!(!runner.is_counting_down());
    }

    #[tokio::test(start_paused = true)]
    async fn finishing_stops_the_countdown() {
        let runner = LessonRunner::start(session(60), Duration::from_secs(1));
        runner.advance().unwrap();
        assert!(matches!(runner.advance().unwrap(), Step::Completed(_)));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!runner.is_counting_down());

        let frozen = runner.snapshot().time_left;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(runner.snapshot().time_left, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn exit_abandons_without_result() {
        let runner = LessonRunner::start(session(60), Duration::from_secs(1));
        runner.exit().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(runner.snapshot().state, LessonState::Abandoned);
        assert!(!runner.is_counting_down());
        assert!(runner.take_result().is_none());
        assert!(matches!(
            runner.advance(),
            Err(LessonServiceError::Lesson(LessonError::Finished))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_runner_stops_ticking() {
        let runner = LessonRunner::start(session(60), Duration::from_secs(1));
        let shared = Arc::clone(&runner.session);
        drop(runner);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(shared.lock().unwrap().time_left(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_handed_out_once() {
        let runner = LessonRunner::start(session(60), Duration::from_secs(1));
        assert!(runner.take_result().is_none());
        runner.advance().unwrap();
        runner.advance().unwrap();

        let result = runner.take_result().unwrap();
        assert_eq!(result.total, 2);
        assert!(!result.timed_out);
        assert!(runner.take_result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_actions_leave_state_alone() {
        let runner = LessonRunner::start(session(60), Duration::from_secs(1));
        let before = runner.snapshot();
        assert!(matches!(
            runner.check_answer(),
            Err(LessonServiceError::Lesson(LessonError::Unanswered))
        ));
        assert!(!runner.retreat().unwrap());
        assert_eq!(runner.snapshot(), before);
    }
}
