use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId};
use crate::model::question::Question;

/// Default countdown for one lesson attempt (30 minutes).
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 1800;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson has no questions")]
    Empty,

    #[error("lesson time budget must be > 0")]
    InvalidTimeBudget,

    #[error("question {0:?} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("lesson is already finished")]
    Finished,

    #[error("question {0:?} is not part of this lesson")]
    UnknownQuestion(QuestionId),

    #[error("current question has no answer yet")]
    Unanswered,

    #[error("current question was already checked")]
    AlreadyChecked,

    #[error("answer is locked while its explanation is shown")]
    AnswerLocked,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionReason {
    /// The learner advanced past the last question.
    Finished,
    /// The countdown reached zero.
    TimedOut,
}

/// Final tally of a completed lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub score: u32,
    pub total: u32,
    pub score_percent: u32,
    pub reason: CompletionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonState {
    InProgress,
    Completed(Completion),
    /// The learner left before finishing. Nothing is reported.
    Abandoned,
}

/// Result of `check_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCheck {
    pub question_id: QuestionId,
    pub correct: bool,
}

/// Result of `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved { index: usize },
    Completed(Completion),
}

/// Result of `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { time_left: u32 },
    Expired(Completion),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's attempt at an ordered question set.
///
/// The session is a small state machine: it stays `InProgress` while the
/// learner selects, checks and navigates, and ends either `Completed` (last
/// question advanced past, or countdown expired) or `Abandoned`. Both end
/// states are terminal; every mutator returns `LessonError::Finished` after.
///
/// A question's answer is locked while its explanation is shown. Navigating
/// away and back unlocks it, and checking again replaces that question's
/// earlier outcome, so the score never counts one question twice.
#[derive(Clone)]
pub struct LessonSession {
    lesson_id: LessonId,
    questions: Vec<Question>,
    index: usize,
    answers: BTreeMap<QuestionId, String>,
    outcomes: BTreeMap<QuestionId, bool>,
    explanation_shown: bool,
    time_budget: u32,
    time_left: u32,
    state: LessonState,
}

impl LessonSession {
    /// Starts a session over `questions` with a countdown of `time_budget` seconds.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Empty` for an empty question list,
    /// `LessonError::InvalidTimeBudget` for a zero budget, and
    /// `LessonError::DuplicateQuestion` if two questions share an id.
    pub fn new(
        lesson_id: LessonId,
        questions: Vec<Question>,
        time_budget: u32,
    ) -> Result<Self, LessonError> {
        if questions.is_empty() {
            return Err(LessonError::Empty);
        }
        if time_budget == 0 {
            return Err(LessonError::InvalidTimeBudget);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id()) {
                return Err(LessonError::DuplicateQuestion(q.id()));
            }
        }

        Ok(Self {
            lesson_id,
            questions,
            index: 0,
            answers: BTreeMap::new(),
            outcomes: BTreeMap::new(),
            explanation_shown: false,
            time_budget,
            time_left: time_budget,
            state: LessonState::InProgress,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn state(&self) -> LessonState {
        self.state
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state == LessonState::InProgress
    }

    #[must_use]
    pub fn completion(&self) -> Option<Completion> {
        match self.state {
            LessonState::Completed(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    #[must_use]
    pub fn explanation_shown(&self) -> bool {
        self.explanation_shown
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn time_budget(&self) -> u32 {
        self.time_budget
    }

    /// Seconds spent so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.time_budget - self.time_left
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answer_for(self.current_question().id())
    }

    /// Outcome of the last check for `id`, if it was checked.
    #[must_use]
    pub fn outcome_for(&self, id: QuestionId) -> Option<bool> {
        self.outcomes.get(&id).copied()
    }

    /// Number of checked questions answered correctly.
    #[must_use]
    pub fn score(&self) -> u32 {
        count_u32(self.outcomes.values().filter(|correct| **correct).count())
    }

    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Position through the lesson as a percentage, counting the current question.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        crate::percent(count_u32(self.index + 1), count_u32(self.total()))
    }

    /// Stores `value` as the learner's answer to `question_id`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the session ended,
    /// `LessonError::UnknownQuestion` for an id outside this lesson, and
    /// `LessonError::AnswerLocked` when targeting the current question while
    /// its explanation is shown, or an already checked question other than the
    /// current one.
    pub fn select_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), LessonError> {
        self.ensure_in_progress()?;
        if !self.questions.iter().any(|q| q.id() == question_id) {
            return Err(LessonError::UnknownQuestion(question_id));
        }
        let locked = if question_id == self.current_question().id() {
            self.explanation_shown
        } else {
            self.outcomes.contains_key(&question_id)
        };
        if locked {
            return Err(LessonError::AnswerLocked);
        }
        self.answers.insert(question_id, value.into());
        Ok(())
    }

    /// Grades the stored answer for the current question and shows its explanation.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Unanswered` when nothing is stored for the current
    /// question and `LessonError::AlreadyChecked` while its explanation is shown.
    /// Neither changes any state.
    pub fn check_answer(&mut self) -> Result<AnswerCheck, LessonError> {
        self.ensure_in_progress()?;
        if self.explanation_shown {
            return Err(LessonError::AlreadyChecked);
        }
        let question = &self.questions[self.index];
        let question_id = question.id();
        let answer = self.answers.get(&question_id).ok_or(LessonError::Unanswered)?;
        let correct = question.is_correct(answer);

        self.outcomes.insert(question_id, correct);
        self.explanation_shown = true;
        Ok(AnswerCheck {
            question_id,
            correct,
        })
    }

    /// Moves to the next question, or completes the lesson from the last one.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the session ended.
    pub fn advance(&mut self) -> Result<Step, LessonError> {
        self.ensure_in_progress()?;
        if self.is_last() {
            let completion = self.complete(CompletionReason::Finished);
            return Ok(Step::Completed(completion));
        }
        self.index += 1;
        self.explanation_shown = false;
        Ok(Step::Moved { index: self.index })
    }

    /// Moves back one question. Returns `false` (and changes nothing) at the first.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the session ended.
    pub fn retreat(&mut self) -> Result<bool, LessonError> {
        self.ensure_in_progress()?;
        if self.index == 0 {
            return Ok(false);
        }
        self.index -= 1;
        self.explanation_shown = false;
        Ok(true)
    }

    /// Counts down one second. Reaching zero completes the lesson with the current score.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the session ended.
    pub fn tick(&mut self) -> Result<Tick, LessonError> {
        self.ensure_in_progress()?;
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            let completion = self.complete(CompletionReason::TimedOut);
            return Ok(Tick::Expired(completion));
        }
        Ok(Tick::Running {
            time_left: self.time_left,
        })
    }

    /// Leaves the lesson without a result.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::Finished` after the session ended.
    pub fn abandon(&mut self) -> Result<(), LessonError> {
        self.ensure_in_progress()?;
        self.state = LessonState::Abandoned;
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), LessonError> {
        if self.is_in_progress() {
            Ok(())
        } else {
            Err(LessonError::Finished)
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> Completion {
        let score = self.score();
        let total = count_u32(self.total());
        let completion = Completion {
            score,
            total,
            score_percent: crate::percent(score, total),
            reason,
        };
        self.explanation_shown = false;
        self.state = LessonState::Completed(completion);
        completion
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl fmt::Debug for LessonSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LessonSession")
            .field("lesson_id", &self.lesson_id)
            .field("questions_len", &self.questions.len())
            .field("index", &self.index)
            .field("score", &self.score())
            .field("time_left", &self.time_left)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// What gets reported to a progress store once a lesson completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonResult {
    pub lesson_id: LessonId,
    pub score: u32,
    pub total: u32,
    pub score_percent: u32,
    pub elapsed_secs: u32,
    pub timed_out: bool,
}

impl LessonResult {
    /// Builds the result of a completed session; `None` otherwise.
    #[must_use]
    pub fn from_session(session: &LessonSession) -> Option<Self> {
        let completion = session.completion()?;
        Some(Self {
            lesson_id: session.lesson_id().clone(),
            score: completion.score,
            total: completion.total,
            score_percent: completion.score_percent,
            elapsed_secs: session.elapsed_secs(),
            timed_out: completion.reason == CompletionReason::TimedOut,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionKind;

    fn question(id: u64, correct: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            QuestionKind::FillBlank,
            format!("Q{id}"),
            Vec::new(),
            correct,
        )
        .unwrap()
    }

    fn session(n: u64) -> LessonSession {
        let questions = (1..=n).map(|id| question(id, "ok")).collect();
        LessonSession::new(
            LessonId::new("test").unwrap(),
            questions,
            DEFAULT_TIME_BUDGET_SECS,
        )
        .unwrap()
    }

    fn answer_and_check(s: &mut LessonSession, value: &str) -> AnswerCheck {
        let id = s.current_question().id();
        s.select_answer(id, value).unwrap();
        s.check_answer().unwrap()
    }

    #[test]
    fn empty_lesson_is_rejected() {
        let err = LessonSession::new(LessonId::new("x").unwrap(), Vec::new(), 10).unwrap_err();
        assert_eq!(err, LessonError::Empty);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = LessonSession::new(
            LessonId::new("x").unwrap(),
            vec![question(1, "a"), question(1, "b")],
            10,
        )
        .unwrap_err();
        assert_eq!(err, LessonError::DuplicateQuestion(QuestionId::new(1)));
    }

    #[test]
    fn four_question_scenario_scores_75() {
        let mut s = session(4);
        assert!(answer_and_check(&mut s, "ok").correct);
        assert_eq!(s.advance().unwrap(), Step::Moved { index: 1 });
        assert!(!answer_and_check(&mut s, "nope").correct);
        s.advance().unwrap();
        answer_and_check(&mut s, "ok");
        s.advance().unwrap();
        answer_and_check(&mut s, "ok");

        let step = s.advance().unwrap();
        let Step::Completed(completion) = step else {
            panic!("expected completion, got {step:?}");
        };
        assert_eq!(completion.score, 3);
        assert_eq!(completion.score_percent, 75);
        assert_eq!(completion.reason, CompletionReason::Finished);
        assert_eq!(s.completion(), Some(completion));
    }

    #[test]
    fn percent_matches_rounding_for_every_split() {
        for n in 1..=7_u64 {
            for correct in 0..=n {
                let mut s = session(n);
                for i in 0..n {
                    let value = if i < correct { "ok" } else { "bad" };
                    answer_and_check(&mut s, value);
                    s.advance().unwrap();
                }
                let completion = s.completion().unwrap();
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let expected = (100.0 * correct as f64 / n as f64).round() as u32;
                assert_eq!(completion.score_percent, expected, "{correct}/{n}");
            }
        }
    }

    #[test]
    fn check_without_answer_changes_nothing() {
        let mut s = session(2);
        assert_eq!(s.check_answer(), Err(LessonError::Unanswered));
        assert!(!s.explanation_shown());
        assert_eq!(s.score(), 0);
        assert_eq!(s.checked_count(), 0);
    }

    #[test]
    fn recheck_is_rejected_while_explained() {
        let mut s = session(2);
        answer_and_check(&mut s, "ok");
        assert_eq!(s.check_answer(), Err(LessonError::AlreadyChecked));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn answer_is_locked_after_check() {
        let mut s = session(2);
        answer_and_check(&mut s, "bad");
        let id = s.current_question().id();
        assert_eq!(s.select_answer(id, "ok"), Err(LessonError::AnswerLocked));
        assert_eq!(s.current_answer(), Some("bad"));
    }

    #[test]
    fn revisit_and_recheck_replaces_outcome() {
        let mut s = session(2);
        answer_and_check(&mut s, "ok");
        s.advance().unwrap();
        s.retreat().unwrap();
        assert!(!s.explanation_shown());

        let id = s.current_question().id();
        s.select_answer(id, "ok").unwrap();
        s.check_answer().unwrap();
        assert_eq!(s.score(), 1, "same question must not count twice");

        s.advance().unwrap();
        s.retreat().unwrap();
        s.select_answer(id, "bad").unwrap();
        s.check_answer().unwrap();
        assert_eq!(s.score(), 0);
        assert_eq!(s.outcome_for(id), Some(false));
    }

    #[test]
    fn retreat_at_start_is_noop() {
        let mut s = session(3);
        assert_eq!(s.retreat(), Ok(false));
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn navigation_clears_explanation() {
        let mut s = session(3);
        answer_and_check(&mut s, "ok");
        s.advance().unwrap();
        assert!(!s.explanation_shown());
        answer_and_check(&mut s, "ok");
        assert!(s.retreat().unwrap());
        assert!(!s.explanation_shown());
    }

    #[test]
    fn advance_never_goes_past_last() {
        let mut s = session(1);
        assert!(matches!(s.advance(), Ok(Step::Completed(_))));
        assert_eq!(s.advance(), Err(LessonError::Finished));
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn completed_is_terminal() {
        let mut s = session(1);
        s.advance().unwrap();
        let id = QuestionId::new(1);
        assert_eq!(s.select_answer(id, "ok"), Err(LessonError::Finished));
        assert_eq!(s.check_answer(), Err(LessonError::Finished));
        assert_eq!(s.retreat(), Err(LessonError::Finished));
        assert_eq!(s.tick(), Err(LessonError::Finished));
        assert_eq!(s.abandon(), Err(LessonError::Finished));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut s = session(2);
        assert_eq!(
            s.select_answer(QuestionId::new(99), "ok"),
            Err(LessonError::UnknownQuestion(QuestionId::new(99)))
        );
    }

    #[test]
    fn answers_for_other_questions_may_change_any_time() {
        let mut s = session(2);
        answer_and_check(&mut s, "ok");
        s.select_answer(QuestionId::new(2), "early").unwrap();
        s.select_answer(QuestionId::new(2), "later").unwrap();
        assert_eq!(s.answer_for(QuestionId::new(2)), Some("later"));
    }

    #[test]
    fn checked_answer_is_locked_from_other_questions() {
        let mut s = session(2);
        answer_and_check(&mut s, "ok");
        s.advance().unwrap();

        assert_eq!(
            s.select_answer(QuestionId::new(1), "bad"),
            Err(LessonError::AnswerLocked)
        );
        assert_eq!(s.answer_for(QuestionId::new(1)), Some("ok"));
        assert_eq!(s.outcome_for(QuestionId::new(1)), Some(true));

        // Going back to it unlocks the answer again.
        assert!(s.retreat().unwrap());
        s.select_answer(QuestionId::new(1), "bad").unwrap();
        assert_eq!(s.answer_for(QuestionId::new(1)), Some("bad"));
    }

    #[test]
    fn countdown_expires_into_completion() {
        let mut s = LessonSession::new(
            LessonId::new("t").unwrap(),
            vec![question(1, "ok"), question(2, "ok")],
            3,
        )
        .unwrap();
        answer_and_check(&mut s, "ok");

        assert_eq!(s.tick(), Ok(Tick::Running { time_left: 2 }));
        assert_eq!(s.tick(), Ok(Tick::Running { time_left: 1 }));
        let Ok(Tick::Expired(completion)) = s.tick() else {
            panic!("expected expiry");
        };
        assert_eq!(s.time_left(), 0);
        assert_eq!(completion.score, 1);
        assert_eq!(completion.score_percent, 50);
        assert_eq!(completion.reason, CompletionReason::TimedOut);
        assert_eq!(s.tick(), Err(LessonError::Finished));
        assert_eq!(s.time_left(), 0);
    }

    #[test]
    fn abandon_reports_nothing() {
        let mut s = session(2);
        s.abandon().unwrap();
        assert_eq!(s.state(), LessonState::Abandoned);
        assert!(LessonResult::from_session(&s).is_none());
    }

    #[test]
    fn result_captures_elapsed_time() {
        let mut s = session(1);
        s.tick().unwrap();
        s.tick().unwrap();
        answer_and_check(&mut s, "ok");
        s.advance().unwrap();

        let result = LessonResult::from_session(&s).unwrap();
        assert_eq!(result.elapsed_secs, 2);
        assert_eq!(result.score_percent, 100);
        assert!(!result.timed_out);
    }

    #[test]
    fn progress_counts_current_question() {
        let mut s = session(4);
        assert_eq!(s.progress_percent(), 25);
        s.advance().unwrap();
        assert_eq!(s.progress_percent(), 50);
    }
}
