use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::media::MediaRef;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("choice questions need at least two options (got {0})")]
    TooFewOptions(usize),

    #[error("audio questions need an audio reference")]
    MissingAudio,

    #[error("correct answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// How a question is presented and answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Pick one option from a list.
    SingleChoice,
    /// Type the missing word.
    FillBlank,
    /// Listen to a clip, then pick one option.
    AudioChoice,
    /// Declared for future content; not produced by the bundled lessons.
    Speaking,
    /// Declared for future content; not produced by the bundled lessons.
    Matching,
}

impl QuestionKind {
    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::AudioChoice)
    }

    /// Short label shown next to the prompt.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "Choose the answer",
            QuestionKind::FillBlank => "Fill in the blank",
            QuestionKind::AudioChoice => "Listening",
            QuestionKind::Speaking => "Speaking",
            QuestionKind::Matching => "Matching",
        }
    }
}

//
// ─── CORRECT ANSWER ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectAnswer {
    Single(String),
    /// Any member of the set is accepted.
    AnyOf(BTreeSet<String>),
}

impl CorrectAnswer {
    /// Exact, case-sensitive comparison with no trimming.
    #[must_use]
    pub fn matches(&self, answer: &str) -> bool {
        match self {
            CorrectAnswer::Single(expected) => expected == answer,
            CorrectAnswer::AnyOf(accepted) => accepted.contains(answer),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Single(expected) => expected.is_empty(),
            CorrectAnswer::AnyOf(accepted) => accepted.is_empty(),
        }
    }
}

impl From<&str> for CorrectAnswer {
    fn from(value: &str) -> Self {
        CorrectAnswer::Single(value.to_owned())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    correct: CorrectAnswer,
    explanation: Option<String>,
    audio: Option<MediaRef>,
}

impl Question {
    /// Builds a question and checks it is answerable.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt or answer is empty, a choice
    /// question has fewer than two options, or an audio question has no clip.
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: impl Into<CorrectAnswer>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let correct = correct.into();
        if correct.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        if kind.is_choice() && options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }

        Ok(Self {
            id,
            kind,
            prompt,
            options,
            correct,
            explanation: None,
            audio: None,
        })
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio: MediaRef) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Final check for kinds that depend on builder-set fields.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingAudio` for an audio question with no clip.
    pub fn validated(self) -> Result<Self, QuestionError> {
        if self.kind == QuestionKind::AudioChoice && self.audio.is_none() {
            return Err(QuestionError::MissingAudio);
        }
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &CorrectAnswer {
        &self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn audio(&self) -> Option<&MediaRef> {
        self.audio.as_ref()
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct.matches(answer)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn comparison_is_exact() {
        let q = Question::new(
            QuestionId::new(1),
            QuestionKind::FillBlank,
            "She _____ a teacher.",
            Vec::new(),
            "is",
        )
        .unwrap();

        assert!(q.is_correct("is"));
        assert!(!q.is_correct("Is"));
        assert!(!q.is_correct(" is"));
    }

    #[test]
    fn any_of_accepts_each_member() {
        let accepted: BTreeSet<String> = ["colour", "color"].into_iter().map(String::from).collect();
        let q = Question::new(
            QuestionId::new(2),
            QuestionKind::FillBlank,
            "Spell it",
            Vec::new(),
            CorrectAnswer::AnyOf(accepted),
        )
        .unwrap();
        assert!(q.is_correct("color"));
        assert!(q.is_correct("colour"));
        assert!(!q.is_correct("colr"));
    }

    #[test]
    fn choice_questions_need_options() {
        let err = Question::new(
            QuestionId::new(1),
            QuestionKind::SingleChoice,
            "Pick",
            opts(&["only"]),
            "only",
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions(1));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = Question::new(QuestionId::new(1), QuestionKind::FillBlank, "  ", Vec::new(), "x")
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn audio_question_requires_clip() {
        let q = Question::new(
            QuestionId::new(4),
            QuestionKind::AudioChoice,
            "What did she say?",
            opts(&["Hello", "Hi"]),
            "Hello",
        )
        .unwrap();
        assert_eq!(q.clone().validated(), Err(QuestionError::MissingAudio));

        let q = q
            .with_audio(MediaRef::parse("/audio/sample.mp3").unwrap())
            .validated()
            .unwrap();
        assert!(q.audio().is_some());
    }
}
