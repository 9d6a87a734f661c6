use flow_core::model::{CompletionReason, CorrectAnswer, LessonState, QuestionKind};
use services::LessonSnapshot;

use crate::vm::time_fmt::format_countdown;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub text: String,
    pub selected: bool,
}

/// How the learner answers the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInputVm {
    Choices(Vec<AnswerOptionVm>),
    Text(String),
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub headline: &'static str,
    pub explanation: Option<String>,
    /// Shown after a wrong answer.
    pub expected: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub score: u32,
    pub total: u32,
    pub percent: u32,
    pub timed_out: bool,
    pub headline: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub counter: String,
    pub timer: String,
    pub progress_percent: u32,
    pub kind_label: &'static str,
    pub prompt: String,
    pub audio: Option<String>,
    pub input: AnswerInputVm,
    pub locked: bool,
    pub can_check: bool,
    pub can_go_back: bool,
    pub next_label: &'static str,
    pub feedback: Option<FeedbackVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonVm {
    Question(QuestionVm),
    Completed(CompletionVm),
    Left,
}

impl LessonVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &LessonSnapshot) -> Self {
        match snapshot.state {
            LessonState::Completed(completion) => Self::Completed(CompletionVm {
                score: completion.score,
                total: completion.total,
                percent: completion.score_percent,
                timed_out: completion.reason == CompletionReason::TimedOut,
                headline: match completion.reason {
                    CompletionReason::Finished => "Lesson complete!",
                    CompletionReason::TimedOut => "Time is up!",
                },
            }),
            LessonState::Abandoned => Self::Left,
            LessonState::InProgress => Self::Question(question_vm(snapshot)),
        }
    }
}

fn question_vm(snapshot: &LessonSnapshot) -> QuestionVm {
    let question = &snapshot.question;
    let answer = snapshot.answer.clone();
    let input = match question.kind() {
        QuestionKind::SingleChoice | QuestionKind::AudioChoice => AnswerInputVm::Choices(
            question
                .options()
                .iter()
                .map(|text| AnswerOptionVm {
                    selected: answer.as_deref() == Some(text.as_str()),
                    text: text.clone(),
                })
                .collect(),
        ),
        QuestionKind::FillBlank => AnswerInputVm::Text(answer.clone().unwrap_or_default()),
        QuestionKind::Speaking | QuestionKind::Matching => AnswerInputVm::Unsupported,
    };
    let feedback = match (snapshot.explanation_shown, snapshot.outcome) {
        (true, Some(correct)) => Some(FeedbackVm {
            correct,
            headline: if correct { "Correct!" } else { "Not quite" },
            explanation: question.explanation().map(str::to_owned),
            expected: (!correct).then(|| expected_answer(question.correct_answer())),
        }),
        _ => None,
    };

    QuestionVm {
        counter: format!("Question {} of {}", snapshot.index + 1, snapshot.total),
        timer: format_countdown(snapshot.time_left),
        progress_percent: snapshot.progress_percent,
        kind_label: question.kind().label(),
        prompt: question.prompt().to_owned(),
        audio: question.audio().map(ToString::to_string),
        input,
        locked: snapshot.explanation_shown,
        can_check: !snapshot.explanation_shown && answer.is_some_and(|a| !a.is_empty()),
        can_go_back: snapshot.index > 0,
        next_label: if snapshot.is_last {
            "Finish lesson"
        } else {
            "Next"
        },
        feedback,
    }
}

fn expected_answer(correct: &CorrectAnswer) -> String {
    match correct {
        CorrectAnswer::Single(value) => value.clone(),
        CorrectAnswer::AnyOf(values) => values.iter().cloned().collect::<Vec<_>>().join(" / "),
    }
}
