use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use flow_core::model::{LessonId, LessonState};
use services::{LessonRunner, LessonSnapshot};

use crate::app_state::AppState;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AnswerInputVm, CompletionVm, LessonVm, QuestionVm};

#[component]
pub fn LessonView(lesson_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let navigator = use_navigator();
    let lessons = ctx.lessons();
    let mut snapshot = use_signal(|| None::<LessonSnapshot>);
    let mut record_error = use_signal(|| None::<ViewError>);

    let mut resource = {
        let lessons = lessons.clone();
        use_resource(move || {
            let lessons = lessons.clone();
            let lesson_id = lesson_id.clone();
            async move {
                let id = LessonId::new(lesson_id).map_err(|_| ViewError::NotFound)?;
                let runner = lessons.start_lesson(&id).await.map_err(ViewError::from)?;
                Ok::<_, ViewError>(Arc::new(runner))
            }
        })
    };

    // Mirror every published change, countdown ticks included.
    use_effect(move || {
        let Some(Ok(runner)) = resource.value().read().as_ref().cloned() else {
            return;
        };
        snapshot.set(Some(runner.snapshot()));
        let mut updates = runner.subscribe();
        spawn(async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                snapshot.set(Some(next));
            }
        });
    });

    use_effect(move || {
        let completed = snapshot
            .read()
            .as_ref()
            .is_some_and(|s| matches!(s.state, LessonState::Completed(_)));
        if !completed {
            return;
        }
        let Some(Ok(runner)) = resource.value().peek().as_ref().cloned() else {
            return;
        };
        let Some(user) = state.user() else {
            return;
        };
        let lessons = lessons.clone();
        spawn(async move {
            if let Err(e) = lessons.finish(user.id(), &runner).await {
                record_error.set(Some(ViewError::from(e)));
            }
        });
    });

    let current_runner = move || -> Option<Arc<LessonRunner>> {
        resource.value().peek().as_ref()?.as_ref().ok().cloned()
    };

    let on_select = move |value: String| {
        let Some(runner) = current_runner() else {
            return;
        };
        let question_id = runner.snapshot().question.id();
        if let Ok(next) = runner.select_answer(question_id, value) {
            snapshot.set(Some(next));
        }
    };
    let on_check = move |()| {
        if let Some(runner) = current_runner() {
            let _ = runner.check_answer();
            snapshot.set(Some(runner.snapshot()));
        }
    };
    let on_next = move |()| {
        if let Some(runner) = current_runner() {
            let _ = runner.advance();
            snapshot.set(Some(runner.snapshot()));
        }
    };
    let on_back = move |()| {
        if let Some(runner) = current_runner() {
            let _ = runner.retreat();
            snapshot.set(Some(runner.snapshot()));
        }
    };
    let on_exit = move |()| {
        if let Some(runner) = current_runner() {
            let _ = runner.exit();
        }
        navigator.push(Route::Dashboard {});
    };
    let on_retry = move |()| {
        snapshot.set(None);
        record_error.set(None);
        resource.restart();
    };

    let view_state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page lesson",
            match view_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading lesson..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { class: "btn btn-outline", to: Route::Dashboard {}, "Back to courses" }
                },
                ViewState::Ready(runner) => {
                    let current = snapshot().unwrap_or_else(|| runner.snapshot());
                    match LessonVm::from_snapshot(&current) {
                        LessonVm::Question(vm) => rsx! {
                            QuestionPanel {
                                vm,
                                on_select,
                                on_check,
                                on_next,
                                on_back,
                                on_exit,
                            }
                        },
                        LessonVm::Completed(vm) => rsx! {
                            CompletionPanel { vm, on_retry }
                            if let Some(err) = record_error() {
                                p { class: "error", "Your result was not saved. {err.message()}" }
                            }
                        },
                        LessonVm::Left => rsx! {
                            p { "You left the lesson." }
                            Link { class: "btn btn-outline", to: Route::Dashboard {}, "Back to courses" }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuestionVm,
    on_select: Callback<String>,
    on_check: Callback<()>,
    on_next: Callback<()>,
    on_back: Callback<()>,
    on_exit: Callback<()>,
) -> Element {
    let locked = vm.locked;

    rsx! {
        div { class: "lesson-header",
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| on_exit.call(()),
                "Exit"
            }
            span { class: "lesson-counter", "{vm.counter}" }
            span { class: "lesson-timer", "{vm.timer}" }
        }
        div { class: "progress",
            div { class: "progress-bar", style: "width: {vm.progress_percent}%" }
        }

        div { class: "card question-card",
            span { class: "badge", "{vm.kind_label}" }
            h2 { class: "question-prompt", "{vm.prompt}" }
            if let Some(src) = vm.audio.clone() {
                audio { class: "question-audio", controls: true, src: "{src}" }
            }

            match vm.input.clone() {
                AnswerInputVm::Choices(options) => rsx! {
                    div { class: "answer-options",
                        for option in options {
                            button {
                                key: "{option.text}",
                                class: if option.selected { "answer-option selected" } else { "answer-option" },
                                r#type: "button",
                                disabled: locked,
                                onclick: {
                                    let text = option.text.clone();
                                    move |_| on_select.call(text.clone())
                                },
                                "{option.text}"
                            }
                        }
                    }
                },
                AnswerInputVm::Text(value) => rsx! {
                    input {
                        class: "answer-input",
                        r#type: "text",
                        placeholder: "Type your answer",
                        value: "{value}",
                        disabled: locked,
                        oninput: move |evt| on_select.call(evt.value()),
                    }
                },
                AnswerInputVm::Unsupported => rsx! {
                    p { class: "notice", "This type of exercise is not available yet." }
                },
            }

            if let Some(feedback) = vm.feedback.clone() {
                div { class: if feedback.correct { "feedback feedback-correct" } else { "feedback feedback-wrong" },
                    h3 { "{feedback.headline}" }
                    if let Some(expected) = feedback.expected {
                        p { "Correct answer: {expected}" }
                    }
                    if let Some(explanation) = feedback.explanation {
                        p { class: "explanation", "{explanation}" }
                    }
                }
            }
        }

        div { class: "lesson-actions",
            button {
                class: "btn btn-outline",
                r#type: "button",
                disabled: !vm.can_go_back,
                onclick: move |_| on_back.call(()),
                "Back"
            }
            if vm.locked {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_next.call(()),
                    "{vm.next_label}"
                }
            } else {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !vm.can_check,
                    onclick: move |_| on_check.call(()),
                    "Check answer"
                }
            }
        }
    }
}

#[component]
fn CompletionPanel(vm: CompletionVm, on_retry: Callback<()>) -> Element {
    rsx! {
        div { class: "card completion-card",
            h2 { "{vm.headline}" }
            p { class: "completion-score", "{vm.percent}%" }
            p { "You answered {vm.score} of {vm.total} questions correctly." }
            if vm.timed_out {
                p { class: "notice", "The time for this lesson ran out." }
            }
            div { class: "lesson-actions",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Try again"
                }
                Link { class: "btn btn-primary", to: Route::Dashboard {}, "Back to courses" }
            }
        }
    }
}
