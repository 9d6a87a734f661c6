use dioxus::prelude::*;

use flow_core::model::Level;
use services::{LevelSelectionError, LevelSelectionFlow, LevelSelectionMode};

use crate::context::AppContext;
use crate::views::ViewError;

#[component]
pub fn LevelSelectionModal(on_select: Callback<Level>, on_skip: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = use_signal(|| LevelSelectionFlow::new(move |level| on_select.call(level)));
    let mut testing = use_signal(|| false);
    let mut failure = use_signal(|| None::<ViewError>);

    let attempt = use_callback({
        let placement = ctx.placement();
        move |()| {
            let placement = placement.clone();
            testing.set(true);
            failure.set(None);
            spawn(async move {
                let result = placement.run().await;
                testing.set(false);
                let delivered = result.and_then(|level| flow.write().complete_test(level));
                if let Err(e) = delivered {
                    failure.set(Some(ViewError::from(e)));
                }
            });
        }
    });

    let run_test = move |_| {
        if testing() {
            return;
        }
        let started = flow.write().start_test();
        match started {
            Ok(()) => attempt.call(()),
            Err(e) => failure.set(Some(ViewError::from(e))),
        }
    };

    let mut report = move |step: Result<(), LevelSelectionError>| {
        if let Err(e) = step {
            failure.set(Some(ViewError::from(e)));
        }
    };

    let mode = flow.read().mode();
    let selected = flow.read().selected();

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal level-modal",
                match mode {
                    LevelSelectionMode::Picking { .. } => rsx! {
                        h2 { "Choose your English level" }
                        p { class: "modal-subtitle",
                            "Pick the level that fits you best, or take a short placement test."
                        }
                        if let Some(err) = failure() {
                            p { class: "form-failure", role: "alert", "{err.message()}" }
                        }
                        div { class: "level-grid",
                            for level in Level::ALL {
                                LevelCard {
                                    key: "{level}",
                                    level,
                                    selected: selected == Some(level),
                                    on_pick: move |level| {
                                        let step = flow.write().select(level);
                                        report(step);
                                    },
                                }
                            }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn btn-ghost",
                                r#type: "button",
                                onclick: move |_| {
                                    let step = flow.write().skip();
                                    if step.is_ok() {
                                        on_skip.call(());
                                    }
                                    report(step);
                                },
                                "Skip for now"
                            }
                            button {
                                class: "btn btn-outline",
                                r#type: "button",
                                onclick: run_test,
                                "Take placement test"
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: selected.is_none(),
                                onclick: move |_| {
                                    let step = flow.write().confirm().map(|_| ());
                                    report(step);
                                },
                                "Continue"
                            }
                        }
                    },
                    LevelSelectionMode::Testing => rsx! {
                        h2 { "Placement test" }
                        if testing() {
                            div { class: "spinner" }
                            p { "Analysing your answers..." }
                        }
                        if let Some(err) = failure() {
                            p { class: "form-failure", role: "alert", "{err.message()}" }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn btn-ghost",
                                r#type: "button",
                                disabled: testing(),
                                onclick: move |_| {
                                    failure.set(None);
                                    let step = flow.write().back_to_picking();
                                    report(step);
                                },
                                "Back to levels"
                            }
                            if !testing() && failure().is_some() {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    onclick: move |_| attempt.call(()),
                                    "Try again"
                                }
                            }
                        }
                    },
                    LevelSelectionMode::Closed => rsx! {},
                }
            }
        }
    }
}

#[component]
fn LevelCard(level: Level, selected: bool, on_pick: Callback<Level>) -> Element {
    let info = level.info();
    rsx! {
        button {
            class: if selected { "level-card selected" } else { "level-card" },
            r#type: "button",
            onclick: move |_| on_pick.call(level),
            div { class: "level-code", "{level}" }
            h3 { "{info.title}" }
            p { "{info.description}" }
            ul {
                for feature in info.features {
                    li { "{feature}" }
                }
            }
        }
    }
}
