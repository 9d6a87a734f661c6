use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use flow_core::model::{ForumTopic, PracticeActivity, SpeakingClub};
use services::Dashboard;

use crate::app_state::AppState;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, map_course_cards};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DashboardTab {
    Courses,
    Practice,
    Community,
}

impl DashboardTab {
    const ALL: [DashboardTab; 3] = [
        DashboardTab::Courses,
        DashboardTab::Practice,
        DashboardTab::Community,
    ];

    fn label(self) -> &'static str {
        match self {
            DashboardTab::Courses => "Courses",
            DashboardTab::Practice => "Practice",
            DashboardTab::Community => "Community",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    dashboard: Dashboard,
    cards: Vec<CourseCardVm>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let dashboard = ctx.dashboard();
    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        // Re-runs when the learner changes level.
        let user = state.user();
        async move {
            let Some(user) = user else {
                return Err(ViewError::Unknown);
            };
            let dashboard = dashboard.load(&user).await.map_err(ViewError::from)?;
            let cards = map_course_cards(&dashboard.courses);
            Ok(DashboardData { dashboard, cards })
        }
    });
    let tab = use_signal(|| DashboardTab::Courses);

    let Some(user) = state.user() else {
        return rsx! {
            div { class: "page",
                h2 { "Your courses" }
                p { "Sign in to see your personal dashboard." }
                Link { class: "btn btn-primary", to: Route::Landing {}, "Back to home" }
            }
        };
    };
    let view_state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            div { class: "dashboard-header",
                h2 { "Welcome back, {user.name()}!" }
                p { class: "section-lead", "Keep going, you are doing great." }
            }

            match view_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    DashboardBody { data, tab }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(data: DashboardData, tab: Signal<DashboardTab>) -> Element {
    let mut state = use_context::<AppState>();
    let mut tab = tab;
    let navigator = use_navigator();
    let dashboard = data.dashboard;
    let overview = dashboard.overview;
    let accuracy = overview
        .accuracy_percent
        .map_or_else(|| "-".to_owned(), |p| format!("{p}%"));
    let quick = dashboard.quick_lesson();
    let clubs: Vec<SpeakingClub> = dashboard.clubs_for_level().cloned().collect();
    let current = tab();

    rsx! {
        div { class: "stat-row",
            StatCard { label: "Current level", value: dashboard.level.to_string() }
            StatCard { label: "Lessons completed", value: overview.lessons_completed.to_string() }
            StatCard { label: "Day streak", value: overview.streak_days.to_string() }
            StatCard { label: "Hours studied", value: overview.hours.to_string() }
            StatCard { label: "Accuracy", value: accuracy }
        }

        div { class: "dashboard-actions",
            if let Some(lesson_id) = quick {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(Route::Lesson {
                            lesson_id: lesson_id.as_str().to_owned(),
                        });
                    },
                    "Quick lesson"
                }
            }
            button {
                class: "btn btn-outline",
                r#type: "button",
                onclick: move |_| state.open_level_selection(),
                "Change level"
            }
        }

        div { class: "tabs",
            for item in DashboardTab::ALL {
                button {
                    key: "{item.label()}",
                    class: if item == current { "tab tab-active" } else { "tab" },
                    r#type: "button",
                    onclick: move |_| tab.set(item),
                    "{item.label()}"
                }
            }
        }

        match current {
            DashboardTab::Courses => rsx! {
                if dashboard.is_fallback() {
                    p { class: "notice",
                        "Courses for {dashboard.level} are coming soon. Here is where to start meanwhile: {dashboard.courses_level}."
                    }
                }
                if data.cards.is_empty() {
                    p { "No courses available yet." }
                } else {
                    div { class: "card-grid",
                        for card in data.cards {
                            CourseCard { key: "{card.lesson_id}", card }
                        }
                    }
                }
            },
            DashboardTab::Practice => rsx! {
                PracticeGrid { activities: dashboard.activities }
            },
            DashboardTab::Community => rsx! {
                div { class: "community-columns",
                    section {
                        h3 { "Speaking clubs" }
                        if clubs.is_empty() {
                            p { "No clubs for your level right now." }
                        }
                        for club in clubs {
                            div { key: "{club.title}", class: "card club-card",
                                h4 { "{club.title}" }
                                p { "Today at {club.time}" }
                                p { "{club.participants} participants · {club.level_range()}" }
                            }
                        }
                    }
                    section {
                        h3 { "Forum" }
                        for topic in dashboard.topics {
                            TopicRow { key: "{topic.title}", topic }
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "card stat-card",
            div { class: "stat-number", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    rsx! {
        div { class: "card course-card",
            div { class: "course-meta",
                span { class: "badge", "{card.level}" }
                span { class: "course-difficulty", "{card.difficulty}" }
            }
            h3 { "{card.title}" }
            p { "{card.description}" }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {card.progress_percent}%" }
            }
            p { class: "course-progress", "{card.progress_label} · {card.duration}" }
            ul { class: "topic-list",
                for topic in card.topics {
                    li { key: "{topic}", "{topic}" }
                }
            }
            Link {
                class: "btn btn-primary",
                to: Route::Lesson {
                    lesson_id: card.lesson_id.as_str().to_owned(),
                },
                "{card.action_label}"
            }
        }
    }
}

/// Practice tiles; available ones open their lesson bank.
#[component]
pub(crate) fn PracticeGrid(activities: Vec<PracticeActivity>) -> Element {
    rsx! {
        div { class: "card-grid",
            for activity in activities {
                ActivityCard { key: "{activity.id}", activity }
            }
        }
    }
}

#[component]
fn ActivityCard(activity: PracticeActivity) -> Element {
    let body = rsx! {
        span { class: "activity-icon", "{activity.icon}" }
        h3 { "{activity.title}" }
        p { "{activity.description}" }
    };
    match activity.lesson {
        Some(lesson_id) => rsx! {
            Link {
                class: "card activity-card",
                to: Route::Lesson {
                    lesson_id: lesson_id.as_str().to_owned(),
                },
                {body}
            }
        },
        None => rsx! {
            div { class: "card activity-card disabled",
                {body}
                span { class: "badge", "Coming soon" }
            }
        },
    }
}

#[component]
fn TopicRow(topic: ForumTopic) -> Element {
    rsx! {
        div { class: "topic-row",
            h4 { "{topic.title}" }
            p { "{topic.author} · {topic.replies} replies · {topic.posted}" }
        }
    }
}
