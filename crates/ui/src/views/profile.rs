use dioxus::prelude::*;
use dioxus_router::Link;

use flow_core::model::{Achievement, Goal, LessonHistoryEntry, LessonResult};
use services::Profile;

use crate::app_state::AppState;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{format_day, format_member_since};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let profiles = ctx.profile();

    let resource = use_resource(move || {
        let profiles = profiles.clone();
        let user = state.user();
        async move {
            let Some(user) = user else {
                return Err(ViewError::Unknown);
            };
            profiles.load(&user).await.map_err(ViewError::from)
        }
    });

    if !state.is_signed_in() {
        return rsx! {
            div { class: "page",
                h2 { "Profile" }
                p { "Sign in to see your profile." }
                Link { class: "btn btn-primary", to: Route::Landing {}, "Back to home" }
            }
        };
    }
    let view_state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page profile",
            match view_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(profile) => rsx! {
                    ProfileBody { profile }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ProfileBody(profile: Profile) -> Element {
    let mut state = use_context::<AppState>();
    let user = &profile.user;
    let progress = user.progress();
    let level = user
        .level()
        .map_or_else(|| "Not chosen".to_owned(), |l| l.to_string());
    let since = format_member_since(user.joined_at());
    let completion = profile.completion_percent();
    let target = profile.lessons_target();
    let completed = profile.lessons_completed();
    let avatar = user.avatar().map(ToString::to_string);

    rsx! {
        section { class: "card profile-header",
            if let Some(src) = avatar {
                img { class: "avatar", src: "{src}", alt: "{user.name()}" }
            } else {
                div { class: "avatar avatar-initial", "{user.initial()}" }
            }
            div {
                h2 { "{user.name()}" }
                p { class: "muted", "{user.email()}" }
                p { class: "muted", "Member since {since}" }
                span { class: "badge", "Level {level}" }
            }
            button {
                class: "btn btn-outline",
                r#type: "button",
                onclick: move |_| state.open_level_selection(),
                "Change level"
            }
        }

        section { class: "stat-row",
            div { class: "card stat-card",
                div { class: "stat-number", "{completed}/{target}" }
                div { class: "stat-label", "Lessons completed" }
                div { class: "progress",
                    div { class: "progress-bar", style: "width: {completion}%" }
                }
            }
            div { class: "card stat-card",
                div { class: "stat-number", "{progress.current_streak()}" }
                div { class: "stat-label", "Day streak" }
            }
            div { class: "card stat-card",
                div { class: "stat-number", "{progress.total_hours()}" }
                div { class: "stat-label", "Hours studied" }
            }
        }

        section { class: "profile-section",
            h3 { "Achievements" }
            if profile.default_achievements {
                p { class: "muted", "Complete lessons to earn these badges." }
            }
            div { class: "card-grid",
                for achievement in profile.achievements.clone() {
                    AchievementCard { key: "{achievement.id}", achievement }
                }
            }
        }

        section { class: "profile-section",
            h3 { "Recent lessons" }
            for entry in profile.recent_lessons.clone() {
                HistoryRow { key: "{entry.title}", entry }
            }
        }

        section { class: "profile-section",
            h3 { "Goals" }
            for goal in profile.goals.clone() {
                GoalRow { key: "{goal.title}", goal }
            }
        }

        section { class: "profile-section",
            h3 { "Lesson results" }
            if profile.results.is_empty() {
                p { class: "muted", "No lessons finished yet." }
            } else {
                ul { class: "result-list",
                    for (i, result) in profile.results.iter().cloned().enumerate().rev() {
                        ResultRow { key: "{i}", result }
                    }
                }
            }
        }
    }
}

#[component]
fn AchievementCard(achievement: Achievement) -> Element {
    let earned = format_day(achievement.earned_at.date_naive());
    rsx! {
        div { class: "card achievement-card",
            span { class: "achievement-icon", "{achievement.icon}" }
            h4 { "{achievement.title}" }
            p { "{achievement.description}" }
            p { class: "muted", "{earned}" }
        }
    }
}

#[component]
fn HistoryRow(entry: LessonHistoryEntry) -> Element {
    let day = format_day(entry.date);
    rsx! {
        div { class: "history-row",
            div {
                h4 { "{entry.title}" }
                p { class: "muted", "{entry.category} · {day}" }
            }
            span { class: "history-progress", "{entry.progress}%" }
        }
    }
}

#[component]
fn GoalRow(goal: Goal) -> Element {
    let percent = goal.progress_percent();
    rsx! {
        div { class: "goal-row",
            div { class: "goal-title",
                span { "{goal.title}" }
                span { class: "muted", "{goal.current}/{goal.total}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {percent}%" }
            }
        }
    }
}

#[component]
fn ResultRow(result: LessonResult) -> Element {
    rsx! {
        li { class: "result-row",
            span { "{result.lesson_id}" }
            span { "{result.score}/{result.total} ({result.score_percent}%)" }
            if result.timed_out {
                span { class: "badge", "Time ran out" }
            }
        }
    }
}
