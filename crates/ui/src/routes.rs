use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use flow_core::model::Level;
use flow_core::validation::AuthMode;

use crate::app_state::AppState;
use crate::components::{AuthModal, LevelSelectionModal};
use crate::views::{DashboardView, LandingView, LessonView, ProfileView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/lesson/:lesson_id", LessonView)] Lesson { lesson_id: String },
        #[route("/profile", ProfileView)] Profile {},
}

#[component]
fn Layout() -> Element {
    let mut state = use_context::<AppState>();
    let navigator = use_navigator();

    let on_level = move |level: Level| {
        state.set_level(level);
        navigator.push(Route::Dashboard {});
    };
    let on_skip = move |()| {
        state.close_level_selection();
        navigator.push(Route::Dashboard {});
    };

    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
            if let Some(mode) = state.auth_modal() {
                AuthModal {
                    mode,
                    on_close: move |()| state.close_auth(),
                    on_success: move |user| state.signed_in(user),
                }
            }
            if state.level_modal_open() {
                LevelSelectionModal { on_select: on_level, on_skip }
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let mut state = use_context::<AppState>();
    let navigator = use_navigator();
    let user = state.user();

    rsx! {
        header { class: "site-header",
            Link { class: "brand", to: Route::Landing {},
                span { class: "brand-mark", "EF" }
                span { class: "brand-name", "EnglishFlow" }
            }
            nav { class: "site-nav",
                if let Some(user) = user {
                    Link { to: Route::Dashboard {}, "Courses" }
                    Link { to: Route::Profile {}, "Profile" }
                    span { class: "nav-user", "{user.name()}" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            state.sign_out();
                            navigator.push(Route::Landing {});
                        },
                        "Sign out"
                    }
                } else {
                    a { href: "#courses", "Courses" }
                    a { href: "#practice", "Practice" }
                    a { href: "#community", "Community" }
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| state.open_auth(AuthMode::Login),
                        "Sign in"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| state.open_auth(AuthMode::Register),
                        "Sign up"
                    }
                }
            }
        }
    }
}
