use dioxus::prelude::*;
use dioxus_router::Link;

use flow_core::validation::AuthMode;

use crate::app_state::AppState;
use crate::routes::Route;

const FEATURES: [(&str, &str); 6] = [
    (
        "Adaptive courses",
        "Lessons adjust to your level and learning pace",
    ),
    (
        "Voice practice",
        "An AI assistant that helps you polish pronunciation",
    ),
    ("Gamification", "Achievements, streaks and friendly competition"),
    ("Community", "Talk with other learners and take on group tasks"),
    ("Analytics", "Detailed progress statistics and recommendations"),
    ("Flexible schedule", "Study whenever it suits you, with reminders"),
];

const TRACKS: [(&str, &str, &str); 3] = [
    ("A1-A2", "Beginner", "Grammar basics and core vocabulary"),
    ("B1-B2", "Intermediate", "Conversation practice and harder grammar"),
    ("C1-C2", "Advanced", "Fluency and business English"),
];

const STATS: [(&str, &str); 4] = [
    ("15K+", "Active learners"),
    ("500+", "Interactive lessons"),
    ("95%", "Successful graduates"),
    ("30+", "Countries"),
];

const COMMUNITY: [(&str, &str); 3] = [
    ("Forums", "Discuss lessons and ask questions"),
    ("Speaking clubs", "Live practice with native speakers"),
    ("Mentors", "Personal help from experts"),
];

#[component]
pub fn LandingView() -> Element {
    let mut state = use_context::<AppState>();
    let signed_in = state.is_signed_in();

    rsx! {
        div { class: "landing",
            section { class: "hero",
                span { class: "badge", "English learning platform" }
                h1 {
                    "Learn English "
                    span { class: "accent", "effectively" }
                }
                p { class: "hero-lead",
                    "Personalised learning with adaptive courses, a voice assistant and gamification. From A1 to C2."
                }
                div { class: "hero-actions",
                    if signed_in {
                        Link { class: "btn btn-primary", to: Route::Dashboard {}, "Go to my courses" }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| state.open_auth(AuthMode::Register),
                            "Start learning"
                        }
                    }
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| {
                            if state.is_signed_in() {
                                state.open_level_selection();
                            } else {
                                state.open_auth(AuthMode::Register);
                            }
                        },
                        "Choose a level"
                    }
                }
            }

            section { class: "features",
                h2 { "What the platform offers" }
                p { class: "section-lead", "Everything you need to learn English effectively" }
                div { class: "card-grid",
                    for (title, description) in FEATURES {
                        div { key: "{title}", class: "card feature-card",
                            h3 { "{title}" }
                            p { "{description}" }
                        }
                    }
                }
            }

            section { id: "courses", class: "tracks",
                h2 { "Courses for every level" }
                div { class: "card-grid",
                    for (range, title, description) in TRACKS {
                        div { key: "{range}", class: "card track-card",
                            span { class: "badge", "{range}" }
                            h3 { "{title}" }
                            p { "{description}" }
                        }
                    }
                }
            }

            section { id: "practice", class: "stats",
                for (number, label) in STATS {
                    div { key: "{label}", class: "stat",
                        div { class: "stat-number", "{number}" }
                        div { class: "stat-label", "{label}" }
                    }
                }
            }

            section { id: "community", class: "community",
                h2 { "Join the community" }
                div { class: "card-grid",
                    for (title, description) in COMMUNITY {
                        div { key: "{title}", class: "card",
                            h3 { "{title}" }
                            p { "{description}" }
                        }
                    }
                }
            }

            footer { class: "site-footer",
                p { "© 2024 EnglishFlow. All rights reserved." }
            }
        }
    }
}
