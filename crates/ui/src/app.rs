use dioxus::prelude::*;
use dioxus_router::Router;

use crate::app_state::AppState;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    use_context_provider(|| AppState::new(None));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "EnglishFlow" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
