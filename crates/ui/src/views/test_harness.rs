use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use flow_core::model::{Level, PracticeActivity, User, UserId};
use flow_core::time::{fixed_clock, fixed_now};
use services::{
    AppConfig, AppServices, AuthService, DashboardService, LessonService, PlacementService,
    ProfileService, SimulatedAssessment, SimulatedAuthProvider,
};
use storage::repository::Storage;

use crate::app_state::AppState;
use crate::components::LevelSelectionModal;
use crate::context::{UiApp, build_app_context};
use crate::views::dashboard::PracticeGrid;
use crate::views::{DashboardView, LandingView, LessonView, ProfileView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn placement(&self) -> Arc<PlacementService> {
        self.services.placement()
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Dashboard,
    Practice(Vec<PracticeActivity>),
    Lesson(String),
    Profile,
    LevelModal,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    user: Option<User>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| AppState::new(props.user.clone()));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Practice(activities) => rsx! { PracticeGrid { activities } },
        ViewKind::Lesson(lesson_id) => rsx! { LessonView { lesson_id } },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::LevelModal => rsx! {
            LevelSelectionModal { on_select: move |_| {}, on_skip: move |()| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuilds, then lets resources and effects settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// A signed-in learner at `level`, or without one.
pub fn learner(level: Option<Level>) -> User {
    let mut user =
        User::new(UserId::random(), "Anna", "anna@example.com", fixed_now()).expect("user");
    if let Some(level) = level {
        user.set_level(level);
    }
    user
}

pub fn setup_view_harness(view: ViewKind, user: Option<User>) -> ViewHarness {
    let storage = Storage::in_memory().expect("bundled content");
    let config = AppConfig::default()
        .with_auth_delay_ms(0)
        .with_social_auth_delay_ms(0)
        .with_assessment_delay_ms(0);
    let auth = Arc::new(SimulatedAuthProvider::new(
        config.auth_delay(),
        config.social_auth_delay(),
        fixed_clock(),
    ));
    let assessment = Arc::new(SimulatedAssessment::new(config.assessment_delay()));
    let services = AppServices::new(&storage, config, auth, assessment);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            user,
        },
    );

    ViewHarness { dom, storage }
}
