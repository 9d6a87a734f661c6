use flow_core::model::{LessonId, LessonResult, Level};
use storage::repository::ProgressStore;

use super::test_harness::{ViewKind, learner, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_hero_and_tracks() {
    let mut harness = setup_view_harness(ViewKind::Landing, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("effectively"), "missing hero in {html}");
    assert!(html.contains("Start learning"), "missing cta in {html}");
    assert!(html.contains("C1-C2"), "missing tracks in {html}");
    assert!(html.contains("15K+"), "missing stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_links_signed_in_learner_to_courses() {
    let mut harness = setup_view_harness(ViewKind::Landing, Some(learner(Some(Level::A1))));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Go to my courses"), "missing link in {html}");
    assert!(!html.contains("Start learning"), "unexpected cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_level_courses() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(learner(Some(Level::B1))));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Anna!"), "missing greeting in {html}");
    assert!(html.contains("Conversation practice"), "missing course in {html}");
    assert!(html.contains("Business English"), "missing course in {html}");
    assert!(!html.contains("English basics"), "unexpected A1 course in {html}");
    assert!(!html.contains("coming soon"), "unexpected fallback in {html}");
    assert!(html.contains("Quick lesson"), "missing shortcut in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_falls_back_to_starter_courses() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(learner(Some(Level::C2))));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Courses for C2 are coming soon"),
        "missing fallback notice in {html}"
    );
    assert!(html.contains("English basics"), "missing A1 course in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_tiles_open_lessons_or_show_coming_soon() {
    let activities = storage::seed::bundled().unwrap().activities;
    let mut harness = setup_view_harness(ViewKind::Practice(activities), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("/lesson/practice-listening"), "missing listening link in {html}");
    assert!(html.contains("/lesson/practice-grammar"), "missing grammar link in {html}");
    assert_eq!(html.matches("Coming soon").count(), 1, "speaking should be pending in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_lesson_opens_from_its_bank() {
    let mut harness = setup_view_harness(
        ViewKind::Lesson("practice-writing".into()),
        Some(learner(Some(Level::B1))),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing counter in {html}");
    assert!(html.contains("Dear Sir or _____"), "missing first question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_asks_to_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, None);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Sign in to see your personal dashboard."),
        "missing prompt in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_defaults_and_results() {
    let user = learner(Some(Level::A2));
    let mut harness = setup_view_harness(ViewKind::Profile, Some(user.clone()));
    let result = LessonResult {
        lesson_id: LessonId::new("a1-basics").unwrap(),
        score: 3,
        total: 4,
        score_percent: 75,
        elapsed_secs: 120,
        timed_out: false,
    };
    harness
        .storage
        .progress
        .record_lesson_result(user.id(), &result)
        .await
        .expect("record result");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Member since November 2023"), "missing date in {html}");
    assert!(html.contains("Level A2"), "missing level in {html}");
    assert!(html.contains("First steps"), "missing achievement in {html}");
    assert!(html.contains("Complete 5 lessons this week"), "missing goal in {html}");
    assert!(html.contains("3/4 (75%)"), "missing result in {html}");
    assert!(html.contains("1/100"), "recorded lesson missing from count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(
        ViewKind::Lesson("a1-basics".to_owned()),
        Some(learner(Some(Level::A1))),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 4"), "missing counter in {html}");
    assert!(html.contains("30:00"), "missing timer in {html}");
    assert!(html.contains("Check answer"), "missing check button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_reports_unknown_lesson() {
    let mut harness = setup_view_harness(
        ViewKind::Lesson("no-such-lesson".to_owned()),
        Some(learner(Some(Level::A1))),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("find that lesson"), "missing error in {html}");
    assert!(html.contains("Back to courses"), "missing way back in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn level_modal_smoke_lists_all_levels() {
    let mut harness = setup_view_harness(ViewKind::LevelModal, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Choose your English level"), "missing title in {html}");
    for level in Level::ALL {
        let code = level.to_string();
        assert!(html.contains(&code), "missing {code} in {html}");
    }
    assert!(html.contains("Take placement test"), "missing test button in {html}");
}
