use flow_core::model::{LessonId, LessonResult, LessonSession, Level, UserId};
use storage::{Storage, StorageError};

#[tokio::test]
async fn seeded_storage_serves_catalog_by_level() {
    let storage = Storage::in_memory().expect("seeded storage");

    let a1 = storage.catalog.courses_for_level(Level::A1).await.unwrap();
    assert_eq!(a1.len(), 2);
    assert!(a1.iter().all(|c| c.level() == Level::A1));

    let c2 = storage.catalog.courses_for_level(Level::C2).await.unwrap();
    assert!(c2.is_empty(), "no bundled C2 courses");
}

#[tokio::test]
async fn seeded_lessons_start_a_session() {
    let storage = Storage::in_memory().expect("seeded storage");
    let lesson_id = LessonId::new("a1-basics").unwrap();

    let questions = storage.lessons.load_questions(&lesson_id).await.unwrap();
    let session = LessonSession::new(lesson_id, questions, 1800).unwrap();
    assert_eq!(session.total(), 4);
    assert_eq!(session.current_question().options().len(), 4);
}

#[tokio::test]
async fn unknown_lesson_is_not_found() {
    let storage = Storage::in_memory().expect("seeded storage");
    let err = storage
        .lessons
        .load_questions(&LessonId::new("z9-nothing").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, StorageError::NotFound);
}

#[tokio::test]
async fn progress_round_trips_through_trait_object() {
    let storage = Storage::in_memory().expect("seeded storage");
    let user = UserId::random();
    let result = LessonResult {
        lesson_id: LessonId::new("a1-grammar").unwrap(),
        score: 3,
        total: 4,
        score_percent: 75,
        elapsed_secs: 120,
        timed_out: false,
    };

    storage.progress.record_lesson_result(user, &result).await.unwrap();
    assert_eq!(storage.progress.results_for(user).await.unwrap(), vec![result]);
}
