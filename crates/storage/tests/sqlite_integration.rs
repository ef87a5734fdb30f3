use chrono::Duration;
use course_core::model::{CourseId, LessonId, Role, UserId, UserProfile};
use course_core::time::fixed_now;
use storage::repository::{ResumeRepository, SessionRecord, SessionRepository, Storage};
use storage::sqlite::SqliteRepository;

fn session(access: &str, with_user: bool) -> SessionRecord {
    SessionRecord {
        access_token: access.to_string(),
        refresh_token: format!("{access}-refresh"),
        user: with_user.then(|| UserProfile {
            id: UserId::new(7),
            username: "grace".into(),
            email: "grace@example.com".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            role: Role::Instructor,
        }),
        saved_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_session_roundtrip_keeps_profile() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_session?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_session().await.unwrap().is_none());

    let saved = session("tok-1", true);
    repo.save_session(&saved).await.unwrap();
    let loaded = repo.load_session().await.unwrap().expect("session");
    assert_eq!(loaded, saved);

    let mut replaced = session("tok-2", false);
    replaced.saved_at = fixed_now() + Duration::minutes(5);
    repo.save_session(&replaced).await.unwrap();
    let loaded = repo.load_session().await.unwrap().expect("session");
    assert_eq!(loaded.access_token, "tok-2");
    assert!(loaded.user.is_none());
    assert_eq!(loaded.saved_at, replaced.saved_at);

    repo.clear_session().await.unwrap();
    assert!(repo.load_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_resume_position_upserts_per_course() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_resume?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running migrations twice is a no-op.
    repo.migrate().await.expect("migrate again");

    let course = CourseId::new(3);
    assert_eq!(repo.last_lesson(course).await.unwrap(), None);

    repo.remember_lesson(course, LessonId::new(30), fixed_now())
        .await
        .unwrap();
    repo.remember_lesson(course, LessonId::new(31), fixed_now())
        .await
        .unwrap();
    repo.remember_lesson(CourseId::new(4), LessonId::new(40), fixed_now())
        .await
        .unwrap();

    assert_eq!(repo.last_lesson(course).await.unwrap(), Some(LessonId::new(31)));
    assert_eq!(
        repo.last_lesson(CourseId::new(4)).await.unwrap(),
        Some(LessonId::new(40))
    );
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.sessions.save_session(&session("tok", true)).await.unwrap();
    storage
        .resume
        .remember_lesson(CourseId::new(1), LessonId::new(2), fixed_now())
        .await
        .unwrap();

    assert!(storage.sessions.load_session().await.unwrap().is_some());
    assert_eq!(
        storage.resume.last_lesson(CourseId::new(1)).await.unwrap(),
        Some(LessonId::new(2))
    );
}
