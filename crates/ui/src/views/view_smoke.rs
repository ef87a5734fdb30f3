use course_core::model::Role;
use services::HttpMethod;

use super::test_harness::{StubBackend, ViewKind, setup_view_harness, user_with_role};

const COURSES_JSON: &str = r#"[
    {"id": 7, "title": "Rust basics", "description": "Ownership and borrowing."},
    {"id": 8, "title": "Async Rust", "is_published": false}
]"#;

const COURSE_JSON: &str = r#"{
    "id": 7,
    "title": "Rust basics",
    "modules": [
        {"id": 1, "title": "Start", "position": 1, "lessons": [
            {"id": 1, "title": "Install", "content": "Run **rustup**."},
            {"id": 2, "title": "Hello", "content": "fn main() {}"}
        ]},
        {"id": 2, "title": "Next", "position": 2, "lessons": [
            {"id": 3, "title": "Ownership", "content": "Moves."}
        ]}
    ]
}"#;

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, StubBackend::new(), None).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Username"), "missing username field in {html}");
    assert!(html.contains("Sign in"), "missing submit button in {html}");
    assert!(html.contains("Create one"), "missing register link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_smoke_lists_published_courses() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/", 200, COURSES_JSON);
    let mut harness = setup_view_harness(ViewKind::Catalog, backend, None).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rust basics"), "missing course in {html}");
    assert!(html.contains("Enroll"), "missing enroll button in {html}");
    assert!(!html.contains("Async Rust"), "draft course shown in {html}");
    assert!(
        !harness.backend.paths().contains(&"/enrollments/".to_string()),
        "signed-out catalog asked for enrollments"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_smoke_offers_continue_when_enrolled() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/", 200, COURSES_JSON);
    backend.on(
        HttpMethod::Get,
        "/enrollments/",
        200,
        r#"[{"id": 3, "course": 7, "completed_lessons": []}]"#,
    );
    let user = Some(user_with_role(Role::Student));
    let mut harness = setup_view_harness(ViewKind::Catalog, backend, user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Continue"), "missing continue button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn player_view_smoke_renders_resumed_progress() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/7/", 200, COURSE_JSON);
    backend.on(
        HttpMethod::Get,
        "/enrollments/course/7/",
        200,
        r#"{"id": 3, "course": 7, "completed_lessons": [1]}"#,
    );
    let user = Some(user_with_role(Role::Student));
    let mut harness = setup_view_harness(ViewKind::Player(7), backend, user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1 of 3 lessons complete (33%)"), "missing progress in {html}");
    assert!(html.contains("Ownership"), "missing sidebar lesson in {html}");
    assert!(html.contains("<strong>rustup</strong>"), "missing rendered lesson in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn player_view_smoke_reports_missing_enrollment() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/7/", 200, COURSE_JSON);
    let user = Some(user_with_role(Role::Student));
    let mut harness = setup_view_harness(ViewKind::Player(7), backend, user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("You are not enrolled in this course yet."),
        "missing enrollment error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn player_view_smoke_returns_to_sign_in_when_refresh_is_rejected() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/7/", 401, r#"{"detail": "Token expired."}"#);
    backend.on(
        HttpMethod::Post,
        "/auth/token/refresh/",
        401,
        r#"{"detail": "Token is invalid or expired"}"#,
    );
    let user = Some(user_with_role(Role::Student));
    let mut harness = setup_view_harness(ViewKind::Player(7), backend, user).await;

    harness.rebuild();
    assert!(harness.render().contains("Ada Lovelace"), "sidebar should start signed in");

    for _ in 0..5 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Username"), "not on the sign-in form: {html}");
    assert!(!html.contains("Ada Lovelace"), "sidebar still shows the user: {html}");
    assert!(!html.contains("Sign out"), "sidebar still offers sign out: {html}");
    assert!(
        harness.backend.paths().contains(&"/auth/token/refresh/".to_string()),
        "refresh was not attempted"
    );
    assert!(
        harness.storage.sessions.load_session().await.unwrap().is_none(),
        "stored session survived a rejected refresh"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_turns_learners_away() {
    let user = Some(user_with_role(Role::Student));
    let mut harness = setup_view_harness(ViewKind::Dashboard, StubBackend::new(), user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("The dashboard is available to instructors."),
        "missing notice in {html}"
    );
    assert!(harness.backend.paths().is_empty(), "learner dashboard hit the backend");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_lists_own_courses() {
    let backend = StubBackend::new();
    backend.on(HttpMethod::Get, "/courses/", 200, COURSES_JSON);
    let user = Some(user_with_role(Role::Instructor));
    let mut harness = setup_view_harness(ViewKind::Dashboard, backend, user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Async Rust"), "missing draft course in {html}");
    assert!(html.contains("Draft"), "missing status badge in {html}");
    assert!(html.contains("Create course"), "missing form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn modules_view_smoke_sorts_by_position() {
    let backend = StubBackend::new();
    backend.on(
        HttpMethod::Get,
        "/modules/?course=7",
        200,
        r#"[
            {"id": 2, "title": "Later", "position": 2},
            {"id": 1, "title": "First", "position": 1}
        ]"#,
    );
    let user = Some(user_with_role(Role::Instructor));
    let mut harness = setup_view_harness(ViewKind::CourseModules(7), backend, user).await;

    harness.settle().await;
    let html = harness.render();
    let first = html.find("1. First").expect("first module rendered");
    let later = html.find("2. Later").expect("second module rendered");
    assert!(first < later, "modules out of order in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn questions_view_smoke_renders_kind_and_points() {
    let backend = StubBackend::new();
    backend.on(
        HttpMethod::Get,
        "/questions/?quiz=4",
        200,
        r#"[{"id": 9, "text": "Is Rust memory safe?", "question_type": "true_false", "points": 3}]"#,
    );
    let user = Some(user_with_role(Role::Instructor));
    let mut harness = setup_view_harness(ViewKind::QuizQuestions(4), backend, user).await;

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Is Rust memory safe?"), "missing question in {html}");
    assert!(html.contains("True / false"), "missing kind label in {html}");
    assert!(html.contains("3 pts"), "missing points in {html}");
}
