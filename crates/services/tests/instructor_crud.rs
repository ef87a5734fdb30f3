mod support;

use course_core::model::{CourseId, ModuleId};
use services::{ApiError, HttpMethod, ModuleDraft};
use storage::Storage;
use support::{ScriptedTransport, signed_in};

#[tokio::test]
async fn modules_are_listed_and_created_under_their_course() {
    let transport = ScriptedTransport::new();
    let storage = Storage::in_memory();
    let app = signed_in(&transport, &storage).await;
    let instructor = app.instructor();

    transport.reply(200, r#"[{"id": 1, "title": "Start", "position": 1}]"#);
    let modules = instructor.modules(CourseId::new(7)).await.unwrap();
    assert_eq!(modules.len(), 1);

    transport.reply(201, r#"{"id": 2, "title": "Next", "position": 2}"#);
    let draft = ModuleDraft {
        course: CourseId::new(7),
        title: "Next".into(),
        position: 2,
    };
    let created = instructor.create_module(&draft).await.unwrap();
    assert_eq!(created.id, ModuleId::new(2));

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/modules/?course=7");
    assert_eq!(requests[1].method, HttpMethod::Post);
    assert_eq!(requests[1].path, "/modules/");
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["course"], 7);
    assert_eq!(body["position"], 2);
    assert_eq!(requests[1].bearer.as_deref(), Some("access-1"));
}

#[tokio::test]
async fn publishing_patches_only_the_flag() {
    let transport = ScriptedTransport::new();
    let storage = Storage::in_memory();
    let app = signed_in(&transport, &storage).await;

    transport.reply(200, r#"{"id": 7, "title": "Rust basics", "is_published": true}"#);
    let course = app
        .instructor()
        .set_published(CourseId::new(7), true)
        .await
        .unwrap();
    assert!(course.is_published);

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Patch);
    assert_eq!(request.path, "/courses/7/");
    assert_eq!(
        request.body.as_ref().unwrap(),
        &serde_json::json!({ "is_published": true })
    );
}

#[tokio::test]
async fn rejected_draft_carries_field_errors() {
    let transport = ScriptedTransport::new();
    let storage = Storage::in_memory();
    let app = signed_in(&transport, &storage).await;

    transport.reply(400, r#"{"title": ["This field may not be blank."]}"#);
    let draft = ModuleDraft {
        course: CourseId::new(7),
        title: String::new(),
        position: 1,
    };
    let err = app.instructor().create_module(&draft).await.unwrap_err();
    match err {
        ApiError::Validation(errors) => {
            assert_eq!(errors.fields["title"], vec!["This field may not be blank.".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_accepts_empty_response() {
    let transport = ScriptedTransport::new();
    let storage = Storage::in_memory();
    let app = signed_in(&transport, &storage).await;

    transport.reply(204, "");
    app.instructor().delete_module(ModuleId::new(2)).await.unwrap();
    assert_eq!(transport.requests()[0].method, HttpMethod::Delete);
    assert_eq!(transport.paths(), vec!["/modules/2/".to_string()]);
}

#[tokio::test]
async fn learners_get_forbidden() {
    let transport = ScriptedTransport::new();
    let storage = Storage::in_memory();
    let app = signed_in(&transport, &storage).await;

    transport.reply(403, r#"{"detail": "You do not have permission to perform this action."}"#);
    let err = app.instructor().courses().await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden));
}
