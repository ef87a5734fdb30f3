#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use course_core::model::{Role, UserId, UserProfile};
use course_core::time::fixed_now;
use services::{ApiError, ApiRequest, ApiResponse, AppServices, Clock, HttpTransport};
use storage::{SessionRecord, Storage};

/// Answers requests from a queue and records every request it saw.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Option<ApiResponse>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Some(ApiResponse::new(status, body)));
    }

    /// Queue a connection failure.
    pub fn drop_connection(&self) {
        self.replies.lock().unwrap().push_back(None);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(ApiError::Network("connection reset".into())),
            None => panic!("unexpected request: {} {}", request.method.as_str(), request.path),
        }
    }
}

pub fn student() -> UserProfile {
    UserProfile {
        id: UserId::new(11),
        username: "ada".into(),
        email: "ada@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        role: Role::Student,
    }
}

pub fn app_services(transport: &Arc<ScriptedTransport>, storage: &Storage) -> AppServices {
    let transport: Arc<dyn HttpTransport> = transport.clone();
    AppServices::with_transport(transport, storage, Clock::fixed(fixed_now()))
}

/// Services with a saved session already restored.
pub async fn signed_in(transport: &Arc<ScriptedTransport>, storage: &Storage) -> AppServices {
    storage
        .sessions
        .save_session(&SessionRecord {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            user: Some(student()),
            saved_at: fixed_now(),
        })
        .await
        .unwrap();
    let services = app_services(transport, storage);
    services.auth().restore().await.unwrap();
    services
}

/// Course 7: module 1 holds lessons 1 and 2, module 2 holds lesson 3.
pub const COURSE_JSON: &str = r#"{
    "id": 7,
    "title": "Rust basics",
    "modules": [
        {"id": 1, "title": "Start", "position": 1, "lessons": [
            {"id": 1, "title": "Install", "content": "Run rustup."},
            {"id": 2, "title": "Hello", "content": "fn main() {}"}
        ]},
        {"id": 2, "title": "Next", "position": 2, "lessons": [
            {"id": 3, "title": "Ownership", "content": "Moves."}
        ]}
    ]
}"#;
