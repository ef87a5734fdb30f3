use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use course_core::model::{Role, UserId, UserProfile};
use course_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, Router};
use services::{
    ApiError, ApiRequest, ApiResponse, AppServices, AuthService, CatalogService, Clock,
    HttpMethod, HttpTransport, InstructorService, PlayerService, QuizService,
};
use storage::{SessionRecord, Storage};

use crate::context::{UiApp, build_app_context, use_current_user_provider};
use crate::routes::Sidebar;
use crate::views::{
    CatalogView, CourseModulesView, DashboardView, LoginView, PlayerView, QuizQuestionsView,
};

/// Canned backend keyed by method and path. Unknown routes answer 404.
#[derive(Default)]
pub struct StubBackend {
    routes: Mutex<HashMap<String, (u16, String)>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(route_key(method, path), (status, body.to_string()));
    }

    pub fn paths(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.path.clone())
            .collect()
    }
}

fn route_key(method: HttpMethod, path: &str) -> String {
    format!("{} {path}", method.as_str())
}

#[async_trait]
impl HttpTransport for StubBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request.clone());
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(&route_key(request.method, &request.path))
            .cloned();
        Ok(match route {
            Some((status, body)) => ApiResponse::new(status, body),
            None => ApiResponse::new(404, r#"{"detail":"Not found."}"#),
        })
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn player(&self) -> Arc<PlayerService> {
        self.services.player()
    }

    fn quizzes(&self) -> Arc<QuizService> {
        self.services.quizzes()
    }

    fn instructor(&self) -> Arc<InstructorService> {
        self.services.instructor()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Catalog,
    Player(u64),
    Dashboard,
    CourseModules(u64),
    QuizQuestions(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_current_user_provider(&ctx);
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[layout(HarnessLayout)]
        #[route("/")] Root {},
        #[route("/login", LoginView)] Login {},
}

#[component]
fn HarnessLayout() -> Element {
    rsx! {
        Sidebar {}
        Outlet::<TestRoute> {}
    }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Catalog => rsx! { CatalogView {} },
        ViewKind::Player(course_id) => rsx! { PlayerView { course_id } },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::CourseModules(course_id) => rsx! { CourseModulesView { course_id } },
        ViewKind::QuizQuestions(quiz_id) => rsx! { QuizQuestionsView { quiz_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<StubBackend>,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..5 {
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

pub fn user_with_role(role: Role) -> UserProfile {
    UserProfile {
        id: UserId::new(11),
        username: "ada".into(),
        email: "ada@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        role,
    }
}

/// Mount `view` against `backend`, signed in as `user` when given.
pub async fn setup_view_harness(
    view: ViewKind,
    backend: Arc<StubBackend>,
    user: Option<UserProfile>,
) -> ViewHarness {
    let storage = Storage::in_memory();
    if let Some(user) = user {
        storage
            .sessions
            .save_session(&SessionRecord {
                access_token: "access-1".into(),
                refresh_token: "refresh-1".into(),
                user: Some(user),
                saved_at: fixed_now(),
            })
            .await
            .expect("save session");
    }

    let transport: Arc<dyn HttpTransport> = backend.clone();
    let services = AppServices::with_transport(transport, &storage, Clock::fixed(fixed_now()));
    services.auth().restore().await.expect("restore session");

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );

    ViewHarness {
        dom,
        backend,
        storage,
    }
}
