use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use tracing::warn;

use crate::context::{AppContext, CurrentUser, use_current_user_provider};
use crate::views::{
    CatalogView, CourseModulesView, DashboardView, LessonQuizzesView, LoginView,
    ModuleLessonsView, PlayerView, ProfileView, QuizQuestionsView, RegisterView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CatalogView)] Catalog {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[route("/courses/:course_id", PlayerView)] Player { course_id: u64 },
        #[route("/profile", ProfileView)] Profile {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/dashboard/courses/:course_id", CourseModulesView)] DashboardCourse { course_id: u64 },
        #[route("/dashboard/modules/:module_id", ModuleLessonsView)] DashboardModule { module_id: u64 },
        #[route("/dashboard/lessons/:lesson_id", LessonQuizzesView)] DashboardLesson { lesson_id: u64 },
        #[route("/dashboard/quizzes/:quiz_id", QuizQuestionsView)] DashboardQuiz { quiz_id: u64 },
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_current_user_provider(&ctx);
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub(crate) fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut user = use_context::<CurrentUser>();
    let signed_in = user.get();
    let can_author = user.can_author();

    rsx! {
        nav { class: "sidebar",
            h1 { "Coursehub" }
            ul {
                li { Link { to: Route::Catalog {}, "Courses" } }
                if can_author {
                    li { Link { to: Route::Dashboard {}, "Dashboard" } }
                }
                if signed_in.is_some() {
                    li { Link { to: Route::Profile {}, "Profile" } }
                }
            }
            div { class: "sidebar-footer",
                match signed_in {
                    Some(profile) => rsx! {
                        p { class: "sidebar-user", "{profile.display_name()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let auth = ctx.auth();
                                spawn(async move {
                                    if let Err(err) = auth.logout().await {
                                        warn!(error = %err, "sign out failed");
                                    }
                                    user.set(None);
                                    let _ = navigator.push(Route::Login {});
                                });
                            },
                            "Sign out"
                        }
                    },
                    None => rsx! {
                        Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
                    },
                }
            }
        }
    }
}
