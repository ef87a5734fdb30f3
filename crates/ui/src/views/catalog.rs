use course_core::model::CourseId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::{AppContext, use_session_guard};
use crate::routes::Route;
use crate::views::components::ErrorPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseCardVm, FormFeedback, map_course_cards};

#[component]
pub fn CatalogView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let guard = use_session_guard();
    let catalog = ctx.catalog();
    let auth = ctx.auth();
    let mut search = use_signal(String::new);
    let mut enrolling = use_signal(|| None::<CourseId>);
    let mut enroll_error = use_signal(|| None::<String>);

    let catalog_for_resource = catalog.clone();
    let resource = use_resource(move || {
        let catalog = catalog_for_resource.clone();
        let signed_in = auth.is_authenticated();
        async move {
            let courses = catalog
                .list_courses()
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            let enrollments = if signed_in {
                catalog
                    .my_enrollments()
                    .await
                    .map_err(|err| ViewError::from_api(&err))?
            } else {
                Vec::new()
            };
            Ok::<_, ViewError>(map_course_cards(&courses, &enrollments))
        }
    });

    let enroll = use_callback(move |course_id: CourseId| {
        let catalog = catalog.clone();
        spawn(async move {
            enrolling.set(Some(course_id));
            match catalog.enroll(course_id).await {
                Ok(_) => {
                    enroll_error.set(None);
                    let _ = navigator.push(Route::Player {
                        course_id: course_id.value(),
                    });
                }
                Err(err) => {
                    warn!(%course_id, error = %err, "enrollment failed");
                    if guard.ended_api(&err) {
                        enrolling.set(None);
                        return;
                    }
                    let feedback = FormFeedback::from_api(&err);
                    enroll_error.set(Some(feedback.banner.unwrap_or_else(|| err.to_string())));
                }
            }
            enrolling.set(None);
        });
    });

    let state = view_state_from_resource(&resource);
    let query = search().trim().to_lowercase();
    rsx! {
        div { class: "page catalog-page",
            header { class: "view-header",
                h2 { class: "view-title", "Courses" }
                input {
                    class: "search",
                    r#type: "search",
                    placeholder: "Search courses",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }
            if let Some(message) = enroll_error() {
                p { class: "form-banner", role: "alert", "{message}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        error: err,
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(cards) => {
                    let visible = cards
                        .iter()
                        .filter(|card| card.matches_query(&query))
                        .cloned()
                        .collect::<Vec<_>>();
                    let no_match = visible.is_empty();
                    let course_cards = visible.into_iter().map(|card| {
                        let key = card.id.to_string();
                        let busy = enrolling() == Some(card.id);
                        rsx! {
                            CourseCard { key: "{key}", card, busy, on_enroll: enroll }
                        }
                    });
                    rsx! {
                        if cards.is_empty() {
                            p { class: "empty", "No courses are published yet." }
                        } else if no_match {
                            p { class: "empty", "No courses match that search." }
                        }
                        ul { class: "course-grid", {course_cards} }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm, busy: bool, on_enroll: Callback<CourseId>) -> Element {
    let navigator = use_navigator();
    let course_id = card.id;
    rsx! {
        li { class: "course-card",
            h3 { class: "course-title", "{card.title}" }
            if let Some(instructor) = card.instructor_label.as_ref() {
                p { class: "course-instructor", "{instructor}" }
            }
            if !card.description.is_empty() {
                p { class: "course-description", "{card.description}" }
            }
            if card.enrolled {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Player {
                            course_id: course_id.value(),
                        });
                    },
                    "Continue"
                }
            } else {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_enroll.call(course_id),
                    if busy { "Enrolling..." } else { "Enroll" }
                }
            }
        }
    }
}
