use course_core::model::{CourseId, CourseSummary};
use dioxus::prelude::*;
use dioxus_router::Link;

use super::shared::{DashboardHeader, InstructorsOnly, RowActions};
use crate::context::{AppContext, use_session_guard};
use crate::routes::Route;
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CourseForm, FormFeedback};

#[component]
pub fn DashboardView() -> Element {
    rsx! {
        InstructorsOnly { CoursesScreen {} }
    }
}

#[component]
fn CoursesScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let guard = use_session_guard();
    let instructor = ctx.instructor();
    let mut form = use_signal(CourseForm::default);
    let mut editing = use_signal(|| None::<CourseId>);
    let mut armed = use_signal(|| None::<CourseId>);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saving = use_signal(|| false);

    let instructor_for_resource = instructor.clone();
    let resource = use_resource(move || {
        let instructor = instructor_for_resource.clone();
        async move {
            instructor
                .courses()
                .await
                .map_err(|err| ViewError::from_api(&err))
        }
    });

    let instructor_for_save = instructor.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let instructor = instructor_for_save.clone();
        let draft = form.read().to_draft();
        let target = editing();
        saving.set(true);
        spawn(async move {
            let result = match target {
                Some(id) => instructor.update_course(id, &draft).await,
                None => instructor.create_course(&draft).await,
            };
            match result {
                Ok(_) => {
                    form.set(CourseForm::default());
                    editing.set(None);
                    feedback.set(FormFeedback::default());
                    let mut resource = resource;
                    resource.restart();
                }
                Err(err) => {
                    if !guard.ended_api(&err) {
                        feedback.set(FormFeedback::from_api(&err));
                    }
                }
            }
            saving.set(false);
        });
    };

    let instructor_for_publish = instructor.clone();
    let toggle_published = use_callback(move |(id, published): (CourseId, bool)| {
        let instructor = instructor_for_publish.clone();
        spawn(async move {
            saving.set(true);
            match instructor.set_published(id, published).await {
                Ok(_) => {
                    let mut resource = resource;
                    resource.restart();
                }
                Err(err) => {
                    if !guard.ended_api(&err) {
                        feedback.set(FormFeedback::from_api(&err));
                    }
                }
            }
            saving.set(false);
        });
    });

    let remove = use_callback(move |id: CourseId| {
        let instructor = instructor.clone();
        spawn(async move {
            saving.set(true);
            match instructor.delete_course(id).await {
                Ok(()) => {
                    armed.set(None);
                    if editing() == Some(id) {
                        editing.set(None);
                        form.set(CourseForm::default());
                    }
                    let mut resource = resource;
                    resource.restart();
                }
                Err(err) => {
                    if !guard.ended_api(&err) {
                        feedback.set(FormFeedback::from_api(&err));
                    }
                }
            }
            saving.set(false);
        });
    });

    let state = view_state_from_resource(&resource);
    let current = feedback();
    let values = form();
    rsx! {
        div { class: "page dashboard-page",
            DashboardHeader {
                title: "Your courses",
                subtitle: "Create courses, then add modules and lessons.",
                show_back: false,
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
                ViewState::Ready(courses) => {
                    let rows = courses.into_iter().map(|course: CourseSummary| {
                        let id = course.id;
                        let key = id.to_string();
                        let title = course.title.clone();
                        let published = course.is_published;
                        let status = if published { "Published" } else { "Draft" };
                        rsx! {
                            li { key: "{key}", class: "dashboard-row",
                                Link { to: Route::DashboardCourse { course_id: id.value() }, "{title}" }
                                span { class: "badge", "{status}" }
                                button {
                                    class: "btn btn-link",
                                    r#type: "button",
                                    disabled: saving(),
                                    onclick: move |_| toggle_published.call((id, !published)),
                                    if published { "Unpublish" } else { "Publish" }
                                }
                                RowActions {
                                    armed: armed() == Some(id),
                                    disabled: saving(),
                                    on_edit: move |()| {
                                        form.set(CourseForm::from_course(&course));
                                        editing.set(Some(id));
                                    },
                                    on_arm: move |on: bool| armed.set(on.then_some(id)),
                                    on_delete: move |()| remove.call(id),
                                }
                            }
                        }
                    });
                    rsx! {
                        ul { class: "dashboard-list", {rows} }
                    }
                }
            }
            form { class: "dashboard-form", onsubmit: on_submit,
                h3 {
                    if editing().is_some() { "Edit course" } else { "New course" }
                }
                FormBanner {
                    feedback: current.clone(),
                    placed: vec!["title", "description", "is_published"],
                }
                label { class: "field",
                    span { "Title" }
                    input {
                        r#type: "text",
                        value: "{values.title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "title" }
                }
                label { class: "field",
                    span { "Description" }
                    textarea {
                        value: "{values.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "description" }
                }
                label { class: "field field-inline",
                    input {
                        r#type: "checkbox",
                        checked: values.is_published,
                        onchange: move |evt| form.write().is_published = evt.checked(),
                    }
                    span { "Published" }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if editing().is_some() { "Save changes" } else { "Create course" }
                    }
                    if editing().is_some() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                editing.set(None);
                                form.set(CourseForm::default());
                                feedback.set(FormFeedback::default());
                            },
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
