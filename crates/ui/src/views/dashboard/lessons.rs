use course_core::model::{Lesson, LessonId, ModuleId};
use dioxus::prelude::*;
use dioxus_router::Link;

use super::shared::{DashboardHeader, InstructorsOnly, RowActions};
use crate::context::{AppContext, use_session_guard};
use crate::routes::Route;
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FormFeedback, LessonForm, format_minutes};

#[component]
pub fn ModuleLessonsView(module_id: u64) -> Element {
    rsx! {
        InstructorsOnly { LessonsScreen { module_id: ModuleId::new(module_id) } }
    }
}

#[component]
fn LessonsScreen(module_id: ModuleId) -> Element {
    let ctx = use_context::<AppContext>();
    let guard = use_session_guard();
    let instructor = ctx.instructor();
    let mut form = use_signal(LessonForm::default);
    let mut editing = use_signal(|| None::<LessonId>);
    let mut armed = use_signal(|| None::<LessonId>);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saving = use_signal(|| false);

    let instructor_for_resource = instructor.clone();
    let resource = use_resource(move || {
        let instructor = instructor_for_resource.clone();
        async move {
            instructor
                .lessons(module_id)
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
        let draft = form.read().to_draft(module_id);
        let target = editing();
        saving.set(true);
        spawn(async move {
            let result = match target {
                Some(id) => instructor.update_lesson(id, &draft).await,
                None => instructor.create_lesson(&draft).await,
            };
            match result {
                Ok(_) => {
                    form.set(LessonForm::default());
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

    let remove = use_callback(move |id: LessonId| {
        let instructor = instructor.clone();
        spawn(async move {
            saving.set(true);
            match instructor.delete_lesson(id).await {
                Ok(()) => {
                    armed.set(None);
                    if editing() == Some(id) {
                        editing.set(None);
                        form.set(LessonForm::default());
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
                title: "Lessons",
                subtitle: "Lesson content is written in Markdown.",
                show_back: true,
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
                ViewState::Ready(lessons) => {
                    let empty = lessons.is_empty();
                    let rows = lessons.into_iter().map(|lesson: Lesson| {
                        let id = lesson.id;
                        let key = id.to_string();
                        let title = lesson.title.clone();
                        let duration = lesson.duration.map(format_minutes);
                        rsx! {
                            li { key: "{key}", class: "dashboard-row",
                                Link { to: Route::DashboardLesson { lesson_id: id.value() }, "{title}" }
                                if let Some(duration) = duration {
                                    span { class: "badge", "{duration}" }
                                }
                                RowActions {
                                    armed: armed() == Some(id),
                                    disabled: saving(),
                                    on_edit: move |()| {
                                        form.set(LessonForm::from_lesson(&lesson));
                                        editing.set(Some(id));
                                    },
                                    on_arm: move |on: bool| armed.set(on.then_some(id)),
                                    on_delete: move |()| remove.call(id),
                                }
                            }
                        }
                    });
                    rsx! {
                        if empty {
                            p { class: "empty", "No lessons yet." }
                        }
                        ul { class: "dashboard-list", {rows} }
                    }
                }
            }
            form { class: "dashboard-form", onsubmit: on_submit,
                h3 {
                    if editing().is_some() { "Edit lesson" } else { "New lesson" }
                }
                FormBanner {
                    feedback: current.clone(),
                    placed: vec!["title", "content", "video_url", "duration"],
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
                    span { "Content" }
                    textarea {
                        class: "lesson-editor",
                        rows: "12",
                        value: "{values.content}",
                        oninput: move |evt| form.write().content = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "content" }
                }
                div { class: "field-row",
                    label { class: "field",
                        span { "Video URL" }
                        input {
                            r#type: "url",
                            value: "{values.video_url}",
                            oninput: move |evt| form.write().video_url = evt.value(),
                        }
                        FieldError { feedback: current.clone(), field: "video_url" }
                    }
                    label { class: "field",
                        span { "Duration (minutes)" }
                        input {
                            r#type: "number",
                            min: "0",
                            value: "{values.duration}",
                            oninput: move |evt| form.write().duration = evt.value(),
                        }
                        FieldError { feedback: current.clone(), field: "duration" }
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if editing().is_some() { "Save changes" } else { "Add lesson" }
                    }
                    if editing().is_some() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                editing.set(None);
                                form.set(LessonForm::default());
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
