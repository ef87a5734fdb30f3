use course_core::model::{LessonId, Quiz, QuizId};
use dioxus::prelude::*;
use dioxus_router::Link;

use super::shared::{DashboardHeader, InstructorsOnly, RowActions};
use crate::context::{AppContext, use_session_guard};
use crate::routes::Route;
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FormFeedback, QuizForm};

#[component]
pub fn LessonQuizzesView(lesson_id: u64) -> Element {
    rsx! {
        InstructorsOnly { QuizzesScreen { lesson_id: LessonId::new(lesson_id) } }
    }
}

fn attempts_badge(quiz: &Quiz) -> String {
    match quiz.max_attempts {
        Some(max) => format!("{max} attempts"),
        None => "Unlimited attempts".to_string(),
    }
}

#[component]
fn QuizzesScreen(lesson_id: LessonId) -> Element {
    let ctx = use_context::<AppContext>();
    let guard = use_session_guard();
    let instructor = ctx.instructor();
    let mut form = use_signal(QuizForm::default);
    let mut editing = use_signal(|| None::<QuizId>);
    let mut armed = use_signal(|| None::<QuizId>);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saving = use_signal(|| false);

    let instructor_for_resource = instructor.clone();
    let resource = use_resource(move || {
        let instructor = instructor_for_resource.clone();
        async move {
            instructor
                .quizzes(lesson_id)
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
        let draft = form.read().to_draft(lesson_id);
        let target = editing();
        saving.set(true);
        spawn(async move {
            let result = match target {
                Some(id) => instructor.update_quiz(id, &draft).await,
                None => instructor.create_quiz(&draft).await,
            };
            match result {
                Ok(_) => {
                    form.set(QuizForm::default());
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

    let remove = use_callback(move |id: QuizId| {
        let instructor = instructor.clone();
        spawn(async move {
            saving.set(true);
            match instructor.delete_quiz(id).await {
                Ok(()) => {
                    armed.set(None);
                    if editing() == Some(id) {
                        editing.set(None);
                        form.set(QuizForm::default());
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
                title: "Quizzes",
                subtitle: "Quizzes attached to this lesson.",
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
                ViewState::Ready(quizzes) => {
                    let empty = quizzes.is_empty();
                    let rows = quizzes.into_iter().map(|quiz: Quiz| {
                        let id = quiz.id;
                        let key = id.to_string();
                        let title = quiz.title.clone();
                        let attempts = attempts_badge(&quiz);
                        rsx! {
                            li { key: "{key}", class: "dashboard-row",
                                Link { to: Route::DashboardQuiz { quiz_id: id.value() }, "{title}" }
                                span { class: "badge", "{attempts}" }
                                RowActions {
                                    armed: armed() == Some(id),
                                    disabled: saving(),
                                    on_edit: move |()| {
                                        form.set(QuizForm::from_quiz(&quiz));
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
                            p { class: "empty", "No quizzes yet." }
                        }
                        ul { class: "dashboard-list", {rows} }
                    }
                }
            }
            form { class: "dashboard-form", onsubmit: on_submit,
                h3 {
                    if editing().is_some() { "Edit quiz" } else { "New quiz" }
                }
                FormBanner {
                    feedback: current.clone(),
                    placed: vec!["title", "description", "max_attempts", "pass_mark"],
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
                        rows: "3",
                        value: "{values.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "description" }
                }
                div { class: "field-row",
                    label { class: "field",
                        span { "Max attempts" }
                        input {
                            r#type: "number",
                            min: "1",
                            placeholder: "Unlimited",
                            value: "{values.max_attempts}",
                            oninput: move |evt| form.write().max_attempts = evt.value(),
                        }
                        FieldError { feedback: current.clone(), field: "max_attempts" }
                    }
                    label { class: "field",
                        span { "Pass mark (%)" }
                        input {
                            r#type: "number",
                            min: "0",
                            max: "100",
                            value: "{values.pass_mark}",
                            oninput: move |evt| form.write().pass_mark = evt.value(),
                        }
                        FieldError { feedback: current.clone(), field: "pass_mark" }
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if editing().is_some() { "Save changes" } else { "Add quiz" }
                    }
                    if editing().is_some() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                editing.set(None);
                                form.set(QuizForm::default());
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
