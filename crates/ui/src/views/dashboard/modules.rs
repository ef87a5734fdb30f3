use course_core::model::{CourseId, Module, ModuleId};
use dioxus::prelude::*;
use dioxus_router::Link;

use super::shared::{DashboardHeader, InstructorsOnly, RowActions};
use crate::context::{AppContext, use_session_guard};
use crate::routes::Route;
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FormFeedback, ModuleForm};

#[component]
pub fn CourseModulesView(course_id: u64) -> Element {
    rsx! {
        InstructorsOnly { ModulesScreen { course_id: CourseId::new(course_id) } }
    }
}

#[component]
fn ModulesScreen(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let guard = use_session_guard();
    let instructor = ctx.instructor();
    let mut form = use_signal(ModuleForm::default);
    let mut editing = use_signal(|| None::<ModuleId>);
    let mut armed = use_signal(|| None::<ModuleId>);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saving = use_signal(|| false);

    let instructor_for_resource = instructor.clone();
    let resource = use_resource(move || {
        let instructor = instructor_for_resource.clone();
        async move {
            let mut modules = instructor
                .modules(course_id)
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            modules.sort_by_key(|module| module.position);
            Ok::<_, ViewError>(modules)
        }
    });

    let instructor_for_save = instructor.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let instructor = instructor_for_save.clone();
        let mut values = form();
        if values.position.trim().is_empty() {
            let loaded = resource
                .value()
                .read()
                .as_ref()
                .and_then(|result| result.as_ref().ok())
                .cloned()
                .unwrap_or_default();
            values.position = ModuleForm::next_after(&loaded).position;
        }
        let draft = values.to_draft(course_id);
        let target = editing();
        saving.set(true);
        spawn(async move {
            let result = match target {
                Some(id) => instructor.update_module(id, &draft).await,
                None => instructor.create_module(&draft).await,
            };
            match result {
                Ok(_) => {
                    form.set(ModuleForm::default());
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

    let remove = use_callback(move |id: ModuleId| {
        let instructor = instructor.clone();
        spawn(async move {
            saving.set(true);
            match instructor.delete_module(id).await {
                Ok(()) => {
                    armed.set(None);
                    if editing() == Some(id) {
                        editing.set(None);
                        form.set(ModuleForm::default());
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
                title: "Modules",
                subtitle: "Modules group lessons and are shown in position order.",
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
                ViewState::Ready(modules) => {
                    let empty = modules.is_empty();
                    let rows = modules.into_iter().map(|module: Module| {
                        let id = module.id;
                        let key = id.to_string();
                        let label = format!("{}. {}", module.position, module.title);
                        let lesson_count = module.lessons.len();
                        rsx! {
                            li { key: "{key}", class: "dashboard-row",
                                Link { to: Route::DashboardModule { module_id: id.value() }, "{label}" }
                                if lesson_count > 0 {
                                    span { class: "badge", "{lesson_count} lessons" }
                                }
                                RowActions {
                                    armed: armed() == Some(id),
                                    disabled: saving(),
                                    on_edit: move |()| {
                                        form.set(ModuleForm::from_module(&module));
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
                            p { class: "empty", "No modules yet." }
                        }
                        ul { class: "dashboard-list", {rows} }
                    }
                }
            }
            form { class: "dashboard-form", onsubmit: on_submit,
                h3 {
                    if editing().is_some() { "Edit module" } else { "New module" }
                }
                FormBanner { feedback: current.clone(), placed: vec!["title", "position"] }
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
                    span { "Position" }
                    input {
                        r#type: "number",
                        min: "1",
                        placeholder: "After the last module",
                        value: "{values.position}",
                        oninput: move |evt| form.write().position = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "position" }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if editing().is_some() { "Save changes" } else { "Add module" }
                    }
                    if editing().is_some() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                editing.set(None);
                                form.set(ModuleForm::default());
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
