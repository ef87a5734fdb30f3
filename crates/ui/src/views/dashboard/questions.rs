use course_core::model::{Question, QuestionId, QuestionKind, QuizId};
use dioxus::prelude::*;

use super::shared::{DashboardHeader, InstructorsOnly, RowActions};
use crate::context::{AppContext, use_session_guard};
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    FormFeedback, QuestionForm, parse_question_kind, question_kind_label, question_kind_value,
};

const KINDS: [QuestionKind; 4] = [
    QuestionKind::SingleChoice,
    QuestionKind::MultipleChoice,
    QuestionKind::TrueFalse,
    QuestionKind::ShortAnswer,
];

#[component]
pub fn QuizQuestionsView(quiz_id: u64) -> Element {
    rsx! {
        InstructorsOnly { QuestionsScreen { quiz_id: QuizId::new(quiz_id) } }
    }
}

#[component]
fn QuestionsScreen(quiz_id: QuizId) -> Element {
    let ctx = use_context::<AppContext>();
    let guard = use_session_guard();
    let instructor = ctx.instructor();
    let mut form = use_signal(QuestionForm::default);
    let mut editing = use_signal(|| None::<QuestionId>);
    let mut armed = use_signal(|| None::<QuestionId>);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saving = use_signal(|| false);

    let instructor_for_resource = instructor.clone();
    let resource = use_resource(move || {
        let instructor = instructor_for_resource.clone();
        async move {
            instructor
                .questions(quiz_id)
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
        let draft = form.read().to_draft(quiz_id);
        let target = editing();
        saving.set(true);
        spawn(async move {
            let result = match target {
                Some(id) => instructor.update_question(id, &draft).await,
                None => instructor.create_question(&draft).await,
            };
            match result {
                Ok(_) => {
                    form.set(QuestionForm::default());
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

    let remove = use_callback(move |id: QuestionId| {
        let instructor = instructor.clone();
        spawn(async move {
            saving.set(true);
            match instructor.delete_question(id).await {
                Ok(()) => {
                    armed.set(None);
                    if editing() == Some(id) {
                        editing.set(None);
                        form.set(QuestionForm::default());
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
    let selected_kind = question_kind_value(values.kind);
    let multiple = values.kind == QuestionKind::MultipleChoice;
    let fixed_rows = values.kind == QuestionKind::TrueFalse;
    let kind_options = KINDS.into_iter().map(|kind| {
        let value = question_kind_value(kind);
        let label = question_kind_label(kind);
        rsx! {
            option { key: "{value}", value: "{value}", selected: value == selected_kind, "{label}" }
        }
    });
    let choice_rows = values.choices.iter().cloned().enumerate().map(|(index, row)| {
        let number = index + 1;
        rsx! {
            li { key: "{index}", class: "choice-row",
                input {
                    r#type: if multiple { "checkbox" } else { "radio" },
                    name: "correct-choice",
                    title: "Correct answer",
                    checked: row.is_correct,
                    onchange: move |_| form.write().toggle_correct(index),
                }
                input {
                    r#type: "text",
                    placeholder: "Choice {number}",
                    readonly: fixed_rows,
                    value: "{row.text}",
                    oninput: move |evt| {
                        if let Some(choice) = form.write().choices.get_mut(index) {
                            choice.text = evt.value();
                        }
                    },
                }
                if !fixed_rows {
                    button {
                        class: "btn btn-link btn-danger-text",
                        r#type: "button",
                        onclick: move |_| form.write().remove_choice(index),
                        "Remove"
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "page dashboard-page",
            DashboardHeader {
                title: "Questions",
                subtitle: "Mark the correct answers; learners never see them.",
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
                ViewState::Ready(questions) => {
                    let empty = questions.is_empty();
                    let rows = questions.into_iter().map(|question: Question| {
                        let id = question.id;
                        let key = id.to_string();
                        let text = question.text.clone();
                        let kind = question_kind_label(question.kind);
                        let points = question.points;
                        rsx! {
                            li { key: "{key}", class: "dashboard-row",
                                span { class: "question-text", "{text}" }
                                span { class: "badge", "{kind}" }
                                span { class: "badge", "{points} pts" }
                                RowActions {
                                    armed: armed() == Some(id),
                                    disabled: saving(),
                                    on_edit: move |()| {
                                        form.set(QuestionForm::from_question(&question));
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
                            p { class: "empty", "No questions yet." }
                        }
                        ul { class: "dashboard-list", {rows} }
                    }
                }
            }
            form { class: "dashboard-form", onsubmit: on_submit,
                h3 {
                    if editing().is_some() { "Edit question" } else { "New question" }
                }
                if editing().is_some() {
                    p { class: "hint", "Correct answers are not sent back by the server; mark them again before saving." }
                }
                FormBanner {
                    feedback: current.clone(),
                    placed: vec!["text", "question_type", "points", "choices"],
                }
                label { class: "field",
                    span { "Question" }
                    textarea {
                        rows: "3",
                        value: "{values.text}",
                        oninput: move |evt| form.write().text = evt.value(),
                    }
                    FieldError { feedback: current.clone(), field: "text" }
                }
                div { class: "field-row",
                    label { class: "field",
                        span { "Type" }
                        select {
                            value: "{selected_kind}",
                            onchange: move |evt| {
                                if let Some(kind) = parse_question_kind(&evt.value()) {
                                    form.write().set_kind(kind);
                                }
                            },
                            {kind_options}
                        }
                        FieldError { feedback: current.clone(), field: "question_type" }
                    }
                    label { class: "field",
                        span { "Points" }
                        input {
                            r#type: "number",
                            min: "1",
                            value: "{values.points}",
                            oninput: move |evt| form.write().points = evt.value(),
                        }
                        FieldError { feedback: current.clone(), field: "points" }
                    }
                }
                if values.kind != QuestionKind::ShortAnswer {
                    fieldset { class: "choices",
                        legend { "Choices" }
                        ul { {choice_rows} }
                        if !fixed_rows {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| form.write().add_choice(),
                                "Add choice"
                            }
                        }
                        FieldError { feedback: current.clone(), field: "choices" }
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if editing().is_some() { "Save changes" } else { "Add question" }
                    }
                    if editing().is_some() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: move |_| {
                                editing.set(None);
                                form.set(QuestionForm::default());
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
