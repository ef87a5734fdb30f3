use course_core::model::{QuestionKind, QuizId};
use dioxus::prelude::*;

use crate::context::{AppContext, use_session_guard};
use crate::views::components::ErrorPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionVm, QuizVm};

#[component]
pub fn QuizPanel(quiz_id: QuizId, on_close: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();
    let guard = use_session_guard();
    let mut vm = use_signal(|| None::<QuizVm>);
    let mut submit_error = use_signal(|| None::<ViewError>);
    let mut submitting = use_signal(|| false);

    let quizzes_for_resource = quizzes.clone();
    let resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        async move {
            let loaded = QuizVm::load(&quizzes, quiz_id).await.inspect_err(|err| {
                guard.ended(*err);
            })?;
            vm.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let quizzes = quizzes.clone();
        spawn(async move {
            let Some(mut working) = vm.read().as_ref().cloned() else {
                return;
            };
            submitting.set(true);
            match working.submit(&quizzes).await {
                Ok(_) => {
                    submit_error.set(None);
                    vm.set(Some(working));
                }
                Err(err) => {
                    if !guard.ended(err) {
                        submit_error.set(Some(err));
                    }
                }
            }
            submitting.set(false);
        });
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        section { class: "quiz-panel",
            header { class: "quiz-header",
                button {
                    class: "btn btn-link quiz-close",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading quiz..." }
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
                ViewState::Ready(()) => {
                    let snapshot = vm.read().as_ref().map(|current| {
                        (
                            current.quiz().title.clone(),
                            current.quiz().description.clone(),
                            current.questions(),
                            current.attempts_label(),
                            current.points_label(),
                            current.can_submit(),
                            current.result_label(),
                        )
                    });
                    match snapshot {
                        None => rsx! {
                            p { "Loading quiz..." }
                        },
                        Some((title, description, questions, attempts, points, can_submit, result)) => {
                            let question_fields = questions.into_iter().map(|question| {
                                let key = question.id.to_string();
                                rsx! {
                                    QuestionField { key: "{key}", question, vm }
                                }
                            });
                            rsx! {
                                h3 { class: "quiz-title", "{title}" }
                                if let Some(description) = description {
                                    p { class: "quiz-description", "{description}" }
                                }
                                p { class: "quiz-attempts", "{points} · {attempts}" }
                                if let Some(result) = result {
                                    p { class: "quiz-result", role: "status", "{result}" }
                                }
                                if let Some(err) = submit_error() {
                                    p { class: "form-banner", role: "alert", "{err.message()}" }
                                }
                                form { class: "quiz-form", onsubmit: on_submit,
                                    {question_fields}
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "submit",
                                        disabled: !can_submit || submitting(),
                                        if submitting() { "Submitting..." } else { "Submit answers" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionField(question: QuestionVm, vm: Signal<Option<QuizVm>>) -> Element {
    let mut vm = vm;
    let question_id = question.id;
    let input_name = format!("question-{question_id}");
    let input_type = match question.kind {
        QuestionKind::MultipleChoice => "checkbox",
        QuestionKind::SingleChoice | QuestionKind::TrueFalse | QuestionKind::ShortAnswer => "radio",
    };
    rsx! {
        fieldset { class: "quiz-question",
            legend {
                "{question.text} "
                span { class: "quiz-points", "({question.points_label})" }
            }
            if question.kind == QuestionKind::ShortAnswer {
                textarea {
                    value: "{question.text_answer}",
                    oninput: move |evt| {
                        if let Some(current) = vm.write().as_mut() {
                            current.set_text(question_id, evt.value());
                        }
                    },
                }
            } else {
                for choice in question.choices {
                    label { key: "{choice.id}", class: "quiz-choice",
                        input {
                            r#type: input_type,
                            name: "{input_name}",
                            checked: choice.selected,
                            onchange: move |_| {
                                if let Some(current) = vm.write().as_mut() {
                                    current.choose(question_id, choice.id);
                                }
                            },
                        }
                        span { "{choice.text}" }
                    }
                }
            }
        }
    }
}
