use course_core::model::Role;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::Registration;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::components::{FieldError, FormBanner};
use crate::vm::FormFeedback;

const PLACED: [&str; 6] = [
    "username",
    "email",
    "password",
    "first_name",
    "last_name",
    "role",
];

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut current_user = use_context::<CurrentUser>();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut instructor = use_signal(|| false);
    let mut feedback = use_signal(FormFeedback::default);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let auth = ctx.auth();
        let registration = Registration {
            username: username().trim().to_string(),
            email: email().trim().to_string(),
            password: password(),
            first_name: first_name().trim().to_string(),
            last_name: last_name().trim().to_string(),
            role: if instructor() {
                Role::Instructor
            } else {
                Role::Student
            },
        };
        submitting.set(true);
        spawn(async move {
            match auth.register(&registration).await {
                Ok(user) => {
                    feedback.set(FormFeedback::default());
                    current_user.set(Some(user));
                    let _ = navigator.push(Route::Catalog {});
                }
                Err(err) => feedback.set(FormFeedback::from_api(&err)),
            }
            submitting.set(false);
        });
    };

    let current = feedback();
    rsx! {
        div { class: "page auth-page",
            header { class: "view-header",
                h2 { class: "view-title", "Create an account" }
            }
            form { class: "auth-form", onsubmit: on_submit,
                FormBanner { feedback: current.clone(), placed: PLACED.to_vec() }
                label { class: "field",
                    span { "Username" }
                    input {
                        r#type: "text",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                    FieldError { feedback: current.clone(), field: "username" }
                }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                    FieldError { feedback: current.clone(), field: "email" }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                    FieldError { feedback: current.clone(), field: "password" }
                }
                div { class: "field-row",
                    label { class: "field",
                        span { "First name" }
                        input {
                            r#type: "text",
                            value: "{first_name}",
                            oninput: move |evt| first_name.set(evt.value()),
                        }
                        FieldError { feedback: current.clone(), field: "first_name" }
                    }
                    label { class: "field",
                        span { "Last name" }
                        input {
                            r#type: "text",
                            value: "{last_name}",
                            oninput: move |evt| last_name.set(evt.value()),
                        }
                        FieldError { feedback: current.clone(), field: "last_name" }
                    }
                }
                label { class: "field field-inline",
                    input {
                        r#type: "checkbox",
                        checked: instructor(),
                        onchange: move |evt| instructor.set(evt.checked()),
                    }
                    span { "I want to teach courses" }
                    FieldError { feedback: current.clone(), field: "role" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Create account"
                }
            }
            p { class: "auth-switch",
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
