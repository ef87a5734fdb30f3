use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::Credentials;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::components::FormBanner;
use crate::vm::FormFeedback;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut current_user = use_context::<CurrentUser>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut feedback = use_signal(FormFeedback::default);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let auth = ctx.auth();
        let credentials = Credentials {
            username: username().trim().to_string(),
            password: password(),
        };
        submitting.set(true);
        spawn(async move {
            match auth.login(&credentials).await {
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

    rsx! {
        div { class: "page auth-page",
            header { class: "view-header",
                h2 { class: "view-title", "Sign in" }
            }
            form { class: "auth-form", onsubmit: on_submit,
                FormBanner { feedback: feedback(), placed: vec!["username", "password"] }
                label { class: "field",
                    span { "Username" }
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
            p { class: "auth-switch",
                "No account yet? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
