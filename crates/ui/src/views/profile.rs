use dioxus::prelude::*;
use services::ProfileUpdate;

use crate::context::{AppContext, CurrentUser};
use crate::views::components::{ErrorPanel, FieldError, FormBanner};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::FormFeedback;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut current_user = use_context::<CurrentUser>();
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut feedback = use_signal(FormFeedback::default);
    let mut saved = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let auth = ctx.auth();
    let resource = use_resource(move || {
        let auth = auth.clone();
        async move {
            let profile = auth
                .profile()
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            let update = ProfileUpdate::from(&profile);
            first_name.set(update.first_name);
            last_name.set(update.last_name);
            email.set(update.email);
            Ok::<_, ViewError>(profile)
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let auth = ctx.auth();
        let update = ProfileUpdate {
            first_name: first_name().trim().to_string(),
            last_name: last_name().trim().to_string(),
            email: email().trim().to_string(),
        };
        saving.set(true);
        saved.set(false);
        spawn(async move {
            match auth.update_profile(&update).await {
                Ok(user) => {
                    feedback.set(FormFeedback::default());
                    current_user.set(Some(user));
                    saved.set(true);
                }
                Err(err) => feedback.set(FormFeedback::from_api(&err)),
            }
            saving.set(false);
        });
    };

    let state = view_state_from_resource(&resource);
    let current = feedback();
    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Profile" }
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
                ViewState::Ready(profile) => rsx! {
                    p { class: "profile-meta", "Signed in as {profile.username} ({profile.role:?})" }
                    form { class: "profile-form", onsubmit: on_submit,
                        FormBanner {
                            feedback: current.clone(),
                            placed: vec!["first_name", "last_name", "email"],
                        }
                        if saved() {
                            p { class: "form-success", "Profile saved." }
                        }
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
                        label { class: "field",
                            span { "Email" }
                            input {
                                r#type: "email",
                                value: "{email}",
                                oninput: move |evt| email.set(evt.value()),
                            }
                            FieldError { feedback: current.clone(), field: "email" }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving(),
                            "Save"
                        }
                    }
                },
            }
        }
    }
}
