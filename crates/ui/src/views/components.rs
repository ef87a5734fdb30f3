use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::FormFeedback;

/// Load failure with the matching way out: sign in again, or retry.
#[component]
pub fn ErrorPanel(error: ViewError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-panel",
            p { "{error.message()}" }
            if error.needs_login() {
                Link { class: "btn btn-primary", to: Route::Login {}, "Sign in" }
            } else {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// Banner plus any field messages the form has no input for.
#[component]
pub fn FormBanner(feedback: FormFeedback, placed: Vec<&'static str>) -> Element {
    let extra = feedback.unplaced(&placed);
    rsx! {
        if let Some(banner) = feedback.banner.as_ref() {
            p { class: "form-banner", role: "alert", "{banner}" }
        }
        for message in extra {
            p { class: "form-banner", "{message}" }
        }
    }
}

#[component]
pub fn FieldError(feedback: FormFeedback, field: &'static str) -> Element {
    rsx! {
        if let Some(message) = feedback.field(field) {
            span { class: "field-error", "{message}" }
        }
    }
}
