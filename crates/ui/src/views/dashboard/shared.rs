use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::CurrentUser;
use crate::routes::Route;

#[component]
pub fn DashboardHeader(title: String, subtitle: String, show_back: bool) -> Element {
    let navigator = use_navigator();
    rsx! {
        header { class: "view-header",
            if show_back {
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| navigator.go_back(),
                    "Back"
                }
            }
            h2 { class: "view-title", "{title}" }
            p { class: "view-subtitle", "{subtitle}" }
        }
        div { class: "view-divider" }
    }
}

/// Edit and two-step delete buttons for one list row.
#[component]
pub fn RowActions(
    armed: bool,
    disabled: bool,
    on_edit: EventHandler<()>,
    on_arm: EventHandler<bool>,
    on_delete: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "row-actions",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled,
                onclick: move |_| on_edit.call(()),
                "Edit"
            }
            if armed {
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled,
                    onclick: move |_| on_delete.call(()),
                    "Confirm delete"
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_arm.call(false),
                    "Cancel"
                }
            } else {
                button {
                    class: "btn btn-link btn-danger-text",
                    r#type: "button",
                    disabled,
                    onclick: move |_| on_arm.call(true),
                    "Delete"
                }
            }
        }
    }
}

/// Shown instead of dashboard screens to learners.
#[component]
pub fn InstructorsOnly(children: Element) -> Element {
    let user = use_context::<CurrentUser>();
    if user.can_author() {
        return children;
    }
    rsx! {
        div { class: "page",
            p { "The dashboard is available to instructors." }
            Link { to: Route::Catalog {}, "Back to courses" }
        }
    }
}
