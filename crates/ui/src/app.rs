use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Coursehub" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! { FatalError { details: format!("{errors:?}") } },
                Router::<Route> {}
            }
        }
    }
}

/// Last-resort screen when a view panics or returns an error element.
#[component]
fn FatalError(details: String) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "Coursehub hit an unexpected problem" }
            p { "Your progress is saved on the server. Restart the app to continue." }
            details {
                summary { "Technical details" }
                pre { "{details}" }
            }
        }
    }
}
