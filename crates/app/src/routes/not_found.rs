use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        section { class: "not-found-page",
            div { class: "not-found-card",
                span { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "We couldn't find that page" }
                p { class: "not-found-message",
                    "Nothing lives at "
                    code { "{path}" }
                    ". It may have moved, or the link may be mistyped."
                }
                div { class: "not-found-actions",
                    Link { to: Route::Home {}, class: "not-found-link", "Back to Home" }
                    Link { to: Route::Report {}, class: "not-found-link secondary", "Report an issue" }
                }
            }
        }
    }
}
