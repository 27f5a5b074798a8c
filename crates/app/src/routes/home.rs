use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, Skeleton};

use crate::routes::Route;

const FEATURES: [(&str, &str); 4] = [
    (
        "Report Issues",
        "Flag potholes, waste, broken lights and other civic problems with photos and a location.",
    ),
    (
        "Share Food",
        "Offer surplus meals or ask for help. Partner NGOs coordinate pickup and delivery.",
    ),
    (
        "Volunteer",
        "Give a few hours to causes you care about, matched to your availability.",
    ),
    (
        "Partner NGOs",
        "Verified organizations triage reports and follow them through to resolution.",
    ),
];

/// Landing page: hero, feature tiles and live impact numbers.
#[component]
pub fn Home() -> Element {
    let stats = use_resource(|| async move { server::api::get_impact_stats().await });

    rsx! {
        section { class: "hero",
            h1 { class: "hero-title", "Together for a Better Community" }
            p { class: "hero-lead",
                "Mero Samaj connects citizens, volunteers and NGOs to report social issues, share food and make a difference together."
            }
            div { class: "hero-actions",
                Link { to: Route::Report {}, class: "hero-cta", "Report an Issue" }
                Link { to: Route::Volunteer {}, class: "hero-cta outline", "Become a Volunteer" }
            }
        }

        section { class: "page-section",
            h2 { class: "section-title", "Our Impact" }
            div { class: "stat-grid",
                match &*stats.read() {
                    Some(Ok(stats)) => rsx! {
                        for (label, value) in stats.tiles() {
                            div { key: "{label}", class: "stat-tile",
                                span { class: "stat-value", "{value}" }
                                span { class: "stat-label", "{label}" }
                            }
                        }
                    },
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Impact stats unavailable");
                        rsx! {
                            p { class: "muted", "Impact numbers are unavailable right now." }
                        }
                    }
                    None => rsx! {
                        for i in 0..4 {
                            Skeleton { key: "{i}", class: "stat-tile skeleton" }
                        }
                    },
                }
            }
        }

        section { class: "page-section",
            h2 { class: "section-title", "How You Can Help" }
            div { class: "feature-grid",
                for (title, body) in FEATURES {
                    Card { key: "{title}", interactive: true,
                        CardHeader {
                            CardTitle { "{title}" }
                        }
                        CardContent {
                            CardDescription { "{body}" }
                        }
                    }
                }
            }
        }
    }
}
