use dioxus::prelude::*;
use shared_ui::{
    Alert, AlertVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader,
    PageLead, PageTitle, Skeleton,
};

/// Registered partner organizations, alphabetically.
#[component]
pub fn Partners() -> Element {
    let ngos = use_resource(|| async move { server::api::list_ngos().await });

    rsx! {
        PageHeader {
            PageTitle { "Our Partners" }
            PageLead { "NGOs and community organizations working with Mero Samaj." }
        }

        div { class: "partner-grid",
            match &*ngos.read() {
                None => rsx! {
                    for i in 0..3 {
                        Skeleton { key: "{i}", class: "partner-skeleton" }
                    }
                },
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Failed to load partners");
                    rsx! {
                        Alert { variant: AlertVariant::Error, "Could not load partners. Please try again later." }
                    }
                }
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "muted", "No partner organizations yet." }
                },
                Some(Ok(list)) => rsx! {
                    for ngo in list.iter() {
                        Card { key: "{ngo.id}", interactive: true,
                            CardHeader {
                                CardTitle { "{ngo.org_name}" }
                            }
                            CardContent {
                                if let Some(desc) = &ngo.description {
                                    CardDescription { "{desc}" }
                                }
                                if let Some(site) = &ngo.website {
                                    a { href: "{site}", target: "_blank", rel: "noopener", class: "partner-link", "{site}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
