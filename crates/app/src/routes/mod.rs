pub mod contact;
pub mod donate;
pub mod home;
pub mod login;
pub mod ngo_dashboard;
pub mod not_found;
pub mod partners;
pub mod report;
pub mod volunteer;

use crate::auth::{use_auth, use_identity, Identity, Observed};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdHeart, LdMenu, LdX};
use dioxus_free_icons::Icon;

use contact::Contact;
use donate::Donate;
use home::Home;
use login::{LoginNgo, LoginUser};
use ngo_dashboard::NgoDashboard;
use not_found::NotFound;
use partners::Partners;
use report::Report;
use volunteer::Volunteer;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/report")]
    Report {},
    #[route("/donate")]
    Donate {},
    #[route("/volunteer")]
    Volunteer {},
    #[route("/partners")]
    Partners {},
    #[route("/contact")]
    Contact {},
    #[route("/login/user")]
    LoginUser {},
    #[route("/login/ngo")]
    LoginNgo {},
    #[route("/ngo-dashboard")]
    NgoDashboard {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Header, page body and footer around every route.
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "shell",
            Navbar {}
            main { class: "shell-main",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

fn nav_links() -> [(&'static str, Route); 6] {
    [
        ("Home", Route::Home {}),
        ("Report Issue", Route::Report {}),
        ("Food Donation", Route::Donate {}),
        ("Volunteer", Route::Volunteer {}),
        ("Partners", Route::Partners {}),
        ("Contact", Route::Contact {}),
    ]
}

/// Top navigation. Follows the identity hub so sign-in and sign-out made
/// anywhere in the app show up immediately.
#[component]
fn Navbar() -> Element {
    let observed = use_identity();
    let hub = use_context::<Identity>();
    let mut auth = use_auth();
    let mut menu_open = use_signal(|| false);

    let handle_logout = move |_| {
        let hub = hub.clone();
        async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!(error = %e, "Logout request failed");
            }
            auth.clear_auth();
            hub.publish(None);
            menu_open.set(false);
            navigator().push(Route::Home {});
        }
    };

    let signed_in = match &*observed.read() {
        Observed::Known(Some(user)) => Some(user.name.clone()),
        _ => None,
    };

    rsx! {
        header { class: "navbar",
            div { class: "navbar-inner",
                Link { to: Route::Home {}, class: "navbar-brand",
                    Icon { icon: LdHeart, width: 24, height: 24 }
                    span { "Mero Samaj" }
                }

                button {
                    class: "navbar-toggle",
                    r#type: "button",
                    aria_label: "Toggle navigation",
                    onclick: move |_| menu_open.toggle(),
                    if menu_open() {
                        Icon { icon: LdX, width: 22, height: 22 }
                    } else {
                        Icon { icon: LdMenu, width: 22, height: 22 }
                    }
                }

                nav { class: if menu_open() { "navbar-links open" } else { "navbar-links" },
                    for (label, to) in nav_links() {
                        Link {
                            key: "{label}",
                            to,
                            class: "navbar-link",
                            active_class: "active",
                            onclick: move |_| menu_open.set(false),
                            "{label}"
                        }
                    }

                    div { class: "navbar-auth",
                        match signed_in {
                            Some(name) => rsx! {
                                Link {
                                    to: Route::NgoDashboard {},
                                    class: "navbar-link",
                                    onclick: move |_| menu_open.set(false),
                                    "Dashboard"
                                }
                                span { class: "navbar-user", "{name}" }
                                button {
                                    class: "navbar-button",
                                    r#type: "button",
                                    onclick: handle_logout,
                                    "Logout"
                                }
                            },
                            None => rsx! {
                                Link {
                                    to: Route::LoginUser {},
                                    class: "navbar-button",
                                    onclick: move |_| menu_open.set(false),
                                    "Login as User"
                                }
                                Link {
                                    to: Route::LoginNgo {},
                                    class: "navbar-button outline",
                                    onclick: move |_| menu_open.set(false),
                                    "Login as NGO/Partner"
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Footer() -> Element {
    let year = chrono::Utc::now().format("%Y").to_string();

    rsx! {
        footer { class: "footer",
            div { class: "footer-inner",
                div { class: "footer-brand",
                    strong { "Mero Samaj" }
                    p { "Connecting citizens, volunteers and NGOs for a better community." }
                }
                div { class: "footer-links",
                    Link { to: Route::Report {}, "Report Issue" }
                    Link { to: Route::Donate {}, "Food Donation" }
                    Link { to: Route::Volunteer {}, "Volunteer" }
                    Link { to: Route::Contact {}, "Contact" }
                }
                p { class: "footer-copy", "\u{a9} {year} Mero Samaj. All rights reserved." }
            }
        }
    }
}
