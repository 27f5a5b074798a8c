use crate::auth::{use_auth, Identity};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{AppError, AuthUser, Role};
use shared_ui::{
    Alert, AlertVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle, FieldError, Form, Input,
};
use std::collections::HashMap;

/// Citizen sign-in and registration.
#[component]
pub fn LoginUser() -> Element {
    rsx! { LoginPanel { role: Role::User } }
}

/// Partner organization sign-in. Accounts are enrolled by an operator.
#[component]
pub fn LoginNgo() -> Element {
    rsx! { LoginPanel { role: Role::Ngo } }
}

fn landing(role: Role) -> Route {
    match role {
        Role::User => Route::Home {},
        Role::Ngo => Route::NgoDashboard {},
    }
}

#[component]
fn LoginPanel(role: Role) -> Element {
    let mut auth = use_auth();
    let hub = use_context::<Identity>();
    let mut registering = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let mut signed_in = move |user: AuthUser, hub: Identity| {
        auth.set_user(user.clone());
        hub.publish(Some(user));
        navigator().replace(landing(role));
    };

    let handle_submit = move |_: FormEvent| {
        let hub = hub.clone();
        async move {
            loading.set(true);
            error_msg.set(None);
            field_errors.set(HashMap::new());

            let result = if registering() {
                server::api::register(name(), email(), password()).await
            } else {
                server::api::login(email(), password()).await
            };

            match result {
                Ok(user) => match role {
                    Role::User => signed_in(user, hub),
                    Role::Ngo => match server::api::check_role_membership(Role::Ngo).await {
                        Ok(true) => signed_in(user, hub),
                        Ok(false) | Err(_) => {
                            if let Err(e) = server::api::logout().await {
                                tracing::warn!(error = %e, "Logout after failed partner check");
                            }
                            auth.clear_auth();
                            hub.publish(None);
                            error_msg.set(Some(
                                "This account is not registered as an NGO partner.".to_string(),
                            ));
                        }
                    },
                },
                Err(e) => {
                    let err_str = e.to_string();
                    let fe = AppError::parse_field_errors(&err_str);
                    if fe.is_empty() {
                        error_msg.set(Some(AppError::friendly_message(&err_str)));
                    } else {
                        field_errors.set(fe);
                    }
                }
            }
            loading.set(false);
        }
    };

    let field = move |key: &str| field_errors.read().get(key).cloned();
    let (title, description) = match (role, registering()) {
        (Role::Ngo, _) => ("NGO / Partner Login", "Sign in to manage reported issues."),
        (Role::User, false) => ("Welcome Back", "Sign in to track your reports and donations."),
        (Role::User, true) => ("Create an Account", "Join Mero Samaj to report issues and help out."),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "{title}" }
                    CardDescription { "{description}" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }

                    Form { onsubmit: handle_submit,
                        if registering() {
                            Input {
                                label: "Full Name",
                                required: true,
                                value: name(),
                                on_input: move |e: FormEvent| name.set(e.value()),
                            }
                            FieldError { message: field("name") }
                        }
                        Input {
                            label: "Email",
                            input_type: "email",
                            required: true,
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        FieldError { message: field("email") }
                        Input {
                            label: "Password",
                            input_type: "password",
                            required: true,
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        FieldError { message: field("password") }

                        Button {
                            button_type: "submit",
                            variant: ButtonVariant::Primary,
                            disabled: loading(),
                            class: "auth-submit",
                            if loading() {
                                "Please wait..."
                            } else if registering() {
                                "Sign Up"
                            } else {
                                "Sign In"
                            }
                        }
                    }
                }

                CardFooter {
                    match role {
                        Role::User => rsx! {
                            button {
                                class: "auth-switch",
                                r#type: "button",
                                onclick: move |_| {
                                    registering.toggle();
                                    error_msg.set(None);
                                    field_errors.set(HashMap::new());
                                },
                                if registering() {
                                    "Already have an account? Sign in"
                                } else {
                                    "Don't have an account? Sign up"
                                }
                            }
                            Link { to: Route::LoginNgo {}, class: "auth-alt", "Are you an NGO? Partner login" }
                        },
                        Role::Ngo => rsx! {
                            p { class: "auth-note",
                                "Partner accounts are set up by the Mero Samaj team. "
                                Link { to: Route::Contact {}, "Contact us" }
                                " to join."
                            }
                            Link { to: Route::LoginUser {}, class: "auth-alt", "Citizen login" }
                        },
                    }
                }
            }
        }
    }
}
