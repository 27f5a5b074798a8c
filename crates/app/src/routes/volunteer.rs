use dioxus::prelude::*;
use shared_types::{
    toggle_choice, AppError, CreateVolunteerRequest, VOLUNTEER_AVAILABILITY, VOLUNTEER_INTERESTS,
};
use shared_ui::{
    Alert, AlertVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, FieldError, Form, FormRow, Input, PageHeader, PageLead, PageTitle, Textarea,
};
use std::collections::HashMap;

#[component]
pub fn Volunteer() -> Element {
    let mut form = use_signal(CreateVolunteerRequest::default);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitted = use_signal(|| false);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |_: FormEvent| async move {
        error_msg.set(None);
        field_errors.set(HashMap::new());
        submitted.set(false);

        let req = form.read().clone();
        if let Err(e) = req.check() {
            field_errors.set(e.field_errors);
            return;
        }

        submitting.set(true);
        match server::api::submit_volunteer(req).await {
            Ok(_) => {
                form.set(CreateVolunteerRequest::default());
                submitted.set(true);
            }
            Err(e) => {
                tracing::error!(error = %e, "Volunteer application failed");
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        submitting.set(false);
    };

    let field = move |name: &str| field_errors.read().get(name).cloned();

    rsx! {
        PageHeader {
            PageTitle { "Become a Volunteer" }
            PageLead { "Tell us what you care about and when you are free. We will match you with local opportunities." }
        }

        Card { class: "form-card",
            CardHeader {
                CardTitle { "Volunteer Application" }
                CardDescription { "Fields marked * are required." }
            }
            CardContent {
                if submitted() {
                    Alert { variant: AlertVariant::Success,
                        "Thank you for signing up! We will contact you with opportunities that match your interests."
                    }
                }
                if let Some(err) = error_msg() {
                    Alert { variant: AlertVariant::Error, "{err}" }
                }

                Form { onsubmit: handle_submit,
                    Input {
                        label: "Full Name",
                        required: true,
                        value: form.read().name.clone(),
                        on_input: move |e: FormEvent| form.write().name = e.value(),
                    }
                    FieldError { message: field("name") }
                    FormRow {
                        div {
                            Input {
                                label: "Email",
                                input_type: "email",
                                required: true,
                                value: form.read().email.clone(),
                                on_input: move |e: FormEvent| form.write().email = e.value(),
                            }
                            FieldError { message: field("email") }
                        }
                        div {
                            Input {
                                label: "Phone Number",
                                input_type: "tel",
                                required: true,
                                value: form.read().phone.clone(),
                                on_input: move |e: FormEvent| form.write().phone = e.value(),
                            }
                            FieldError { message: field("phone") }
                        }
                    }

                    fieldset { class: "choice-group",
                        legend { "Areas of Interest" }
                        for interest in VOLUNTEER_INTERESTS {
                            label { key: "{interest}", class: "choice",
                                input {
                                    r#type: "checkbox",
                                    checked: form.read().interests.iter().any(|i| i == interest),
                                    onchange: move |e: FormEvent| {
                                        toggle_choice(&mut form.write().interests, interest, e.checked());
                                    },
                                }
                                span { "{interest}" }
                            }
                        }
                    }
                    FieldError { message: field("interests") }

                    fieldset { class: "choice-group",
                        legend { "Availability" }
                        for slot in VOLUNTEER_AVAILABILITY {
                            label { key: "{slot}", class: "choice",
                                input {
                                    r#type: "checkbox",
                                    checked: form.read().availability.iter().any(|a| a == slot),
                                    onchange: move |e: FormEvent| {
                                        toggle_choice(&mut form.write().availability, slot, e.checked());
                                    },
                                }
                                span { "{slot}" }
                            }
                        }
                    }
                    FieldError { message: field("availability") }

                    Textarea {
                        label: "Previous Volunteer Experience",
                        placeholder: "Optional",
                        value: form.read().experience.clone().unwrap_or_default(),
                        on_input: move |e: FormEvent| {
                            let text = e.value();
                            form.write().experience = (!text.trim().is_empty()).then_some(text);
                        },
                    }

                    Button {
                        button_type: "submit",
                        variant: ButtonVariant::Primary,
                        disabled: submitting(),
                        if submitting() { "Submitting..." } else { "Submit Application" }
                    }
                }
            }
        }
    }
}
