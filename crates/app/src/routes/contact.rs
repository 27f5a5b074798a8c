use dioxus::prelude::*;
use shared_types::{AppError, CreateContactRequest, FAQS};
use shared_ui::{
    Alert, AlertVariant, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle,
    FieldError, Form, Input, PageHeader, PageLead, PageTitle, Textarea,
};
use std::collections::HashMap;

#[component]
pub fn Contact() -> Element {
    let mut form = use_signal(CreateContactRequest::default);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut sent = use_signal(|| false);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |_: FormEvent| async move {
        error_msg.set(None);
        field_errors.set(HashMap::new());
        sent.set(false);

        let req = form.read().clone();
        if let Err(e) = req.check() {
            field_errors.set(e.field_errors);
            return;
        }

        submitting.set(true);
        match server::api::submit_contact(req).await {
            Ok(_) => {
                form.set(CreateContactRequest::default());
                sent.set(true);
            }
            Err(e) => {
                tracing::error!(error = %e, "Contact message failed");
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
            PageTitle { "Contact Us" }
            PageLead { "Questions, partnership ideas or feedback. We read every message." }
        }

        div { class: "two-column",
            Card {
                CardHeader {
                    CardTitle { "Send a Message" }
                }
                CardContent {
                    if sent() {
                        Alert { variant: AlertVariant::Success, "Thank you! Your message has been sent." }
                    }
                    if let Some(err) = error_msg() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }
                    Form { onsubmit: handle_submit,
                        Input {
                            label: "Name",
                            required: true,
                            value: form.read().name.clone(),
                            on_input: move |e: FormEvent| form.write().name = e.value(),
                        }
                        FieldError { message: field("name") }
                        Input {
                            label: "Email",
                            input_type: "email",
                            required: true,
                            value: form.read().email.clone(),
                            on_input: move |e: FormEvent| form.write().email = e.value(),
                        }
                        FieldError { message: field("email") }
                        Input {
                            label: "Subject",
                            required: true,
                            value: form.read().subject.clone(),
                            on_input: move |e: FormEvent| form.write().subject = e.value(),
                        }
                        FieldError { message: field("subject") }
                        Textarea {
                            label: "Message",
                            required: true,
                            rows: 6,
                            value: form.read().message.clone(),
                            on_input: move |e: FormEvent| form.write().message = e.value(),
                        }
                        FieldError { message: field("message") }
                        Button {
                            button_type: "submit",
                            variant: ButtonVariant::Primary,
                            disabled: submitting(),
                            if submitting() { "Sending..." } else { "Send Message" }
                        }
                    }
                }
            }

            section { class: "faq",
                h2 { class: "section-title", "Frequently Asked Questions" }
                for (question, answer) in FAQS {
                    details { key: "{question}", class: "faq-item",
                        summary { "{question}" }
                        p { "{answer}" }
                    }
                }
            }
        }
    }
}
