use dioxus::prelude::*;
use shared_types::{
    parse_quantity, AppError, CreateDonationRequest, DonationDirection, FoodType,
};
use shared_ui::{
    Alert, AlertVariant, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, FieldError, Form, FormRow, FormSelect, Input, PageHeader, PageLead,
    PageTitle, Skeleton, Textarea,
};
use std::collections::HashMap;

/// Donation form state; quantity stays as typed until submission.
#[derive(Debug, Clone, Default, PartialEq)]
struct DonationForm {
    food_type: FoodType,
    quantity: String,
    location: String,
    pickup_at: String,
    description: String,
}

impl DonationForm {
    fn to_request(&self, direction: DonationDirection) -> CreateDonationRequest {
        CreateDonationRequest {
            food_type: self.food_type,
            quantity: parse_quantity(&self.quantity),
            location: self.location.trim().to_string(),
            pickup_at: self.pickup_at.clone(),
            description: Some(self.description.trim().to_string()).filter(|d| !d.is_empty()),
            direction,
        }
    }
}

/// `2026-03-01T09:30` reads as `2026-03-01 09:30`.
fn pickup_display(pickup_at: &str) -> String {
    pickup_at.replacen('T', " ", 1)
}

#[component]
pub fn Donate() -> Element {
    let mut direction = use_signal(DonationDirection::default);
    let mut form = use_signal(DonationForm::default);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut success_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let mut donations = use_resource(|| async move { server::api::list_donations().await });

    let handle_submit = move |_: FormEvent| async move {
        error_msg.set(None);
        success_msg.set(None);
        field_errors.set(HashMap::new());

        let req = form.read().to_request(direction());
        if let Err(e) = req.check() {
            field_errors.set(e.field_errors);
            return;
        }

        submitting.set(true);
        match server::api::submit_donation(req).await {
            Ok(_) => {
                form.set(DonationForm::default());
                success_msg.set(Some(match direction() {
                    DonationDirection::Give => "Thank you! Your donation has been listed.".to_string(),
                    DonationDirection::Receive => "Your food request has been submitted.".to_string(),
                }));
                donations.restart();
            }
            Err(e) => {
                tracing::error!(error = %e, "Donation submission failed");
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
    let dir = direction();

    rsx! {
        PageHeader {
            PageTitle { "Food Donation" }
            PageLead { "Share surplus food with people who need it, or ask for support." }
        }

        div { class: "toggle-group", role: "tablist",
            for option in [DonationDirection::Give, DonationDirection::Receive] {
                button {
                    key: "{option.as_str()}",
                    r#type: "button",
                    class: if option == dir { "toggle active" } else { "toggle" },
                    onclick: move |_| direction.set(option),
                    "{option.toggle_label()}"
                }
            }
        }

        div { class: "two-column",
            Card {
                CardHeader {
                    CardTitle { "{dir.toggle_label()}" }
                }
                CardContent {
                    if let Some(msg) = success_msg() {
                        Alert { variant: AlertVariant::Success, "{msg}" }
                    }
                    if let Some(err) = error_msg() {
                        Alert { variant: AlertVariant::Error, "{err}" }
                    }

                    Form { onsubmit: handle_submit,
                        FormRow {
                            FormSelect {
                                label: "Food Type",
                                value: form.read().food_type.as_str().to_string(),
                                onchange: move |e: FormEvent| {
                                    if let Ok(food) = e.value().parse() {
                                        form.write().food_type = food;
                                    }
                                },
                                for food in FoodType::ALL {
                                    option { key: "{food.as_str()}", value: food.as_str(), "{food.label()}" }
                                }
                            }
                            div {
                                Input {
                                    label: "Quantity (servings)",
                                    input_type: "number",
                                    required: true,
                                    value: form.read().quantity.clone(),
                                    on_input: move |e: FormEvent| form.write().quantity = e.value(),
                                }
                                FieldError { message: field("quantity") }
                            }
                        }
                        Input {
                            label: dir.location_label().to_string(),
                            required: true,
                            value: form.read().location.clone(),
                            on_input: move |e: FormEvent| form.write().location = e.value(),
                        }
                        FieldError { message: field("location") }
                        Input {
                            label: dir.date_label().to_string(),
                            input_type: "datetime-local",
                            required: true,
                            value: form.read().pickup_at.clone(),
                            on_input: move |e: FormEvent| form.write().pickup_at = e.value(),
                        }
                        FieldError { message: field("pickup_at") }
                        Textarea {
                            label: "Additional Details",
                            placeholder: "Dietary notes, packaging, contact preferences...",
                            value: form.read().description.clone(),
                            on_input: move |e: FormEvent| form.write().description = e.value(),
                        }
                        Button {
                            button_type: "submit",
                            variant: ButtonVariant::Primary,
                            disabled: submitting(),
                            if submitting() { "Submitting..." } else { "{dir.submit_label()}" }
                        }
                    }
                }
            }

            section { class: "donation-list",
                h2 { class: "section-title", "Available Donations & Requests" }
                match &*donations.read() {
                    None => rsx! {
                        for i in 0..3 {
                            Skeleton { key: "{i}", class: "donation-skeleton" }
                        }
                    },
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Failed to load donations");
                        rsx! {
                            Alert { variant: AlertVariant::Error, "Could not load donations." }
                        }
                    }
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "muted", "No donations yet. Be the first to share!" }
                    },
                    Some(Ok(list)) => rsx! {
                        ul { class: "donation-items",
                            for d in list.iter() {
                                li { key: "{d.id}", class: "donation-item",
                                    div { class: "donation-item-head",
                                        strong { "{d.summary()}" }
                                        Badge {
                                            variant: match d.direction {
                                                DonationDirection::Give => BadgeVariant::Success,
                                                DonationDirection::Receive => BadgeVariant::Info,
                                            },
                                            "{d.direction.toggle_label()}"
                                        }
                                    }
                                    p { class: "muted", "{pickup_display(&d.pickup_at)}" }
                                    if let Some(desc) = &d.description {
                                        p { "{desc}" }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
