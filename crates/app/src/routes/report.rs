use base64::Engine as _;
use dioxus::prelude::*;
use shared_types::{
    upload_progress, validate_image, AppError, CreateIssueRequest, FeatureFlags, ImageSelection,
    IssueCategory, SelectedImage, MAX_ISSUE_IMAGES,
};
use shared_ui::{
    Alert, AlertVariant, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardTitle, FieldError, Form, FormRow, FormSelect, Input, PageHeader, PageLead, PageTitle,
    Progress, Textarea,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
struct ReportForm {
    title: String,
    category: IssueCategory,
    location: String,
    description: String,
    phone: String,
}

impl ReportForm {
    fn to_request(&self, image_urls: Vec<String>) -> CreateIssueRequest {
        CreateIssueRequest {
            title: self.title.trim().to_string(),
            category: self.category,
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            image_urls,
            contact_phone: Some(self.phone.trim().to_string()).filter(|p| !p.is_empty()),
        }
    }
}

fn mime_from_filename(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn preview_url(image: &SelectedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        base64::engine::general_purpose::STANDARD.encode(&image.bytes)
    )
}

/// Upload each selected image in order, reporting progress after every
/// file. Stops at the first failure; earlier uploads are left in place.
async fn upload_all(
    images: Vec<SelectedImage>,
    mut on_progress: impl FnMut(u8),
) -> Result<Vec<String>, ServerFnError> {
    let total = images.len();
    let mut urls = Vec::with_capacity(total);
    for (done, image) in images.into_iter().enumerate() {
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        let uploaded =
            server::api::upload_issue_image(image.file_name, image.content_type, data).await?;
        urls.push(uploaded.url);
        on_progress(upload_progress(done + 1, total));
    }
    Ok(urls)
}

#[component]
pub fn Report() -> Element {
    let flags: FeatureFlags = use_context();
    let mut form = use_signal(ReportForm::default);
    let mut images = use_signal(ImageSelection::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitted = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut progress = use_signal(|| Option::<u8>::None);
    // Bumped to reset the native file input after each pick.
    let mut picker_key = use_signal(|| 0u32);

    let handle_files = move |evt: FormEvent| async move {
        error_msg.set(None);
        let mut batch = Vec::new();
        for file in evt.files() {
            let file_name = file.name();
            let content_type = file
                .content_type()
                .unwrap_or_else(|| mime_from_filename(&file_name));
            match file.read_bytes().await {
                Ok(bytes) => {
                    if let Err(e) = validate_image(&content_type, bytes.len()) {
                        error_msg.set(Some(format!("{}: {}", file_name, e.message)));
                        *picker_key.write() += 1;
                        return;
                    }
                    batch.push(SelectedImage {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                Err(_) => {
                    tracing::warn!(file = %file_name, "Could not read selected file");
                    error_msg.set(Some(format!("Failed to read {}", file_name)));
                    *picker_key.write() += 1;
                    return;
                }
            }
        }
        if let Err(e) = images.write().try_add(batch) {
            error_msg.set(Some(e.message));
        }
        *picker_key.write() += 1;
    };

    let handle_submit = move |_: FormEvent| async move {
        error_msg.set(None);
        field_errors.set(HashMap::new());
        submitted.set(false);

        let draft = form.read().to_request(Vec::new());
        if let Err(e) = draft.check() {
            field_errors.set(e.field_errors);
            return;
        }

        submitting.set(true);
        let selected: Vec<SelectedImage> = images.read().iter().cloned().collect();
        if !selected.is_empty() {
            progress.set(Some(0));
        }

        let outcome = async {
            let urls = upload_all(selected, |pct| progress.set(Some(pct))).await?;
            server::api::submit_issue(form.read().to_request(urls)).await
        }
        .await;

        match outcome {
            Ok(issue) => {
                tracing::info!(issue_id = %issue.id, "Issue submitted");
                form.set(ReportForm::default());
                images.write().clear();
                submitted.set(true);
            }
            Err(e) => {
                tracing::error!(error = %e, "Issue submission failed");
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        progress.set(None);
        submitting.set(false);
    };

    let field = move |name: &str| field_errors.read().get(name).cloned();
    let selected_count = images.read().len();

    rsx! {
        PageHeader {
            PageTitle { "Report an Issue" }
            PageLead { "Help us make the community better by reporting problems you see around you." }
        }

        Card { class: "form-card",
            CardHeader {
                CardTitle { "Issue Details" }
                CardDescription { "Reports can be filed anonymously. Sign in to have them linked to your account." }
            }
            CardContent {
                if submitted() {
                    Alert { variant: AlertVariant::Success,
                        "Thank you! Your issue has been reported. Our partner NGOs will review it shortly."
                    }
                }
                if let Some(err) = error_msg() {
                    Alert { variant: AlertVariant::Error, "{err}" }
                }

                Form { onsubmit: handle_submit,
                    Input {
                        label: "Issue Title",
                        required: true,
                        placeholder: "e.g. Broken street light on Ring Road",
                        value: form.read().title.clone(),
                        on_input: move |e: FormEvent| form.write().title = e.value(),
                    }
                    FieldError { message: field("title") }

                    FormRow {
                        FormSelect {
                            label: "Category",
                            value: form.read().category.as_str().to_string(),
                            onchange: move |e: FormEvent| {
                                if let Ok(category) = e.value().parse() {
                                    form.write().category = category;
                                }
                            },
                            for category in IssueCategory::ALL {
                                option { key: "{category.as_str()}", value: category.as_str(), "{category.label()}" }
                            }
                        }
                        div {
                            Input {
                                label: "Location",
                                required: true,
                                placeholder: "Street, ward or landmark",
                                value: form.read().location.clone(),
                                on_input: move |e: FormEvent| form.write().location = e.value(),
                            }
                            FieldError { message: field("location") }
                        }
                    }

                    Textarea {
                        label: "Description",
                        required: true,
                        rows: 5,
                        value: form.read().description.clone(),
                        on_input: move |e: FormEvent| form.write().description = e.value(),
                    }
                    FieldError { message: field("description") }

                    Input {
                        label: "Contact Phone",
                        input_type: "tel",
                        placeholder: "Optional",
                        value: form.read().phone.clone(),
                        on_input: move |e: FormEvent| form.write().phone = e.value(),
                    }

                    if flags.storage {
                        div { class: "image-picker",
                            label { class: "image-picker-label",
                                "Photos ({selected_count}/{MAX_ISSUE_IMAGES})"
                                input {
                                    key: "{picker_key}",
                                    r#type: "file",
                                    accept: "image/jpeg,image/png,image/webp,image/gif",
                                    multiple: true,
                                    disabled: submitting() || selected_count >= MAX_ISSUE_IMAGES,
                                    onchange: handle_files,
                                }
                            }
                            FieldError { message: field("image_urls") }
                            div { class: "image-previews",
                                for (index, image) in images.read().iter().enumerate() {
                                    div { key: "{index}-{image.file_name}", class: "image-preview",
                                        img { src: preview_url(image), alt: "{image.file_name}" }
                                        button {
                                            r#type: "button",
                                            class: "image-remove",
                                            disabled: submitting(),
                                            aria_label: "Remove image",
                                            onclick: move |_| images.write().remove(index),
                                            "\u{d7}"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    if let Some(pct) = progress() {
                        Progress { value: pct, label: "Uploading images..." }
                    }

                    Button {
                        button_type: "submit",
                        variant: ButtonVariant::Primary,
                        disabled: submitting(),
                        if submitting() { "Submitting..." } else { "Submit Report" }
                    }
                }
            }
        }
    }
}
