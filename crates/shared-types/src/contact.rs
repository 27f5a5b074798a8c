use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::is_plausible_email;
use crate::error::AppError;

#[cfg(feature = "validation")]
use validator::Validate;

/// Question and answer pairs shown beside the contact form.
pub const FAQS: [(&str, &str); 4] = [
    (
        "How can I report a social issue?",
        "Click 'Report an Issue' in the navigation menu and fill out the form with details about the issue, including photos and location if applicable.",
    ),
    (
        "How do I sign up as a volunteer?",
        "Visit the Volunteer page and fill out the application form. We match volunteers with opportunities that fit their interests and availability.",
    ),
    (
        "Can restaurants donate food?",
        "Yes. Restaurants can donate surplus food through the Food Donations page by choosing 'Donate Food'.",
    ),
    (
        "How are donated foods distributed?",
        "Verified NGO partners collect and distribute donated food to those in need, following proper safety and hygiene practices.",
    ),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateContactRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 200, message = "Subject is required"))
    )]
    pub subject: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 5000, message = "Message is required"))
    )]
    pub message: String,
}

impl CreateContactRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::field("name", "Name is required"));
        }
        if !is_plausible_email(&self.email) {
            return Err(AppError::field("email", "Valid email is required"));
        }
        if self.subject.trim().is_empty() {
            return Err(AppError::field("subject", "Subject is required"));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::field("message", "Message is required"));
        }
        Ok(())
    }
}
