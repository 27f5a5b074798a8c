use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::is_plausible_email;
use crate::error::AppError;

#[cfg(feature = "validation")]
use validator::Validate;

pub const VOLUNTEER_INTERESTS: [&str; 6] = [
    "Food Distribution",
    "Animal Welfare",
    "Education",
    "Healthcare",
    "Environmental",
    "Administrative",
];

pub const VOLUNTEER_AVAILABILITY: [&str; 6] = [
    "Weekday Mornings",
    "Weekday Afternoons",
    "Weekday Evenings",
    "Weekend Mornings",
    "Weekend Afternoons",
    "Weekend Evenings",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Volunteer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interests: Vec<String>,
    pub availability: Vec<String>,
    pub experience: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VolunteerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interests: Vec<String>,
    pub availability: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    pub created_at: String,
}

impl From<Volunteer> for VolunteerResponse {
    fn from(v: Volunteer) -> Self {
        Self {
            id: v.id.to_string(),
            name: v.name,
            email: v.email,
            phone: v.phone,
            interests: v.interests,
            availability: v.availability,
            experience: v.experience,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateVolunteerRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Phone number is required"))
    )]
    pub phone: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl CreateVolunteerRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::field("name", "Full name is required"));
        }
        if !is_plausible_email(&self.email) {
            return Err(AppError::field("email", "Valid email is required"));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::field("phone", "Phone number is required"));
        }
        if let Some(bad) = self
            .interests
            .iter()
            .find(|i| !VOLUNTEER_INTERESTS.contains(&i.as_str()))
        {
            return Err(AppError::field("interests", format!("Unknown interest: {}", bad)));
        }
        if let Some(bad) = self
            .availability
            .iter()
            .find(|a| !VOLUNTEER_AVAILABILITY.contains(&a.as_str()))
        {
            return Err(AppError::field(
                "availability",
                format!("Unknown availability: {}", bad),
            ));
        }
        Ok(())
    }
}

/// Toggle `value` in a checkbox group, preserving the order of selection.
pub fn toggle_choice(selected: &mut Vec<String>, value: &str, checked: bool) {
    let present = selected.iter().any(|s| s == value);
    if checked && !present {
        selected.push(value.to_string());
    } else if !checked {
        selected.retain(|s| s != value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateVolunteerRequest {
        CreateVolunteerRequest {
            name: "Sita Rai".into(),
            email: "sita@example.org".into(),
            phone: "9800000000".into(),
            interests: vec!["Education".into()],
            availability: vec!["Weekend Mornings".into()],
            experience: None,
        }
    }

    #[test]
    fn valid_application_passes() {
        assert!(request().check().is_ok());
    }

    #[test]
    fn unknown_interest_is_rejected() {
        let mut req = request();
        req.interests.push("Skydiving".into());
        let err = req.check().unwrap_err();
        assert!(err.field_errors.contains_key("interests"));
    }

    #[test]
    fn missing_phone_is_rejected() {
        let mut req = request();
        req.phone = " ".into();
        assert!(req.check().unwrap_err().field_errors.contains_key("phone"));
    }

    #[test]
    fn toggle_adds_once_and_removes() {
        let mut selected = Vec::new();
        toggle_choice(&mut selected, "Healthcare", true);
        toggle_choice(&mut selected, "Healthcare", true);
        toggle_choice(&mut selected, "Education", true);
        assert_eq!(selected, ["Healthcare", "Education"]);
        toggle_choice(&mut selected, "Healthcare", false);
        assert_eq!(selected, ["Education"]);
    }
}
