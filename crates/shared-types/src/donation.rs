use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

#[cfg(feature = "validation")]
use validator::Validate;

/// Format produced by an HTML `datetime-local` input.
pub const PICKUP_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    #[default]
    Cooked,
    Packaged,
    Fresh,
    Grains,
}

impl FoodType {
    pub const ALL: [FoodType; 4] = [
        FoodType::Cooked,
        FoodType::Packaged,
        FoodType::Fresh,
        FoodType::Grains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Cooked => "cooked",
            FoodType::Packaged => "packaged",
            FoodType::Fresh => "fresh",
            FoodType::Grains => "grains",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodType::Cooked => "Cooked Food",
            FoodType::Packaged => "Packaged Food",
            FoodType::Fresh => "Fresh Produce",
            FoodType::Grains => "Grains & Cereals",
        }
    }
}

impl FromStr for FoodType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodType::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| AppError::field("food_type", format!("Unknown food type: {}", s)))
    }
}

/// Whether the record offers food or asks for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DonationDirection {
    #[default]
    Give,
    Receive,
}

impl DonationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationDirection::Give => "give",
            DonationDirection::Receive => "receive",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            DonationDirection::Give => "Donate Food",
            DonationDirection::Receive => "Request Food",
        }
    }

    pub fn location_label(&self) -> &'static str {
        match self {
            DonationDirection::Give => "Pickup Location",
            DonationDirection::Receive => "Delivery Location",
        }
    }

    pub fn date_label(&self) -> &'static str {
        match self {
            DonationDirection::Give => "Pickup Date & Time",
            DonationDirection::Receive => "Needed By Date & Time",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            DonationDirection::Give => "Submit Donation",
            DonationDirection::Receive => "Request Food",
        }
    }
}

impl FromStr for DonationDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "give" => Ok(DonationDirection::Give),
            "receive" => Ok(DonationDirection::Receive),
            other => Err(AppError::field(
                "direction",
                format!("Unknown donation type: {}", other),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Donation {
    pub id: Uuid,
    pub food_type: String,
    pub quantity: i32,
    pub location: String,
    pub pickup_at: NaiveDateTime,
    pub description: Option<String>,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DonationResponse {
    pub id: String,
    pub food_type: FoodType,
    pub quantity: i32,
    pub location: String,
    /// Local date and time as entered, `YYYY-MM-DDTHH:MM`.
    pub pickup_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub direction: DonationDirection,
    pub created_at: String,
}

impl DonationResponse {
    /// One-line listing text, e.g. `Cooked Food - 20 servings @ Thamel`.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} servings @ {}",
            self.food_type.label(),
            self.quantity,
            self.location
        )
    }
}

impl From<Donation> for DonationResponse {
    fn from(d: Donation) -> Self {
        Self {
            id: d.id.to_string(),
            food_type: d.food_type.parse().unwrap_or_default(),
            quantity: d.quantity,
            location: d.location,
            pickup_at: d.pickup_at.format(PICKUP_FORMAT).to_string(),
            description: d.description,
            direction: d.direction.parse().unwrap_or_default(),
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateDonationRequest {
    #[serde(default)]
    pub food_type: FoodType,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Quantity must be at least 1"))
    )]
    pub quantity: i32,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 300, message = "Location is required"))
    )]
    pub location: String,
    pub pickup_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub direction: DonationDirection,
}

impl CreateDonationRequest {
    /// Checks shared by the form and the server; returns the parsed
    /// pickup time on success.
    pub fn check(&self) -> Result<NaiveDateTime, AppError> {
        if self.quantity < 1 {
            return Err(AppError::field("quantity", "Quantity must be at least 1"));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::field("location", "Location is required"));
        }
        parse_pickup(&self.pickup_at)
    }
}

/// Parse a `datetime-local` value, tolerating a trailing seconds component.
pub fn parse_pickup(value: &str) -> Result<NaiveDateTime, AppError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, PICKUP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| AppError::field("pickup_at", "A valid date and time is required"))
}

/// Parse the quantity text box; anything that is not a whole number
/// reads as zero so the range check reports it.
pub fn parse_quantity(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i32) -> CreateDonationRequest {
        CreateDonationRequest {
            food_type: FoodType::Cooked,
            quantity,
            location: "Thamel".into(),
            pickup_at: "2026-03-01T18:30".into(),
            description: None,
            direction: DonationDirection::Give,
        }
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        for q in [0, -3] {
            let err = request(q).check().unwrap_err();
            assert!(err.field_errors.contains_key("quantity"));
        }
        assert!(request(1).check().is_ok());
    }

    #[test]
    fn unparseable_quantity_reads_as_zero() {
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity(" 12 "), 12);
    }

    #[test]
    fn pickup_accepts_datetime_local_format() {
        let parsed = parse_pickup("2026-03-01T18:30").unwrap();
        assert_eq!(parsed.format(PICKUP_FORMAT).to_string(), "2026-03-01T18:30");
        assert!(parse_pickup("2026-03-01T18:30:00").is_ok());
        assert!(parse_pickup("tomorrow").is_err());
    }

    #[test]
    fn direction_changes_form_labels() {
        let give = DonationDirection::Give;
        let receive = DonationDirection::Receive;
        assert_eq!(give.location_label(), "Pickup Location");
        assert_eq!(receive.location_label(), "Delivery Location");
        assert_eq!(give.date_label(), "Pickup Date & Time");
        assert_eq!(receive.date_label(), "Needed By Date & Time");
        assert_eq!(give.submit_label(), "Submit Donation");
        assert_eq!(receive.submit_label(), "Request Food");
    }

    #[test]
    fn summary_line() {
        let resp = DonationResponse::from(Donation {
            id: Uuid::new_v4(),
            food_type: "fresh".into(),
            quantity: 40,
            location: "Patan".into(),
            pickup_at: parse_pickup("2026-03-01T09:00").unwrap(),
            description: None,
            direction: "receive".into(),
            created_at: Utc::now(),
        });
        assert_eq!(resp.summary(), "Fresh Produce - 40 servings @ Patan");
        assert_eq!(resp.direction, DonationDirection::Receive);
        assert_eq!(resp.pickup_at, "2026-03-01T09:00");
    }

    #[test]
    fn food_type_wire_format() {
        assert_eq!(serde_json::to_string(&FoodType::Grains).unwrap(), r#""grains""#);
        assert_eq!("packaged".parse::<FoodType>().unwrap(), FoodType::Packaged);
    }
}
