use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// Partner organization. Rows are created by the operator tool; the
/// dashboard authorizes callers by finding their email here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct NgoProfile {
    pub id: Uuid,
    pub org_name: String,
    pub email: String,
    pub registration_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NgoResponse {
    pub id: String,
    pub org_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
}

impl From<NgoProfile> for NgoResponse {
    fn from(n: NgoProfile) -> Self {
        Self {
            id: n.id.to_string(),
            org_name: n.org_name,
            email: n.email,
            registration_number: n.registration_number,
            phone: n.phone,
            address: n.address,
            website: n.website,
            description: n.description,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// Input to the operator tool that enrolls a partner organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewNgo {
    pub org_name: String,
    pub email: String,
    pub password: String,
    pub registration_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// Headline numbers for the home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ImpactStats {
    pub issues_resolved: i64,
    pub servings_donated: i64,
    pub volunteers: i64,
    pub ngo_partners: i64,
}

impl ImpactStats {
    /// Label and value pairs in display order.
    pub fn tiles(&self) -> [(&'static str, i64); 4] {
        [
            ("Issues Resolved", self.issues_resolved),
            ("Meals Donated", self.servings_donated),
            ("Active Volunteers", self.volunteers),
            ("NGO Partners", self.ngo_partners),
        ]
    }
}
