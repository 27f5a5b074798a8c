use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::upload::MAX_ISSUE_IMAGES;

#[cfg(feature = "validation")]
use validator::Validate;

/// Reporter id and email stored for submissions made while signed out.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    #[default]
    Environment,
    Infrastructure,
    Sanitation,
    Education,
    Health,
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 6] = [
        IssueCategory::Environment,
        IssueCategory::Infrastructure,
        IssueCategory::Sanitation,
        IssueCategory::Education,
        IssueCategory::Health,
        IssueCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Environment => "environment",
            IssueCategory::Infrastructure => "infrastructure",
            IssueCategory::Sanitation => "sanitation",
            IssueCategory::Education => "education",
            IssueCategory::Health => "health",
            IssueCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Environment => "Environment",
            IssueCategory::Infrastructure => "Infrastructure",
            IssueCategory::Sanitation => "Sanitation",
            IssueCategory::Education => "Education",
            IssueCategory::Health => "Health",
            IssueCategory::Other => "Other",
        }
    }
}

impl FromStr for IssueCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| AppError::field("category", format!("Unknown category: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// Status lifecycle
// ---------------------------------------------------------------------------

/// Triage state of an issue.
///
/// Lifecycle: `new -> in-progress -> resolved`, with `resolved -> in-progress`
/// as the only way back. There is no direct `new -> resolved` edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    New,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [
        IssueStatus::New,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::New => "new",
            IssueStatus::InProgress => "in-progress",
            IssueStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::New => "New",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
        }
    }

    /// Every stored spelling of this status. Older records say `pending`
    /// where newer ones say `new`.
    pub fn stored_values(&self) -> &'static [&'static str] {
        match self {
            IssueStatus::New => &["new", "pending"],
            IssueStatus::InProgress => &["in-progress"],
            IssueStatus::Resolved => &["resolved"],
        }
    }

    /// Lenient parse for values read back from storage.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// The single dashboard action offered in this state.
    pub fn next_action(&self) -> IssueAction {
        match self {
            IssueStatus::New => IssueAction::StartWorking,
            IssueStatus::InProgress => IssueAction::MarkResolved,
            IssueStatus::Resolved => IssueAction::Reopen,
        }
    }

    /// Apply a triage action, refusing anything off the lifecycle graph.
    pub fn apply(&self, action: IssueAction) -> Result<IssueStatus, AppError> {
        if action.from() == *self {
            Ok(action.to())
        } else {
            Err(AppError::conflict(format!(
                "Cannot {} an issue that is {}",
                action.verb(),
                self.label().to_lowercase()
            )))
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "pending" => Ok(IssueStatus::New),
            "in-progress" | "in_progress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            other => Err(AppError::bad_request(format!("Unknown status: {}", other))),
        }
    }
}

/// Dashboard triage actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    StartWorking,
    MarkResolved,
    Reopen,
}

impl IssueAction {
    /// Status the issue must currently be in.
    pub fn from(&self) -> IssueStatus {
        match self {
            IssueAction::StartWorking => IssueStatus::New,
            IssueAction::MarkResolved => IssueStatus::InProgress,
            IssueAction::Reopen => IssueStatus::Resolved,
        }
    }

    /// Status the issue ends up in.
    pub fn to(&self) -> IssueStatus {
        match self {
            IssueAction::StartWorking => IssueStatus::InProgress,
            IssueAction::MarkResolved => IssueStatus::Resolved,
            IssueAction::Reopen => IssueStatus::InProgress,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueAction::StartWorking => "Start Working",
            IssueAction::MarkResolved => "Mark as Resolved",
            IssueAction::Reopen => "Reopen Issue",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            IssueAction::StartWorking => "start work on",
            IssueAction::MarkResolved => "resolve",
            IssueAction::Reopen => "reopen",
        }
    }
}

/// Dashboard listing filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(IssueStatus),
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(IssueStatus::New),
        StatusFilter::Only(IssueStatus::InProgress),
        StatusFilter::Only(IssueStatus::Resolved),
    ];

    pub fn status(&self) -> Option<IssueStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Issues",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// Query-string form; `all` for no filter.
    pub fn as_query(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: IssueStatus) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// A reported issue as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Issue {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub reporter_id: String,
    pub reporter_email: String,
    pub image_urls: Vec<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub handled_by_ngo_id: Option<Uuid>,
    pub handled_by_name: Option<String>,
    pub handled_by_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// Snapshot of the NGO that last moved an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IssueHandler {
    pub ngo_id: String,
    pub ngo_name: String,
    pub ngo_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IssueResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub reporter_id: String,
    pub reporter_email: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<IssueHandler>,
}

impl IssueResponse {
    pub fn is_anonymous(&self) -> bool {
        self.reporter_id == ANONYMOUS_REPORTER
    }
}

impl From<Issue> for IssueResponse {
    fn from(i: Issue) -> Self {
        let handled_by = match (i.handled_by_ngo_id, i.handled_by_name, i.handled_by_email) {
            (Some(id), Some(name), Some(email)) => Some(IssueHandler {
                ngo_id: id.to_string(),
                ngo_name: name,
                ngo_email: email,
            }),
            _ => None,
        };
        Self {
            id: i.id.to_string(),
            title: i.title,
            description: i.description,
            location: i.location,
            category: i.category.parse().unwrap_or(IssueCategory::Other),
            status: IssueStatus::from_stored(&i.status),
            reporter_id: i.reporter_id,
            reporter_email: i.reporter_email,
            image_urls: i.image_urls,
            contact_phone: i.contact_phone,
            created_at: i.created_at.to_rfc3339(),
            updated_at: i.updated_at.map(|t| t.to_rfc3339()),
            handled_by,
        }
    }
}

/// Body of an issue report. The reporter is taken from the session, never
/// from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateIssueRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 200, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub category: IssueCategory,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 300, message = "Location is required"))
    )]
    pub location: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Description is required"))
    )]
    pub description: String,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 5, message = "You can only attach up to 5 images"))
    )]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl CreateIssueRequest {
    /// Presence and image-count checks shared by the form and the server.
    pub fn check(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title, "Title is required"),
            ("location", &self.location, "Location is required"),
            ("description", &self.description, "Description is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                return Err(AppError::field(field, message));
            }
        }
        if self.image_urls.len() > MAX_ISSUE_IMAGES {
            return Err(AppError::field(
                "image_urls",
                format!("You can only attach up to {} images", MAX_ISSUE_IMAGES),
            ));
        }
        Ok(())
    }

    /// Phone with surrounding whitespace removed; blank becomes `None`.
    pub fn normalized_phone(&self) -> Option<String> {
        self.contact_phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateIssueStatusRequest {
    pub action: IssueAction,
}

/// Query parameters for the issue listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct IssueListParams {
    /// `all`, `new`, `in-progress` or `resolved`.
    #[serde(default)]
    pub status: Option<String>,
}
