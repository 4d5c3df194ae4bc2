use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod fmt;
pub mod protocol;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// Accounts and roles
// =========================================================

/// Server-asserted role claim, returned next to the access token.
/// Anything unrecognised is treated as a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

// =========================================================
// Authentication payloads
// =========================================================

/// Body of `POST /api/auth/login-init`.
///
/// Without a password the call is an existence probe; with one it validates
/// the credentials and dispatches the one-time code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInitRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Minimal acknowledgement body; the interesting signal is the status code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Access token plus the role claim. The client never looks inside the
/// token; the role next to it is the only authority for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Registration response. The shape varies across backend revisions, so
/// every field is optional and the login sequence that follows does not
/// depend on any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterReceipt {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Deals
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub deal_type: Option<String>,
    #[serde(default)]
    pub deal_subtype: Option<String>,
    #[serde(default)]
    pub deal_stage: Option<String>,
    #[serde(default)]
    pub sponsors: Option<String>,
    #[serde(default)]
    pub close_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub offering_size: Option<f64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub funding_instructions: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInterest {
    pub id: i64,
    pub deal_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

// =========================================================
// Documents
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub deal_name: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,

    // Present only on the admin listing.
    #[serde(default)]
    pub uploaded_by_id: Option<i64>,
    #[serde(default)]
    pub uploaded_by_email: Option<String>,
    #[serde(default)]
    pub recipient_user_id: Option<i64>,
}

/// Optional descriptors shared by the document upload forms. They travel as
/// plain multipart fields, never as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadMeta {
    pub label: Option<String>,
    pub deal_name: Option<String>,
    pub profile_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

// =========================================================
// Investments
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InvestmentStatus {
    Active,
    Closed,
    #[default]
    Pending,
}

impl std::fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentStatus::Active => write!(f, "Active"),
            InvestmentStatus::Closed => write!(f, "Closed"),
            InvestmentStatus::Pending => write!(f, "Pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub deal_name: String,
    pub investment_total: f64,
    pub distribution_total: f64,
    pub status: InvestmentStatus,
    #[serde(default)]
    pub uploaded_by_id: Option<i64>,
}

/// Create payload; the backend keys investments by a caller-chosen id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestment {
    pub id: i64,
    pub deal_name: String,
    pub investment_total: f64,
    pub distribution_total: f64,
    pub status: InvestmentStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    #[serde(default)]
    pub total_invested: f64,
    #[serde(default)]
    pub total_distributed: f64,
    #[serde(default)]
    pub active_count: i64,
    #[serde(default)]
    pub closed_count: i64,
}

// =========================================================
// Investor profiles
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub tax_classification: Option<String>,
    #[serde(default)]
    pub profile_type: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,

    // Present only on the admin listing.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Create/update payload for the caller's own profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub entity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_user_for_unknown_values() {
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Admin);

        let role: Role = serde_json::from_str("\"Investor\"").unwrap();
        assert_eq!(role, Role::User);
        assert!(!role.is_admin());
    }

    #[test]
    fn token_response_tolerates_missing_role() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.role, Role::User);
    }

    #[test]
    fn document_parses_user_scope_shape() {
        // The non-admin listing omits uploader and recipient fields entirely.
        let raw = r#"{
            "id": 3,
            "name": "subscription.pdf",
            "label": "LLC",
            "deal_name": "Fund I",
            "profile_name": null,
            "file_path": "docs/subscription.pdf",
            "uploaded_at": "2026-08-17T12:00:00"
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.name, "subscription.pdf");
        assert_eq!(doc.profile_name, None);
        assert_eq!(doc.uploaded_by_id, None);
        assert!(doc.uploaded_at.is_some());
    }

    #[test]
    fn investment_status_round_trips_as_plain_words() {
        let status: InvestmentStatus = serde_json::from_str("\"Closed\"").unwrap();
        assert_eq!(status, InvestmentStatus::Closed);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Closed\"");
    }

    #[test]
    fn login_init_probe_omits_the_password_field() {
        let probe = LoginInitRequest {
            email: "a@b.co".into(),
            password: None,
        };
        assert_eq!(
            serde_json::to_string(&probe).unwrap(),
            r#"{"email":"a@b.co"}"#
        );
    }
}
