use crate::{
    AuthAck, Deal, DealInterest, Document, Investment, InvestmentSummary, LoginInitRequest,
    NewInvestment, ProfileDraft, ProfileRecord, RegisterReceipt, RegisterRequest, TokenResponse,
    UserSummary, VerifyOtpRequest,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP methods the portal endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// The request-response relationship and metadata for one JSON endpoint.
///
/// Endpoints whose path carries an id override [`ApiRequest::path`]; everything
/// else uses the constant. The multipart upload endpoints and the blob
/// view/download endpoints are not JSON and live outside this trait.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or prefix, for id-carrying requests).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Authentication
// =========================================================

impl ApiRequest for LoginInitRequest {
    type Response = AuthAck;
    const PATH: &'static str = "/api/auth/login-init";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for VerifyOtpRequest {
    type Response = TokenResponse;
    const PATH: &'static str = "/api/auth/login-verify-otp";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterReceipt;
    const PATH: &'static str = "/api/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Best-effort server-side session teardown. The client clears its own
/// state whether or not this call succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = AuthAck;
    const PATH: &'static str = "/api/auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Deals
// =========================================================

/// List published deals, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ListDealsRequest;

impl ApiRequest for ListDealsRequest {
    type Response = Vec<Deal>;
    const PATH: &'static str = "/api/deals";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct GetDealRequest {
    pub id: i64,
}

impl ApiRequest for GetDealRequest {
    type Response = Deal;
    const PATH: &'static str = "/api/deals";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// Record interest in a deal. Idempotent server-side: repeating the call
/// returns the existing interest row.
#[derive(Debug, Clone, Serialize)]
pub struct ShowInterestRequest {
    pub deal_id: i64,
}

impl ApiRequest for ShowInterestRequest {
    type Response = DealInterest;
    const PATH: &'static str = "/api/deals";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}/interest", Self::PATH, self.deal_id)
    }
}

// =========================================================
// Documents
// =========================================================

/// List the caller's documents (uploaded by or assigned to them).
#[derive(Debug, Clone, Serialize)]
pub struct ListDocumentsRequest;

impl ApiRequest for ListDocumentsRequest {
    type Response = Vec<Document>;
    const PATH: &'static str = "/api/documents";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Multipart target for the caller's own uploads.
pub const DOCUMENT_UPLOAD_PATH: &str = "/api/documents/upload";

// =========================================================
// Investments
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListInvestmentsRequest;

impl ApiRequest for ListInvestmentsRequest {
    type Response = Vec<Investment>;
    const PATH: &'static str = "/api/investments";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for NewInvestment {
    type Response = Investment;
    const PATH: &'static str = "/api/investments";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentSummaryRequest;

impl ApiRequest for InvestmentSummaryRequest {
    type Response = InvestmentSummary;
    const PATH: &'static str = "/api/investments/summary";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Profiles
// =========================================================

/// Fetch the caller's profile; the backend creates a default one on first
/// access, so this never 404s for an authenticated user.
#[derive(Debug, Clone, Serialize)]
pub struct MyProfileRequest;

impl ApiRequest for MyProfileRequest {
    type Response = ProfileRecord;
    const PATH: &'static str = "/api/profiles/me";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for ProfileDraft {
    type Response = ProfileRecord;
    const PATH: &'static str = "/api/profiles";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub draft: ProfileDraft,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = ProfileRecord;
    const PATH: &'static str = "/api/profiles";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Admin
// =========================================================

/// Recipient candidates for on-behalf uploads.
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<UserSummary>;
    const PATH: &'static str = "/api/admin/users";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListDocumentsRequest;

impl ApiRequest for AdminListDocumentsRequest {
    type Response = Vec<Document>;
    const PATH: &'static str = "/api/admin/documents";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListInvestmentsRequest;

impl ApiRequest for AdminListInvestmentsRequest {
    type Response = Vec<Investment>;
    const PATH: &'static str = "/api/admin/investments";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminInvestmentSummaryRequest;

impl ApiRequest for AdminInvestmentSummaryRequest {
    type Response = InvestmentSummary;
    const PATH: &'static str = "/api/admin/investments/summary";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListProfilesRequest;

impl ApiRequest for AdminListProfilesRequest {
    type Response = Vec<ProfileRecord>;
    const PATH: &'static str = "/api/admin/profiles";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminGetProfileRequest {
    pub id: i64,
}

impl ApiRequest for AdminGetProfileRequest {
    type Response = ProfileRecord;
    const PATH: &'static str = "/api/admin/profiles";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// Multipart target for admin on-behalf uploads.
pub const ADMIN_UPLOAD_PATH: &str = "/api/admin/documents/upload-for-user";

/// Inline-view path for a stored document blob.
pub fn admin_document_view_path(id: i64) -> String {
    format!("/api/admin/documents/{id}/view")
}

/// Attachment-download path for a stored document blob.
pub fn admin_document_download_path(id: i64) -> String {
    format!("/api/admin/documents/{id}/download")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carrying_requests_build_their_paths() {
        assert_eq!(GetDealRequest { id: 7 }.path(), "/api/deals/7");
        assert_eq!(
            ShowInterestRequest { deal_id: 7 }.path(),
            "/api/deals/7/interest"
        );
        assert_eq!(
            UpdateProfileRequest {
                id: 12,
                draft: ProfileDraft::default(),
            }
            .path(),
            "/api/profiles/12"
        );
        assert_eq!(AdminGetProfileRequest { id: 3 }.path(), "/api/admin/profiles/3");
        assert_eq!(admin_document_view_path(9), "/api/admin/documents/9/view");
        assert_eq!(
            admin_document_download_path(9),
            "/api/admin/documents/9/download"
        );
    }

    #[test]
    fn plain_requests_use_their_constant_path() {
        assert_eq!(ListDealsRequest.path(), ListDealsRequest::PATH);
        assert_eq!(MyProfileRequest::METHOD, HttpMethod::Get);
        assert_eq!(LogoutRequest::METHOD, HttpMethod::Post);
        assert_eq!(UpdateProfileRequest::METHOD, HttpMethod::Put);
    }

    #[test]
    fn update_profile_serialises_the_draft_fields_only() {
        let update = UpdateProfileRequest {
            id: 4,
            draft: ProfileDraft {
                entity_name: "Example Holdings LLC".into(),
                jurisdiction: Some("Delaware".into()),
                ..ProfileDraft::default()
            },
        };
        let raw = serde_json::to_value(&update).unwrap();
        assert!(raw.get("id").is_none());
        assert_eq!(raw["entity_name"], "Example Holdings LLC");
        assert_eq!(raw["jurisdiction"], "Delaware");
    }
}
