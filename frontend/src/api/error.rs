//! Error taxonomy for the HTTP adapter.
//!
//! Status codes carry most of the meaning in this backend (404 drives the
//! registration branch, 409 the existing-account branch), so the variants
//! mirror them one to one. Transport and decoding failures get their own.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be assembled (serialisation, form building).
    #[error("request could not be built: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    /// The owning component went away and cancelled the call.
    #[error("request was cancelled")]
    Aborted,
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    Conflict,
    #[error("server error: {0}")]
    Server(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-2xx status plus its normalised detail text.
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            400 | 422 => Self::BadRequest(detail),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Server(detail),
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend is inconsistent: FastAPI-style `{"detail": "..."}`, older
/// `{"message": "..."}` handlers and plain-text bodies all occur. A
/// non-string `detail` (validation error arrays) falls through to the
/// caller's fallback.
pub fn parse_detail(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let field = value.get("detail").or_else(|| value.get("message"))?;
    field.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_their_variants() {
        assert_eq!(
            ApiError::from_status(400, "bad".into()),
            ApiError::BadRequest("bad".into())
        );
        assert_eq!(
            ApiError::from_status(422, "invalid".into()),
            ApiError::BadRequest("invalid".into())
        );
        assert_eq!(ApiError::from_status(401, String::new()), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, String::new()), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, String::new()), ApiError::NotFound);
        assert_eq!(ApiError::from_status(409, String::new()), ApiError::Conflict);
        assert_eq!(
            ApiError::from_status(500, "boom".into()),
            ApiError::Server("boom".into())
        );
        assert_eq!(
            ApiError::from_status(502, "bad gateway".into()),
            ApiError::Server("bad gateway".into())
        );
    }

    #[test]
    fn detail_field_wins() {
        assert_eq!(
            parse_detail(r#"{"detail": "User not found"}"#),
            Some("User not found".to_string())
        );
    }

    #[test]
    fn message_field_is_the_fallback() {
        assert_eq!(
            parse_detail(r#"{"message": "Invalid OTP"}"#),
            Some("Invalid OTP".to_string())
        );
    }

    #[test]
    fn non_string_details_are_skipped() {
        assert_eq!(parse_detail(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(parse_detail("plain text"), None);
        assert_eq!(parse_detail(""), None);
    }

    #[test]
    fn abort_is_recognisable() {
        assert!(ApiError::Aborted.is_abort());
        assert!(!ApiError::Unauthorized.is_abort());
    }
}
