//! Build-time configuration.

/// Fallback backend origin for local development.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Backend origin baked into the bundle.
///
/// Set `GPPORTAL_API_URL` when invoking trunk to point the build at
/// another host. Trailing slashes are trimmed so path joins stay
/// predictable.
pub fn api_base_url() -> String {
    option_env!("GPPORTAL_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
