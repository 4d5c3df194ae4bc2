//! Client-side form checks, mirroring what the backend enforces.

/// Shape check for the entry form: something@something.tld, no whitespace,
/// exactly one at sign.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Registration password floor.
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        Some("Password must be at least 8 characters.")
    } else {
        None
    }
}

/// The upload endpoints accept PDFs only; catch it before the request.
pub fn is_pdf_filename(name: &str) -> bool {
    name.len() > 4 && name.to_ascii_lowercase().ends_with(".pdf")
}

/// Settings accepts US-style 10-digit numbers.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Join the wizard's six code boxes if every box holds one digit.
pub fn complete_otp(digits: &[String]) -> Option<String> {
    if digits.len() == 6
        && digits
            .iter()
            .all(|d| d.len() == 1 && d.chars().all(|c| c.is_ascii_digit()))
    {
        Some(digits.concat())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_need_local_domain_and_tld() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("anaexample.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana@example."));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("ana@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_floor_is_eight_characters() {
        assert!(password_error("short").is_some());
        assert!(password_error("1234567").is_some());
        assert!(password_error("12345678").is_none());
    }

    #[test]
    fn only_pdf_filenames_pass() {
        assert!(is_pdf_filename("statement.pdf"));
        assert!(is_pdf_filename("REPORT.PDF"));
        assert!(!is_pdf_filename("statement.docx"));
        assert!(!is_pdf_filename(".pdf"));
        assert!(!is_pdf_filename("pdf"));
    }

    #[test]
    fn phone_wants_ten_digits() {
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("555123456"));
        assert!(!is_valid_phone("55512345678"));
    }

    #[test]
    fn otp_joins_only_when_complete() {
        let full: Vec<String> = "123456".chars().map(|c| c.to_string()).collect();
        assert_eq!(complete_otp(&full), Some("123456".to_string()));

        let mut partial = full.clone();
        partial[3] = String::new();
        assert_eq!(complete_otp(&partial), None);

        let mut letters = full;
        letters[0] = "x".to_string();
        assert_eq!(complete_otp(&letters), None);
    }
}
