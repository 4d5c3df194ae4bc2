use gpportal_shared::{ProfileRecord, Role};

use super::*;
use crate::web::route::Access;

fn pending(email: &str, stage: AuthStage) -> Session {
    Session::Pending(AuthFlow {
        email: email.to_string(),
        stage,
    })
}

fn authenticated(role: Role) -> Session {
    Session::Authenticated(AuthSession {
        token: "tok-123".to_string(),
        role,
        profile: None,
    })
}

fn profile(id: i64) -> ProfileRecord {
    ProfileRecord {
        id,
        entity_name: Some("Blue Harbor LLC".to_string()),
        jurisdiction: None,
        tax_classification: None,
        profile_type: None,
        contact_email: None,
        contact_phone: None,
        user_id: None,
    }
}

// =========================================================
// Wizard progression
// =========================================================

#[test]
fn full_login_path_reaches_an_authenticated_session() {
    let s = transition(
        &Session::LoggedOut,
        AuthEvent::FlowStarted {
            email: "ana@example.com".to_string(),
        },
    );
    assert_eq!(s, pending("ana@example.com", AuthStage::EmailCheck));

    let s = transition(&s, AuthEvent::EmailFound);
    assert_eq!(s, pending("ana@example.com", AuthStage::Password));

    let s = transition(&s, AuthEvent::OtpDispatched);
    assert_eq!(s, pending("ana@example.com", AuthStage::Otp));

    let s = transition(
        &s,
        AuthEvent::SignedIn {
            token: "tok-999".to_string(),
            role: Role::User,
        },
    );
    assert!(s.is_authenticated());
    assert_eq!(s.token(), Some("tok-999"));
    assert_eq!(s.role(), Some(Role::User));
    assert!(s.profile().is_none());
}

#[test]
fn unknown_email_is_offered_registration() {
    let s = pending("new@example.com", AuthStage::EmailCheck);
    let s = transition(&s, AuthEvent::EmailUnknown);
    assert_eq!(s, pending("new@example.com", AuthStage::Register));
}

#[test]
fn registration_path_still_passes_the_code_screen() {
    let s = transition(
        &Session::LoggedOut,
        AuthEvent::RegistrationStarted {
            email: "new@example.com".to_string(),
        },
    );
    assert_eq!(s, pending("new@example.com", AuthStage::Register));

    // Account created, login sequence ran, code dispatched.
    let s = transition(&s, AuthEvent::OtpDispatched);
    assert_eq!(s, pending("new@example.com", AuthStage::Otp));

    let s = transition(
        &s,
        AuthEvent::SignedIn {
            token: "tok-1".to_string(),
            role: Role::User,
        },
    );
    assert!(s.is_authenticated());
}

#[test]
fn existing_account_moves_registration_to_the_password_screen() {
    let s = pending("taken@example.com", AuthStage::Register);
    let s = transition(&s, AuthEvent::AccountExists);
    assert_eq!(s, pending("taken@example.com", AuthStage::Password));
}

#[test]
fn account_that_disappears_mid_flow_falls_back_to_registration() {
    let s = pending("gone@example.com", AuthStage::Password);
    let s = transition(&s, AuthEvent::EmailUnknown);
    assert_eq!(s, pending("gone@example.com", AuthStage::Register));
}

#[test]
fn stepping_back_from_the_code_screen_returns_to_the_password() {
    let s = pending("ana@example.com", AuthStage::Otp);
    let s = transition(&s, AuthEvent::CodeAbandoned);
    assert_eq!(s, pending("ana@example.com", AuthStage::Password));
}

// =========================================================
// Out-of-order events stay harmless
// =========================================================

#[test]
fn a_token_is_only_accepted_at_the_code_screen() {
    let signed_in = AuthEvent::SignedIn {
        token: "tok-1".to_string(),
        role: Role::User,
    };
    for stage in [AuthStage::EmailCheck, AuthStage::Password, AuthStage::Register] {
        let s = pending("ana@example.com", stage);
        assert_eq!(transition(&s, signed_in.clone()), s);
    }
}

#[test]
fn code_dispatch_needs_validated_credentials_first() {
    let s = pending("ana@example.com", AuthStage::EmailCheck);
    assert_eq!(transition(&s, AuthEvent::OtpDispatched), s);
}

#[test]
fn flow_events_do_not_touch_an_authenticated_session() {
    let s = authenticated(Role::User);
    assert_eq!(
        transition(
            &s,
            AuthEvent::FlowStarted {
                email: "x@example.com".to_string()
            }
        ),
        s
    );
    assert_eq!(transition(&s, AuthEvent::EmailFound), s);
    assert_eq!(transition(&s, AuthEvent::OtpDispatched), s);
}

#[test]
fn stale_profile_result_does_not_resurrect_a_session() {
    assert_eq!(
        transition(&Session::LoggedOut, AuthEvent::ProfileLoaded(profile(5))),
        Session::LoggedOut
    );
}

// =========================================================
// Sign-out and restore
// =========================================================

#[test]
fn signed_out_clears_any_state() {
    for state in [
        Session::LoggedOut,
        pending("ana@example.com", AuthStage::Otp),
        authenticated(Role::Admin),
    ] {
        assert_eq!(transition(&state, AuthEvent::SignedOut), Session::LoggedOut);
    }
}

#[test]
fn a_stored_session_restores_from_logged_out() {
    let s = transition(
        &Session::LoggedOut,
        AuthEvent::SignedIn {
            token: "tok-restored".to_string(),
            role: Role::Admin,
        },
    );
    assert_eq!(s.token(), Some("tok-restored"));
    assert_eq!(s.role(), Some(Role::Admin));
}

#[test]
fn profile_attaches_to_the_live_session() {
    let s = authenticated(Role::User);
    let s = transition(&s, AuthEvent::ProfileLoaded(profile(7)));
    assert_eq!(s.profile().map(|p| p.id), Some(7));
    // Token and role survive the attach.
    assert_eq!(s.token(), Some("tok-123"));
    assert_eq!(s.role(), Some(Role::User));
}

// =========================================================
// Access mapping
// =========================================================

#[test]
fn access_level_tracks_the_session() {
    assert_eq!(Session::LoggedOut.access(), Access::Guest);
    assert_eq!(
        pending("ana@example.com", AuthStage::Otp).access(),
        Access::Guest
    );
    assert_eq!(authenticated(Role::User).access(), Access::Investor);
    assert_eq!(authenticated(Role::Admin).access(), Access::Admin);
}
