//! Session and authentication state.
//!
//! The session is a typed union: logged out, a sign-in wizard in flight,
//! or an established token plus role claim. A pure transition function
//! owns the state machine; the async operations below talk to the backend
//! and feed it events. The role is whatever the server asserted next to
//! the token; the token itself stays opaque to the client.

use gloo_storage::{SessionStorage, Storage};
use gpportal_shared::protocol::{LogoutRequest, MyProfileRequest};
use gpportal_shared::{LoginInitRequest, ProfileRecord, RegisterRequest, Role, VerifyOtpRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, PortalApi};
use crate::web::route::Access;

const STORAGE_SESSION_KEY: &str = "gpportal_session";

// =========================================================
// Session model
// =========================================================

/// Which screen of the sign-in wizard is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    /// Email submitted, existence unknown.
    EmailCheck,
    /// The account exists; waiting for the password.
    Password,
    /// Credentials accepted; a one-time code is in the user's inbox.
    Otp,
    /// No account for this email; registration form, email prefilled.
    Register,
}

/// An in-progress sign-in or registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlow {
    pub email: String,
    pub stage: AuthStage,
}

/// An established session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub role: Role,
    /// Filled by the passive profile loader; absence is not an error.
    pub profile: Option<ProfileRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    Pending(AuthFlow),
    Authenticated(AuthSession),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated(auth) => Some(&auth.token),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated(auth) => Some(auth.role),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        match self {
            Session::Authenticated(auth) => auth.profile.as_ref(),
            _ => None,
        }
    }

    pub fn flow(&self) -> Option<&AuthFlow> {
        match self {
            Session::Pending(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn access(&self) -> Access {
        Access::from_role(self.role())
    }
}

// =========================================================
// Transition function
// =========================================================

/// Everything the backend (or the user) can do to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// An email was submitted on the entry screen.
    FlowStarted { email: String },
    /// The probe found an account.
    EmailFound,
    /// The probe found nothing; offer registration instead.
    EmailUnknown,
    /// The user asked for the registration form directly.
    RegistrationStarted { email: String },
    /// Credentials accepted, one-time code dispatched.
    OtpDispatched,
    /// Registration hit an account that already exists.
    AccountExists,
    /// The user stepped back from the code screen to the password.
    CodeAbandoned,
    /// The one-time code checked out, or a stored session was restored.
    SignedIn { token: String, role: Role },
    /// Logout, expiry, or a rejected token.
    SignedOut,
    /// The passive loader fetched the caller's profile.
    ProfileLoaded(ProfileRecord),
}

/// Pure state machine. Events that make no sense in the current state
/// leave it untouched, which keeps stale async results harmless.
pub fn transition(current: &Session, event: AuthEvent) -> Session {
    use AuthEvent::*;
    use AuthStage::*;

    match (current, event) {
        (_, SignedOut) => Session::LoggedOut,
        (_, FlowStarted { email }) if !current.is_authenticated() => Session::Pending(AuthFlow {
            email,
            stage: EmailCheck,
        }),
        (_, RegistrationStarted { email }) if !current.is_authenticated() => {
            Session::Pending(AuthFlow {
                email,
                stage: Register,
            })
        }
        (Session::Pending(flow), EmailFound) if flow.stage == EmailCheck => {
            Session::Pending(AuthFlow {
                stage: Password,
                ..flow.clone()
            })
        }
        (Session::Pending(flow), EmailUnknown) if matches!(flow.stage, EmailCheck | Password) => {
            Session::Pending(AuthFlow {
                stage: Register,
                ..flow.clone()
            })
        }
        (Session::Pending(flow), OtpDispatched) if matches!(flow.stage, Password | Register) => {
            Session::Pending(AuthFlow {
                stage: Otp,
                ..flow.clone()
            })
        }
        (Session::Pending(flow), AccountExists) if flow.stage == Register => {
            Session::Pending(AuthFlow {
                stage: Password,
                ..flow.clone()
            })
        }
        (Session::Pending(flow), CodeAbandoned) if flow.stage == Otp => {
            Session::Pending(AuthFlow {
                stage: Password,
                ..flow.clone()
            })
        }
        (Session::Pending(flow), SignedIn { token, role }) if flow.stage == Otp => {
            Session::Authenticated(AuthSession {
                token,
                role,
                profile: None,
            })
        }
        // Restoring a persisted session at boot.
        (Session::LoggedOut, SignedIn { token, role }) => Session::Authenticated(AuthSession {
            token,
            role,
            profile: None,
        }),
        (Session::Authenticated(auth), ProfileLoaded(profile)) => {
            Session::Authenticated(AuthSession {
                profile: Some(profile),
                ..auth.clone()
            })
        }
        (state, _) => state.clone(),
    }
}

// =========================================================
// Persistence
// =========================================================

/// Persisted shape for this tab. The role rides along so a reload knows
/// which navigation to draw before any request completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredSession {
    pub token: String,
    pub role: Role,
}

pub(crate) fn stored_session() -> Option<StoredSession> {
    SessionStorage::get(STORAGE_SESSION_KEY).ok()
}

fn persist_session(token: &str, role: Role) {
    let stored = StoredSession {
        token: token.to_string(),
        role,
    };
    if let Err(err) = SessionStorage::set(STORAGE_SESSION_KEY, stored) {
        log::warn!("session not persisted: {err}");
    }
}

fn clear_stored_session() {
    SessionStorage::delete(STORAGE_SESSION_KEY);
}

// =========================================================
// Context
// =========================================================

/// Authentication context shared through leptos context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (session, set_session) = signal(Session::default());
        Self {
            session,
            set_session,
        }
    }

    /// Feed one event through the transition function.
    pub fn apply(&self, event: AuthEvent) {
        self.set_session
            .update(|session| *session = transition(session, event));
    }

    /// Access level signal for the router guards.
    pub fn access_signal(&self) -> Signal<Access> {
        let session = self.session;
        Signal::derive(move || session.get().access())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the auth context (must be provided by App).
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not found in context. Ensure App provides it.")
}

/// Restore a session persisted by an earlier page load in this tab.
pub fn init_auth(ctx: &AuthContext) {
    if let Some(stored) = stored_session() {
        ctx.apply(AuthEvent::SignedIn {
            token: stored.token,
            role: stored.role,
        });
    }
}

// =========================================================
// Operations
// =========================================================

/// What the entry screen should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailGateOutcome {
    /// The account exists: ask for the password.
    Existing,
    /// Nothing registered: offer the registration form.
    Unknown,
}

/// Probe whether an account exists for this email.
pub async fn check_email(
    ctx: &AuthContext,
    api: &PortalApi,
    email: String,
) -> Result<EmailGateOutcome, ApiError> {
    ctx.apply(AuthEvent::FlowStarted {
        email: email.clone(),
    });
    let probe = LoginInitRequest {
        email,
        password: None,
    };
    match api.send(&probe, None).await {
        Ok(_) => {
            ctx.apply(AuthEvent::EmailFound);
            Ok(EmailGateOutcome::Existing)
        }
        Err(ApiError::NotFound) => {
            ctx.apply(AuthEvent::EmailUnknown);
            Ok(EmailGateOutcome::Unknown)
        }
        // Older backend revisions validate credentials even on the probe;
        // a rejection still proves the account exists.
        Err(ApiError::Unauthorized) | Err(ApiError::BadRequest(_)) => {
            ctx.apply(AuthEvent::EmailFound);
            Ok(EmailGateOutcome::Existing)
        }
        Err(err) => Err(err),
    }
}

/// Jump straight to the registration form (entry-screen link).
pub fn start_registration(ctx: &AuthContext, email: String) {
    ctx.apply(AuthEvent::RegistrationStarted { email });
}

/// Outcome of a password submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordOutcome {
    /// One-time code dispatched; move to the code screen.
    OtpSent,
    /// The account disappeared between steps; offer registration.
    Unknown,
}

/// Submit the password for the email collected earlier. A 401 is left to
/// the caller: the user retypes on the same screen.
pub async fn submit_password(
    ctx: &AuthContext,
    api: &PortalApi,
    password: String,
) -> Result<PasswordOutcome, ApiError> {
    let Some(email) = ctx
        .session
        .with_untracked(|s| s.flow().map(|f| f.email.clone()))
    else {
        return Err(ApiError::Request("no sign-in in progress".into()));
    };
    let request = LoginInitRequest {
        email,
        password: Some(password),
    };
    match api.send(&request, None).await {
        Ok(_) => {
            ctx.apply(AuthEvent::OtpDispatched);
            Ok(PasswordOutcome::OtpSent)
        }
        Err(ApiError::NotFound) => {
            ctx.apply(AuthEvent::EmailUnknown);
            Ok(PasswordOutcome::Unknown)
        }
        Err(err) => Err(err),
    }
}

/// Exchange the one-time code for a token and the role claim. On success
/// the session is persisted and the store flips to authenticated.
pub async fn verify_otp(ctx: &AuthContext, api: &PortalApi, code: String) -> Result<(), ApiError> {
    let Some(email) = ctx
        .session
        .with_untracked(|s| s.flow().map(|f| f.email.clone()))
    else {
        return Err(ApiError::Request("no sign-in in progress".into()));
    };
    let request = VerifyOtpRequest { email, otp: code };
    let token = api.send(&request, None).await?;
    if token.access_token.is_empty() {
        return Err(ApiError::Decode("empty access token".into()));
    }
    persist_session(&token.access_token, token.role);
    ctx.apply(AuthEvent::SignedIn {
        token: token.access_token,
        role: token.role,
    });
    Ok(())
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account created and the login sequence already ran; code dispatched.
    OtpSent,
    /// The email is taken; switch to the password screen.
    ExistingAccount,
}

/// Create the account, then immediately run the login sequence so the
/// one-time code gate still applies to fresh registrations.
pub async fn register(
    ctx: &AuthContext,
    api: &PortalApi,
    request: RegisterRequest,
) -> Result<RegisterOutcome, ApiError> {
    let email = request.email.clone();
    let password = request.password.clone();
    ctx.apply(AuthEvent::RegistrationStarted {
        email: email.clone(),
    });
    match api.send(&request, None).await {
        Ok(_) => {}
        Err(ApiError::Conflict) => {
            ctx.apply(AuthEvent::AccountExists);
            return Ok(RegisterOutcome::ExistingAccount);
        }
        Err(err) => return Err(err),
    }
    let login = LoginInitRequest {
        email,
        password: Some(password),
    };
    api.send(&login, None).await?;
    ctx.apply(AuthEvent::OtpDispatched);
    Ok(RegisterOutcome::OtpSent)
}

/// Drop the session. Safe to call in any state; the server call is
/// best-effort and local state clears regardless.
pub async fn logout(ctx: &AuthContext, api: &PortalApi) {
    if ctx.session.with_untracked(Session::is_authenticated) {
        if let Err(err) = api.send(&LogoutRequest, None).await {
            log::debug!("server-side logout failed: {err}");
        }
    }
    clear_stored_session();
    ctx.apply(AuthEvent::SignedOut);
}

// =========================================================
// Root-level effects
// =========================================================

/// Load the caller's profile whenever the token changes. Failures other
/// than a rejected token keep the session; a result that lands after a
/// logout is discarded by the transition function.
pub fn setup_profile_loader(ctx: &AuthContext, api: PortalApi) {
    let ctx = *ctx;
    let token = Memo::new(move |_| ctx.session.with(|s| s.token().map(str::to_owned)));
    Effect::new(move |_| {
        if token.get().is_none() {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            match api.send(&MyProfileRequest, None).await {
                Ok(profile) => ctx.apply(AuthEvent::ProfileLoaded(profile)),
                Err(err) if err.is_abort() => {}
                Err(err) => log::warn!("profile load failed, keeping session: {err}"),
            }
        });
    });
}

/// Single consumer of the adapter's unauthorized events: any 401 while
/// authenticated tears the session down, and the router then lands on the
/// entry screen. Wizard-stage 401s are ordinary form errors and ignored.
pub fn setup_session_watchdog(ctx: &AuthContext, api: &PortalApi) {
    let ctx = *ctx;
    let events = api.unauthorized_events();
    Effect::new(move |prev: Option<u64>| {
        let count = events.get();
        if let Some(prev) = prev {
            if count > prev && ctx.session.with_untracked(Session::is_authenticated) {
                log::warn!("token rejected by the backend, signing out");
                clear_stored_session();
                ctx.apply(AuthEvent::SignedOut);
            }
        }
        count
    });
}

#[cfg(test)]
mod tests;
