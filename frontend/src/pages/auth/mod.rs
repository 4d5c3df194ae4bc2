//! Sign-in wizard screens.
//!
//! The session store owns the wizard's position; every screen syncs itself
//! against the flow stage instead of trusting the URL.

mod otp;
mod password;
mod register;
mod start;

pub use otp::OtpPage;
pub use password::PasswordPage;
pub use register::RegisterPage;
pub use start::StartPage;

use leptos::prelude::*;

use crate::auth::{AuthContext, AuthStage};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Screen a flow stage belongs to.
fn stage_route(stage: AuthStage) -> AppRoute {
    match stage {
        AuthStage::EmailCheck => AppRoute::AuthStart,
        AuthStage::Password => AppRoute::AuthPassword,
        AuthStage::Otp => AppRoute::AuthOtp,
        AuthStage::Register => AppRoute::AuthRegister,
    }
}

/// Keep a wizard screen aligned with the session store. Deep links without
/// a flow fall back to the entry screen; a stage change moves the user
/// forward automatically.
fn wizard_sync(auth: AuthContext, page: AppRoute) {
    let router = use_router();
    Effect::new(move |_| {
        let session = auth.session.get();
        if session.is_authenticated() {
            // The router's access effect owns that redirect.
            return;
        }
        let target = match session.flow() {
            Some(flow) => stage_route(flow.stage),
            None => AppRoute::AuthStart,
        };
        if target != page {
            router.navigate(&target.to_path());
        }
    });
}
