//! GP portal frontend.
//!
//! Context-driven CSR app:
//! - `web::route` / `web::router`: typed routes and the guarded history router
//! - `api`: HTTP adapter (bearer attach, 401 event, abort plumbing)
//! - `auth`: session state machine and the sign-in operations
//! - `upload`: admin batch uploads as an explicit task list
//! - `components` / `pages`: UI layer

mod api;
mod auth;
mod components {
    mod add_investment_dialog;
    pub mod icons;
    mod layout;
    mod toast;

    pub use add_investment_dialog::AddInvestmentDialog;
    pub use layout::MainLayout;
    pub use toast::{flash, Toast};
}
mod config;
mod pages {
    pub mod admin;
    pub mod auth;
    mod dashboard;
    mod deal_detail;
    mod deals;
    mod documents;
    mod investments;
    mod profiles;
    mod settings;

    pub use dashboard::DashboardPage;
    pub use deal_detail::DealDetailPage;
    pub use deals::DealsPage;
    pub use documents::DocumentsPage;
    pub use investments::InvestmentsPage;
    pub use profiles::ProfilesPage;
    pub use settings::SettingsPage;
}
mod upload;
mod validate;

pub(crate) mod web {
    pub mod abort;
    pub mod download;
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::api::PortalApi;
use crate::auth::{init_auth, setup_profile_loader, setup_session_watchdog, AuthContext};
use crate::components::MainLayout;
use crate::pages::admin::{
    AdminDocumentsPage, AdminInvestmentsPage, AdminProfileDetailPage, AdminProfilesPage,
};
use crate::pages::auth::{OtpPage, PasswordPage, RegisterPage, StartPage};
use crate::pages::{
    DashboardPage, DealDetailPage, DealsPage, DocumentsPage, InvestmentsPage, ProfilesPage,
    SettingsPage,
};
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

/// Wrap a portal page in the sidebar/header chrome. The wizard screens
/// render bare.
fn shell(inner: AnyView) -> AnyView {
    view! { <MainLayout>{inner}</MainLayout> }.into_any()
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::AuthStart => view! { <StartPage /> }.into_any(),
        AppRoute::AuthPassword => view! { <PasswordPage /> }.into_any(),
        AppRoute::AuthOtp => view! { <OtpPage /> }.into_any(),
        AppRoute::AuthRegister => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => shell(view! { <DashboardPage /> }.into_any()),
        AppRoute::Deals => shell(view! { <DealsPage /> }.into_any()),
        AppRoute::DealDetail(id) => shell(view! { <DealDetailPage deal_id=id /> }.into_any()),
        AppRoute::Documents => shell(view! { <DocumentsPage /> }.into_any()),
        AppRoute::Investments => shell(view! { <InvestmentsPage /> }.into_any()),
        AppRoute::Profiles => shell(view! { <ProfilesPage /> }.into_any()),
        AppRoute::Settings => shell(view! { <SettingsPage /> }.into_any()),
        AppRoute::AdminDocuments => shell(view! { <AdminDocumentsPage /> }.into_any()),
        AppRoute::AdminInvestments => shell(view! { <AdminInvestmentsPage /> }.into_any()),
        AppRoute::AdminProfiles => shell(view! { <AdminProfilesPage /> }.into_any()),
        AppRoute::AdminProfileDetail(id) => {
            shell(view! { <AdminProfileDetailPage profile_id=id /> }.into_any())
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"This page does not exist."</p>
                    <Link to="/" attr:class="btn btn-primary">"Back to the portal"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let api = PortalApi::from_env();
    provide_context(api.clone());

    let auth = AuthContext::new();
    provide_context(auth);

    // Restore a stored session before the first route resolves.
    init_auth(&auth);
    setup_profile_loader(&auth, api.clone());
    setup_session_watchdog(&auth, &api);

    let access = auth.access_signal();

    view! {
        <Router access=access>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
