//! Route table and access rules.
//!
//! Everything here is plain data so the guard logic stays testable off the
//! browser: parsing a path, printing one and resolving a route against an
//! access level never touch the DOM.

use gpportal_shared::Role;
use std::fmt;

// =========================================================
// Routes
// =========================================================

/// Every addressable screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    AuthStart,
    AuthPassword,
    AuthOtp,
    AuthRegister,
    Dashboard,
    Deals,
    DealDetail(i64),
    Documents,
    Investments,
    Profiles,
    Settings,
    AdminDocuments,
    AdminInvestments,
    AdminProfiles,
    AdminProfileDetail(i64),
    NotFound,
}

impl AppRoute {
    /// Parse a location pathname. Unknown paths land on the 404 screen,
    /// never on a guessed route.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        match path {
            "/" | "/auth" => Self::AuthStart,
            "/auth/password" => Self::AuthPassword,
            "/auth/otp" => Self::AuthOtp,
            "/auth/register" => Self::AuthRegister,
            "/dashboard" => Self::Dashboard,
            "/deals" => Self::Deals,
            "/documents" => Self::Documents,
            "/investments" => Self::Investments,
            "/profiles" => Self::Profiles,
            "/settings" => Self::Settings,
            "/admin/documents" => Self::AdminDocuments,
            "/admin/investments" => Self::AdminInvestments,
            "/admin/profiles" => Self::AdminProfiles,
            _ => {
                if let Some(rest) = path.strip_prefix("/deals/") {
                    if let Ok(id) = rest.parse::<i64>() {
                        return Self::DealDetail(id);
                    }
                }
                if let Some(rest) = path.strip_prefix("/admin/profiles/") {
                    if let Ok(id) = rest.parse::<i64>() {
                        return Self::AdminProfileDetail(id);
                    }
                }
                Self::NotFound
            }
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::AuthStart => "/auth".to_string(),
            Self::AuthPassword => "/auth/password".to_string(),
            Self::AuthOtp => "/auth/otp".to_string(),
            Self::AuthRegister => "/auth/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Deals => "/deals".to_string(),
            Self::DealDetail(id) => format!("/deals/{id}"),
            Self::Documents => "/documents".to_string(),
            Self::Investments => "/investments".to_string(),
            Self::Profiles => "/profiles".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::AdminDocuments => "/admin/documents".to_string(),
            Self::AdminInvestments => "/admin/investments".to_string(),
            Self::AdminProfiles => "/admin/profiles".to_string(),
            Self::AdminProfileDetail(id) => format!("/admin/profiles/{id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Screens that require a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::AuthStart
                | Self::AuthPassword
                | Self::AuthOtp
                | Self::AuthRegister
                | Self::NotFound
        )
    }

    /// Screens reserved for the admin role.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminDocuments
                | Self::AdminInvestments
                | Self::AdminProfiles
                | Self::AdminProfileDetail(_)
        )
    }

    /// Wizard screens make no sense once signed in.
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(
            self,
            Self::AuthStart | Self::AuthPassword | Self::AuthOtp | Self::AuthRegister
        )
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Access levels
// =========================================================

/// What the current session is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Guest,
    Investor,
    Admin,
}

impl Access {
    /// Derive the level from the server-asserted role claim, if any.
    pub fn from_role(role: Option<Role>) -> Self {
        match role {
            None => Self::Guest,
            Some(Role::Admin) => Self::Admin,
            Some(Role::User) => Self::Investor,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Guest)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Outcome of the guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Allow,
    Redirect(AppRoute),
}

/// Layered guard. The auth layer runs before the admin layer, so an
/// authenticated non-admin on an admin URL lands on the dashboard rather
/// than back in the login wizard.
pub fn resolve(route: &AppRoute, access: Access) -> Resolution {
    if route.requires_auth() && !access.is_authenticated() {
        return Resolution::Redirect(AppRoute::AuthStart);
    }
    if route.requires_admin() && !access.is_admin() {
        return Resolution::Redirect(AppRoute::Dashboard);
    }
    if route.redirects_when_authenticated() && access.is_authenticated() {
        return Resolution::Redirect(AppRoute::Dashboard);
    }
    Resolution::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::AuthStart,
            AppRoute::AuthPassword,
            AppRoute::AuthOtp,
            AppRoute::AuthRegister,
            AppRoute::Dashboard,
            AppRoute::Deals,
            AppRoute::DealDetail(42),
            AppRoute::Documents,
            AppRoute::Investments,
            AppRoute::Profiles,
            AppRoute::Settings,
            AppRoute::AdminDocuments,
            AppRoute::AdminInvestments,
            AppRoute::AdminProfiles,
            AppRoute::AdminProfileDetail(7),
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn root_and_trailing_slashes_normalize() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::AuthStart);
        assert_eq!(AppRoute::from_path(""), AppRoute::AuthStart);
        assert_eq!(AppRoute::from_path("/deals/"), AppRoute::Deals);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/deals/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin/profiles/x1"), AppRoute::NotFound);
    }

    #[test]
    fn guest_is_sent_to_the_entry_screen() {
        assert_eq!(
            resolve(&AppRoute::Dashboard, Access::Guest),
            Resolution::Redirect(AppRoute::AuthStart)
        );
        assert_eq!(
            resolve(&AppRoute::DealDetail(3), Access::Guest),
            Resolution::Redirect(AppRoute::AuthStart)
        );
        assert_eq!(resolve(&AppRoute::AuthStart, Access::Guest), Resolution::Allow);
        assert_eq!(resolve(&AppRoute::NotFound, Access::Guest), Resolution::Allow);
    }

    #[test]
    fn investor_on_admin_route_lands_on_dashboard_not_login() {
        for route in [
            AppRoute::AdminDocuments,
            AppRoute::AdminInvestments,
            AppRoute::AdminProfiles,
            AppRoute::AdminProfileDetail(9),
        ] {
            assert_eq!(
                resolve(&route, Access::Investor),
                Resolution::Redirect(AppRoute::Dashboard)
            );
        }
    }

    #[test]
    fn admin_passes_both_guard_layers() {
        assert_eq!(resolve(&AppRoute::AdminDocuments, Access::Admin), Resolution::Allow);
        assert_eq!(resolve(&AppRoute::Dashboard, Access::Admin), Resolution::Allow);
    }

    #[test]
    fn authenticated_user_leaves_the_wizard() {
        for access in [Access::Investor, Access::Admin] {
            assert_eq!(
                resolve(&AppRoute::AuthStart, access),
                Resolution::Redirect(AppRoute::Dashboard)
            );
            assert_eq!(
                resolve(&AppRoute::AuthOtp, access),
                Resolution::Redirect(AppRoute::Dashboard)
            );
        }
    }

    #[test]
    fn access_levels_follow_the_role_claim() {
        assert_eq!(Access::from_role(None), Access::Guest);
        assert_eq!(Access::from_role(Some(Role::User)), Access::Investor);
        assert_eq!(Access::from_role(Some(Role::Admin)), Access::Admin);
        assert!(Access::Admin.is_admin());
        assert!(!Access::Investor.is_admin());
        assert!(!Access::Guest.is_authenticated());
    }
}
