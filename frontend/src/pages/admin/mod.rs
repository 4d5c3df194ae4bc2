//! Admin-only screens. The router keeps non-admin sessions out; these
//! pages still degrade to plain error alerts if a request comes back 403.

mod documents;
mod investments;
mod profile_detail;
mod profiles;

pub use documents::AdminDocumentsPage;
pub use investments::AdminInvestmentsPage;
pub use profile_detail::AdminProfileDetailPage;
pub use profiles::AdminProfilesPage;
