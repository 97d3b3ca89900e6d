//! The API endpoint URIs.

/// The dashboard page, served at the site root.
pub const ROOT: &str = "/";
/// The route to upload CSV expense files.
pub const UPLOAD: &str = "/upload";
/// The route to add a single expense manually.
pub const MANUAL: &str = "/manual";
/// The route to list all expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to get the per-category expense summary.
pub const SUMMARY_API: &str = "/api/summary";
/// The route to delete all expenses.
pub const CLEAR_API: &str = "/api/clear";
/// The route for static files.
pub const STATIC: &str = "/static";
