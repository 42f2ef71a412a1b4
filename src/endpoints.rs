//! The API endpoint URIs.

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route for the cashflow summary.
pub const CASHFLOW_SUMMARY: &str = "/api/cashflow/summary";
/// The route returning the logged-in user's profile.
pub const ME: &str = "/auth/me";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/auth/logout";
