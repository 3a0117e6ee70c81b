use sea_orm::DatabaseConnection;

use rowscope_core::PrincipalContext;

/// Chooses the database connection serving one request.
///
/// Configuring a selector is optional. A repository consults it before
/// every query; `None` from [`select`] falls back to the repository's
/// default connection, so an unconfigured or non-committal selector never
/// changes behavior. Typical use is routing tenants to their own database
/// while everyone else shares the default.
///
/// [`select`]: ConnectionSelector::select
pub trait ConnectionSelector: Send + Sync {
    /// Connection for this principal, or `None` for the default.
    fn select(&self, principal: &PrincipalContext) -> Option<&DatabaseConnection>;
}
