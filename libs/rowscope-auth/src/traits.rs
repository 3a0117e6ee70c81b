use async_trait::async_trait;

use rowscope_core::PrincipalContext;

use crate::error::AuthError;

/// Opaque request credentials.
///
/// The secret's format (password hash, token, ticket) is the verifier's
/// business; this crate only routes it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: String,
    pub secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(account: &str, secret: &str) -> Self {
        Self {
            account: account.to_owned(),
            secret: secret.to_owned(),
        }
    }
}

/// Resolves incoming request credentials to a [`PrincipalContext`].
#[async_trait]
pub trait PrincipalSource: Send + Sync {
    /// Verify the credentials and build the principal's grants.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] when verification fails and
    /// [`AuthError::PrincipalUnresolved`] when the account is unknown.
    async fn resolve_principal(&self, credentials: &Credentials)
    -> Result<PrincipalContext, AuthError>;
}

/// Reloads a principal's grants from durable storage.
///
/// Invoked when cached principal data is stale or missing. Configuring a
/// store is optional; see [`CachingPrincipalSource::with_store`]. An absent
/// store and a failed lookup are distinct outcomes: the former is
/// [`AuthError::ReloadNotConfigured`], the latter whatever error the store
/// reports.
///
/// [`CachingPrincipalSource::with_store`]: crate::CachingPrincipalSource::with_store
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Rebuild the principal context for `account` from durable storage.
    ///
    /// # Errors
    /// Returns [`AuthError::PrincipalUnresolved`] if the account does not
    /// exist, or [`AuthError::Store`] for storage failures.
    async fn reload_user(&self, account: &str) -> Result<PrincipalContext, AuthError>;
}
