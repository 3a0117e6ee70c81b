/// Errors raised while resolving principals.
///
/// Callers must map any of these to the unauthenticated (deny) context when
/// filtering is required, never to unfiltered access.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credential verification failed.
    #[error("invalid credentials for account '{account}'")]
    InvalidCredentials { account: String },

    /// No principal exists for the account.
    #[error("no principal could be resolved for account '{account}'")]
    PrincipalUnresolved { account: String },

    /// The principal cache missed and no reload store is configured.
    #[error("principal cache miss for account '{account}' and no reload store configured")]
    ReloadNotConfigured { account: String },

    /// The reload store failed.
    #[error("principal store error: {0}")]
    Store(String),
}
