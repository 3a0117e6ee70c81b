use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};

use rowscope_core::PrincipalContext;

use crate::error::AuthError;
use crate::traits::{Credentials, PrincipalSource, PrincipalStore};

/// Caching wrapper around a [`PrincipalSource`].
///
/// Successful resolutions are cached per account; later requests read the
/// cached context without re-verifying credentials. When cached data is
/// missing (session expiry, process restart), the optional
/// [`PrincipalStore`] repopulates grants from durable storage.
///
/// Contexts are stored behind `Arc` and handed out as clones; a cached
/// context is immutable, so concurrent requests observe consistent grants.
///
/// The cache holds entries until [`invalidate`] removes them; nothing
/// expires on its own. Callers that need bounded session lifetime must
/// invalidate on logout and grant changes, or wrap this source with their
/// session layer's expiry.
///
/// [`invalidate`]: CachingPrincipalSource::invalidate
pub struct CachingPrincipalSource<S> {
    inner: S,
    cache: DashMap<String, Arc<PrincipalContext>>,
    store: Option<Arc<dyn PrincipalStore>>,
}

impl<S: PrincipalSource> CachingPrincipalSource<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            store: None,
        }
    }

    /// Configure the reload store consulted on cache misses.
    ///
    /// Without a store, a miss yields [`AuthError::ReloadNotConfigured`];
    /// the two cases are deliberately distinct error values.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn PrincipalStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Fetch the principal for an already-authenticated account.
    ///
    /// Reads the cache first and falls back to the reload store.
    ///
    /// # Errors
    /// Returns [`AuthError::ReloadNotConfigured`] on a miss without a
    /// store, or the store's error if reloading fails.
    pub async fn principal_for(&self, account: &str) -> Result<Arc<PrincipalContext>, AuthError> {
        if let Some(hit) = self.cache.get(account) {
            return Ok(Arc::clone(&hit));
        }

        let Some(store) = &self.store else {
            return Err(AuthError::ReloadNotConfigured {
                account: account.to_owned(),
            });
        };

        debug!(account, "principal cache miss, reloading from store");
        let context = Arc::new(store.reload_user(account).await?);
        self.cache.insert(account.to_owned(), Arc::clone(&context));
        Ok(context)
    }

    /// Fetch the principal for an account, degrading to the anonymous
    /// (deny) context if it cannot be resolved.
    ///
    /// This is the safe default at request boundaries: an unresolved
    /// principal must restrict, never widen, what a request can see.
    pub async fn principal_or_anonymous(&self, account: &str) -> Arc<PrincipalContext> {
        match self.principal_for(account).await {
            Ok(context) => context,
            Err(err) => {
                warn!(account, error = %err, "principal unresolved, treating as unauthenticated");
                Arc::new(PrincipalContext::anonymous())
            }
        }
    }

    /// Drop the cached context for an account (logout, grant change).
    pub fn invalidate(&self, account: &str) {
        self.cache.remove(account);
    }

    #[must_use]
    pub fn cached_accounts(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: PrincipalSource> PrincipalSource for CachingPrincipalSource<S> {
    async fn resolve_principal(
        &self,
        credentials: &Credentials,
    ) -> Result<PrincipalContext, AuthError> {
        let context = self.inner.resolve_principal(credentials).await?;
        self.cache
            .insert(credentials.account.clone(), Arc::new(context.clone()));
        Ok(context)
    }
}
