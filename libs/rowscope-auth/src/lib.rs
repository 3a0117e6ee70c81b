//! Principal resolution boundary for privilege filtering.
//!
//! The filter core consumes a [`PrincipalContext`](rowscope_core::PrincipalContext);
//! this crate defines how one is produced: a [`PrincipalSource`] verifies
//! credentials, a [`CachingPrincipalSource`] caches resolved contexts per
//! account, and an optional [`PrincipalStore`] repopulates grants from
//! durable storage when the cache misses.
//!
//! Token formats, session transports, and credential storage live outside
//! this crate.

mod error;
mod source;
mod traits;

pub use error::AuthError;
pub use source::CachingPrincipalSource;
pub use traits::{Credentials, PrincipalSource, PrincipalStore};
