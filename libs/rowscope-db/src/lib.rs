//! SeaORM enforcement layer for row-level privilege filtering.
//!
//! This crate turns a [`FilterPlan`] from `rowscope-core` into SQL
//! conditions and wraps `SeaORM` selects in a typestate so a query cannot
//! execute before filtering has been applied.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rowscope_core::{QueryFilterEngine, PrincipalContext};
//! use rowscope_db::{PrivilegedEntityExt, PrivilegeScopedEntity};
//!
//! // 1. Map the privileged field to a column, explicitly
//! impl PrivilegeScopedEntity for city::Entity {
//!     fn privilege_col(field: &str) -> Option<Self::Column> {
//!         match field {
//!             "name" => Some(city::Column::Name),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! // 2. Execute privileged queries
//! let engine = QueryFilterEngine::new(&registry);
//! let cities = city::Entity::find()
//!     .privileged()
//!     .filter_with(&engine, &principal)?
//!     .all(&conn)
//!     .await?;
//! ```
//!
//! # Policy
//!
//! | Plan | Condition |
//! |------|-----------|
//! | Unrestricted | none, base query unchanged |
//! | Deny | constant false (`WHERE 1=0`) |
//! | Restrict | `field_col IN (grants)` per descriptor, ANDed |
//!
//! The composed query is owned by the calling request; the base select is
//! consumed, never mutated in place, and nothing is cached across requests.

mod cond;
mod conn;
mod entity;
mod error;
mod select;

pub use cond::{build_joined_privilege_condition, build_privilege_condition};
pub use conn::ConnectionSelector;
pub use entity::PrivilegeScopedEntity;
pub use error::PrivilegeDbError;
pub use select::{Filtered, PrivilegedEntityExt, PrivilegedSelect, Unfiltered};

// Core types most callers need alongside this crate
pub use rowscope_core::{FilterPlan, PrincipalContext, Privileged, QueryFilterEngine};
