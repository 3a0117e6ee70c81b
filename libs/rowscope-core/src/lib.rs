//! Row-level data-privilege filtering core.
//!
//! This crate holds the ORM-agnostic building blocks:
//!
//! - [`PrivilegeValue`]: the comparison value extracted from a row
//! - [`GrantSet`]: the set of values a principal is authorized to see
//! - [`PrincipalContext`]: per-request immutable grants of a principal
//! - [`PrivilegeDescriptor`]: label + field + selector for one entity type
//! - [`PrivilegeRegistry`]: write-once table of descriptors per entity type
//! - [`QueryFilterEngine`]: plans restriction predicates for a request
//!
//! The SQL enforcement layer lives in `rowscope-db`; this crate only decides
//! *what* to restrict, never *how* a backend executes it.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod grants;
pub mod prelude;
pub mod principal;
pub mod registry;
pub mod value;

pub use descriptor::{PrivilegeDescriptor, Privileged};
pub use engine::{FilterPlan, PlanStep, QueryFilterEngine};
pub use error::{FilterError, RegistryError, SelectorError};
pub use grants::GrantSet;
pub use principal::{PrincipalContext, PrincipalContextBuilder};
pub use registry::{PrivilegeRegistry, PrivilegeRegistryBuilder};
pub use value::PrivilegeValue;
