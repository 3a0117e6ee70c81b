//! Common imports for crates building on the privilege core.

pub use crate::descriptor::{PrivilegeDescriptor, Privileged};
pub use crate::engine::{FilterPlan, QueryFilterEngine};
pub use crate::error::{FilterError, RegistryError, SelectorError};
pub use crate::grants::GrantSet;
pub use crate::principal::PrincipalContext;
pub use crate::registry::{PrivilegeRegistry, PrivilegeRegistryBuilder};
pub use crate::value::PrivilegeValue;
