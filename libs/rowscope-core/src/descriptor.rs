use std::fmt;
use std::sync::Arc;

use crate::error::{FilterError, SelectorError};
use crate::grants::GrantSet;
use crate::value::PrivilegeValue;

/// Marks a model type as addressable by the privilege machinery.
///
/// `KEY` is the stable identifier used in grants maps and registrations.
/// It is part of the persisted format of a principal's grants, so treat it
/// like a wire name: lowercase, stable across releases.
///
/// # Example
/// ```rust
/// use rowscope_core::Privileged;
///
/// struct City {
///     name: String,
/// }
///
/// impl Privileged for City {
///     const KEY: &'static str = "city";
/// }
/// ```
pub trait Privileged: 'static {
    /// Stable key identifying this entity type.
    const KEY: &'static str;
}

type Selector<M> = Arc<dyn Fn(&M) -> Result<PrivilegeValue, SelectorError> + Send + Sync>;

/// Binds one entity type to a human-readable label and a field-extraction
/// function used to compare rows against a principal's grants.
///
/// The selector must be a pure, total function over well-formed entities.
/// Selector registration is explicit, without reflection; the `field`
/// name is the key the storage layer maps to a concrete column.
pub struct PrivilegeDescriptor<M> {
    label: String,
    field: &'static str,
    selector: Selector<M>,
}

impl<M> PrivilegeDescriptor<M> {
    /// Create a descriptor whose selector may fail per row.
    pub fn new(
        label: &str,
        field: &'static str,
        selector: impl Fn(&M) -> Result<PrivilegeValue, SelectorError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.to_owned(),
            field,
            selector: Arc::new(selector),
        }
    }

    /// Create a descriptor from an infallible selector.
    ///
    /// This is the common case: a plain member access such as `|m| m.name`.
    pub fn total(
        label: &str,
        field: &'static str,
        selector: impl Fn(&M) -> PrivilegeValue + Send + Sync + 'static,
    ) -> Self {
        Self::new(label, field, move |row| Ok(selector(row)))
    }

    /// Human-readable label for UI and audit display.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the privileged field, mapped to a column by the storage layer.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Extract the comparison value from a row.
    ///
    /// # Errors
    /// Returns [`SelectorError`] if the selector fails for this row.
    pub fn evaluate(&self, row: &M) -> Result<PrivilegeValue, SelectorError> {
        (self.selector)(row)
    }
}

impl<M: Privileged> PrivilegeDescriptor<M> {
    /// Check whether a row's extracted value is in the grant set.
    ///
    /// # Errors
    /// Returns [`FilterError::Evaluation`] if the selector fails; the row is
    /// never silently treated as allowed or denied.
    pub fn matches(&self, row: &M, grants: &GrantSet) -> Result<bool, FilterError> {
        let value = self.evaluate(row).map_err(|e| FilterError::Evaluation {
            entity: M::KEY,
            label: self.label.clone(),
            reason: e.to_string(),
        })?;
        Ok(grants.contains(&value))
    }
}

impl<M> Clone for PrivilegeDescriptor<M> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            field: self.field,
            selector: Arc::clone(&self.selector),
        }
    }
}

impl<M> fmt::Debug for PrivilegeDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivilegeDescriptor")
            .field("label", &self.label)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
