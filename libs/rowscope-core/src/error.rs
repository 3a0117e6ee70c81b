/// Failure reported by a privilege selector for a single row.
///
/// Selectors are expected to be total for well-formed entities; this error
/// exists so a malformed row surfaces loudly instead of being skipped.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct SelectorError {
    reason: String,
}

impl SelectorError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors raised while building the privilege registry.
///
/// Registration happens once at startup; any error here is fatal and must
/// abort startup rather than leave a partial registry behind.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A descriptor with the same label was already registered for this
    /// entity type. Additional descriptors with distinct labels are allowed
    /// and AND-composed at filter time.
    #[error("duplicate privilege descriptor '{label}' for entity '{entity}'")]
    DuplicateDescriptor { entity: &'static str, label: String },
}

/// Errors raised while planning or evaluating privilege filters.
///
/// Never swallowed: silently dropping a filter failure could leak rows the
/// principal is not authorized to see.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A selector failed while evaluating a row.
    #[error("privilege selector '{label}' failed for entity '{entity}': {reason}")]
    Evaluation {
        entity: &'static str,
        label: String,
        reason: String,
    },

    /// A descriptor references a field the storage layer cannot map to a
    /// column. This is a configuration mistake, not a data condition.
    #[error("privilege field '{field}' has no column mapping for entity '{entity}'")]
    UnmappedField {
        entity: &'static str,
        field: &'static str,
    },
}
