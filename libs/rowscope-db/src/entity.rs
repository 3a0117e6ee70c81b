use sea_orm::EntityTrait;

/// Contract for entities whose rows can be restricted by privilege
/// descriptors.
///
/// Each entity explicitly maps descriptor field names to its own columns.
/// There are no implicit defaults and no reflection: a field the entity
/// does not map resolves to `None`, which the condition builder reports as
/// [`FilterError::UnmappedField`] rather than silently widening or
/// narrowing the query.
///
/// # Example
/// ```rust,ignore
/// impl PrivilegeScopedEntity for school::Entity {
///     fn privilege_col(field: &str) -> Option<Self::Column> {
///         match field {
///             "school_name" => Some(school::Column::SchoolName),
///             _ => None,
///         }
///     }
/// }
/// ```
///
/// [`FilterError::UnmappedField`]: rowscope_core::FilterError::UnmappedField
pub trait PrivilegeScopedEntity: EntityTrait {
    /// Resolve a descriptor field name to a column of this entity.
    fn privilege_col(field: &str) -> Option<Self::Column>;
}
