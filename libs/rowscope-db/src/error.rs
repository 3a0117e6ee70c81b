use rowscope_core::FilterError;

/// Errors surfaced by privileged query execution.
#[derive(Debug, thiserror::Error)]
pub enum PrivilegeDbError {
    /// Database error occurred during query execution.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// Privilege planning or evaluation failed.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
