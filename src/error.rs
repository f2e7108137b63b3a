use thiserror::Error;

/// Failure reported by a storage accessor. Absence is never an error here;
/// accessors return `None`, `false` or an empty list for that.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
