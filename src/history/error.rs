use thiserror::Error;

use crate::db::DatabaseError;

/// Persistence failure while reading or writing the history.
///
/// Never crosses the `RecordStore` boundary; it only reaches the log.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal lock error")]
    LockPoisoned,
}
