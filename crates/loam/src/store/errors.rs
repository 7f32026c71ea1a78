use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::source_mode::SourceMode;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Record not found.
    #[error("Not found: {context}")]
    NotFound { context: String },

    /// Invalid input data.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A sync for this source is already in flight.
    #[error("A sync is already in progress for source {source_id}")]
    SyncInFlight { source_id: Uuid },
}

impl StoreError {
    /// Create a NotFound error for a UUID lookup.
    pub fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFound {
            context: format!("id={id}"),
        }
    }

    /// Create a NotFound error for a natural key lookup.
    pub fn not_found_by_origin(origin: &str, mode: SourceMode) -> Self {
        Self::NotFound {
            context: format!("origin={origin} mode={mode}"),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
