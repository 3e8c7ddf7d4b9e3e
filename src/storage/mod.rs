//! Relational adapters for the analysis boundary.
//!
//! The engine itself never touches a database; this module is the thin
//! collaborator that reads an edge relation out of SQLite and materializes
//! the two result relations, owning nothing but that translation.

mod sqlite;

pub use sqlite::{SqliteStore, EDGE_CENT_SUFFIX, NODE_CENT_SUFFIX};

use thiserror::Error;

use crate::error::AnalysisError;

/// Errors that can occur at the relational boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A destination result table already exists; table lifecycle belongs
    /// to the caller.
    #[error("table '{0}' already exists")]
    TableExists(String),

    /// The input relation lacks one of its required columns.
    #[error("column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
