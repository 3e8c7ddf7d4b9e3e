//! Error taxonomy for graph analysis.
//!
//! Every error is detected eagerly and aborts the whole analysis: the
//! caller gets either a complete pair of result relations or one of these.

use thiserror::Error;

/// Errors that can occur while building or analyzing a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// An edge references a node outside the declared node set.
    #[error("edge {edge_id} references undeclared node {node_id}")]
    MalformedEdge { edge_id: i64, node_id: i64 },

    /// A negative weight was seen in weighted mode, at build or traversal time.
    #[error("edge {edge_id} has negative weight {weight}")]
    NegativeWeight { edge_id: i64, weight: f64 },

    /// The orientation literal is not one of the three recognized values.
    #[error("unrecognized orientation: '{0}'")]
    InvalidOrientation(String),

    /// The requested weight column is absent or non-numeric.
    #[error("weight column '{0}' is missing or non-numeric")]
    InvalidWeightColumn(String),

    /// The analysis was cancelled between per-source traversals.
    #[error("analysis cancelled")]
    Cancelled,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
