//! Centra: closeness and betweenness centrality over relational edge tables.
//!
//! Takes an edge relation `{EDGE_ID, START_NODE, END_NODE, ...}`, an
//! orientation (directed, reversed or undirected traversal) and an optional
//! weight column, and produces two ordered result relations: per-node
//! closeness and betweenness, and per-edge betweenness.
//!
//! # Core Concepts
//!
//! - **GraphModel**: immutable graph with dense indices; orientation is a
//!   query-time decision, not a storage one
//! - **Shortest-path trees**: one per source, holding distances, path
//!   counts and predecessor edges, via BFS or Dijkstra depending on
//!   weighting
//! - **Dependency accumulation**: backward credit propagation along each
//!   tree onto intermediate nodes and edges
//!
//! # Example
//!
//! ```
//! use centra::{graph_analysis, AnalysisRequest, EdgeRow};
//!
//! let edges = vec![EdgeRow::new(1, 1, 2), EdgeRow::new(2, 2, 3)];
//! let tables = graph_analysis(&AnalysisRequest::new(edges, "undirected")).unwrap();
//! assert_eq!(tables.node_centrality.len(), 3);
//! ```

pub mod analysis;
pub mod api;
mod error;
mod graph;
pub mod storage;

pub use analysis::{
    AnalysisConfig, CancellationToken, EdgeCentrality, GraphAnalyzer, NodeCentrality,
    ShortestPathTree,
};
pub use api::{
    graph_analysis, graph_analysis_with_config, AnalysisRequest, AnalysisTables, ColumnValue,
    EdgeRow,
};
pub use error::{AnalysisError, AnalysisResult};
pub use graph::{GraphModel, InputEdge, Neighbor, Orientation};
pub use storage::{SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
