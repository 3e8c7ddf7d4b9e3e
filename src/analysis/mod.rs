//! Centrality analysis engine
//!
//! One immutable [`crate::GraphModel`] in, two ordered record collections
//! out: per-node closeness and betweenness, per-edge betweenness.

mod centrality;
mod results;
mod traversal;

pub use centrality::{AnalysisConfig, CancellationToken, GraphAnalyzer};
pub use results::{EdgeCentrality, NodeCentrality};
pub use traversal::{single_source, Predecessor, ShortestPathTree};
