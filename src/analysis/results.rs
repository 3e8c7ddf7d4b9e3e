//! Output record shapes for the analysis boundary.

use serde::{Deserialize, Serialize};

use crate::graph::GraphModel;

/// Centrality scores of one node: one row of `<base>_NODE_CENT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NodeCentrality {
    pub node_id: i64,
    pub betweenness: f64,
    pub closeness: f64,
}

/// Betweenness of one edge: one row of `<base>_EDGE_CENT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EdgeCentrality {
    pub edge_id: i64,
    pub betweenness: f64,
}

/// Convert dense accumulator arrays into ordered output records.
///
/// No computation happens here; records come out ascending by id, which is
/// the model's dense order.
pub(crate) fn assemble(
    model: &GraphModel,
    node_betweenness: &[f64],
    closeness: &[f64],
    edge_betweenness: &[f64],
) -> (Vec<NodeCentrality>, Vec<EdgeCentrality>) {
    let nodes = node_betweenness
        .iter()
        .zip(closeness)
        .enumerate()
        .map(|(index, (&betweenness, &closeness))| NodeCentrality {
            node_id: model.node_id(index),
            betweenness,
            closeness,
        })
        .collect();
    let edges = edge_betweenness
        .iter()
        .enumerate()
        .map(|(index, &betweenness)| EdgeCentrality {
            edge_id: model.edge_id(index),
            betweenness,
        })
        .collect();
    (nodes, edges)
}
