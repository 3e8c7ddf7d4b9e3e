//! Common test utilities for the analysis suites.
//!
//! Provides the five-node reference network shared by the orientation and
//! property suites, plus small result-lookup helpers.

#![allow(dead_code)]

use centra::{graph_analysis, AnalysisRequest, AnalysisTables, EdgeRow, InputEdge};

pub const DIRECTED: &str = "directed - edge_orientation";
pub const REVERSED: &str = "reversed - edge_orientation";
pub const UNDIRECTED: &str = "undirected";
pub const WEIGHT: &str = "weight";

/// The five-node reference network, with per-edge orientations already
/// resolved into ordered pairs: one host row points opposite its stored
/// direction (edge 2) and one is bidirectional, contributing an edge per
/// direction (edges 10 and 11).
pub const REFERENCE_EDGES: [(i64, i64, i64, f64); 11] = [
    (1, 1, 2, 10.0),
    (2, 4, 2, 1.0),
    (3, 2, 3, 2.0),
    (4, 3, 2, 3.0),
    (5, 1, 3, 5.0),
    (6, 3, 4, 9.0),
    (7, 3, 5, 2.0),
    (8, 4, 5, 4.0),
    (9, 5, 4, 6.0),
    (10, 5, 1, 7.0),
    (11, 1, 5, 7.0),
];

/// Reference network as relational rows with a `weight` column.
pub fn reference_rows() -> Vec<EdgeRow> {
    REFERENCE_EDGES
        .iter()
        .map(|&(id, start, end, weight)| EdgeRow::new(id, start, end).with_weight(WEIGHT, weight))
        .collect()
}

/// Reference network as typed input edges for direct model construction.
pub fn reference_input_edges() -> Vec<InputEdge> {
    REFERENCE_EDGES
        .iter()
        .map(|&(id, start, end, weight)| InputEdge::weighted(id, start, end, weight))
        .collect()
}

/// Run one full analysis over the reference network.
pub fn analyze_reference(orientation: &str, weighted: bool) -> AnalysisTables {
    let mut request = AnalysisRequest::new(reference_rows(), orientation);
    if weighted {
        request = request.with_weight_column(WEIGHT);
    }
    graph_analysis(&request).unwrap()
}

pub fn closeness_of(tables: &AnalysisTables, node_id: i64) -> f64 {
    tables
        .node_centrality
        .iter()
        .find(|row| row.node_id == node_id)
        .unwrap()
        .closeness
}

pub fn betweenness_of(tables: &AnalysisTables, node_id: i64) -> f64 {
    tables
        .node_centrality
        .iter()
        .find(|row| row.node_id == node_id)
        .unwrap()
        .betweenness
}

/// Assert the five closeness values in node-id order, at tolerance zero.
pub fn assert_closeness(tables: &AnalysisTables, expected: [f64; 5]) {
    for (offset, expected) in expected.iter().enumerate() {
        let node_id = offset as i64 + 1;
        assert_eq!(
            closeness_of(tables, node_id),
            *expected,
            "closeness of node {node_id}"
        );
    }
}
