//! Typed boundary for running an analysis over relational rows.
//!
//! The calling layer owns everything relational (reading the edge
//! relation, table lifecycle) and hands this module plain typed rows. The
//! orientation arrives as the host literal (`"directed - <column>"`,
//! `"reversed - <column>"`, `"undirected"`) and the weight as a column
//! name to select out of each row.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisConfig, EdgeCentrality, GraphAnalyzer, NodeCentrality};
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GraphModel, InputEdge, Orientation};

/// A typed cell from the edge relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl ColumnValue {
    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// One row of the input edge relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    #[serde(rename = "EDGE_ID")]
    pub edge_id: i64,
    #[serde(rename = "START_NODE")]
    pub start_node: i64,
    #[serde(rename = "END_NODE")]
    pub end_node: i64,
    /// Any further columns of the row, addressable as weight candidates.
    #[serde(flatten)]
    pub columns: HashMap<String, ColumnValue>,
}

impl EdgeRow {
    pub fn new(edge_id: i64, start_node: i64, end_node: i64) -> Self {
        Self {
            edge_id,
            start_node,
            end_node,
            columns: HashMap::new(),
        }
    }

    /// Attach a named column value.
    pub fn with_column(mut self, name: impl Into<String>, value: ColumnValue) -> Self {
        self.columns.insert(name.into(), value);
        self
    }

    /// Attach a numeric weight column.
    pub fn with_weight(self, name: impl Into<String>, weight: f64) -> Self {
        self.with_column(name, ColumnValue::Float(weight))
    }

    /// Column lookup, exact first, then ASCII-case-insensitive; relational
    /// identifiers don't distinguish case.
    fn column(&self, name: &str) -> Option<&ColumnValue> {
        self.columns.get(name).or_else(|| {
            self.columns
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }
}

/// Input to [`graph_analysis`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub edges: Vec<EdgeRow>,
    /// Declared node set; implied from edge endpoints when `None`.
    pub nodes: Option<Vec<i64>>,
    /// Host orientation literal.
    pub orientation: String,
    /// Weight column name; hop-count distances when `None`.
    pub weight_column: Option<String>,
}

impl AnalysisRequest {
    pub fn new(edges: Vec<EdgeRow>, orientation: impl Into<String>) -> Self {
        Self {
            edges,
            nodes: None,
            orientation: orientation.into(),
            weight_column: None,
        }
    }

    /// Declare the node set explicitly (permits isolated nodes; edges
    /// referencing anything outside it are malformed).
    pub fn with_nodes(mut self, nodes: Vec<i64>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Select a weight column, switching the traversal to Dijkstra.
    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }
}

/// The two output relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTables {
    pub node_centrality: Vec<NodeCentrality>,
    pub edge_centrality: Vec<EdgeCentrality>,
}

/// Run a full centrality analysis for one request.
pub fn graph_analysis(request: &AnalysisRequest) -> AnalysisResult<AnalysisTables> {
    graph_analysis_with_config(request, AnalysisConfig::default())
}

/// [`graph_analysis`] with explicit worker-pool and cancellation settings.
pub fn graph_analysis_with_config(
    request: &AnalysisRequest,
    config: AnalysisConfig,
) -> AnalysisResult<AnalysisTables> {
    let orientation = Orientation::parse(&request.orientation)?;
    let weighted = request.weight_column.is_some();

    let mut edges = Vec::with_capacity(request.edges.len());
    for row in &request.edges {
        let weight = match &request.weight_column {
            Some(column) => Some(
                row.column(column)
                    .and_then(ColumnValue::as_f64)
                    .ok_or_else(|| AnalysisError::InvalidWeightColumn(column.clone()))?,
            ),
            None => None,
        };
        edges.push(InputEdge {
            id: row.edge_id,
            source: row.start_node,
            target: row.end_node,
            weight,
        });
    }

    let nodes = match &request.nodes {
        Some(declared) => declared.clone(),
        None => {
            let mut implied: Vec<i64> = request
                .edges
                .iter()
                .flat_map(|row| [row.start_node, row.end_node])
                .collect();
            implied.sort_unstable();
            implied.dedup();
            implied
        }
    };

    let model = GraphModel::build(&nodes, &edges, weighted)?;
    let (node_centrality, edge_centrality) =
        GraphAnalyzer::with_config(&model, orientation, config).analyze()?;
    Ok(AnalysisTables {
        node_centrality,
        edge_centrality,
    })
}
