//! Immutable in-memory graph built from an edge relation.
//!
//! Node and edge ids come straight from the input relation; internally both
//! are mapped to dense zero-based indices so the traversal and accumulation
//! passes can run over plain arrays. Outgoing and incoming adjacency are
//! both always populated; which of them a traversal consults is decided at
//! query time by [`Orientation`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::Orientation;

/// One edge of the input relation, resolved to an ordered pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEdge {
    pub id: i64,
    pub source: i64,
    pub target: i64,
    /// Weight under the selected weight column; `None` means unweighted.
    pub weight: Option<f64>,
}

impl InputEdge {
    /// An unweighted edge.
    pub fn new(id: i64, source: i64, target: i64) -> Self {
        Self {
            id,
            source,
            target,
            weight: None,
        }
    }

    /// An edge carrying an explicit weight.
    pub fn weighted(id: i64, source: i64, target: i64, weight: f64) -> Self {
        Self {
            id,
            source,
            target,
            weight: Some(weight),
        }
    }
}

/// A single traversal step: the node reached, the edge used, its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: usize,
    pub edge: usize,
    pub weight: f64,
}

/// Immutable graph with dense node and edge indices.
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// Node ids ascending; position is the dense node index.
    node_ids: Vec<i64>,
    node_index: HashMap<i64, usize>,
    /// Edge ids ascending; position is the dense edge index.
    edge_ids: Vec<i64>,
    outgoing: Vec<Vec<Neighbor>>,
    incoming: Vec<Vec<Neighbor>>,
    weighted: bool,
}

impl GraphModel {
    /// Build a model from a declared node set and an edge list.
    ///
    /// Fails with [`AnalysisError::MalformedEdge`] if an edge endpoint is
    /// outside the declared node set, and with
    /// [`AnalysisError::NegativeWeight`] if `weighted` and any edge weight
    /// is negative. In unweighted mode every edge traverses at cost 1
    /// regardless of any weight the row happens to carry.
    pub fn build(nodes: &[i64], edges: &[InputEdge], weighted: bool) -> AnalysisResult<Self> {
        let mut node_ids = nodes.to_vec();
        node_ids.sort_unstable();
        node_ids.dedup();
        let node_index: HashMap<i64, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();

        let mut sorted = edges.to_vec();
        sorted.sort_unstable_by_key(|edge| edge.id);

        let mut edge_ids = Vec::with_capacity(sorted.len());
        let mut weights = Vec::with_capacity(sorted.len());
        let mut endpoints = Vec::with_capacity(sorted.len());
        for edge in &sorted {
            let source = *node_index.get(&edge.source).ok_or(AnalysisError::MalformedEdge {
                edge_id: edge.id,
                node_id: edge.source,
            })?;
            let target = *node_index.get(&edge.target).ok_or(AnalysisError::MalformedEdge {
                edge_id: edge.id,
                node_id: edge.target,
            })?;
            let weight = if weighted { edge.weight.unwrap_or(1.0) } else { 1.0 };
            if weighted && weight < 0.0 {
                return Err(AnalysisError::NegativeWeight {
                    edge_id: edge.id,
                    weight,
                });
            }
            edge_ids.push(edge.id);
            weights.push(weight);
            endpoints.push((source, target));
        }

        // Of parallel edges over one ordered pair, traversal sees only the
        // cheapest; ties go to the lowest edge id. Every id still gets a row
        // in the edge output.
        let mut selected: HashMap<(usize, usize), usize> = HashMap::new();
        for (index, &pair) in endpoints.iter().enumerate() {
            match selected.entry(pair) {
                Entry::Occupied(mut slot) => {
                    if weights[index] < weights[*slot.get()] {
                        slot.insert(index);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }

        // Adjacency is filled in edge-id order so traversal order (and with
        // it floating-point accumulation order) is reproducible.
        let mut outgoing = vec![Vec::new(); node_ids.len()];
        let mut incoming = vec![Vec::new(); node_ids.len()];
        for (index, &(source, target)) in endpoints.iter().enumerate() {
            if selected.get(&(source, target)) != Some(&index) {
                continue;
            }
            outgoing[source].push(Neighbor {
                node: target,
                edge: index,
                weight: weights[index],
            });
            incoming[target].push(Neighbor {
                node: source,
                edge: index,
                weight: weights[index],
            });
        }

        Ok(Self {
            node_ids,
            node_index,
            edge_ids,
            outgoing,
            incoming,
            weighted,
        })
    }

    /// Neighbors of `node` under the given orientation.
    ///
    /// `Directed` walks outgoing edges, `Reversed` walks incoming edges with
    /// the roles swapped, `Undirected` offers both sets independently and
    /// leaves it to the shortest-path engine to prefer the cheaper entry.
    pub fn neighbors(
        &self,
        node: usize,
        orientation: Orientation,
    ) -> impl Iterator<Item = Neighbor> + '_ {
        let (first, second): (&[Neighbor], &[Neighbor]) = match orientation {
            Orientation::Directed => (&self.outgoing[node], &[]),
            Orientation::Reversed => (&self.incoming[node], &[]),
            Orientation::Undirected => (&self.outgoing[node], &self.incoming[node]),
        };
        first.iter().chain(second).copied()
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// The relation-level id of a dense node index.
    pub fn node_id(&self, index: usize) -> i64 {
        self.node_ids[index]
    }

    /// The relation-level id of a dense edge index.
    pub fn edge_id(&self, index: usize) -> i64 {
        self.edge_ids[index]
    }

    /// The dense index of a relation-level node id.
    pub fn node_index(&self, id: i64) -> Option<usize> {
        self.node_index.get(&id).copied()
    }

    /// All node ids, ascending.
    pub fn node_ids(&self) -> &[i64] {
        &self.node_ids
    }

    /// All edge ids, ascending.
    pub fn edge_ids(&self) -> &[i64] {
        &self.edge_ids
    }
}
