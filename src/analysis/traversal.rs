//! Single-source shortest-path traversal.
//!
//! Produces everything the dependency-accumulation pass needs from one
//! source: distances, shortest-path counts, predecessor edges, and the
//! order in which nodes were settled. Unweighted models get a breadth-first
//! sweep, weighted models a binary-heap Dijkstra; both handle equal-cost
//! ties by accumulating multiplicities onto every minimal predecessor.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GraphModel, Orientation};

/// A predecessor entry: the node one step closer to the source and the
/// edge that connects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub node: usize,
    pub edge: usize,
}

/// The shortest-path tree of one source node.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: usize,
    /// Distance from the source; `f64::INFINITY` for unreachable nodes.
    pub distance: Vec<f64>,
    /// Number of distinct minimum-cost paths from the source; 0 when
    /// unreachable.
    pub path_count: Vec<f64>,
    /// Predecessor edges lying on any shortest path.
    pub predecessors: Vec<Vec<Predecessor>>,
    /// Nodes in nondecreasing distance order, source first. Walking this
    /// backward visits every node after all nodes it precedes.
    pub settled: Vec<usize>,
}

impl ShortestPathTree {
    fn new(source: usize, nodes: usize) -> Self {
        let mut tree = Self {
            source,
            distance: vec![f64::INFINITY; nodes],
            path_count: vec![0.0; nodes],
            predecessors: vec![Vec::new(); nodes],
            settled: Vec::with_capacity(nodes),
        };
        tree.distance[source] = 0.0;
        tree.path_count[source] = 1.0;
        tree
    }

    /// Whether `node` is reachable from the source.
    pub fn is_reachable(&self, node: usize) -> bool {
        self.distance[node].is_finite()
    }
}

/// Compute the shortest-path tree of `source` under `orientation`.
///
/// Dispatches on the model's weighting; a negative weight observed during
/// weighted traversal fails with [`AnalysisError::NegativeWeight`] even
/// though construction already validated weights.
pub fn single_source(
    model: &GraphModel,
    source: usize,
    orientation: Orientation,
) -> AnalysisResult<ShortestPathTree> {
    if model.is_weighted() {
        dijkstra(model, source, orientation)
    } else {
        Ok(breadth_first(model, source, orientation))
    }
}

fn breadth_first(model: &GraphModel, source: usize, orientation: Orientation) -> ShortestPathTree {
    let mut tree = ShortestPathTree::new(source, model.node_count());
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        tree.settled.push(node);
        let next = tree.distance[node] + 1.0;
        for step in model.neighbors(node, orientation) {
            if tree.distance[step.node].is_infinite() {
                tree.distance[step.node] = next;
                queue.push_back(step.node);
            }
            // Frontier-level tie: every edge that keeps the neighbor at its
            // minimal distance contributes multiplicity.
            if tree.distance[step.node] == next {
                tree.path_count[step.node] += tree.path_count[node];
                tree.predecessors[step.node].push(Predecessor {
                    node,
                    edge: step.edge,
                });
            }
        }
    }

    tree
}

/// Min-heap entry ordered by tentative distance.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    distance: f64,
    node: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest tentative distance.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    model: &GraphModel,
    source: usize,
    orientation: Orientation,
) -> AnalysisResult<ShortestPathTree> {
    let mut tree = ShortestPathTree::new(source, model.node_count());
    let mut done = vec![false; model.node_count()];
    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        distance: 0.0,
        node: source,
    });

    while let Some(Frontier { distance, node }) = heap.pop() {
        // Stale entries from superseded or duplicate pushes.
        if done[node] {
            continue;
        }
        done[node] = true;
        tree.settled.push(node);

        for step in model.neighbors(node, orientation) {
            if step.weight < 0.0 {
                return Err(AnalysisError::NegativeWeight {
                    edge_id: model.edge_id(step.edge),
                    weight: step.weight,
                });
            }
            let next = distance + step.weight;
            if next < tree.distance[step.node] {
                tree.distance[step.node] = next;
                tree.path_count[step.node] = tree.path_count[node];
                tree.predecessors[step.node].clear();
                tree.predecessors[step.node].push(Predecessor {
                    node,
                    edge: step.edge,
                });
                heap.push(Frontier {
                    distance: next,
                    node: step.node,
                });
            } else if next == tree.distance[step.node] {
                tree.path_count[step.node] += tree.path_count[node];
                tree.predecessors[step.node].push(Predecessor {
                    node,
                    edge: step.edge,
                });
            }
        }
    }

    Ok(tree)
}
