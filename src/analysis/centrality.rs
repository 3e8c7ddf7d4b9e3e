//! Brandes-style dependency accumulation over per-source shortest paths.
//!
//! One shortest-path tree is computed per node; each tree contributes the
//! source's closeness and, walked backward, distributes pair-dependency
//! credit onto intermediate nodes and the edges connecting them. The
//! per-source traversals are independent, so they can optionally run on a
//! fixed-size worker pool where every worker owns a private partial total
//! and the partials are merged at the end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::debug;

use crate::analysis::results::{self, EdgeCentrality, NodeCentrality};
use crate::analysis::traversal::{self, ShortestPathTree};
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GraphModel, Orientation};

/// Cooperative cancellation handle.
///
/// Checked at the start of every per-source traversal, so cancelling stops
/// the run between sources: the caller sees [`AnalysisError::Cancelled`]
/// and never a truncated result set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect before the next source starts.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tuning for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Worker threads for the per-source traversals; 1 runs inline.
    pub threads: usize,
    /// External cancellation signal.
    pub cancel: CancellationToken,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            cancel: CancellationToken::new(),
        }
    }
}

/// Dense-indexed running totals.
#[derive(Debug, Clone)]
struct Totals {
    node_betweenness: Vec<f64>,
    edge_betweenness: Vec<f64>,
    closeness: Vec<f64>,
}

impl Totals {
    fn new(nodes: usize, edges: usize) -> Self {
        Self {
            node_betweenness: vec![0.0; nodes],
            edge_betweenness: vec![0.0; edges],
            closeness: vec![0.0; nodes],
        }
    }

    fn merge(&mut self, other: &Totals) {
        for (total, value) in self.node_betweenness.iter_mut().zip(&other.node_betweenness) {
            *total += value;
        }
        for (total, value) in self.edge_betweenness.iter_mut().zip(&other.edge_betweenness) {
            *total += value;
        }
        for (total, value) in self.closeness.iter_mut().zip(&other.closeness) {
            *total += value;
        }
    }
}

/// Drives the full analysis over an immutable [`GraphModel`].
pub struct GraphAnalyzer<'a> {
    model: &'a GraphModel,
    orientation: Orientation,
    config: AnalysisConfig,
}

impl<'a> GraphAnalyzer<'a> {
    pub fn new(model: &'a GraphModel, orientation: Orientation) -> Self {
        Self::with_config(model, orientation, AnalysisConfig::default())
    }

    pub fn with_config(
        model: &'a GraphModel,
        orientation: Orientation,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            model,
            orientation,
            config,
        }
    }

    /// Run the analysis, producing node and edge records ascending by id.
    ///
    /// Any traversal failure aborts the whole run; there is no
    /// partial-success mode.
    pub fn analyze(&self) -> AnalysisResult<(Vec<NodeCentrality>, Vec<EdgeCentrality>)> {
        let nodes = self.model.node_count();
        debug!(
            nodes,
            edges = self.model.edge_count(),
            orientation = %self.orientation,
            weighted = self.model.is_weighted(),
            threads = self.config.threads,
            "starting centrality analysis"
        );

        let workers = self.config.threads.clamp(1, nodes.max(1));
        let mut totals = if workers <= 1 {
            let mut totals = Totals::new(nodes, self.model.edge_count());
            for source in 0..nodes {
                self.accumulate(source, &mut totals)?;
            }
            totals
        } else {
            self.accumulate_parallel(workers)?
        };

        if self.orientation == Orientation::Undirected {
            // Every unordered pair was walked once from each endpoint; keep
            // half so each pair contributes exactly once.
            for value in &mut totals.node_betweenness {
                *value *= 0.5;
            }
            for value in &mut totals.edge_betweenness {
                *value *= 0.5;
            }
        }

        debug!(nodes, "centrality analysis complete");
        Ok(results::assemble(
            self.model,
            &totals.node_betweenness,
            &totals.closeness,
            &totals.edge_betweenness,
        ))
    }

    /// Strided source assignment over a scoped worker pool. Partials merge
    /// in worker order, so a fixed thread count reproduces bit-identical
    /// totals.
    fn accumulate_parallel(&self, workers: usize) -> AnalysisResult<Totals> {
        let nodes = self.model.node_count();
        let partials: Vec<AnalysisResult<Totals>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || {
                        let mut totals = Totals::new(nodes, self.model.edge_count());
                        let mut source = worker;
                        while source < nodes {
                            self.accumulate(source, &mut totals)?;
                            source += workers;
                        }
                        Ok(totals)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("analysis worker panicked"))
                .collect()
        });

        let mut merged = Totals::new(nodes, self.model.edge_count());
        for partial in &partials {
            match partial {
                Ok(totals) => merged.merge(totals),
                Err(error) => return Err(error.clone()),
            }
        }
        Ok(merged)
    }

    /// One source: its closeness plus its dependency contributions.
    fn accumulate(&self, source: usize, totals: &mut Totals) -> AnalysisResult<()> {
        if self.config.cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        let tree = traversal::single_source(self.model, source, self.orientation)?;
        totals.closeness[source] = closeness(&tree);

        // Backward sweep over the shortest-path DAG: each node hands
        // (path_count share) × (1 + own dependency) to every predecessor,
        // crediting the connecting edge along the way.
        let mut dependency = vec![0.0; self.model.node_count()];
        for &node in tree.settled.iter().rev() {
            let credit = (1.0 + dependency[node]) / tree.path_count[node];
            for pred in &tree.predecessors[node] {
                let share = tree.path_count[pred.node] * credit;
                dependency[pred.node] += share;
                totals.edge_betweenness[pred.edge] += share;
            }
            if node != source {
                totals.node_betweenness[node] += dependency[node];
            }
        }
        Ok(())
    }
}

/// Closeness of the tree's source: reachable-node count over distance sum,
/// 0 when nothing is reachable.
fn closeness(tree: &ShortestPathTree) -> f64 {
    let mut reachable = 0usize;
    let mut total = 0.0;
    for (node, &distance) in tree.distance.iter().enumerate() {
        if node == tree.source || !distance.is_finite() {
            continue;
        }
        reachable += 1;
        total += distance;
    }
    if total > 0.0 {
        reachable as f64 / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InputEdge;

    fn line() -> GraphModel {
        // 1 → 2 → 3 → 4
        GraphModel::build(
            &[1, 2, 3, 4],
            &[
                InputEdge::new(1, 1, 2),
                InputEdge::new(2, 2, 3),
                InputEdge::new(3, 3, 4),
            ],
            false,
        )
        .unwrap()
    }

    fn score_of(rows: &[NodeCentrality], node_id: i64) -> NodeCentrality {
        *rows.iter().find(|row| row.node_id == node_id).unwrap()
    }

    fn edge_score_of(rows: &[EdgeCentrality], edge_id: i64) -> f64 {
        rows.iter()
            .find(|row| row.edge_id == edge_id)
            .unwrap()
            .betweenness
    }

    // --- Scenario: hand-checked values on the directed line graph ---

    #[test]
    fn directed_line_betweenness_and_closeness() {
        let model = line();
        let (nodes, edges) = GraphAnalyzer::new(&model, Orientation::Directed)
            .analyze()
            .unwrap();

        // Interior nodes each sit on two of the six ordered pairs.
        assert_eq!(score_of(&nodes, 1).betweenness, 0.0);
        assert_eq!(score_of(&nodes, 2).betweenness, 2.0);
        assert_eq!(score_of(&nodes, 3).betweenness, 2.0);
        assert_eq!(score_of(&nodes, 4).betweenness, 0.0);

        assert_eq!(score_of(&nodes, 1).closeness, 3.0 / 6.0);
        assert_eq!(score_of(&nodes, 2).closeness, 2.0 / 3.0);
        assert_eq!(score_of(&nodes, 3).closeness, 1.0);
        assert_eq!(score_of(&nodes, 4).closeness, 0.0);

        // Edge 2→3 carries the four pairs crossing the middle.
        assert_eq!(edge_score_of(&edges, 1), 3.0);
        assert_eq!(edge_score_of(&edges, 2), 4.0);
        assert_eq!(edge_score_of(&edges, 3), 3.0);
    }

    // --- Scenario: undirected pairs contribute exactly once ---

    #[test]
    fn undirected_line_halves_both_node_and_edge_scores() {
        let model = line();
        let (nodes, edges) = GraphAnalyzer::new(&model, Orientation::Undirected)
            .analyze()
            .unwrap();

        assert_eq!(score_of(&nodes, 2).betweenness, 2.0);
        assert_eq!(score_of(&nodes, 3).betweenness, 2.0);
        assert_eq!(edge_score_of(&edges, 1), 3.0);
        assert_eq!(edge_score_of(&edges, 2), 4.0);

        // Symmetric closeness on the line: ends see 1+2+3, middles 1+1+2.
        assert_eq!(score_of(&nodes, 1).closeness, 3.0 / 6.0);
        assert_eq!(score_of(&nodes, 2).closeness, 3.0 / 4.0);
    }

    // --- Scenario: tied shortest paths split dependency ---

    #[test]
    fn tied_paths_split_betweenness_between_routes() {
        // Diamond 1→{2,3}→4: each middle node carries half of pair (1,4).
        let model = GraphModel::build(
            &[1, 2, 3, 4],
            &[
                InputEdge::new(1, 1, 2),
                InputEdge::new(2, 1, 3),
                InputEdge::new(3, 2, 4),
                InputEdge::new(4, 3, 4),
            ],
            false,
        )
        .unwrap();
        let (nodes, edges) = GraphAnalyzer::new(&model, Orientation::Directed)
            .analyze()
            .unwrap();
        assert_eq!(score_of(&nodes, 2).betweenness, 0.5);
        assert_eq!(score_of(&nodes, 3).betweenness, 0.5);
        // Each edge carries its endpoint pair plus half of (1,4).
        assert_eq!(edge_score_of(&edges, 1), 1.5);
        assert_eq!(edge_score_of(&edges, 4), 1.5);
    }

    // --- Scenario: isolated node never divides by zero ---

    #[test]
    fn isolated_node_scores_zero_everywhere() {
        let model =
            GraphModel::build(&[1, 2, 7], &[InputEdge::new(1, 1, 2)], false).unwrap();
        for orientation in [
            Orientation::Directed,
            Orientation::Reversed,
            Orientation::Undirected,
        ] {
            let (nodes, _) = GraphAnalyzer::new(&model, orientation).analyze().unwrap();
            let isolated = score_of(&nodes, 7);
            assert_eq!(isolated.closeness, 0.0);
            assert_eq!(isolated.betweenness, 0.0);
        }
    }

    // --- Scenario: cancellation aborts with no partial result ---

    #[test]
    fn cancelled_token_aborts_before_first_source() {
        let model = line();
        let config = AnalysisConfig::default();
        config.cancel.cancel();
        let err = GraphAnalyzer::with_config(&model, Orientation::Directed, config)
            .analyze()
            .unwrap_err();
        assert_eq!(err, AnalysisError::Cancelled);
    }

    #[test]
    fn cancelled_token_aborts_worker_pool_runs_too() {
        let model = line();
        let config = AnalysisConfig {
            threads: 3,
            ..AnalysisConfig::default()
        };
        config.cancel.cancel();
        let err = GraphAnalyzer::with_config(&model, Orientation::Directed, config)
            .analyze()
            .unwrap_err();
        assert_eq!(err, AnalysisError::Cancelled);
    }

    // --- Scenario: worker pool matches the inline sweep ---

    #[test]
    fn parallel_totals_match_serial_totals() {
        let model = GraphModel::build(
            &[1, 2, 3, 4, 5, 6],
            &[
                InputEdge::weighted(1, 1, 2, 2.0),
                InputEdge::weighted(2, 2, 3, 1.0),
                InputEdge::weighted(3, 3, 4, 4.0),
                InputEdge::weighted(4, 4, 5, 1.0),
                InputEdge::weighted(5, 5, 6, 2.0),
                InputEdge::weighted(6, 6, 1, 3.0),
                InputEdge::weighted(7, 2, 5, 5.0),
            ],
            true,
        )
        .unwrap();

        let (serial_nodes, serial_edges) = GraphAnalyzer::new(&model, Orientation::Directed)
            .analyze()
            .unwrap();
        let config = AnalysisConfig {
            threads: 4,
            ..AnalysisConfig::default()
        };
        let (pool_nodes, pool_edges) =
            GraphAnalyzer::with_config(&model, Orientation::Directed, config)
                .analyze()
                .unwrap();

        for (serial, pooled) in serial_nodes.iter().zip(&pool_nodes) {
            assert_eq!(serial.node_id, pooled.node_id);
            assert!((serial.betweenness - pooled.betweenness).abs() < 1e-9);
            assert!((serial.closeness - pooled.closeness).abs() < 1e-9);
        }
        for (serial, pooled) in serial_edges.iter().zip(&pool_edges) {
            assert_eq!(serial.edge_id, pooled.edge_id);
            assert!((serial.betweenness - pooled.betweenness).abs() < 1e-9);
        }
    }

    // --- Scenario: empty graph is a no-op, not a panic ---

    #[test]
    fn empty_graph_produces_empty_tables() {
        let model = GraphModel::build(&[], &[], false).unwrap();
        let (nodes, edges) = GraphAnalyzer::new(&model, Orientation::Directed)
            .analyze()
            .unwrap();
        assert!(nodes.is_empty());
        assert!(edges.is_empty());
    }
}
