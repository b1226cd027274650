use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::data_loader::PlayerRecord;
use crate::error::AnalysisError;

/// Similarity of two stat lines: `1 / (1 + |Δgoals| + |Δassists|)`.
///
/// Always in `(0, 1]`, exactly 1 for identical lines, and symmetric in its arguments.
/// The denominator is at least 1 so there's no division by zero to worry about.
pub fn similarity_weight(a: &PlayerRecord, b: &PlayerRecord) -> f64 {
    1.0 / (1.0 + (a.goals - b.goals).abs() + (a.assists - b.assists).abs())
}

/// Undirected similarity graph over one snapshot of player records.
///
/// Every record becomes a node. Only players passing the thresholds get edges, and those get one
/// to every other qualifying player. Read-only once built; a threshold change means a new build.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    graph: UnGraph<PlayerRecord, f64>,
    index: HashMap<String, NodeIndex>,
    goal_threshold: f64,
    assist_threshold: f64,
}

impl SimilarityGraph {
    // Repeated identifiers: last write wins. The later record replaces the node's attributes in
    // place, so the node keeps the position of its first appearance. Edges are worked out after
    // that, from the surviving record only.
    pub fn build(records: &[PlayerRecord], goal_threshold: f64, assist_threshold: f64) -> Self {
        let mut graph: UnGraph<PlayerRecord, f64> = UnGraph::with_capacity(records.len(), 0);
        let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(records.len());

        for record in records {
            match index.get(&record.id) {
                Some(&idx) => {
                    warn!(player = %record.id, "duplicate player, keeping the later record");
                    graph[idx] = record.clone();
                }
                None => {
                    let idx = graph.add_node(record.clone());
                    index.insert(record.id.clone(), idx);
                }
            }
        }

        let qualifying: Vec<NodeIndex> = graph
            .node_indices()
            .filter(|&idx| graph[idx].qualifies(goal_threshold, assist_threshold))
            .collect();

        // Each pair is independent, so the weights are worked out in parallel and only then added
        // to the graph. collect() keeps the order, so the result matches a sequential build.
        let edges: Vec<(NodeIndex, NodeIndex, f64)> = (0..qualifying.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let graph = &graph;
                let qualifying = &qualifying;
                ((i + 1)..qualifying.len()).map(move |j| {
                    let (a, b) = (qualifying[i], qualifying[j]);
                    (a, b, similarity_weight(&graph[a], &graph[b]))
                })
            })
            .collect();

        debug!(pairs = edges.len(), "computed pair weights");

        graph.reserve_edges(edges.len());
        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight);
        }

        info!(
            nodes = graph.node_count(),
            qualifying = qualifying.len(),
            edges = graph.edge_count(),
            "built similarity graph"
        );

        Self {
            graph,
            index,
            goal_threshold,
            assist_threshold,
        }
    }

    // Same as build, but a repeated identifier is treated as bad data instead of being overwritten.
    pub fn build_strict(
        records: &[PlayerRecord],
        goal_threshold: f64,
        assist_threshold: f64,
    ) -> Result<Self, AnalysisError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id.as_str()) {
                return Err(AnalysisError::DuplicatePlayer(record.id.clone()));
            }
        }

        Ok(Self::build(records, goal_threshold, assist_threshold))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn goal_threshold(&self) -> f64 {
        self.goal_threshold
    }

    pub fn assist_threshold(&self) -> f64 {
        self.assist_threshold
    }

    pub fn qualifying_count(&self) -> usize {
        self.players()
            .filter(|p| p.qualifies(self.goal_threshold, self.assist_threshold))
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn player(&self, id: &str) -> Option<&PlayerRecord> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    // In insertion order, i.e. the order players first appeared in the input
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let (&ia, &ib) = (self.index.get(a)?, self.index.get(b)?);
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Direct neighbours of `id` with the connecting edge weight.
    /// `None` if the player isn't in the graph.
    pub fn neighbors(&self, id: &str) -> Option<Vec<(&PlayerRecord, f64)>> {
        let idx = *self.index.get(id)?;

        let neighbors = self
            .graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx { edge.target() } else { edge.source() };
                (&self.graph[other], *edge.weight())
            })
            .collect();

        Some(neighbors)
    }

    // (source, target, weight) for every edge, in the order they were added
    pub fn edges(&self) -> impl Iterator<Item = (&PlayerRecord, &PlayerRecord, f64)> + '_ {
        self.graph.edge_references().map(move |edge| {
            let (source, target) = (&self.graph[edge.source()], &self.graph[edge.target()]);
            (source, target, *edge.weight())
        })
    }

    pub(crate) fn inner(&self) -> &UnGraph<PlayerRecord, f64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("A", "X", 20.0, 2.0),
            PlayerRecord::new("B", "Y", 18.0, 3.0),
            PlayerRecord::new("C", "Z", 1.0, 1.0),
        ]
    }

    #[test]
    fn weight_formula() {
        let a = PlayerRecord::new("A", "X", 20.0, 2.0);
        let b = PlayerRecord::new("B", "Y", 18.0, 3.0);
        assert_eq!(similarity_weight(&a, &b), 0.25);
        assert_eq!(similarity_weight(&b, &a), 0.25);
        assert_eq!(similarity_weight(&a, &a), 1.0);
    }

    #[test]
    fn only_qualifying_players_are_connected() {
        let graph = SimilarityGraph::build(&sample(), 15.0, 5.0);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.qualifying_count(), 2);
        assert_eq!(graph.weight("A", "B"), Some(0.25));
        assert_eq!(graph.weight("B", "A"), Some(0.25));
        assert_eq!(graph.weight("A", "C"), None);
        assert!(graph.contains("C"));
        assert_eq!(graph.neighbors("C").map(|n| n.len()), Some(0));
        assert!(graph.neighbors("nobody").is_none());
    }

    #[test]
    fn assists_alone_qualify() {
        let records = vec![
            PlayerRecord::new("Playmaker", "X", 2.0, 12.0),
            PlayerRecord::new("Striker", "Y", 25.0, 1.0),
        ];
        let graph = SimilarityGraph::build(&records, 15.0, 10.0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn complete_graph_over_qualifiers() {
        let records: Vec<PlayerRecord> = (0..6)
            .map(|i| PlayerRecord::new(&format!("P{i}"), "T", 10.0 + i as f64, 0.0))
            .collect();

        let graph = SimilarityGraph::build(&records, 0.0, 0.0);
        assert_eq!(graph.edge_count(), 6 * 5 / 2);
        assert_eq!(graph.weight("P0", "P5"), Some(1.0 / 6.0));
    }

    #[test]
    fn empty_input() {
        let graph = SimilarityGraph::build(&[], 0.0, 0.0);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicates_last_write_wins() {
        let records = vec![
            PlayerRecord::new("A", "Old", 20.0, 2.0),
            PlayerRecord::new("B", "Y", 18.0, 3.0),
            PlayerRecord::new("A", "New", 1.0, 0.0),
        ];

        let graph = SimilarityGraph::build(&records, 15.0, 5.0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.player("A").map(|p| p.team.as_str()), Some("New"));
        // The surviving A no longer qualifies, so B has nobody to connect to
        assert_eq!(graph.edge_count(), 0);
        // First appearance keeps its slot
        let order: Vec<&str> = graph.players().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn duplicates_never_self_loop() {
        let records = vec![
            PlayerRecord::new("A", "X", 20.0, 2.0),
            PlayerRecord::new("A", "X", 21.0, 2.0),
        ];
        let graph = SimilarityGraph::build(&records, 0.0, 0.0);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn strict_build_rejects_duplicates() {
        let mut records = sample();
        records.push(PlayerRecord::new("B", "Y", 0.0, 0.0));

        let err = SimilarityGraph::build_strict(&records, 15.0, 5.0).unwrap_err();
        assert_eq!(err, AnalysisError::DuplicatePlayer("B".to_string()));
        assert!(SimilarityGraph::build_strict(&sample(), 15.0, 5.0).is_ok());
    }
}
