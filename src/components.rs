use petgraph::visit::{Bfs, VisitMap, Visitable};
use serde::Serialize;
use std::collections::VecDeque;

use crate::graph::SimilarityGraph;

/// A maximal group of players that can reach each other through similarity edges.
/// Members are listed in the order the players first appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub members: Vec<String>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }
}

// Breadth-first search seeded from every unvisited node in insertion order. Components come out
// in discovery order, i.e. ordered by their earliest member. They are NOT sorted by size, which
// matters once the report truncates to limit_display. Isolated players come out as singletons.
//
// One Bfs for the whole pass: its discovered map doubles as the global visited set, so each seed
// costs only the size of its component.
pub fn find_components(graph: &SimilarityGraph) -> Vec<Component> {
    let inner = graph.inner();
    let mut bfs = Bfs {
        stack: VecDeque::new(),
        discovered: inner.visit_map(),
    };
    let mut components = Vec::new();

    for start in inner.node_indices() {
        if bfs.discovered.is_visited(&start) {
            continue;
        }

        bfs.stack.clear();
        bfs.discovered.visit(start);
        bfs.stack.push_back(start);

        let mut found = Vec::new();
        while let Some(node) = bfs.next(inner) {
            found.push(node);
        }

        found.sort_unstable();
        components.push(Component {
            members: found.into_iter().map(|idx| inner[idx].id.clone()).collect(),
        });
    }

    components
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: String,
    pub team: String,
    pub goals: f64,
    pub assists: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub index: usize, // 1-based, as printed
    pub size: usize,
    pub top_players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    pub total_components: usize,
    pub components: Vec<ComponentSummary>,
}

// Summarises the first `limit_display` components, listing each one's top scorers. The sort is
// stable, so players level on goals keep their order within the component.
pub fn summarize(
    graph: &SimilarityGraph,
    components: &[Component],
    limit_display: usize,
    top_k_per_component: usize,
) -> ComponentReport {
    let summaries = components
        .iter()
        .take(limit_display)
        .enumerate()
        .map(|(i, component)| {
            let mut players: Vec<PlayerSummary> = component
                .members
                .iter()
                .filter_map(|id| graph.player(id))
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    team: p.team.clone(),
                    goals: p.goals,
                    assists: p.assists,
                })
                .collect();

            players.sort_by(|a, b| b.goals.total_cmp(&a.goals));
            players.truncate(top_k_per_component);

            ComponentSummary {
                index: i + 1,
                size: component.len(),
                top_players: players,
            }
        })
        .collect();

    ComponentReport {
        total_components: components.len(),
        components: summaries,
    }
}
