use serde::Serialize;

use crate::error::AnalysisError;
use crate::graph::SimilarityGraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPlayer {
    pub id: String,
    pub team: String,
    pub weight: f64,
}

// Ranks a player's direct neighbours by edge weight, highest first. This is a one hop lookup,
// not a nearest neighbour search over the whole graph: fewer than top_n neighbours means a shorter
// list, never padding. Equal weights are ordered by player name so the output is stable.
//
// An unknown player is an Err, but nothing else about the graph or the session is affected.
pub fn most_similar(
    graph: &SimilarityGraph,
    player_id: &str,
    top_n: usize,
) -> Result<Vec<SimilarPlayer>, AnalysisError> {
    let mut neighbors = graph
        .neighbors(player_id)
        .ok_or_else(|| AnalysisError::PlayerNotFound(player_id.to_string()))?;

    neighbors.sort_by(|(pa, wa), (pb, wb)| wb.total_cmp(wa).then_with(|| pa.id.cmp(&pb.id)));

    Ok(neighbors
        .into_iter()
        .take(top_n)
        .map(|(p, weight)| SimilarPlayer {
            id: p.id.clone(),
            team: p.team.clone(),
            weight,
        })
        .collect())
}
