use crate::components::ComponentReport;
use crate::error::AnalysisError;
use crate::graph::SimilarityGraph;
use crate::similarity::SimilarPlayer;

pub fn output_graph_stats(graph: &SimilarityGraph) {
    println!(
        "Players: {} | Qualifying: {} (goals > {}, assists > {}) | Similarity edges: {}",
        graph.node_count(),
        graph.qualifying_count(),
        graph.goal_threshold(),
        graph.assist_threshold(),
        graph.edge_count(),
    );
}

pub fn output_components(report: &ComponentReport) {
    println!("Connected components: {}", report.total_components);

    for c in &report.components {
        println!("\nComponent {}: {} players", c.index, c.size);
        println!("Top {} by goals:", c.top_players.len());

        for p in &c.top_players {
            println!(
                "  {0:30} | {1:25} | {2:5} goals | {3:5} assists",
                p.id, p.team, p.goals, p.assists
            );
        }
    }
}

pub fn output_similar(player_id: &str, result: &Result<Vec<SimilarPlayer>, AnalysisError>) {
    match result {
        Ok(similar) => {
            println!("\nMost similar to {player_id}:");
            if similar.is_empty() {
                println!("  (no connected players)");
            }
            for (i, p) in similar.iter().enumerate() {
                println!(
                    "  {0:2}. {1:30} | {2:25} | Similarity: {3:.2}",
                    i + 1,
                    p.id,
                    p.team,
                    p.weight
                );
            }
        }
        Err(e) => println!("\n{e}"),
    }
}
