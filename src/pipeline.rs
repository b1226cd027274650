use crate::analysis_context::AnalysisContext;
use crate::components::{find_components, summarize, Component, ComponentReport};
use crate::data_loader::PlayerRecord;
use crate::error::AnalysisError;
use crate::export::GraphExport;
use crate::graph::SimilarityGraph;
use crate::similarity::{most_similar, SimilarPlayer};

/// One analysis run: a graph built from a fixed snapshot of records plus the knobs to query it
/// with.
///
/// Each run owns its graph outright. Runs over different datasets share nothing and can be put on
/// separate threads.
#[derive(Debug, Clone)]
pub struct Analysis {
    graph: SimilarityGraph,
    context: AnalysisContext,
}

impl Analysis {
    pub fn new(records: &[PlayerRecord], context: &AnalysisContext) -> Result<Self, AnalysisError> {
        let (goals, assists) = (context.goal_threshold, context.assist_threshold);
        let graph = if context.reject_duplicates {
            SimilarityGraph::build_strict(records, goals, assists)?
        } else {
            SimilarityGraph::build(records, goals, assists)
        };

        Ok(Self {
            graph,
            context: context.clone(),
        })
    }

    pub fn graph(&self) -> &SimilarityGraph {
        &self.graph
    }

    // Recomputed on every call, components are a view, not state
    pub fn components(&self) -> Vec<Component> {
        find_components(&self.graph)
    }

    pub fn summary(&self) -> ComponentReport {
        summarize(
            &self.graph,
            &self.components(),
            self.context.limit_display,
            self.context.top_k_per_component,
        )
    }

    pub fn most_similar(&self, player_id: &str) -> Result<Vec<SimilarPlayer>, AnalysisError> {
        most_similar(&self.graph, player_id, self.context.top_n)
    }

    pub fn export(&self) -> GraphExport {
        GraphExport::from_graph(&self.graph)
    }
}
