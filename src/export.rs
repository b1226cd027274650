use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data_loader::AttributeValue;
use crate::graph::SimilarityGraph;

// What a network renderer needs to draw the graph: labels and tooltips for nodes, thickness and
// tooltips for edges. Layout and colouring are the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeExport {
    pub id: String,
    pub label: String,
    pub team: String,
    pub total_goals: f64,
    pub assists: f64,
    pub title: String,
    pub attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeExport {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub value: f64, // Edge thickness, weight scaled by 10
    pub title: String,
}

impl GraphExport {
    pub fn from_graph(graph: &SimilarityGraph) -> Self {
        let nodes = graph
            .players()
            .map(|p| NodeExport {
                id: p.id.clone(),
                label: p.id.clone(),
                team: p.team.clone(),
                total_goals: p.goals,
                assists: p.assists,
                title: format!("Team: {}, Goals: {}, Assists: {}", p.team, p.goals, p.assists),
                attributes: p.attributes.clone(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(source, target, weight)| EdgeExport {
                source: source.id.clone(),
                target: target.id.clone(),
                weight,
                value: weight * 10.0,
                title: format!("Similarity: {weight:.2}"),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::PlayerRecord;

    fn graph() -> SimilarityGraph {
        let records = vec![
            PlayerRecord::new("A", "X", 20.0, 2.0)
                .with_attribute("Pos", AttributeValue::Text("FW".into())),
            PlayerRecord::new("B", "Y", 18.0, 3.0),
            PlayerRecord::new("C", "Z", 1.0, 1.0),
        ];
        SimilarityGraph::build(&records, 15.0, 5.0)
    }

    #[test]
    fn nodes_and_edges() {
        let export = GraphExport::from_graph(&graph());

        assert_eq!(export.nodes.len(), 3);
        assert_eq!(export.nodes[0].label, "A");
        assert_eq!(export.nodes[0].title, "Team: X, Goals: 20, Assists: 2");
        assert_eq!(export.nodes[0].attributes.get("Pos"), Some(&AttributeValue::Text("FW".into())));

        assert_eq!(export.edges.len(), 1);
        let edge = &export.edges[0];
        assert_eq!((edge.source.as_str(), edge.target.as_str()), ("A", "B"));
        assert_eq!(edge.weight, 0.25);
        assert_eq!(edge.value, 2.5);
        assert_eq!(edge.title, "Similarity: 0.25");
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(GraphExport::from_graph(&graph())).unwrap();

        assert_eq!(json["nodes"][0]["id"], "A");
        assert_eq!(json["nodes"][0]["total_goals"], 20.0);
        assert_eq!(json["nodes"][0]["attributes"]["Pos"], "FW");
        assert_eq!(json["edges"][0]["source"], "A");
        assert_eq!(json["edges"][0]["weight"], 0.25);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        GraphExport::from_graph(&graph()).write_json(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Similarity: 0.25\""));
    }
}
