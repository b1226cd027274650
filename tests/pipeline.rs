use std::io::Write;

use football_similarity::*;

fn write_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file
}

fn scenario_context() -> AnalysisContext {
    AnalysisContext {
        goal_threshold: 15.0,
        assist_threshold: 5.0,
        ..AnalysisContext::default()
    }
}

#[test]
fn season_file_end_to_end() {
    let file = write_file(
        ".csv",
        b"Rk;Player;Pos;Squad;Total_Goals;Assists\n\
          1;A;FW;X;20;2\n\
          2;B;FW;Y;18;3\n\
          3;C;DF;Z;1;1\n",
    );

    let context = scenario_context();
    let loaded = load_records(file.path(), &context).unwrap();
    assert_eq!(loaded.records.len(), 3);

    let analysis = Analysis::new(&loaded.records, &context).unwrap();
    assert_eq!(analysis.graph().weight("A", "B"), Some(0.25));

    let components = analysis.components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].members, vec!["A", "B"]);
    assert_eq!(components[1].members, vec!["C"]);

    let report = analysis.summary();
    assert_eq!(report.total_components, 2);
    assert_eq!(report.components[0].size, 2);
    assert_eq!(report.components[0].top_players[0].id, "A");

    let a = analysis.most_similar("A").unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!((a[0].id.as_str(), a[0].weight), ("B", 0.25));

    assert!(analysis.most_similar("C").unwrap().is_empty());
    assert!(matches!(
        analysis.most_similar("Kylian Mbappé"),
        Err(AnalysisError::PlayerNotFound(_))
    ));

    let export = analysis.export();
    assert_eq!(export.nodes.len(), 3);
    assert_eq!(export.edges.len(), 1);
    assert_eq!(
        export.nodes[0].attributes.get("Pos"),
        Some(&AttributeValue::Text("FW".to_string()))
    );
}

#[test]
fn json_file_end_to_end() {
    let file = write_file(
        ".json",
        br#"[
            {"player": "A", "team": "X", "goals": 20, "assists": 2},
            {"player": "B", "team": "Y", "goals": "18", "assists": "3"},
            {"player": "C", "team": "Z", "goals": 1, "assists": 1}
        ]"#,
    );

    let context = scenario_context();
    let loaded = load_records(file.path(), &context).unwrap();
    let analysis = Analysis::new(&loaded.records, &context).unwrap();

    assert_eq!(analysis.graph().edge_count(), 1);
    assert_eq!(analysis.most_similar("B").unwrap()[0].id, "A");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_records(&dir.path().join("nope.csv"), &AnalysisContext::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn runs_are_independent() {
    let records = vec![
        PlayerRecord::new("A", "X", 20.0, 2.0),
        PlayerRecord::new("B", "Y", 18.0, 3.0),
        PlayerRecord::new("C", "Z", 12.0, 1.0),
    ];

    let strict = Analysis::new(&records, &scenario_context()).unwrap();
    let loose = Analysis::new(
        &records,
        &AnalysisContext {
            goal_threshold: 10.0,
            ..scenario_context()
        },
    )
    .unwrap();

    assert_eq!(strict.graph().edge_count(), 1);
    assert_eq!(loose.graph().edge_count(), 3);
    assert_eq!(strict.components().len(), 2);
    assert_eq!(loose.components().len(), 1);
}
