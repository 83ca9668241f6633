use serde_json::json;
use vertexpad::geometry::limits;
use vertexpad::{EditorConfig, Graph, GraphError, Session, Tool, Vec2};

fn sample() -> Graph {
    let mut g = Graph::new();
    let a = g.add_node(10.0, 20.0);
    let b = g.add_node(110.0, 20.0);
    let e = g.add_edge(a, b, true).unwrap();
    g.add_edge(b, a, true).unwrap();
    g.add_loop(b, true).unwrap();
    g.set_edge_weight(e, "2.5").unwrap();
    g.set_edge_curvature(e, -40.0).unwrap();
    g.rename_node(a, "src").unwrap();
    g
}

#[test]
fn document_round_trips() {
    let g = sample();
    let v = g.to_json_value();
    assert_eq!(v["version"], json!(1));
    assert_eq!(v["directed"], json!(true));
    let mut h = Graph::new();
    assert!(h.from_json_value_strict(v.clone()).unwrap());
    assert_eq!(h.to_json_value(), v);
    let e = h.edge(0).unwrap();
    assert!(e.has_weight && e.weight == 2.5 && e.curvature == -40.0);
    assert_eq!(h.node(0).unwrap().label, "src");
}

#[test]
fn ids_survive_gaps() {
    let mut g = sample();
    g.remove_node(0).unwrap();
    let mut h = Graph::new();
    assert!(h.from_json_value(g.to_json_value()));
    assert!(h.node(0).is_none());
    assert_eq!(h.node(1).unwrap().label, "v1");
    assert_eq!(h.edge_count(), 1);
    assert!(h.edge(2).unwrap().is_loop());
    // next id is past the loaded ones
    assert_eq!(h.add_node(0.0, 0.0), 2);
}

#[test]
fn strict_loader_rejects_duplicate_labels() {
    let v = json!({
        "version": 1,
        "nodes": [{ "id": 0, "x": 0.0, "y": 0.0, "label": "a" }, { "id": 1, "x": 5.0, "y": 0.0, "label": " a " }],
        "edges": []
    });
    let mut g = sample();
    let before = g.to_json_value();
    let err = g.from_json_value_strict(v.clone()).unwrap_err();
    assert_eq!(err.0, "duplicate_label");
    assert_eq!(g.to_json_value(), before);

    // lenient loader relabels instead
    assert!(g.from_json_value(v));
    let labels: Vec<String> = g.nodes().map(|(_, n)| n.label.clone()).collect();
    assert_eq!(labels, vec!["a".to_string(), "v0".to_string()]);
}

#[test]
fn strict_loader_checks_bounds_and_weights() {
    let mut g = Graph::new();
    let far = json!({ "nodes": [{ "id": 0, "x": 1.0e38, "y": 0.0, "label": "a" }] });
    assert_eq!(g.from_json_value_strict(far).unwrap_err().0, "out_of_bounds");
    let bad_weight = json!({
        "nodes": [{ "id": 0, "x": 0.0, "y": 0.0, "label": "a" }, { "id": 1, "x": 1.0, "y": 0.0, "label": "b" }],
        "edges": [{ "id": 0, "from": 0, "to": 1, "weight": -1.0 }]
    });
    assert_eq!(g.from_json_value_strict(bad_weight).unwrap_err().0, "invalid_weight");
    let mixed = json!({
        "directed": false,
        "nodes": [{ "id": 0, "x": 0.0, "y": 0.0, "label": "a" }, { "id": 1, "x": 1.0, "y": 0.0, "label": "b" }],
        "edges": [{ "id": 0, "from": 0, "to": 1, "directed": true }]
    });
    assert_eq!(g.from_json_value_strict(mixed).unwrap_err().0, "directedness_conflict");
    assert_eq!(g.from_json_value_strict(json!({ "nodes": 3 })).unwrap_err().0, "json_parse");
}

#[test]
fn lenient_loader_drops_dangling_edges() {
    let mut g = Graph::new();
    let v = json!({
        "nodes": [{ "id": 0, "x": 0.0, "y": 0.0 }],
        "edges": [{ "id": 0, "from": 0, "to": 9 }, { "id": 1, "from": 0, "to": 0 }]
    });
    assert!(g.from_json_value(v));
    assert_eq!(g.node(0).unwrap().label, "v0");
    assert!(g.edge(0).is_none());
    assert!(g.edge(1).unwrap().is_loop());
    assert!(!g.from_json_value(json!("not a graph")));
}

#[test]
fn session_load_drops_stale_results() {
    let mut s = Session::new(EditorConfig::default());
    s.apply_floyd(json!({ "steps": [], "labels": [], "node_ids": [] })).unwrap();
    assert!(s.load_graph(sample().to_json_value(), true).unwrap());
    assert!(s.results().floyd.is_none());
    assert_eq!(s.graph().node_count(), 2);
}

#[test]
fn svg_paths_follow_edge_shapes() {
    let g = sample();
    let paths = g.to_svg_paths(&EditorConfig::default());
    assert_eq!(paths.len(), 3);
    assert!(paths[0].contains(" Q "));
    assert!(paths[2].contains(" C "));
}

#[test]
fn edits_stay_within_loadable_bounds() {
    let mut s = Session::new(EditorConfig::default());
    s.load_graph(sample().to_json_value(), true).unwrap();
    s.select_tool(Tool::Select).unwrap();
    s.pointer_down(Vec2::new(110.0, 20.0));
    s.pointer_move(Vec2::new(2.0e7, 0.0));
    s.pointer_up(Vec2::new(2.0e7, 0.0));
    assert_eq!(s.graph().node(1).unwrap().x, limits::COORD_MAX);

    let long = "x".repeat(limits::MAX_LABEL_LEN + 44);
    let err = s.with_graph(|g| g.rename_node(0, &long)).unwrap_err();
    assert_eq!(err, GraphError::LabelTooLong(limits::MAX_LABEL_LEN + 44));
    assert_eq!(err.code(), "label_too_long");
    s.with_graph(|g| g.rename_node(0, &"y".repeat(limits::MAX_LABEL_LEN))).unwrap();

    let v = s.graph().to_json_value();
    let mut strict = Graph::new();
    assert!(strict.from_json_value_strict(v.clone()).unwrap());
    assert_eq!(strict.to_json_value(), v);
    let mut lenient = Graph::new();
    assert!(lenient.from_json_value(v.clone()));
    assert_eq!(lenient.node_count(), 2);
    assert_eq!(lenient.edge_count(), 3);
    assert_eq!(lenient.node(0).unwrap().label.len(), limits::MAX_LABEL_LEN);
}

#[test]
fn new_nodes_are_clamped_into_bounds() {
    let mut g = Graph::new();
    let a = g.add_node(-5.0e9, f32::INFINITY);
    let n = g.node(a).unwrap();
    assert_eq!((n.x, n.y), (limits::COORD_MIN, 0.0));
    assert!(!g.move_node(a, f32::NAN, 0.0));
}
