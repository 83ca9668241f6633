use serde_json::json;
use vertexpad::algorithms::reconstruct::Reconstruction;
use vertexpad::results::ResultKind;
use vertexpad::{EditError, Effect, GraphError, HighlightKind, ServiceError, Session, Tool, Vec2};

fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn click(s: &mut Session, x: f32, y: f32) -> Vec<Effect> {
    let mut fx = s.pointer_down(at(x, y));
    fx.extend(s.pointer_up(at(x, y)));
    fx
}

fn connect(s: &mut Session, a: (f32, f32), b: (f32, f32)) -> Vec<Effect> {
    let mut fx = s.pointer_down(at(a.0, a.1));
    fx.extend(s.pointer_move(at(b.0, b.1)));
    fx.extend(s.pointer_up(at(b.0, b.1)));
    fx
}

/// Triangle v0 (0,0), v1 (200,0), v2 (100,150) joined in order.
fn triangle(tool: Tool) -> Session {
    let mut s = Session::default();
    s.select_tool(Tool::Vertex).unwrap();
    click(&mut s, 0.0, 0.0);
    click(&mut s, 200.0, 0.0);
    click(&mut s, 100.0, 150.0);
    s.select_tool(tool).unwrap();
    connect(&mut s, (0.0, 0.0), (200.0, 0.0));
    connect(&mut s, (200.0, 0.0), (100.0, 150.0));
    connect(&mut s, (100.0, 150.0), (0.0, 0.0));
    s
}

#[test]
fn arc_tool_locks_out_edge_tool() {
    let mut s = Session::default();
    s.select_tool(Tool::Arc).unwrap();
    assert!(s.graph().is_directed());
    s.select_tool(Tool::Vertex).unwrap();
    click(&mut s, 0.0, 0.0);
    click(&mut s, 100.0, 0.0);
    s.select_tool(Tool::Arc).unwrap();
    connect(&mut s, (0.0, 0.0), (100.0, 0.0));
    assert!(s.graph().edge(0).unwrap().is_directed);
    assert_eq!(s.select_tool(Tool::Edge), Err(EditError::ToolDisabled(Tool::Edge)));
    assert_eq!(s.tool(), Tool::Arc);
    assert!(s.is_tool_enabled(Tool::Arc));
}

#[test]
fn edge_tool_is_available_again_after_erasing_all_arcs() {
    let mut s = triangle(Tool::Arc);
    s.select_tool(Tool::Eraser).unwrap();
    for _ in 0..3 {
        click(&mut s, 100.0, 0.0);
        click(&mut s, 150.0, 75.0);
        click(&mut s, 50.0, 75.0);
    }
    assert_eq!(s.graph().edge_count(), 0);
    s.select_tool(Tool::Edge).unwrap();
    assert!(!s.graph().is_directed());
}

#[test]
fn weight_validation_keeps_previous_value() {
    let mut s = triangle(Tool::Edge);
    s.select_tool(Tool::Weight).unwrap();
    click(&mut s, 100.0, 2.0);
    for bad in ["-3", "abc", "0", "NaN", "inf", ""] {
        assert!(matches!(
            s.commit_edit(bad),
            Err(EditError::Rejected(GraphError::InvalidWeight(_)))
        ));
    }
    assert_eq!(s.graph().edge(0).unwrap().weight, 1.0);
    assert!(!s.graph().edge(0).unwrap().has_weight);
    s.commit_edit("5").unwrap();
    let e = s.graph().edge(0).unwrap();
    assert_eq!(e.weight, 5.0);
    assert!(e.has_weight);
}

#[test]
fn new_request_replaces_unanswered_one() {
    let mut s = triangle(Tool::Edge);
    s.select_tool(Tool::Label).unwrap();
    click(&mut s, 0.0, 0.0);
    click(&mut s, 200.0, 0.0);
    s.commit_edit("hub").unwrap();
    assert_eq!(s.graph().node(1).unwrap().label, "hub");
    assert_eq!(s.graph().node(0).unwrap().label, "v0");
}

#[test]
fn failed_rename_leaves_highlight_alone() {
    let mut s = triangle(Tool::Edge);
    s.apply_dijkstra(json!({
        "success": true, "path_nodes_ids": [0, 1], "path_edges": [{ "from": 0, "to": 1, "id": 0 }],
        "total_weight": 1.0
    }))
    .unwrap();
    s.select_tool(Tool::Label).unwrap();
    click(&mut s, 0.0, 0.0);
    assert!(s.commit_edit("v2").is_err());
    assert_eq!(s.highlight().kind(), HighlightKind::Dijkstra);
    assert!(s.highlight().has_edge(0));
}

#[test]
fn clear_canvas_resets_everything() {
    let mut s = triangle(Tool::Edge);
    s.apply_solutions(json!({ "invariants": { "coloring": { "0": 1 } } })).unwrap();
    s.toggle_coloring();
    s.apply_traversal(ResultKind::Dfs, json!({ "tree_edges": [{ "id": 0 }], "protocol": [] }))
        .unwrap();
    s.clear_canvas();
    assert_eq!(s.graph().node_count(), 0);
    assert_eq!(s.graph().edge_count(), 0);
    assert!(s.highlight().is_empty());
    assert!(!s.coloring_active());
    assert!(!s.results().is_present(ResultKind::Solutions));
    assert!(!s.results().is_present(ResultKind::Dfs));
    // ids keep counting after a clear
    s.select_tool(Tool::Vertex).unwrap();
    assert_eq!(click(&mut s, 0.0, 0.0), vec![Effect::NodeCreated { node: 3 }]);
    assert_eq!(s.graph().node(3).unwrap().label, "v0");
}

#[test]
fn failed_solve_keeps_analysis() {
    let mut s = triangle(Tool::Edge);
    let snapshot = s.service_request(None, None);
    s.apply_analysis(snapshot, json!({ "adjacency_matrix": [[0, 1, 1], [1, 0, 1], [1, 1, 0]] }))
        .unwrap();
    assert_eq!(
        s.apply_solutions(json!({ "error": "solver crashed" })),
        Err(ServiceError::Rejected("solver crashed".into()))
    );
    s.record_failure(ResultKind::Dijkstra, ServiceError::Transport("offline".into()));
    assert!(s.results().error(ResultKind::Analysis).is_none());
    assert!(s.results().error(ResultKind::Solutions).is_some());
    assert!(s.results().error(ResultKind::Dijkstra).is_some());
    let entry = s.results().analysis.as_ref().unwrap().as_ref().unwrap();
    assert_eq!(entry.snapshot.labels(), vec!["v0", "v1", "v2"]);
}

#[test]
fn begin_algorithm_clears_highlight() {
    let mut s = triangle(Tool::Edge);
    s.apply_traversal(ResultKind::Bfs, json!({ "tree_edges": [{ "id": 0 }, { "id": 1 }] }))
        .unwrap();
    assert_eq!(s.highlight().kind(), HighlightKind::Bfs);
    assert_eq!(s.highlight().node_ids().count(), 0);
    let req = s.begin_algorithm(ResultKind::Dijkstra, Some(0), Some(2)).unwrap();
    assert!(s.highlight().is_empty());
    assert_eq!(req.start_node, Some(0));
    assert!(s.begin_algorithm(ResultKind::Dfs, Some(42), None).is_err());
}

#[test]
fn unsuccessful_dijkstra_highlights_nothing() {
    let mut s = triangle(Tool::Edge);
    s.apply_dijkstra(json!({ "success": false, "error": "no path" })).unwrap();
    assert!(s.highlight().is_empty());
    assert!(s.results().error(ResultKind::Dijkstra).is_none());
}

#[test]
fn euler_path_toggles_on_and_off() {
    let mut s = triangle(Tool::Edge);
    s.apply_solutions(json!({
        "euler": { "type": "cycle", "path": ["v0", "v1", "v2", "v0"], "edge_ids": [0, 1, 2], "message": "" },
        "hamilton": { "type": "path", "path": ["v1", "ghost", "v2"], "edge_ids": [1, null], "message": "" }
    }))
    .unwrap();
    assert!(s.toggle_path(HighlightKind::Euler));
    assert_eq!(s.highlight().edge_ids().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(s.toggle_path(HighlightKind::Hamilton));
    assert_eq!(s.highlight().kind(), HighlightKind::Hamilton);
    assert_eq!(s.highlight().node_ids().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(s.highlight().edge_ids().collect::<Vec<_>>(), vec![1]);
    assert!(s.toggle_path(HighlightKind::Hamilton));
    assert!(s.highlight().is_empty());
}

#[test]
fn floyd_probe_highlights_edges_only() {
    let mut s = triangle(Tool::Edge);
    s.apply_floyd(json!({
        "labels": ["v0", "v1", "v2"],
        "node_ids": [0, 1, 2],
        "steps": [
            { "M": [[0, 1, "∞"], [1, 0, 1], ["∞", 1, 0]], "T": [["—", 1, "—"], [2, "—", 2], ["—", 3, "—"]] },
            { "M": [[0, 1, 2], [1, 0, 1], [2, 1, 0]], "T": [["—", 1, 2], [2, "—", 2], [2, 3, "—"]] }
        ]
    }))
    .unwrap();
    assert!(s.highlight().is_empty());

    let rec = s.probe_floyd(0, 2).unwrap();
    assert_eq!(rec, Reconstruction::Path(vec![0, 1, 2]));
    assert_eq!(s.highlight().kind(), HighlightKind::Floyd);
    assert_eq!(s.highlight().edge_ids().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(s.highlight().node_ids().count(), 0);

    // reversed pair resolves in undirected mode
    s.probe_floyd(2, 0).unwrap();
    assert_eq!(s.highlight().edge_ids().collect::<Vec<_>>(), vec![0, 1]);

    assert_eq!(s.probe_floyd_step(0, 0, 2), Some(Reconstruction::Unreachable));
    assert!(s.highlight().is_empty());
    assert_eq!(s.probe_floyd_step(7, 0, 2), None);
}

#[test]
fn floyd_probe_ignores_opposite_arcs_when_directed() {
    // arcs 0->1, 1->2, 2->0
    let mut s = triangle(Tool::Arc);
    assert!(s.graph().is_directed());
    s.apply_floyd(json!({
        "labels": ["v0", "v1", "v2"],
        "node_ids": [0, 1, 2],
        "steps": [{ "M": [[0, 1, 2], [1, 0, 1], [2, 1, 0]], "T": [["—", 1, 2], [2, "—", 2], [2, 3, "—"]] }]
    }))
    .unwrap();

    assert_eq!(s.probe_floyd(0, 2), Some(Reconstruction::Path(vec![0, 1, 2])));
    assert_eq!(s.highlight().edge_ids().collect::<Vec<_>>(), vec![0, 1]);

    // 2 -> 1 -> 0 only exists as the reversed arcs
    assert_eq!(s.probe_floyd(2, 0), Some(Reconstruction::Path(vec![2, 1, 0])));
    assert_eq!(s.highlight().edge_ids().count(), 0);
    assert!(!s.highlight().has_edge(0) && !s.highlight().has_edge(1));
}

#[test]
fn clear_result_drops_slot_and_highlight() {
    let mut s = triangle(Tool::Edge);
    s.apply_traversal(ResultKind::Dfs, json!({ "tree_edges": [{ "id": 2 }] })).unwrap();
    s.clear_result(ResultKind::Dfs);
    assert!(!s.results().is_present(ResultKind::Dfs));
    assert!(s.highlight().is_empty());
}
