//! Payloads exchanged with the remote analysis service.

use crate::algorithms::reconstruct::Matrix;
use crate::error::ServiceError;
use crate::model::{EdgeId, NodeId};
use crate::Graph;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub id: NodeId,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

/// Request body shared by every service endpoint. Also kept as the snapshot
/// analysis results are labelled against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
    pub is_directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_node: Option<NodeId>,
}

impl ServiceRequest {
    pub fn from_graph(g: &Graph, start_node: Option<NodeId>, end_node: Option<NodeId>) -> Self {
        ServiceRequest {
            nodes: g
                .nodes()
                .map(|(id, n)| WireNode {
                    id,
                    label: n.label.clone(),
                })
                .collect(),
            edges: g
                .edges()
                .map(|(id, e)| WireEdge {
                    id,
                    from: e.from,
                    to: e.to,
                    weight: e.weight,
                })
                .collect(),
            is_directed: g.is_directed(),
            start_node,
            end_node,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.label.as_str()).collect()
    }
}

/// Structural analysis. Only the matrices are typed; degree tables,
/// connectivity and the rest pass through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub adjacency_matrix: Matrix,
    #[serde(default)]
    pub incidence_matrix: Matrix,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathStructure {
    /// `"cycle"`, `"path"` or `"none"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub edge_ids: Vec<Option<EdgeId>>,
    #[serde(default)]
    pub message: String,
}

impl PathStructure {
    pub fn is_found(&self) -> bool {
        self.kind != "none" && !self.path.is_empty()
    }

    pub fn known_edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_ids.iter().flatten().copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Invariants {
    #[serde(default)]
    pub chromatic_number: Option<i64>,
    #[serde(default)]
    pub clique_number: Option<i64>,
    #[serde(default)]
    pub independence_number: Option<i64>,
    /// Stringified node id (or label) to colour index.
    #[serde(default)]
    pub coloring: BTreeMap<String, u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    #[serde(default)]
    pub euler: Option<PathStructure>,
    #[serde(default)]
    pub hamilton: Option<PathStructure>,
    #[serde(default)]
    pub invariants: Option<Invariants>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRef {
    #[serde(default)]
    pub from: Option<NodeId>,
    #[serde(default)]
    pub to: Option<NodeId>,
    #[serde(default)]
    pub id: Option<EdgeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DijkstraReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "path_nodes")]
    pub path_nodes_ids: Vec<NodeId>,
    #[serde(default)]
    pub path_edges: Vec<EdgeRef>,
    #[serde(default)]
    pub total_weight: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalReport {
    /// Presentation rows, kept opaque.
    #[serde(default)]
    pub protocol: Vec<Value>,
    #[serde(default)]
    pub tree_edges: Vec<EdgeRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloydStep {
    #[serde(rename = "M")]
    pub dist: Matrix,
    #[serde(rename = "T")]
    pub pred: Matrix,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloydReport {
    #[serde(default)]
    pub steps: Vec<FloydStep>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub node_ids: Vec<NodeId>,
}

/// Decodes a response body. A body carrying `error` without a `success`
/// flag is a service-side rejection.
pub fn parse_response<T: DeserializeOwned>(body: Value) -> Result<T, ServiceError> {
    if let Value::Object(map) = &body {
        if !map.contains_key("success") {
            if let Some(err) = map.get("error") {
                let msg = match err {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(ServiceError::Rejected(msg));
            }
        }
    }
    serde_json::from_value(body).map_err(|e| ServiceError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_ids_labels_and_mode() {
        let mut g = Graph::new();
        let a = g.add_node(0.0, 0.0);
        let b = g.add_node(10.0, 0.0);
        g.add_edge(a, b, true).unwrap();
        let req = ServiceRequest::from_graph(&g, Some(a), None);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["nodes"][1], json!({ "id": 1, "label": "v1" }));
        assert_eq!(v["edges"][0]["weight"], json!(1.0));
        assert_eq!(v["is_directed"], json!(true));
        assert_eq!(v["start_node"], json!(0));
        assert!(v.get("end_node").is_none());
    }

    #[test]
    fn error_body_is_a_rejection() {
        let r: Result<SolveReport, _> = parse_response(json!({ "error": "boom" }));
        assert_eq!(r, Err(ServiceError::Rejected("boom".into())));
    }

    #[test]
    fn unsuccessful_dijkstra_is_not_a_rejection() {
        let r: DijkstraReport =
            parse_response(json!({ "success": false, "error": "no path" })).unwrap();
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("no path"));
    }

    #[test]
    fn dijkstra_accepts_both_node_list_names() {
        let a: DijkstraReport =
            parse_response(json!({ "success": true, "path_nodes": [0, 2] })).unwrap();
        let b: DijkstraReport =
            parse_response(json!({ "success": true, "path_nodes_ids": [0, 2] })).unwrap();
        assert_eq!(a.path_nodes_ids, b.path_nodes_ids);
    }

    #[test]
    fn analysis_keeps_unknown_fields() {
        let r: AnalysisReport = parse_response(json!({
            "adjacency_matrix": [[0, 1], [1, 0]],
            "is_regular": true,
            "degrees": [{ "label": "v0", "degree": 1 }]
        }))
        .unwrap();
        assert_eq!(r.adjacency_matrix.len(), 2);
        assert_eq!(r.extra["is_regular"], json!(true));
    }

    #[test]
    fn floyd_steps_use_single_letter_keys() {
        let r: FloydReport = parse_response(json!({
            "steps": [{ "M": [[0, "∞"], ["∞", 0]], "T": [["—", "—"], ["—", "—"]] }],
            "labels": ["a", "b"],
            "node_ids": [4, 9]
        }))
        .unwrap();
        assert_eq!(r.steps.len(), 1);
        assert!(r.steps[0].dist[0][1].is_unreachable());
    }

    #[test]
    fn shape_mismatch_is_malformed() {
        let r: Result<FloydReport, _> = parse_response(json!({ "steps": 3 }));
        assert!(matches!(r, Err(ServiceError::Malformed(_))));
    }
}
