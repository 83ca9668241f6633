use crate::geometry::limits;
use crate::model::{Edge, Node};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

const DOC_VERSION: u32 = 1;

#[derive(Serialize)]
struct NodeSer<'a> {
    id: u32,
    x: f32,
    y: f32,
    label: &'a str,
}

#[derive(Serialize)]
struct EdgeSer {
    id: u32,
    from: u32,
    to: u32,
    weight: f64,
    has_weight: bool,
    curvature: f32,
}

#[derive(Serialize)]
struct Doc<'a> {
    version: u32,
    directed: bool,
    nodes: Vec<NodeSer<'a>>,
    edges: Vec<EdgeSer>,
}

#[derive(Deserialize)]
struct NodeDe {
    id: u32,
    x: f32,
    y: f32,
    label: Option<String>,
}

#[derive(Deserialize)]
struct EdgeDe {
    id: u32,
    from: u32,
    to: u32,
    weight: Option<f64>,
    has_weight: Option<bool>,
    curvature: Option<f32>,
    directed: Option<bool>,
}

#[derive(Deserialize)]
struct DocDe {
    version: Option<u32>,
    #[serde(default)]
    directed: bool,
    nodes: Vec<NodeDe>,
    #[serde(default)]
    edges: Vec<EdgeDe>,
}

pub fn to_json_impl(g: &Graph) -> Value {
    let nodes = g
        .nodes()
        .map(|(id, n)| NodeSer {
            id,
            x: n.x,
            y: n.y,
            label: &n.label,
        })
        .collect();
    let edges = g
        .edges()
        .map(|(id, e)| EdgeSer {
            id,
            from: e.from,
            to: e.to,
            weight: e.weight,
            has_weight: e.has_weight,
            curvature: e.curvature,
        })
        .collect();
    serde_json::to_value(Doc {
        version: DOC_VERSION,
        directed: g.directed,
        nodes,
        edges,
    })
    .unwrap_or(Value::Null)
}

/// Lenient load: bad entries are skipped or repaired, never rejected.
/// Returns false only when the value is not a graph document at all.
pub fn from_json_impl(g: &mut Graph, v: Value) -> bool {
    let doc: DocDe = match serde_json::from_value(v) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("graph document did not parse: {}", e);
            return false;
        }
    };
    if doc.version.map_or(false, |ver| ver > DOC_VERSION) {
        log::warn!("graph document version {:?} is newer than {}", doc.version, DOC_VERSION);
    }
    let mut next = Graph::new();
    next.directed = doc.directed;
    let max_node = doc.nodes.iter().map(|n| n.id as usize + 1).max().unwrap_or(0);
    let max_edge = doc.edges.iter().map(|e| e.id as usize + 1).max().unwrap_or(0);
    next.nodes = vec![None; max_node.min(limits::MAX_NODES)];
    next.edges = vec![None; max_edge.min(limits::MAX_EDGES)];

    let mut pending_labels = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for n in doc.nodes {
        let idx = n.id as usize;
        if idx >= next.nodes.len() || next.nodes[idx].is_some() {
            continue;
        }
        if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
            continue;
        }
        let label = n
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty() && l.len() <= limits::MAX_LABEL_LEN && !seen.contains(l));
        match label {
            Some(l) => {
                seen.insert(l.clone());
                next.nodes[idx] = Some(Node { x: n.x, y: n.y, label: l });
            }
            None => {
                // Placeholder until every explicit label is known.
                next.nodes[idx] = Some(Node { x: n.x, y: n.y, label: String::new() });
                pending_labels.push(idx);
            }
        }
    }
    for idx in pending_labels {
        let label = next.next_free_label();
        if let Some(Some(n)) = next.nodes.get_mut(idx) {
            n.label = label;
        }
    }
    for e in doc.edges {
        let idx = e.id as usize;
        if idx >= next.edges.len() || next.edges[idx].is_some() {
            continue;
        }
        if next.node(e.from).is_none() || next.node(e.to).is_none() {
            continue;
        }
        if e.directed.map_or(false, |d| d != doc.directed) {
            log::warn!("dropping edge {} with mismatched directedness", e.id);
            continue;
        }
        let mut edge = Edge::new(e.from, e.to, doc.directed);
        if let Some(w) = e.weight.filter(|w| w.is_finite() && *w > 0.0) {
            edge.weight = w;
            edge.has_weight = e.has_weight.unwrap_or(true);
        }
        if let Some(c) = e.curvature.filter(|c| limits::in_curvature_bounds(*c)) {
            edge.curvature = c;
        }
        next.edges[idx] = Some(edge);
    }
    next.ver = g.ver.wrapping_add(1);
    *g = next;
    true
}

pub fn from_json_impl_strict(g: &mut Graph, v: Value) -> Result<bool, (&'static str, String)> {
    let doc: DocDe = serde_json::from_value(v).map_err(|e| ("json_parse", e.to_string()))?;
    if let Some(ver) = doc.version {
        if ver > DOC_VERSION {
            return Err(("unsupported_version", format!("version {}", ver)));
        }
    }
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(("caps_exceeded", format!("nodes>{}", limits::MAX_NODES)));
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(("caps_exceeded", format!("edges>{}", limits::MAX_EDGES)));
    }
    let mut next = Graph::new();
    next.directed = doc.directed;
    let max_node = doc.nodes.iter().map(|n| n.id as usize + 1).max().unwrap_or(0);
    let max_edge = doc.edges.iter().map(|e| e.id as usize + 1).max().unwrap_or(0);
    if max_node > limits::MAX_NODES || max_edge > limits::MAX_EDGES {
        return Err(("caps_exceeded", "id out of range".into()));
    }
    next.nodes = vec![None; max_node];
    next.edges = vec![None; max_edge];

    let mut seen: HashSet<String> = HashSet::new();
    for n in doc.nodes {
        if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
            return Err(("out_of_bounds", "node coordinate".into()));
        }
        let label = n.label.map(|l| l.trim().to_string()).unwrap_or_default();
        if label.is_empty() {
            return Err(("empty_label", format!("node {}", n.id)));
        }
        if label.len() > limits::MAX_LABEL_LEN {
            return Err(("out_of_bounds", format!("label of node {}", n.id)));
        }
        if !seen.insert(label.clone()) {
            return Err(("duplicate_label", label));
        }
        let slot = &mut next.nodes[n.id as usize];
        if slot.is_some() {
            return Err(("duplicate_id", format!("node {}", n.id)));
        }
        *slot = Some(Node { x: n.x, y: n.y, label });
    }
    for e in doc.edges {
        if next.node(e.from).is_none() || next.node(e.to).is_none() {
            continue;
        }
        if e.directed.map_or(false, |d| d != doc.directed) {
            return Err(("directedness_conflict", format!("edge {}", e.id)));
        }
        let mut edge = Edge::new(e.from, e.to, doc.directed);
        if let Some(w) = e.weight {
            if !w.is_finite() || w <= 0.0 {
                return Err(("invalid_weight", format!("edge {}", e.id)));
            }
            edge.weight = w;
            edge.has_weight = e.has_weight.unwrap_or(true);
        }
        if let Some(c) = e.curvature {
            if !limits::in_curvature_bounds(c) {
                return Err(("out_of_bounds", "curvature".into()));
            }
            edge.curvature = c;
        }
        let slot = &mut next.edges[e.id as usize];
        if slot.is_some() {
            return Err(("duplicate_id", format!("edge {}", e.id)));
        }
        *slot = Some(edge);
    }
    next.ver = g.ver.wrapping_add(1);
    *g = next;
    Ok(true)
}
