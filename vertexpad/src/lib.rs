pub mod model;
pub mod config;
pub mod error;
pub mod geometry {
    pub mod curve;
    pub mod flatten;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
    pub mod reconstruct;
}
pub mod highlight;
pub mod render;
pub mod results;
pub mod session;
pub mod tools;
pub mod wire;
mod json;
mod svg;

pub use config::EditorConfig;
pub use error::{ConfigError, EditError, GraphError, ServiceError};
pub use highlight::{Highlight, HighlightKind};
pub use model::{Edge, EdgeId, Node, NodeId, Vec2};
pub use session::{EditRequest, Effect, Session};
pub use tools::{Gesture, Tool};

use geometry::curve::{self, EdgePath};
use geometry::limits;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "node")]
    Node { id: NodeId, dist: f32 },
    #[serde(rename = "edge")]
    Edge { id: EdgeId, dist: f32 },
}

pub struct EdgeArrays {
    pub ids: Vec<u32>,
    pub endpoints: Vec<u32>,
    pub directed: Vec<u8>,
    pub weights: Vec<f32>,
}

/// Canonical store of nodes and edges.
///
/// Ids are slot indices and are never reused, not even after `clear`, so ids
/// held by highlights or stored service results can never alias a newer
/// element.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Option<Node>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>, // id is index
    pub(crate) directed: bool,
    pub(crate) ver: u64,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed: false,
            ver: 1,
        }
    }

    /// Monotonic version; increments on every structural or geometric edit.
    pub fn version(&self) -> u64 {
        self.ver
    }

    fn bump(&mut self) {
        self.ver = self.ver.wrapping_add(1);
    }

    // Nodes
    /// Coordinates are clamped to `limits`, so every stored node survives a reload.
    pub fn add_node(&mut self, x: f32, y: f32) -> NodeId {
        let label = self.next_free_label();
        let (x, y) = (limits::clamp_coord(x), limits::clamp_coord(y));
        self.insert_node(Node { x, y, label })
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Some(node));
        self.bump();
        id
    }

    /// Lowest `v{n}` not currently used as a label.
    pub fn next_free_label(&self) -> String {
        let used: HashSet<&str> = self.nodes().map(|(_, n)| n.label.as_str()).collect();
        let mut i = 0usize;
        loop {
            let candidate = format!("v{}", i);
            if !used.contains(candidate.as_str()) {
                return candidate;
            }
            i += 1;
        }
    }

    pub fn move_node(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match self.nodes.get_mut(id as usize) {
            Some(Some(n)) => {
                n.x = limits::clamp_coord(x);
                n.y = limits::clamp_coord(y);
            }
            _ => return false,
        }
        self.bump();
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize).and_then(|n| n.as_ref())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (i as NodeId, n)))
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.iter().filter(|n| n.is_some()).count() as u32
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes().find(|(_, n)| n.label == label).map(|(id, _)| id)
    }

    /// Translate a label sequence to ids. Labels with no live node are dropped.
    pub fn labels_to_ids<S: AsRef<str>>(&self, labels: &[S]) -> Vec<NodeId> {
        labels
            .iter()
            .filter_map(|l| {
                let id = self.node_by_label(l.as_ref());
                if id.is_none() {
                    log::debug!("dropping unknown label {:?}", l.as_ref());
                }
                id
            })
            .collect()
    }

    /// Removes the node and every incident edge. Returns the removed edge ids.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<EdgeId>, GraphError> {
        if self.node(id).is_none() {
            return Err(GraphError::UnknownNode(id));
        }
        let incident: Vec<EdgeId> = self
            .edges()
            .filter(|(_, e)| e.touches(id))
            .map(|(eid, _)| eid)
            .collect();
        for eid in &incident {
            if let Some(slot) = self.edges.get_mut(*eid as usize) {
                *slot = None;
            }
        }
        if let Some(slot) = self.nodes.get_mut(id as usize) {
            *slot = None;
        }
        self.bump();
        Ok(incident)
    }

    pub fn rename_node(&mut self, id: NodeId, label: &str) -> Result<(), GraphError> {
        let current = match self.node(id) {
            Some(n) => n.label.clone(),
            None => return Err(GraphError::UnknownNode(id)),
        };
        let label = label.trim();
        if label.is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        if label.len() > limits::MAX_LABEL_LEN {
            return Err(GraphError::LabelTooLong(label.len()));
        }
        if label == current {
            return Ok(());
        }
        if self.nodes().any(|(other, n)| other != id && n.label == label) {
            return Err(GraphError::DuplicateLabel(label.to_string()));
        }
        if let Some(Some(n)) = self.nodes.get_mut(id as usize) {
            n.label = label.to_string();
        }
        self.bump();
        Ok(())
    }

    // Edges
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(|e| e.as_ref())
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i as EdgeId, e)))
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.iter().filter(|e| e.is_some()).count() as u32
    }

    pub fn has_edges(&self) -> bool {
        self.edges.iter().any(|e| e.is_some())
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Switch the directedness mode. Locked while any edge exists with the
    /// other directedness.
    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        if directed == self.directed {
            return Ok(());
        }
        if self.has_edges() {
            return Err(GraphError::DirectednessConflict {
                directed: self.directed,
            });
        }
        self.directed = directed;
        Ok(())
    }

    fn check_directedness(&mut self, directed: bool) -> Result<(), GraphError> {
        if self.has_edges() {
            if self.directed != directed {
                return Err(GraphError::DirectednessConflict {
                    directed: self.directed,
                });
            }
        } else {
            self.directed = directed;
        }
        Ok(())
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, directed: bool) -> Result<EdgeId, GraphError> {
        for n in [from, to] {
            if self.node(n).is_none() {
                return Err(GraphError::UnknownNode(n));
            }
        }
        if from == to {
            return Err(GraphError::SameEndpoints);
        }
        self.check_directedness(directed)?;
        Ok(self.insert_edge(Edge::new(from, to, directed)))
    }

    pub fn add_loop(&mut self, node: NodeId, directed: bool) -> Result<EdgeId, GraphError> {
        if self.node(node).is_none() {
            return Err(GraphError::UnknownNode(node));
        }
        self.check_directedness(directed)?;
        Ok(self.insert_edge(Edge::new(node, node, directed)))
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) -> EdgeId {
        let id = self.edges.len() as EdgeId;
        self.edges.push(Some(edge));
        self.bump();
        id
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        match self.edges.get_mut(id as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                self.bump();
                Ok(())
            }
            _ => Err(GraphError::UnknownEdge(id)),
        }
    }

    /// Parses `input` as the new weight. Only finite values > 0 are accepted;
    /// on rejection the previous weight stays.
    pub fn set_edge_weight(&mut self, id: EdgeId, input: &str) -> Result<f64, GraphError> {
        if self.edge(id).is_none() {
            return Err(GraphError::UnknownEdge(id));
        }
        let weight = match input.trim().parse::<f64>() {
            Ok(w) if w.is_finite() && w > 0.0 => w,
            _ => return Err(GraphError::InvalidWeight(input.to_string())),
        };
        if let Some(Some(e)) = self.edges.get_mut(id as usize) {
            e.weight = weight;
            e.has_weight = true;
        }
        self.bump();
        Ok(weight)
    }

    pub fn set_edge_curvature(&mut self, id: EdgeId, value: f32) -> Result<(), GraphError> {
        if !value.is_finite() {
            return Err(GraphError::NonFinite("curvature"));
        }
        let value = value.clamp(-limits::CURVATURE_MAX, limits::CURVATURE_MAX);
        match self.edges.get_mut(id as usize) {
            Some(Some(e)) => e.curvature = value,
            _ => return Err(GraphError::UnknownEdge(id)),
        }
        self.bump();
        Ok(())
    }

    /// First edge running `a -> b`; in undirected mode `b -> a` also matches.
    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edges()
            .find(|(_, e)| e.from == a && e.to == b)
            .or_else(|| {
                if self.directed {
                    None
                } else {
                    self.edges().find(|(_, e)| e.from == b && e.to == a)
                }
            })
            .map(|(id, _)| id)
    }

    /// Rendered path of an edge, or `None` when the edge or an endpoint is gone.
    pub fn edge_path(&self, id: EdgeId, cfg: &EditorConfig) -> Option<EdgePath> {
        let e = self.edge(id)?;
        let a = self.node(e.from)?.pos();
        if e.is_loop() {
            return Some(curve::loop_path(a, id, e, self.edges(), cfg));
        }
        let b = self.node(e.to)?.pos();
        Some(curve::edge_path(a, b, id, e, self.edges(), cfg))
    }

    /// Pinned or fanned offset of the edge. The drawn control offset is mirrored
    /// for auto-fanned edges running against their bundle, see `edge_path`.
    pub fn effective_curvature(&self, id: EdgeId, cfg: &EditorConfig) -> Option<f32> {
        let e = self.edge(id)?;
        Some(curve::effective_curvature(id, e, self.edges(), cfg.fan_step))
    }

    pub fn get_node_arrays(&self) -> (Vec<u32>, Vec<f32>) {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for (id, n) in self.nodes() {
            ids.push(id);
            pos.push(n.x);
            pos.push(n.y);
        }
        (ids, pos)
    }

    pub fn get_edge_arrays(&self) -> EdgeArrays {
        let mut ids = Vec::new();
        let mut ep = Vec::new();
        let mut directed = Vec::new();
        let mut weights = Vec::new();
        for (id, e) in self.edges() {
            ids.push(id);
            ep.push(e.from);
            ep.push(e.to);
            directed.push(e.is_directed as u8);
            weights.push(if e.has_weight { e.weight as f32 } else { 0.0 });
        }
        EdgeArrays {
            ids,
            endpoints: ep,
            directed,
            weights,
        }
    }

    // Picking
    pub fn pick(&self, p: Vec2, cfg: &EditorConfig) -> Option<Pick> {
        algorithms::picking::pick_impl(self, p, cfg)
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }
    pub fn from_json_value_strict(
        &mut self,
        v: serde_json::Value,
    ) -> Result<bool, (&'static str, String)> {
        json::from_json_impl_strict(self, v)
    }

    pub fn to_svg_paths(&self, cfg: &EditorConfig) -> Vec<String> {
        svg::to_svg_paths_impl(self, cfg)
    }

    // Clear
    pub fn clear(&mut self) {
        // Keep the slots so ids stay unique across clears.
        for n in self.nodes.iter_mut() {
            *n = None;
        }
        for e in self.edges.iter_mut() {
            *e = None;
        }
        self.bump();
    }
}

pub use svg::to_svg_document;
