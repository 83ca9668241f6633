//! The editor session: one value holding the store, the active tool, the
//! in-flight gesture, the open edit request, highlights, and stored service
//! results. Pointer events go in, `Effect`s come out.

use crate::algorithms::picking::{pick_edge, pick_node};
use crate::algorithms::reconstruct::{self, Reconstruction};
use crate::config::EditorConfig;
use crate::error::{ConfigError, EditError, GraphError, ServiceError};
use crate::geometry::curve;
use crate::geometry::limits;
use crate::geometry::math::{is_left, point_to_segment_distance};
use crate::highlight::{Highlight, HighlightKind};
use crate::model::{EdgeId, NodeId, Vec2};
use crate::results::{AnalysisEntry, ResultBoard, ResultKind};
use crate::tools::{Gesture, Tool};
use crate::wire::{self, ServiceRequest};
use crate::Graph;
use serde::Serialize;
use serde_json::Value;

/// Input the session needs from a collaborator (dialog, inline editor, ...).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditRequest {
    Rename { node: NodeId, current: String },
    Weight { edge: EdgeId, current: Option<f64> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    NodeCreated { node: NodeId },
    NodeRemoved { node: NodeId, edges: Vec<EdgeId> },
    EdgeCreated { edge: EdgeId },
    EdgeRemoved { edge: EdgeId },
    NodeMoved { node: NodeId },
    CurvatureChanged { edge: EdgeId, curvature: f32 },
    EditRequested { request: EditRequest },
    ConnectionStarted { anchor: NodeId },
    ConnectionDiscarded,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    graph: Graph,
    config: EditorConfig,
    tool: Tool,
    gesture: Gesture,
    pending: Option<EditRequest>,
    highlight: Highlight,
    results: ResultBoard,
    coloring: bool,
    pointer: Option<Vec2>,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Session {
            graph: Graph::new(),
            config,
            ..Session::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Swap the config; an invalid one leaves the current config active.
    pub fn set_config(&mut self, config: EditorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn results(&self) -> &ResultBoard {
        &self.results
    }

    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.pending.as_ref()
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    // Tools

    /// Edge and arc are grayed out once edges of the other kind exist.
    pub fn is_tool_enabled(&self, tool: Tool) -> bool {
        match tool.forced_directedness() {
            Some(directed) => !self.graph.has_edges() || self.graph.is_directed() == directed,
            None => true,
        }
    }

    pub fn select_tool(&mut self, tool: Tool) -> Result<(), EditError> {
        if !self.is_tool_enabled(tool) {
            log::debug!("tool {} is disabled", tool);
            return Err(EditError::ToolDisabled(tool));
        }
        if let Some(directed) = tool.forced_directedness() {
            self.graph.set_directed(directed)?;
        }
        self.tool = tool;
        self.gesture = Gesture::Idle;
        Ok(())
    }

    // Pointer

    pub fn pointer_down(&mut self, p: Vec2) -> Vec<Effect> {
        if !self.gesture.is_idle() {
            log::debug!("dropping stale gesture {:?}", self.gesture);
            self.gesture = Gesture::Idle;
        }
        if !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y) {
            return Vec::new();
        }
        self.pointer = Some(p);
        let node_hit = pick_node(&self.graph, p, self.config.hit_radius).map(|(id, _)| id);
        let mut fx = Vec::new();
        match self.tool {
            Tool::Select => {
                if let Some(node) = node_hit {
                    self.gesture = Gesture::DragNode { node };
                } else if let Some(edge) = self.edge_under(p) {
                    self.gesture = Gesture::CurvaturePull { edge };
                }
            }
            Tool::Vertex => {
                if node_hit.is_none() {
                    let node = self.graph.add_node(p.x, p.y);
                    log::debug!("created node {}", node);
                    fx.push(Effect::NodeCreated { node });
                }
            }
            Tool::Edge | Tool::Arc => {
                if let Some(anchor) = node_hit {
                    self.gesture = Gesture::PendingConnection { anchor, cursor: p };
                    fx.push(Effect::ConnectionStarted { anchor });
                }
            }
            Tool::Label => {
                if let Some(node) = node_hit {
                    if let Some(n) = self.graph.node(node) {
                        let current = n.label.clone();
                        fx.push(self.open_edit(EditRequest::Rename { node, current }));
                    }
                }
            }
            Tool::Weight => {
                if let Some(edge) = self.edge_under(p) {
                    if let Some(e) = self.graph.edge(edge) {
                        let current = e.has_weight.then_some(e.weight);
                        fx.push(self.open_edit(EditRequest::Weight { edge, current }));
                    }
                }
            }
            Tool::Eraser => {
                if let Some(node) = node_hit {
                    if let Ok(edges) = self.graph.remove_node(node) {
                        log::debug!("erased node {} and {} edges", node, edges.len());
                        self.forget_removed();
                        fx.push(Effect::NodeRemoved { node, edges });
                    }
                } else if let Some(edge) = self.edge_under(p) {
                    if self.graph.remove_edge(edge).is_ok() {
                        self.forget_removed();
                        fx.push(Effect::EdgeRemoved { edge });
                    }
                }
            }
            Tool::Loop => {
                if let Some(node) = node_hit {
                    match self.graph.add_loop(node, self.graph.is_directed()) {
                        Ok(edge) => fx.push(Effect::EdgeCreated { edge }),
                        Err(e) => log::warn!("loop on {} rejected: {}", node, e),
                    }
                }
            }
        }
        fx
    }

    pub fn pointer_move(&mut self, p: Vec2) -> Vec<Effect> {
        if !p.is_finite() {
            return Vec::new();
        }
        self.pointer = Some(p);
        match self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::DragNode { node } => {
                if self.graph.move_node(node, p.x, p.y) {
                    vec![Effect::NodeMoved { node }]
                } else {
                    Vec::new()
                }
            }
            Gesture::PendingConnection { anchor, .. } => {
                self.gesture = Gesture::PendingConnection { anchor, cursor: p };
                Vec::new()
            }
            Gesture::CurvaturePull { edge } => match self.pulled_curvature(edge, p) {
                Some(curvature) => match self.graph.set_edge_curvature(edge, curvature) {
                    Ok(()) => {
                        let curvature = self.graph.edge(edge).map_or(curvature, |e| e.curvature);
                        vec![Effect::CurvatureChanged { edge, curvature }]
                    }
                    Err(_) => Vec::new(),
                },
                None => Vec::new(),
            },
        }
    }

    /// Ends the gesture. Whatever was in flight is cleared here no matter
    /// where the pointer is released.
    pub fn pointer_up(&mut self, p: Vec2) -> Vec<Effect> {
        let gesture = std::mem::take(&mut self.gesture);
        if p.is_finite() {
            self.pointer = Some(p);
        }
        let anchor = match gesture {
            Gesture::PendingConnection { anchor, .. } => anchor,
            _ => return Vec::new(),
        };
        let target = if p.is_finite() {
            pick_node(&self.graph, p, self.config.connect_radius).map(|(id, _)| id)
        } else {
            None
        };
        let target = match target {
            Some(t) if t != anchor => t,
            _ => return vec![Effect::ConnectionDiscarded],
        };
        let directed = self.tool == Tool::Arc;
        match self.graph.add_edge(anchor, target, directed) {
            Ok(edge) => {
                log::debug!("connected {} -> {} as edge {}", anchor, target, edge);
                vec![Effect::EdgeCreated { edge }]
            }
            Err(e) => {
                log::warn!("connection {} -> {} rejected: {}", anchor, target, e);
                vec![Effect::ConnectionDiscarded]
            }
        }
    }

    fn edge_under(&self, p: Vec2) -> Option<EdgeId> {
        pick_edge(&self.graph, p, self.config.edge_tolerance, &self.config).map(|(id, _)| id)
    }

    /// Curvature that bends the edge so its apex follows the pointer.
    fn pulled_curvature(&self, id: EdgeId, p: Vec2) -> Option<f32> {
        let e = self.graph.edge(id)?;
        let a = self.graph.node(e.from)?.pos();
        if e.is_loop() {
            // Cubic apex sits at 3/4 of the control height.
            let idx = curve::bundle_slot(id, e, self.graph.edges()).index as f32;
            let reach = ((a.y - p.y) / 0.75).max(self.config.loop_base_height * 0.5);
            let (h, _) = curve::loop_extent(0.0, idx, &self.config);
            return Some(reach - h);
        }
        let b = self.graph.node(e.to)?.pos();
        let d = line_distance(p, a, b);
        Some(if is_left(a, b, p) { -2.0 * d } else { 2.0 * d })
    }

    // Edit requests

    fn open_edit(&mut self, request: EditRequest) -> Effect {
        if let Some(prev) = self.pending.replace(request.clone()) {
            log::debug!("replacing unanswered edit request {:?}", prev);
        }
        Effect::EditRequested { request }
    }

    /// Validates and applies the answer. On rejection the request stays
    /// open so it can be asked again.
    pub fn commit_edit(&mut self, input: &str) -> Result<(), EditError> {
        let request = self.pending.clone().ok_or(EditError::NoPendingEdit)?;
        let res = match request {
            EditRequest::Rename { node, .. } => self.graph.rename_node(node, input),
            EditRequest::Weight { edge, .. } => self.graph.set_edge_weight(edge, input).map(|_| ()),
        };
        match res {
            Ok(()) => {
                self.pending = None;
                Ok(())
            }
            Err(e @ (GraphError::UnknownNode(_) | GraphError::UnknownEdge(_))) => {
                self.pending = None;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Direct store access for collaborators that bypass the pointer tools.
    /// Highlight entries and the open request are pruned afterwards if the
    /// closure removed what they point at.
    pub fn with_graph<R>(&mut self, f: impl FnOnce(&mut Graph) -> R) -> R {
        let out = f(&mut self.graph);
        self.forget_removed();
        out
    }

    fn forget_removed(&mut self) {
        let g = &self.graph;
        self.highlight
            .retain(|n| g.node(n).is_some(), |e| g.edge(e).is_some());
        let stale = match &self.pending {
            Some(EditRequest::Rename { node, .. }) => g.node(*node).is_none(),
            Some(EditRequest::Weight { edge, .. }) => g.edge(*edge).is_none(),
            None => false,
        };
        if stale {
            self.pending = None;
        }
    }

    // Canvas

    /// Wipes nodes, edges, results, highlights, and the open request.
    pub fn clear_canvas(&mut self) {
        self.graph.clear();
        self.results.clear_all();
        self.highlight.clear();
        self.pending = None;
        self.gesture = Gesture::Idle;
        self.coloring = false;
    }

    /// Replaces the graph from a saved document. Stored results refer to the
    /// old graph and are dropped.
    pub fn load_graph(&mut self, v: Value, strict: bool) -> Result<bool, (&'static str, String)> {
        let loaded = if strict {
            self.graph.from_json_value_strict(v)?
        } else {
            self.graph.from_json_value(v)
        };
        if loaded {
            self.results.clear_all();
            self.highlight.clear();
            self.pending = None;
            self.gesture = Gesture::Idle;
        }
        Ok(loaded)
    }

    pub fn toggle_coloring(&mut self) -> bool {
        self.coloring = !self.coloring;
        self.coloring
    }

    pub fn coloring_active(&self) -> bool {
        self.coloring
    }

    // Service results

    pub fn service_request(&self, start: Option<NodeId>, end: Option<NodeId>) -> ServiceRequest {
        ServiceRequest::from_graph(&self.graph, start, end)
    }

    /// Clears the highlight and builds the request for an algorithm run.
    pub fn begin_algorithm(
        &mut self,
        kind: ResultKind,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<ServiceRequest, EditError> {
        for id in [start, end].into_iter().flatten() {
            if self.graph.node(id).is_none() {
                return Err(GraphError::UnknownNode(id).into());
            }
        }
        log::debug!("running {:?}", kind);
        self.highlight.clear();
        Ok(self.service_request(start, end))
    }

    pub fn record_failure(&mut self, kind: ResultKind, err: ServiceError) {
        log::warn!("{:?} request failed: {}", kind, err);
        match kind {
            ResultKind::Analysis => self.results.analysis = Some(Err(err)),
            ResultKind::Solutions => self.results.solutions = Some(Err(err)),
            ResultKind::Dijkstra => self.results.dijkstra = Some(Err(err)),
            ResultKind::Dfs => self.results.dfs = Some(Err(err)),
            ResultKind::Bfs => self.results.bfs = Some(Err(err)),
            ResultKind::Floyd => self.results.floyd = Some(Err(err)),
        }
    }

    pub fn apply_analysis(&mut self, snapshot: ServiceRequest, body: Value) -> Result<(), ServiceError> {
        let res = wire::parse_response(body).map(|report| AnalysisEntry { snapshot, report });
        let out = res.as_ref().map(|_| ()).map_err(Clone::clone);
        self.results.analysis = Some(res);
        out
    }

    pub fn apply_solutions(&mut self, body: Value) -> Result<(), ServiceError> {
        let res = wire::parse_response(body);
        let out = res.as_ref().map(|_| ()).map_err(Clone::clone);
        self.results.solutions = Some(res);
        out
    }

    /// A successful run highlights its nodes and edges. `success: false`
    /// is stored as a report, not as a failure.
    pub fn apply_dijkstra(&mut self, body: Value) -> Result<(), ServiceError> {
        let res = wire::parse_response::<wire::DijkstraReport>(body);
        if let Ok(report) = &res {
            if report.success {
                let g = &self.graph;
                let nodes = report.path_nodes_ids.iter().copied().filter(|id| g.node(*id).is_some());
                let edges = report
                    .path_edges
                    .iter()
                    .filter_map(|e| e.id)
                    .filter(|id| g.edge(*id).is_some());
                self.highlight.set(nodes, edges, HighlightKind::Dijkstra);
            }
        }
        let out = res.as_ref().map(|_| ()).map_err(Clone::clone);
        self.results.dijkstra = Some(res);
        out
    }

    pub fn apply_traversal(&mut self, kind: ResultKind, body: Value) -> Result<(), ServiceError> {
        let hl = match kind {
            ResultKind::Dfs => HighlightKind::Dfs,
            ResultKind::Bfs => HighlightKind::Bfs,
            other => {
                return Err(ServiceError::Malformed(format!("{:?} is not a traversal", other)));
            }
        };
        let res = wire::parse_response::<wire::TraversalReport>(body);
        if let Ok(report) = &res {
            let g = &self.graph;
            let edges = report
                .tree_edges
                .iter()
                .filter_map(|e| e.id)
                .filter(|id| g.edge(*id).is_some());
            self.highlight.set(std::iter::empty(), edges, hl);
        }
        let out = res.as_ref().map(|_| ()).map_err(Clone::clone);
        if kind == ResultKind::Dfs {
            self.results.dfs = Some(res);
        } else {
            self.results.bfs = Some(res);
        }
        out
    }

    /// Stored without highlighting; see `probe_floyd`.
    pub fn apply_floyd(&mut self, body: Value) -> Result<(), ServiceError> {
        let res = wire::parse_response(body);
        let out = res.as_ref().map(|_| ()).map_err(Clone::clone);
        self.results.floyd = Some(res);
        out
    }

    pub fn clear_result(&mut self, kind: ResultKind) {
        self.results.clear(kind);
        self.highlight.clear();
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
    }

    /// Toggles the euler or hamilton path from the stored solve report.
    /// Returns whether the highlight changed.
    pub fn toggle_path(&mut self, kind: HighlightKind) -> bool {
        if self.highlight.kind() == kind && kind != HighlightKind::None {
            self.highlight.clear();
            return true;
        }
        let structure = match (kind, self.results.solve_report()) {
            (HighlightKind::Euler, Some(r)) => r.euler.as_ref(),
            (HighlightKind::Hamilton, Some(r)) => r.hamilton.as_ref(),
            _ => None,
        };
        let structure = match structure {
            Some(s) if s.is_found() => s,
            _ => return false,
        };
        let labels = structure.path.clone();
        let edges: Vec<EdgeId> = structure.known_edge_ids().collect();
        self.toggle_label_path(kind, &labels, edges);
        true
    }

    pub fn set_highlight(&mut self, nodes: &[NodeId], edges: &[EdgeId], kind: HighlightKind) {
        self.highlight
            .set(nodes.iter().copied(), edges.iter().copied(), kind);
    }

    pub fn toggle_highlight(&mut self, kind: HighlightKind, nodes: &[NodeId], edges: &[EdgeId]) {
        self.highlight
            .toggle(kind, nodes.iter().copied(), edges.iter().copied());
    }

    /// Toggle for results that name nodes by label. Unknown labels are dropped.
    pub fn toggle_label_path<S, E>(&mut self, kind: HighlightKind, labels: &[S], edges: E)
    where
        S: AsRef<str>,
        E: IntoIterator<Item = EdgeId>,
    {
        let nodes = self.graph.labels_to_ids(labels);
        self.highlight.toggle(kind, nodes, edges);
    }

    pub fn probe_floyd(&mut self, i: usize, j: usize) -> Option<Reconstruction> {
        let last = self.results.floyd_report()?.steps.len().checked_sub(1)?;
        self.probe_floyd_step(last, i, j)
    }

    /// Highlights the edges of the `i -> j` path at `step`. Only edges are
    /// highlighted for this kind.
    pub fn probe_floyd_step(&mut self, step: usize, i: usize, j: usize) -> Option<Reconstruction> {
        let report = self.results.floyd_report()?;
        let s = report.steps.get(step)?;
        let rec = reconstruct::reconstruct(&s.dist, &s.pred, i, j);
        let nodes: Vec<NodeId> = rec
            .vertices()
            .iter()
            .filter_map(|&idx| match report.node_ids.get(idx) {
                Some(id) => Some(*id),
                None => report
                    .labels
                    .get(idx)
                    .and_then(|l| self.graph.node_by_label(l)),
            })
            .collect();
        let edges = reconstruct::edges_along(&self.graph, &nodes);
        if edges.is_empty() {
            self.highlight.clear();
        } else {
            self.highlight.set(std::iter::empty(), edges, HighlightKind::Floyd);
        }
        Some(rec)
    }
}

/// Distance from `p` to the infinite line through `a` and `b`.
fn line_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return point_to_segment_distance(p, a, b);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}
