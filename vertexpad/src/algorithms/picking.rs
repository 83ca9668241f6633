use crate::config::EditorConfig;
use crate::model::{EdgeId, NodeId, Vec2};
use crate::{Graph, Pick};

/// Nearest node whose centre lies strictly within `radius` of `p`.
pub fn pick_node(g: &Graph, p: Vec2, radius: f32) -> Option<(NodeId, f32)> {
    let r2 = radius * radius;
    let mut best: Option<(NodeId, f32)> = None;
    for (id, n) in g.nodes() {
        let dx = n.x - p.x; let dy = n.y - p.y;
        let d2 = dx*dx + dy*dy;
        if d2 < r2 && best.map_or(true, |(_, bd2)| d2 < bd2) {
            best = Some((id, d2));
        }
    }
    best.map(|(id, d2)| (id, d2.sqrt()))
}

/// Nearest edge whose rendered curve passes within `tol` of `p`.
pub fn pick_edge(g: &Graph, p: Vec2, tol: f32, cfg: &EditorConfig) -> Option<(EdgeId, f32)> {
    let tol2 = tol * tol;
    let mut best: Option<(EdgeId, f32)> = None;
    for (id, _) in g.edges() {
        let path = match g.edge_path(id, cfg) {
            Some(path) => path,
            None => continue,
        };
        let d2 = path.distance_sq(p, cfg.flatten_tolerance);
        if d2 <= tol2 && best.map_or(true, |(_, bd2)| d2 < bd2) {
            best = Some((id, d2));
        }
    }
    best.map(|(id, d2)| (id, d2.sqrt()))
}

pub fn pick_impl(g: &Graph, p: Vec2, cfg: &EditorConfig) -> Option<Pick> {
    // Nodes first
    if let Some((id, dist)) = pick_node(g, p, cfg.hit_radius) {
        return Some(Pick::Node { id, dist });
    }
    pick_edge(g, p, cfg.edge_tolerance, cfg).map(|(id, dist)| Pick::Edge { id, dist })
}
