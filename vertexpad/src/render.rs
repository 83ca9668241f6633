//! Draw packets projected from a session. Nothing here feeds back into
//! editing state.

use crate::geometry::curve::EdgePath;
use crate::model::{EdgeId, NodeId, Vec2};
use crate::tools::Gesture;
use crate::Session;
use serde::Serialize;
use std::collections::BTreeMap;

pub const HIGHLIGHT_FILL: &str = "#ef4444";
pub const HIGHLIGHT_STROKE: &str = "#b91c1c";
pub const NODE_FILL: &str = "#ffffff";
pub const NODE_STROKE: &str = "#1e293b";
pub const EDGE_STROKE: &str = "#94a3b8";
pub const HIGHLIGHT_EDGE_STROKE: &str = "#ef4444";

/// Palette swatch for a node, looked up by stringified id first, then by label.
pub fn color_of<'a>(
    id: NodeId,
    label: &str,
    coloring: &BTreeMap<String, u32>,
    palette: &'a [String],
) -> Option<&'a str> {
    if palette.is_empty() {
        return None;
    }
    let idx = coloring.get(&id.to_string()).or_else(|| coloring.get(label))?;
    palette.get(*idx as usize % palette.len()).map(String::as_str)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSprite {
    pub id: NodeId,
    pub pos: Vec2,
    pub radius: f32,
    pub label: String,
    pub fill: String,
    pub stroke: String,
    pub text: String,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeightLabel {
    pub text: String,
    pub at: Vec2,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeSprite {
    pub id: EdgeId,
    pub path: EdgePath,
    pub d: String,
    pub directed: bool,
    pub highlighted: bool,
    pub stroke: &'static str,
    pub weight: Option<WeightLabel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PreviewLine {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<NodeSprite>,
    pub edges: Vec<EdgeSprite>,
    pub preview: Option<PreviewLine>,
}

impl Scene {
    pub fn build(s: &Session) -> Scene {
        let g = s.graph();
        let cfg = s.config();
        let hl = s.highlight();
        let empty = BTreeMap::new();
        let coloring = if s.coloring_active() {
            s.results()
                .solve_report()
                .and_then(|r| r.invariants.as_ref())
                .map_or(&empty, |inv| &inv.coloring)
        } else {
            &empty
        };

        let mut edges = Vec::new();
        for (id, e) in g.edges() {
            let path = match g.edge_path(id, cfg) {
                Some(p) => p,
                None => continue,
            };
            let highlighted = hl.has_edge(id);
            let weight = e.has_weight.then(|| WeightLabel {
                text: format!("{}", e.weight),
                at: path.label_anchor(),
            });
            edges.push(EdgeSprite {
                id,
                d: path.svg_d(),
                path,
                directed: e.is_directed,
                highlighted,
                stroke: if highlighted { HIGHLIGHT_EDGE_STROKE } else { EDGE_STROKE },
                weight,
            });
        }

        let nodes = g
            .nodes()
            .map(|(id, n)| {
                let highlighted = hl.has_node(id);
                let swatch = color_of(id, &n.label, coloring, &cfg.palette);
                let (fill, stroke, text) = if highlighted {
                    (HIGHLIGHT_FILL, HIGHLIGHT_STROKE, "#ffffff")
                } else if let Some(sw) = swatch {
                    (sw, NODE_STROKE, "#ffffff")
                } else {
                    (NODE_FILL, NODE_STROKE, NODE_STROKE)
                };
                NodeSprite {
                    id,
                    pos: n.pos(),
                    radius: cfg.node_radius,
                    label: n.label.clone(),
                    fill: fill.to_string(),
                    stroke: stroke.to_string(),
                    text: text.to_string(),
                    highlighted,
                }
            })
            .collect();

        let preview = match s.gesture() {
            Gesture::PendingConnection { anchor, cursor } => g.node(anchor).map(|n| PreviewLine {
                from: n.pos(),
                to: cursor,
            }),
            _ => None,
        };

        Scene { nodes, edges, preview }
    }
}
