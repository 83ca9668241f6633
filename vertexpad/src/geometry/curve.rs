//! Edge and self-loop curve construction.
//!
//! Every non-loop edge renders as a quadratic through `control_point`; when
//! the resolved curvature is exactly zero the path collapses to a straight
//! line so hit-testing works on a plain segment.

use crate::config::EditorConfig;
use crate::geometry::flatten::{flatten_cubic, flatten_quad};
use crate::geometry::math::{cubic_point, polyline_distance_sq, quad_point, seg_distance_sq};
use crate::geometry::tolerance::{norm2, MIN_FLATTEN_TOL};
use crate::model::{Edge, EdgeId, Vec2};
use serde::Serialize;

/// Position of an edge inside its bundle (edges joining the same unordered pair).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BundleSlot {
    pub index: usize,
    pub size: usize,
    /// The edge runs opposite to the first edge discovered in the bundle.
    pub reversed: bool,
}

pub fn bundle_slot<'a, I>(id: EdgeId, edge: &Edge, edges: I) -> BundleSlot
where
    I: IntoIterator<Item = (EdgeId, &'a Edge)>,
{
    let mut index = None;
    let mut size = 0usize;
    let mut canonical_from = None;
    for (eid, e) in edges {
        if !e.same_bundle(edge) {
            continue;
        }
        if canonical_from.is_none() {
            canonical_from = Some(e.from);
        }
        if eid == id {
            index = Some(size);
        }
        size += 1;
    }
    BundleSlot {
        index: index.unwrap_or(0),
        size: size.max(1),
        reversed: !edge.is_loop() && canonical_from.map_or(false, |f| f != edge.from),
    }
}

pub fn control_point(from: Vec2, to: Vec2, curvature: f32) -> Vec2 {
    let mid = from.midpoint(to);
    if curvature == 0.0 {
        return mid;
    }
    let ((ux, uy), _) = norm2(to.x - from.x, to.y - from.y);
    Vec2 {
        x: mid.x + curvature * uy,
        y: mid.y - curvature * ux,
    }
}

/// Pinned curvature wins; otherwise the bundle fans out symmetrically around
/// the straight line, `step * (index - (size - 1) / 2)`.
pub fn effective_curvature<'a, I>(id: EdgeId, edge: &Edge, edges: I, step: f32) -> f32
where
    I: IntoIterator<Item = (EdgeId, &'a Edge)>,
{
    if edge.curvature != 0.0 {
        return edge.curvature;
    }
    fan_offset(bundle_slot(id, edge, edges), step)
}

pub fn fan_offset(slot: BundleSlot, step: f32) -> f32 {
    if slot.size <= 1 {
        return 0.0;
    }
    step * (slot.index as f32 - (slot.size as f32 - 1.0) / 2.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EdgePath {
    Line { a: Vec2, b: Vec2 },
    Quad { a: Vec2, c: Vec2, b: Vec2 },
    Cubic { a: Vec2, c1: Vec2, c2: Vec2, b: Vec2 },
}

impl EdgePath {
    pub fn svg_d(&self) -> String {
        match self {
            EdgePath::Line { a, b } => format!("M {} {} L {} {}", a.x, a.y, b.x, b.y),
            EdgePath::Quad { a, c, b } => {
                format!("M {} {} Q {} {}, {} {}", a.x, a.y, c.x, c.y, b.x, b.y)
            }
            EdgePath::Cubic { a, c1, c2, b } => format!(
                "M {} {} C {} {}, {} {}, {} {}",
                a.x, a.y, c1.x, c1.y, c2.x, c2.y, b.x, b.y
            ),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        match *self {
            EdgePath::Line { a, b } => Vec2 {
                x: a.x + (b.x - a.x) * t,
                y: a.y + (b.y - a.y) * t,
            },
            EdgePath::Quad { a, c, b } => quad_point(t, a, c, b),
            EdgePath::Cubic { a, c1, c2, b } => {
                let (x, y) = cubic_point(t, a.x, a.y, c1.x, c1.y, c2.x, c2.y, b.x, b.y);
                Vec2 { x, y }
            }
        }
    }

    /// Where a weight label sits: the parametric midpoint of the curve.
    pub fn label_anchor(&self) -> Vec2 {
        self.point_at(0.5)
    }

    pub fn flatten(&self, tol: f32) -> Vec<Vec2> {
        let tol = tol.max(MIN_FLATTEN_TOL);
        match *self {
            EdgePath::Line { a, b } => vec![a, b],
            EdgePath::Quad { a, c, b } => {
                let mut pts = vec![a];
                flatten_quad(&mut pts, a.x, a.y, c.x, c.y, b.x, b.y, tol, 0);
                pts
            }
            EdgePath::Cubic { a, c1, c2, b } => {
                let mut pts = vec![a];
                flatten_cubic(&mut pts, a.x, a.y, c1.x, c1.y, c2.x, c2.y, b.x, b.y, tol, 0);
                pts
            }
        }
    }

    pub fn distance_sq(&self, p: Vec2, tol: f32) -> f32 {
        match *self {
            EdgePath::Line { a, b } => seg_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y).0,
            _ => polyline_distance_sq(p, &self.flatten(tol)),
        }
    }
}

/// Path for an edge between two distinct positions.
///
/// Auto-fanned siblings that run against the bundle's first edge get their
/// offset mirrored, so anti-parallel arcs bow to opposite sides instead of
/// sharing a control point.
pub fn edge_path<'a, I>(from: Vec2, to: Vec2, id: EdgeId, edge: &Edge, edges: I, cfg: &EditorConfig) -> EdgePath
where
    I: IntoIterator<Item = (EdgeId, &'a Edge)>,
{
    let curvature = if edge.curvature != 0.0 {
        edge.curvature
    } else {
        let slot = bundle_slot(id, edge, edges);
        let offset = fan_offset(slot, cfg.fan_step);
        if slot.reversed { -offset } else { offset }
    };
    if curvature == 0.0 {
        return EdgePath::Line { a: from, b: to };
    }
    EdgePath::Quad {
        a: from,
        c: control_point(from, to, curvature),
        b: to,
    }
}

/// Vertical teardrop above the node. Each further loop on the same node is
/// taller and wider so the loops nest instead of overlapping.
pub fn loop_path<'a, I>(node: Vec2, id: EdgeId, edge: &Edge, edges: I, cfg: &EditorConfig) -> EdgePath
where
    I: IntoIterator<Item = (EdgeId, &'a Edge)>,
{
    let idx = bundle_slot(id, edge, edges).index as f32;
    let (h, w) = loop_extent(edge.curvature, idx, cfg);
    EdgePath::Cubic {
        a: node,
        c1: Vec2::new(node.x - w, node.y - h),
        c2: Vec2::new(node.x + w, node.y - h),
        b: node,
    }
}

pub fn loop_extent(curvature: f32, idx: f32, cfg: &EditorConfig) -> (f32, f32) {
    let h = cfg.loop_base_height + curvature + idx * cfg.loop_height_step;
    let w = cfg.loop_base_width + idx * cfg.loop_width_step;
    (h, w)
}
