use serde::{Deserialize, Serialize};

pub type NodeId = u32;
pub type EdgeId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: 0.5 * (self.x + other.x),
            y: 0.5 * (self.y + other.y),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A vertex on the canvas. Labels are unique across the whole graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub label: String,
}

impl Node {
    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }
}

/// An edge, arc, or self-loop (`from == to`).
///
/// `curvature == 0.0` means the bend is derived from the parallel bundle;
/// any other value is a user-pinned offset measured along the normal of
/// the `from -> to` vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub has_weight: bool,
    pub curvature: f32,
    pub is_directed: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, is_directed: bool) -> Self {
        Edge {
            from,
            to,
            weight: 1.0,
            has_weight: false,
            curvature: 0.0,
            is_directed,
        }
    }

    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// True when both edges join the same unordered pair of nodes.
    pub fn same_bundle(&self, other: &Edge) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}
