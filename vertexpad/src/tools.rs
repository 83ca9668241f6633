use crate::model::{EdgeId, NodeId, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Vertex,
    Edge,
    Arc,
    Label,
    Weight,
    Eraser,
    Loop,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Select,
        Tool::Vertex,
        Tool::Edge,
        Tool::Arc,
        Tool::Label,
        Tool::Weight,
        Tool::Eraser,
        Tool::Loop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Vertex => "vertex",
            Tool::Edge => "edge",
            Tool::Arc => "arc",
            Tool::Label => "label",
            Tool::Weight => "weight",
            Tool::Eraser => "eraser",
            Tool::Loop => "loop",
        }
    }

    /// Directedness this tool forces when selected, if any.
    pub fn forced_directedness(self) -> Option<bool> {
        match self {
            Tool::Edge => Some(false),
            Tool::Arc => Some(true),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The one transient interaction living between pointer-down and pointer-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    Idle,
    DragNode { node: NodeId },
    PendingConnection { anchor: NodeId, cursor: Vec2 },
    CurvaturePull { edge: EdgeId },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}
