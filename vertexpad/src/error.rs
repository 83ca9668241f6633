use crate::model::{EdgeId, NodeId};
use crate::tools::Tool;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
    #[error("edge endpoints cannot be the same node")]
    SameEndpoints,
    #[error("existing edges lock the graph to directed={directed}")]
    DirectednessConflict { directed: bool },
    #[error("label \"{0}\" is already used by another node")]
    DuplicateLabel(String),
    #[error("label cannot be empty")]
    EmptyLabel,
    #[error("label is {0} bytes long, the limit is {max}", max = crate::geometry::limits::MAX_LABEL_LEN)]
    LabelTooLong(usize),
    #[error("weight \"{0}\" must be a finite number greater than 0")]
    InvalidWeight(String),
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
}

impl GraphError {
    /// Stable machine-readable code, shared with the wasm layer.
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::UnknownNode(_) | GraphError::UnknownEdge(_) => "invalid_id",
            GraphError::SameEndpoints => "same_endpoints",
            GraphError::DirectednessConflict { .. } => "directedness_conflict",
            GraphError::DuplicateLabel(_) => "duplicate_label",
            GraphError::EmptyLabel => "empty_label",
            GraphError::LabelTooLong(_) => "label_too_long",
            GraphError::InvalidWeight(_) => "invalid_weight",
            GraphError::NonFinite(_) => "non_finite",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("no edit request is open")]
    NoPendingEdit,
    #[error("tool {0:?} is disabled while the graph holds edges of the other kind")]
    ToolDisabled(Tool),
    #[error(transparent)]
    Rejected(#[from] GraphError),
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::NoPendingEdit => "no_pending_edit",
            EditError::ToolDisabled(_) => "tool_disabled",
            EditError::Rejected(e) => e.code(),
        }
    }
}

/// Failure talking to the remote analysis service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service rejected the request: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(String),
    #[error("config value '{0}' out of range")]
    OutOfRange(&'static str),
    #[error("palette must contain at least one swatch")]
    EmptyPalette,
}
