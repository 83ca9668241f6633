use crate::model::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    #[default]
    None,
    Euler,
    Hamilton,
    Dijkstra,
    Floyd,
    Dfs,
    Bfs,
}

impl FromStr for HighlightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => HighlightKind::None,
            "euler" => HighlightKind::Euler,
            "hamilton" => HighlightKind::Hamilton,
            "dijkstra" => HighlightKind::Dijkstra,
            "floyd" => HighlightKind::Floyd,
            "dfs" => HighlightKind::Dfs,
            "bfs" => HighlightKind::Bfs,
            other => return Err(other.to_string()),
        })
    }
}

/// The visualised subset of nodes and edges. Holds ids only, so node moves
/// show up live in highlighted renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Highlight {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
    kind: HighlightKind,
}

impl Highlight {
    pub fn kind(&self) -> HighlightKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind == HighlightKind::None
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(&id)
    }

    /// Replaces the whole set in one assignment.
    pub fn set<N, E>(&mut self, nodes: N, edges: E, kind: HighlightKind)
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = EdgeId>,
    {
        if kind == HighlightKind::None {
            self.clear();
            return;
        }
        *self = Highlight {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
            kind,
        };
    }

    /// Same kind again clears; a different kind replaces.
    pub fn toggle<N, E>(&mut self, kind: HighlightKind, nodes: N, edges: E)
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = EdgeId>,
    {
        if kind == self.kind {
            self.clear();
        } else {
            self.set(nodes, edges, kind);
        }
    }

    pub fn clear(&mut self) {
        *self = Highlight::default();
    }

    /// Drops ids that no longer exist in the store.
    pub(crate) fn retain(&mut self, node_alive: impl Fn(NodeId) -> bool, edge_alive: impl Fn(EdgeId) -> bool) {
        self.nodes.retain(|id| node_alive(*id));
        self.edges.retain(|id| edge_alive(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_clears() {
        let mut h = Highlight::default();
        h.toggle(HighlightKind::Euler, [1, 2], [7]);
        assert_eq!(h.kind(), HighlightKind::Euler);
        h.toggle(HighlightKind::Euler, [1, 2], [7]);
        assert!(h.is_empty());
        assert_eq!(h.node_ids().count(), 0);
    }

    #[test]
    fn other_kind_replaces_without_union() {
        let mut h = Highlight::default();
        h.toggle(HighlightKind::Euler, [1, 2], [7]);
        h.toggle(HighlightKind::Hamilton, [3], [8, 9]);
        assert_eq!(h.kind(), HighlightKind::Hamilton);
        assert_eq!(h.node_ids().collect::<Vec<_>>(), vec![3]);
        assert_eq!(h.edge_ids().collect::<Vec<_>>(), vec![8, 9]);
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("bfs".parse::<HighlightKind>(), Ok(HighlightKind::Bfs));
        assert!("prim".parse::<HighlightKind>().is_err());
    }
}
