//! Rebuilds vertex/edge sequences from an all-pairs predecessor matrix.
//!
//! `pred[i][j]` holds the 1-based index of the vertex preceding `j` on the
//! shortest path from `i`. Sentinels (`"—"`, `0`, non-integers) mean no
//! predecessor was recorded; `dist[i][j]` of `"∞"` (or any non-finite value)
//! means `j` is unreachable from `i`.

use crate::model::{EdgeId, NodeId};
use crate::Graph;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Finite numeric value, parsing numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }

    pub fn is_unreachable(&self) -> bool {
        self.as_number().is_none()
    }

    /// 0-based predecessor index, or `None` for a sentinel.
    pub fn predecessor(&self) -> Option<usize> {
        let v = self.as_number()?;
        if v >= 1.0 && v.fract() == 0.0 {
            Some(v as usize - 1)
        } else {
            None
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

pub type Matrix = Vec<Vec<Cell>>;

#[derive(Clone, Debug, PartialEq)]
pub enum Reconstruction {
    /// Vertex indices from `i` to `j` inclusive. Empty when `i == j`.
    Path(Vec<usize>),
    Unreachable,
    /// The predecessor chain broke before reaching the source; holds the
    /// suffix that was resolved.
    Truncated(Vec<usize>),
}

impl Reconstruction {
    pub fn vertices(&self) -> &[usize] {
        match self {
            Reconstruction::Path(v) | Reconstruction::Truncated(v) => v,
            Reconstruction::Unreachable => &[],
        }
    }
}

fn cell(m: &[Vec<Cell>], i: usize, j: usize) -> Option<&Cell> {
    m.get(i).and_then(|row| row.get(j))
}

pub fn reconstruct(dist: &[Vec<Cell>], pred: &[Vec<Cell>], i: usize, j: usize) -> Reconstruction {
    let n = pred.len();
    if i >= n || j >= n {
        log::warn!("reconstruct({}, {}) outside a {}-vertex matrix", i, j, n);
        return Reconstruction::Truncated(Vec::new());
    }
    if i == j {
        return Reconstruction::Path(Vec::new());
    }
    if cell(dist, i, j).map_or(true, Cell::is_unreachable) {
        return Reconstruction::Unreachable;
    }

    let mut rev = Vec::new();
    let mut visited = vec![false; n];
    let mut cur = j;
    loop {
        if cur == i {
            rev.push(i);
            rev.reverse();
            return Reconstruction::Path(rev);
        }
        let k = match cell(pred, i, cur).and_then(Cell::predecessor) {
            Some(k) => k,
            None => break,
        };
        rev.push(cur);
        visited[cur] = true;
        if k >= n || visited[k] {
            break;
        }
        cur = k;
    }
    log::warn!("predecessor chain {} -> {} is inconsistent; truncating", i, j);
    rev.reverse();
    Reconstruction::Truncated(rev)
}

/// Edge ids joining consecutive nodes; pairs without an edge are skipped.
pub fn edges_along(g: &Graph, nodes: &[NodeId]) -> Vec<EdgeId> {
    nodes
        .windows(2)
        .filter_map(|w| {
            let e = g.find_edge(w[0], w[1]);
            if e.is_none() {
                log::debug!("no edge between {} and {}", w[0], w[1]);
            }
            e
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[&str]]) -> Matrix {
        rows.iter()
            .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
            .collect()
    }

    fn finite(n: usize) -> Matrix {
        vec![vec![Cell::Number(1.0); n]; n]
    }

    #[test]
    fn walks_through_intermediate_vertex() {
        // T[0][2] = 2 -> via vertex 1, T[0][1] = 1 -> direct from 0
        let t = m(&[&["—", "1", "2"], &["—", "—", "2"], &["—", "—", "—"]]);
        assert_eq!(reconstruct(&finite(3), &t, 0, 2), Reconstruction::Path(vec![0, 1, 2]));
    }

    #[test]
    fn direct_predecessor_gives_two_vertices() {
        let t = m(&[&["—", "1", "1"], &["—", "—", "2"], &["—", "—", "—"]]);
        assert_eq!(reconstruct(&finite(3), &t, 0, 2), Reconstruction::Path(vec![0, 2]));
        assert_eq!(reconstruct(&finite(3), &t, 1, 2), Reconstruction::Path(vec![1, 2]));
    }

    #[test]
    fn unreachable_and_same_vertex_are_empty() {
        let t = m(&[&["—", "1"], &["—", "—"]]);
        let d = m(&[&["0", "∞"], &["∞", "0"]]);
        assert_eq!(reconstruct(&d, &t, 0, 1), Reconstruction::Unreachable);
        assert_eq!(reconstruct(&d, &t, 1, 1), Reconstruction::Path(vec![]));
    }

    #[test]
    fn missing_predecessor_truncates() {
        // T[0][2] names 1, but T[0][1] is a sentinel
        let t = m(&[&["—", "0", "2"], &["—", "—", "—"], &["—", "—", "—"]]);
        assert_eq!(reconstruct(&finite(3), &t, 0, 2), Reconstruction::Truncated(vec![2]));
    }

    #[test]
    fn predecessor_cycle_terminates() {
        // 2 <- 1 <- 2 <- ...
        let t = m(&[&["—", "3", "2"], &["—", "—", "—"], &["—", "—", "—"]]);
        match reconstruct(&finite(3), &t, 0, 2) {
            Reconstruction::Truncated(v) => assert_eq!(v, vec![1, 2]),
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_predecessor_truncates() {
        let t = m(&[&["—", "9"], &["—", "—"]]);
        assert!(matches!(reconstruct(&finite(2), &t, 0, 1), Reconstruction::Truncated(_)));
    }

    #[test]
    fn numeric_cells_deserialize_untagged() {
        let t: Matrix = serde_json::from_str(r#"[["—", 1], [2, "∞"]]"#).unwrap();
        assert_eq!(t[0][1].predecessor(), Some(0));
        assert_eq!(t[1][0].predecessor(), Some(1));
        assert!(t[1][1].is_unreachable());
        assert_eq!(Cell::from("1.5").predecessor(), None);
    }
}
