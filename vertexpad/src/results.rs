use crate::error::ServiceError;
use crate::wire::{AnalysisReport, DijkstraReport, FloydReport, ServiceRequest, SolveReport, TraversalReport};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Analysis,
    Solutions,
    Dijkstra,
    Dfs,
    Bfs,
    Floyd,
}

impl FromStr for ResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "analysis" => ResultKind::Analysis,
            "solutions" => ResultKind::Solutions,
            "dijkstra" => ResultKind::Dijkstra,
            "dfs" => ResultKind::Dfs,
            "bfs" => ResultKind::Bfs,
            "floyd" => ResultKind::Floyd,
            other => return Err(other.to_string()),
        })
    }
}

/// Analysis plus the graph snapshot its matrices were computed on.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisEntry {
    pub snapshot: ServiceRequest,
    pub report: AnalysisReport,
}

pub type Slot<T> = Option<Result<T, ServiceError>>;

/// Last response per result kind. Writing one slot never touches another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultBoard {
    pub analysis: Slot<AnalysisEntry>,
    pub solutions: Slot<SolveReport>,
    pub dijkstra: Slot<DijkstraReport>,
    pub dfs: Slot<TraversalReport>,
    pub bfs: Slot<TraversalReport>,
    pub floyd: Slot<FloydReport>,
}

impl ResultBoard {
    pub fn clear(&mut self, kind: ResultKind) {
        match kind {
            ResultKind::Analysis => self.analysis = None,
            ResultKind::Solutions => self.solutions = None,
            ResultKind::Dijkstra => self.dijkstra = None,
            ResultKind::Dfs => self.dfs = None,
            ResultKind::Bfs => self.bfs = None,
            ResultKind::Floyd => self.floyd = None,
        }
    }

    pub fn clear_all(&mut self) {
        *self = ResultBoard::default();
    }

    pub fn is_present(&self, kind: ResultKind) -> bool {
        match kind {
            ResultKind::Analysis => self.analysis.is_some(),
            ResultKind::Solutions => self.solutions.is_some(),
            ResultKind::Dijkstra => self.dijkstra.is_some(),
            ResultKind::Dfs => self.dfs.is_some(),
            ResultKind::Bfs => self.bfs.is_some(),
            ResultKind::Floyd => self.floyd.is_some(),
        }
    }

    /// Error stored for `kind`, if its last response failed.
    pub fn error(&self, kind: ResultKind) -> Option<&ServiceError> {
        fn err<T>(slot: &Slot<T>) -> Option<&ServiceError> {
            slot.as_ref().and_then(|r| r.as_ref().err())
        }
        match kind {
            ResultKind::Analysis => err(&self.analysis),
            ResultKind::Solutions => err(&self.solutions),
            ResultKind::Dijkstra => err(&self.dijkstra),
            ResultKind::Dfs => err(&self.dfs),
            ResultKind::Bfs => err(&self.bfs),
            ResultKind::Floyd => err(&self.floyd),
        }
    }

    /// Successful solve report, if any.
    pub fn solve_report(&self) -> Option<&SolveReport> {
        self.solutions.as_ref().and_then(|r| r.as_ref().ok())
    }

    pub fn floyd_report(&self) -> Option<&FloydReport> {
        self.floyd.as_ref().and_then(|r| r.as_ref().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_one_slot_keeps_others() {
        let mut b = ResultBoard::default();
        b.solutions = Some(Ok(SolveReport::default()));
        b.dfs = Some(Err(ServiceError::Transport("offline".into())));
        b.clear(ResultKind::Dfs);
        assert!(b.is_present(ResultKind::Solutions));
        assert!(!b.is_present(ResultKind::Dfs));
    }

    #[test]
    fn error_only_reports_failed_slots() {
        let mut b = ResultBoard::default();
        b.bfs = Some(Err(ServiceError::Rejected("bad start".into())));
        b.floyd = Some(Ok(FloydReport::default()));
        assert!(b.error(ResultKind::Bfs).is_some());
        assert!(b.error(ResultKind::Floyd).is_none());
        assert!(b.floyd_report().is_some());
    }
}
