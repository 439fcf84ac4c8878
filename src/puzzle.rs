use crate::{
    error::GraphError,
    graph::Graph,
    search::{find_all_disconnecting_subsets, find_disconnecting_subset, CandidatePool, SearchOutcome},
};

/// Water source of the Machinarium pipe puzzle.
pub const MACHINARIUM_ROOT: &str = "a1";
/// Pipe whose flow has to be cut off.
pub const MACHINARIUM_TARGET: &str = "d9";
/// Number of wrenches available.
pub const MACHINARIUM_WRENCHES: usize = 3;

/// Pipe segments a wrench can close, labelled by the valve cell it sits on.
pub const MACHINARIUM_POOL: [((&str, &str), &str); 10] = [
    (("c3", "c1"), "c2"),
    (("b5", "b1"), "b2"),
    (("d4", "c4"), "d2"),
    (("f4", "e3"), "f2"),
    (("b7", "b5"), "b6"),
    (("c7", "c4"), "c6"),
    (("e7", "e4"), "e6"),
    (("h7", "g1"), "h6"),
    (("d7", "d4"), "d6"),
    (("g9", "f4"), "f6"),
];

pub fn machinarium_pool() -> CandidatePool {
    MACHINARIUM_POOL.into_iter().collect()
}

/// A pipe network: water enters at `root`, and `wrenches` lists the segments
/// that can be closed to stop it from reaching `target`.
#[derive(Clone, Debug)]
pub struct PipePuzzle {
    pub graph: Graph,
    pub wrenches: CandidatePool,
    pub root: String,
    pub target: String,
}

impl PipePuzzle {
    pub fn new(
        graph: Graph,
        wrenches: CandidatePool,
        root: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        PipePuzzle {
            graph,
            wrenches,
            root: root.into(),
            target: target.into(),
        }
    }

    /// The Machinarium instance over an already imported pipe network.
    pub fn machinarium(graph: Graph) -> Self {
        Self::new(graph, machinarium_pool(), MACHINARIUM_ROOT, MACHINARIUM_TARGET)
    }

    pub fn find_wrench_edges(&self, wrenches: usize) -> Result<SearchOutcome, GraphError> {
        find_disconnecting_subset(&self.graph, &self.wrenches, &self.root, &self.target, wrenches)
    }

    pub fn all_wrench_edges(&self, wrenches: usize) -> Result<Vec<Vec<String>>, GraphError> {
        find_all_disconnecting_subsets(&self.graph, &self.wrenches, &self.root, &self.target, wrenches)
    }
}
