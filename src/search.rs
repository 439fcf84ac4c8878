use std::fmt::Display;

use itertools::Itertools;

use crate::{error::GraphError, graph::Graph, types::Edge, util::n_choose_k};

/// Wrenchable edges with their display labels, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidatePool {
    entries: Vec<(Edge, String)>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserting an edge that is already present replaces its label in place.
    pub fn insert(&mut self, edge: impl Into<Edge>, label: impl Into<String>) {
        let edge = edge.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(e, _)| e == &edge) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((edge, label)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Edge, &str)> {
        self.entries.iter().map(|(e, l)| (e, l.as_str()))
    }

    pub fn label(&self, edge: &Edge) -> Option<&str> {
        self.iter().find(|(e, _)| *e == edge).map(|(_, l)| l)
    }
}

impl<E: Into<Edge>, L: Into<String>> FromIterator<(E, L)> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = (E, L)>>(iter: T) -> Self {
        let mut pool = CandidatePool::new();
        for (edge, label) in iter {
            pool.insert(edge, label);
        }
        pool
    }
}

impl Display for CandidatePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter().map(|(e, l)| format!("{}: {}", e, l)).join(", ")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { labels: Vec<String>, evaluated: usize },
    NotFound { evaluated: usize },
}

impl SearchOutcome {
    pub fn success(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn labels(&self) -> Option<&[String]> {
        match self {
            SearchOutcome::Found { labels, .. } => Some(labels),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    /// Number of combinations tested before the search stopped.
    pub fn evaluated(&self) -> usize {
        match self {
            SearchOutcome::Found { evaluated, .. } | SearchOutcome::NotFound { evaluated } => {
                *evaluated
            }
        }
    }
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOutcome::Found { labels, .. } => write!(f, "[{}]", labels.iter().join(", ")),
            SearchOutcome::NotFound { .. } => write!(f, "no solution"),
        }
    }
}

/// Finds the first `k`-combination of `candidates` whose removal leaves no path
/// from `root` to `target`.
///
/// Combinations are visited in lexicographic order of pool positions, so with
/// several solutions the one built from the earliest inserted edges wins. The
/// labels are returned in pool order. `graph` is never modified.
pub fn find_disconnecting_subset(
    graph: &Graph,
    candidates: &CandidatePool,
    root: &str,
    target: &str,
    k: usize,
) -> Result<SearchOutcome, GraphError> {
    check_endpoints(graph, candidates, root, target)?;

    log::info!(
        "Searching {} combinations of {} out of {} wrenchable edges between {} and {} ...",
        n_choose_k(candidates.len(), k),
        k,
        candidates.len(),
        root,
        target
    );

    let mut evaluated = 0;
    for combination in candidates.entries.iter().combinations(k) {
        evaluated += 1;
        if !graph.path_exists_without(root, target, combination.iter().map(|(e, _)| e))? {
            let labels = combination.iter().map(|(_, l)| l.clone()).collect_vec();
            log::info!(
                "✔️ Cutting [{}] disconnects {} from {} ({} combinations tried)",
                labels.iter().join(", "),
                root,
                target,
                evaluated
            );
            return Ok(SearchOutcome::Found { labels, evaluated });
        }
        log::trace!(
            "   [{}] leaves a path open",
            combination.iter().map(|(e, _)| e).join(", ")
        );
    }

    log::warn!(
        "❌ No {} wrenchable edges disconnect {} from {} ({} combinations tried)",
        k,
        root,
        target,
        evaluated
    );
    Ok(SearchOutcome::NotFound { evaluated })
}

/// Every disconnecting `k`-combination, in the order `find_disconnecting_subset` visits them.
pub fn find_all_disconnecting_subsets(
    graph: &Graph,
    candidates: &CandidatePool,
    root: &str,
    target: &str,
    k: usize,
) -> Result<Vec<Vec<String>>, GraphError> {
    check_endpoints(graph, candidates, root, target)?;

    let mut solutions = vec![];
    for combination in candidates.entries.iter().combinations(k) {
        if !graph.path_exists_without(root, target, combination.iter().map(|(e, _)| e))? {
            solutions.push(combination.iter().map(|(_, l)| l.clone()).collect_vec());
        }
    }
    log::info!(
        "Found {} disconnecting combinations of {} wrenchable edges",
        solutions.len(),
        k
    );
    Ok(solutions)
}

fn check_endpoints(
    graph: &Graph,
    candidates: &CandidatePool,
    root: &str,
    target: &str,
) -> Result<(), GraphError> {
    for name in [root, target] {
        if !graph.contains_node(name) {
            return Err(GraphError::UnknownNode(name.to_string()));
        }
    }
    for (edge, _) in candidates.iter() {
        graph.check_edge(edge)?;
    }
    Ok(())
}
