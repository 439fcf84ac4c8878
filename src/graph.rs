use std::fmt::Display;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use petgraph::{
    graphmap::UnGraphMap,
    visit::{Bfs, EdgeFiltered},
};

use crate::{
    error::GraphError,
    types::{Edge, NodeId},
};

/// Undirected graph over named nodes.
///
/// Names are interned to stable integer ids; adjacency lives in a `UnGraphMap`
/// keyed by those ids, so the symmetry of neighbor sets is structural. Node
/// order is the order of insertion.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    names: Vec<String>,
    index: FxHashMap<String, NodeId>,
    adjacency: UnGraphMap<NodeId, ()>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes_and_edges<S, E>(nodes: &[S], edges: E) -> Result<Self, GraphError>
    where
        S: AsRef<str>,
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        let mut graph = Graph::new();
        graph.add_nodes(nodes);
        graph.add_edges(edges)?;
        Ok(graph)
    }

    /// Adds every name not already present. Existing nodes keep their neighbors.
    pub fn add_nodes<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.add_node(name.as_ref());
        }
    }

    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len() as NodeId;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.add_node(id);
        id
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let (a, b) = (self.resolve(a)?, self.resolve(b)?);
        self.adjacency.add_edge(a, b, ());
        Ok(())
    }

    /// Applies `add_edge` in order. Edges added before a failing pair stay added.
    pub fn add_edges<E>(&mut self, edges: E) -> Result<(), GraphError>
    where
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        for edge in edges {
            let edge = edge.into();
            self.add_edge(&edge.0, &edge.1)?;
        }
        Ok(())
    }

    /// Removing an edge that does not exist is a no-op.
    pub fn delete_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let (a, b) = (self.resolve(a)?, self.resolve(b)?);
        self.adjacency.remove_edge(a, b);
        Ok(())
    }

    pub fn delete_edges<E>(&mut self, edges: E) -> Result<(), GraphError>
    where
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        for edge in edges {
            let edge = edge.into();
            self.delete_edge(&edge.0, &edge.1)?;
        }
        Ok(())
    }

    pub fn path_exists(&self, root: &str, target: &str) -> Result<bool, GraphError> {
        self.path_exists_without(root, target, std::iter::empty::<&Edge>())
    }

    /// Reachability from `root` to `target` with `excluded` edges treated as absent.
    ///
    /// A node always reaches itself. The graph itself is not modified.
    pub fn path_exists_without<'a, I>(
        &self,
        root: &str,
        target: &str,
        excluded: I,
    ) -> Result<bool, GraphError>
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let root = self.resolve(root)?;
        let target = self.resolve(target)?;
        let excluded = excluded
            .into_iter()
            .map(|edge| self.resolve_edge(edge))
            .collect::<Result<FxHashSet<_>, _>>()?;

        Ok(self.reachable(root, target, &excluded))
    }

    fn reachable(&self, root: NodeId, target: NodeId, excluded: &FxHashSet<(NodeId, NodeId)>) -> bool {
        let check_graph = EdgeFiltered::from_fn(&self.adjacency, |(v1, v2, _)| {
            !excluded.contains(&ordered(v1, v2))
        });

        let mut bfs = Bfs::new(&check_graph, root);
        while let Some(v) = bfs.next(&check_graph) {
            if v == target {
                return true;
            }
        }
        false
    }

    fn resolve(&self, name: &str) -> Result<NodeId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }

    fn resolve_edge(&self, edge: &Edge) -> Result<(NodeId, NodeId), GraphError> {
        Ok(ordered(self.resolve(&edge.0)?, self.resolve(&edge.1)?))
    }

    fn name(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.adjacency.contains_edge(a, b),
            _ => false,
        }
    }

    /// Checks that every endpoint of `edge` is a node of this graph.
    pub fn check_edge(&self, edge: &Edge) -> Result<(), GraphError> {
        self.resolve_edge(edge).map(|_| ())
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }

    /// Neighbor names of `name`, sorted.
    pub fn neighbors(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let id = self.resolve(name)?;
        Ok(self
            .adjacency
            .neighbors(id)
            .map(|n| self.name(n))
            .sorted()
            .collect_vec())
    }
}

fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, name) in self.names.iter().enumerate() {
            let neighbors = self
                .adjacency
                .neighbors(id as NodeId)
                .map(|n| self.name(n))
                .sorted()
                .join(", ");
            writeln!(f, "node: {} , neighbors: {{{}}}", name, neighbors)?;
        }
        Ok(())
    }
}
