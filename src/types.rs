use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

pub type NodeId = u32;

/// An unordered pair of node names.
#[derive(Clone, Debug, Default)]
pub struct Edge(pub String, pub String);

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Edge(a.into(), b.into())
    }

    /// Endpoints in a canonical order, so that `(a, b)` and `(b, a)` agree.
    fn sorted(&self) -> (&str, &str) {
        if self.0 <= self.1 {
            (self.0.as_str(), self.1.as_str())
        } else {
            (self.1.as_str(), self.0.as_str())
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Edge {
    fn from((a, b): (A, B)) -> Self {
        Edge::new(a, b)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}--{}", self.0, self.1)
    }
}

#[cfg(test)]
mod test_edge {
    use fxhash::FxHashSet;

    use super::*;

    #[test]
    fn orientation_does_not_matter() {
        assert_eq!(Edge::new("a1", "b2"), Edge::new("b2", "a1"));
        assert_ne!(Edge::new("a1", "b2"), Edge::new("a1", "b3"));
    }

    #[test]
    fn reversed_edge_hashes_to_same_slot() {
        let mut set = FxHashSet::default();
        set.insert(Edge::new("c3", "c1"));
        assert!(set.contains(&Edge::new("c1", "c3")));
        assert!(!set.insert(Edge::from(("c1", "c3"))));
        assert_eq!(set.len(), 1);
    }
}
