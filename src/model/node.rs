//! Node identity in a graph snapshot.

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
///
/// Street-network sources hand out OSM ids, which fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        NodeId(raw)
    }
}

/// An unordered edge, stored with the smaller endpoint first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub lo: NodeId,
    pub hi: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    pub fn is_loop(&self) -> bool {
        self.lo == self.hi
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.lo { Some(self.hi) }
        else if from == self.hi { Some(self.lo) }
        else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_is_unordered() {
        assert_eq!(Edge::new(NodeId(3), NodeId(1)), Edge::new(NodeId(1), NodeId(3)));
        assert_eq!(Edge::new(NodeId(3), NodeId(1)).lo, NodeId(1));
    }

    #[test]
    fn other_node() {
        let e = Edge::new(NodeId(1), NodeId(2));
        assert_eq!(e.other_node(NodeId(1)), Some(NodeId(2)));
        assert_eq!(e.other_node(NodeId(2)), Some(NodeId(1)));
        assert_eq!(e.other_node(NodeId(9)), None);
        assert!(Edge::new(NodeId(4), NodeId(4)).is_loop());
    }
}
