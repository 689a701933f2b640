//! Topology Access
//!
//! The engine treats the network as an opaque, immutable collaborator: it
//! enumerates neighbors, reads degrees, and queries common-neighbor counts,
//! nothing more. Statistical graph generators and structural metrics live
//! upstream; the [`Graph`] here is only the adjacency-list carrier those
//! collaborators hand over.

use crate::error::SimError;

/// Dense, stable node identifier in `0..node_count`.
pub type NodeId = usize;

/// Read-only view of an undirected network.
pub trait Topology {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Neighbors of `id`, in the topology's canonical order.
    fn neighbors(&self, id: NodeId) -> &[NodeId];

    /// Degree of `id`.
    fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Number of nodes adjacent to both `a` and `b`.
    fn common_neighbors(&self, a: NodeId, b: NodeId) -> usize;
}

/// Adjacency-list topology.
///
/// Edges are undirected; adjacency lists are kept sorted and deduplicated so
/// common-neighbor queries are a linear merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Builds a graph with `n` nodes from an undirected edge list.
    ///
    /// Rejects self-loops and endpoints outside `0..n`. Duplicate edges are
    /// collapsed.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, SimError> {
        let mut adjacency = vec![Vec::new(); n];
        for &(from, to) in edges {
            if from == to || from >= n || to >= n {
                return Err(SimError::InvalidEdge { from, to });
            }
            adjacency[from].push(to);
            adjacency[to].push(from);
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Self { adjacency })
    }

    /// A cycle over `n >= 3` nodes (`0-1-2-...-0`).
    pub fn cycle(n: usize) -> Result<Self, SimError> {
        if n < 3 {
            return Err(SimError::InvalidEdge {
                from: n.saturating_sub(1),
                to: 0,
            });
        }
        let edges: Vec<(NodeId, NodeId)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Self::from_edges(n, &edges)
    }

    /// The complete graph over `n` nodes.
    pub fn complete(n: usize) -> Result<Self, SimError> {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                edges.push((a, b));
            }
        }
        Self::from_edges(n, &edges)
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|l| l.len()).sum::<usize>() / 2
    }
}

impl Topology for Graph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id]
    }

    fn common_neighbors(&self, a: NodeId, b: NodeId) -> usize {
        let (mut left, mut right) = (self.adjacency[a].iter(), self.adjacency[b].iter());
        let (mut x, mut y) = (left.next(), right.next());
        let mut count = 0;
        while let (Some(&u), Some(&v)) = (x, y) {
            match u.cmp(&v) {
                std::cmp::Ordering::Less => x = left.next(),
                std::cmp::Ordering::Greater => y = right.next(),
                std::cmp::Ordering::Equal => {
                    count += 1;
                    x = left.next();
                    y = right.next();
                }
            }
        }
        count
    }
}
