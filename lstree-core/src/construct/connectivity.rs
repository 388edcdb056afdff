//! Connectivity re-evaluation of live components under vertex deletion.
//!
//! Each live component is checked independently: its surviving vertices are
//! grouped with a union-find over the induced subgraph, and the outcome says
//! whether the component kept its shape, vanished, or split.

use super::graph::NeighbourGraph;
use crate::tree::NodeId;

/// Union-find with path compression and union by rank.
#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    pub(super) fn union(&mut self, left: usize, right: usize) {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
    }
}

/// Vertices still present in the component recorded by `node`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LiveComponent {
    pub(crate) node: NodeId,
    pub(crate) vertices: Vec<usize>,
}

/// What happened to one live component at a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No vertex was removed.
    Unchanged,
    /// Vertices were removed but the rest stays connected.
    Shrunk(Vec<usize>),
    /// Every vertex was removed.
    Vanished,
    /// The surviving vertices form two or more components, ordered by their
    /// smallest member.
    Split(Vec<Vec<usize>>),
}

/// Splits `vertices` (sorted ascending) into the connected components of the
/// subgraph they induce. Components come back sorted and ordered by their
/// smallest member.
pub(crate) fn partition(graph: &NeighbourGraph, vertices: &[usize]) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(vertices.len());
    for (local, &vertex) in vertices.iter().enumerate() {
        for &neighbour in graph.neighbours(vertex) {
            if neighbour <= vertex {
                continue;
            }
            if let Ok(other) = vertices.binary_search(&neighbour) {
                sets.union(local, other);
            }
        }
    }

    let mut slot_of_root: Vec<Option<usize>> = vec![None; vertices.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for (local, &vertex) in vertices.iter().enumerate() {
        let root = sets.find(local);
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(vertex);
    }
    components
}

/// Removes the flagged vertices from `component` and classifies the result.
pub(crate) fn evaluate(
    component: &LiveComponent,
    graph: &NeighbourGraph,
    removed: &[bool],
) -> Outcome {
    let remaining: Vec<usize> = component
        .vertices
        .iter()
        .copied()
        .filter(|&vertex| !removed[vertex])
        .collect();

    if remaining.len() == component.vertices.len() {
        return Outcome::Unchanged;
    }
    if remaining.is_empty() {
        return Outcome::Vanished;
    }

    let mut parts = partition(graph, &remaining);
    if parts.len() == 1 {
        Outcome::Shrunk(parts.pop().unwrap_or_default())
    } else {
        Outcome::Split(parts)
    }
}
