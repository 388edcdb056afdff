//! Result types for cluster label extraction.

use std::fmt;

use crate::tree::NodeId;

/// Identifier assigned to a foreground cluster.
///
/// Labels are dense: a result with `n` clusters uses `0..n`, in the order the
/// labelling policy discovered the clusters.
///
/// # Examples
/// ```
/// use lstree_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point assigned to a foreground cluster.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelledPoint {
    point: usize,
    cluster: ClusterId,
}

impl LabelledPoint {
    /// Pairs a point index with its cluster.
    #[must_use]
    pub const fn new(point: usize, cluster: ClusterId) -> Self {
        Self { point, cluster }
    }

    /// Index of the point in the construction input.
    #[must_use]
    #[rustfmt::skip]
    pub const fn point(&self) -> usize { self.point }

    /// Cluster the point belongs to.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cluster(&self) -> ClusterId { self.cluster }
}

/// Foreground clusters produced by [`crate::LevelSetTree::cluster_labels`].
///
/// Points outside every cluster (the background) do not appear in
/// [`Self::assignments`].
///
/// # Examples
/// ```
/// use lstree_core::{ClusterId, ForegroundClusters, LabelledPoint, NodeId};
///
/// let clusters = ForegroundClusters::new(
///     vec![
///         LabelledPoint::new(0, ClusterId::new(0)),
///         LabelledPoint::new(3, ClusterId::new(1)),
///     ],
///     vec![NodeId::new(1), NodeId::new(2)],
/// );
/// assert_eq!(clusters.cluster_count(), 2);
/// assert_eq!(
///     clusters.dense_labels(4),
///     [Some(ClusterId::new(0)), None, None, Some(ClusterId::new(1))]
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForegroundClusters {
    assignments: Vec<LabelledPoint>,
    nodes: Vec<NodeId>,
}

impl ForegroundClusters {
    /// Wraps assignments and the nodes used as clusters; `nodes[i]` is the
    /// node behind cluster `i`.
    #[must_use]
    pub const fn new(assignments: Vec<LabelledPoint>, nodes: Vec<NodeId>) -> Self {
        Self { assignments, nodes }
    }

    /// Labels every member list in order, giving the `i`-th entry cluster `i`.
    pub(crate) fn from_members<'a, I>(clusters: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, &'a [usize])>,
    {
        let mut assignments = Vec::new();
        let mut nodes = Vec::new();
        for (label, (node, members)) in (0_u64..).zip(clusters) {
            let cluster = ClusterId::new(label);
            assignments.extend(members.iter().map(|&point| LabelledPoint::new(point, cluster)));
            nodes.push(node);
        }
        Self { assignments, nodes }
    }

    /// Labelled points, grouped by cluster in label order.
    #[must_use]
    #[rustfmt::skip]
    pub fn assignments(&self) -> &[LabelledPoint] { &self.assignments }

    /// Tree nodes used as clusters, indexed by label.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }

    /// Number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no cluster was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expands the assignments into one optional label per point, with `None`
    /// for background points. Indices at or beyond `point_count` are ignored.
    #[must_use]
    pub fn dense_labels(&self, point_count: usize) -> Vec<Option<ClusterId>> {
        let mut labels = vec![None; point_count];
        for assignment in &self.assignments {
            if let Some(slot) = labels.get_mut(assignment.point) {
                *slot = Some(assignment.cluster);
            }
        }
        labels
    }

    /// Points assigned to `cluster`, in assignment order.
    pub fn members_of(&self, cluster: ClusterId) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.cluster == cluster)
            .map(LabelledPoint::point)
    }
}
