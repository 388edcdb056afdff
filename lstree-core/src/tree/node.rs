//! Node records stored in a [`super::LevelSetTree`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node within a [`super::LevelSetTree`].
///
/// Ids are allocated from a single counter during construction, so their
/// order reflects the order in which components were discovered.
///
/// # Examples
/// ```
/// use lstree_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifetime record of one connected component.
///
/// `members` holds the component's points at the moment it was created and is
/// never shrunk as the sweep removes background points from it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) start_level: f64,
    pub(crate) end_level: f64,
    pub(crate) start_mass: f64,
    pub(crate) end_mass: f64,
    pub(crate) members: Vec<usize>,
}

impl Node {
    pub(crate) const fn open(
        id: NodeId,
        parent: Option<NodeId>,
        start_level: f64,
        start_mass: f64,
        members: Vec<usize>,
    ) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            start_level,
            end_level: start_level,
            start_mass,
            end_mass: start_mass,
            members,
        }
    }

    pub(crate) const fn close(&mut self, level: f64, mass: f64) {
        self.end_level = level;
        self.end_mass = mass;
    }

    /// Identifier of this node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> NodeId { self.id }

    /// Node this one split from, or `None` for a root.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> Option<NodeId> { self.parent }

    /// Children created when this node split, ordered by allocation.
    #[must_use]
    #[rustfmt::skip]
    pub fn children(&self) -> &[NodeId] { &self.children }

    /// Density level at which the component appeared.
    #[must_use]
    #[rustfmt::skip]
    pub const fn start_level(&self) -> f64 { self.start_level }

    /// Density level at which the component vanished or split.
    #[must_use]
    #[rustfmt::skip]
    pub const fn end_level(&self) -> f64 { self.end_level }

    /// Background mass at which the component appeared.
    #[must_use]
    #[rustfmt::skip]
    pub const fn start_mass(&self) -> f64 { self.start_mass }

    /// Background mass at which the component vanished or split.
    #[must_use]
    #[rustfmt::skip]
    pub const fn end_mass(&self) -> f64 { self.end_mass }

    /// Sorted point indices that formed the component when it appeared.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[usize] { &self.members }

    /// Returns `true` when the node never split.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` when the node has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of points in [`Self::members`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when `level` lies in `[start_level, end_level)`.
    #[must_use]
    pub fn spans_level(&self, level: f64) -> bool {
        self.start_level <= level && level < self.end_level
    }

    /// Returns `true` when `mass` lies in `[start_mass, end_mass)`.
    #[must_use]
    pub fn spans_mass(&self, mass: f64) -> bool {
        self.start_mass <= mass && mass < self.end_mass
    }
}
