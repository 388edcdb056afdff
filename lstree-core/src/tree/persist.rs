//! Whole-tree save and restore.
//!
//! Trees are written as a versioned JSON snapshot. Loading re-checks the
//! parent/child links so a hand-edited or truncated snapshot is rejected
//! instead of producing a tree that violates its own structure.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{LevelSetTree, Node, NodeId};
use crate::error::PersistenceError;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    format_version: u32,
    density: &'a [f64],
    levels: &'a [f64],
    background_sets: &'a [Vec<usize>],
    nodes: Vec<&'a Node>,
}

#[derive(Deserialize)]
struct Snapshot {
    format_version: u32,
    density: Vec<f64>,
    levels: Vec<f64>,
    background_sets: Vec<Vec<usize>>,
    nodes: Vec<Node>,
}

fn corrupt(reason: impl Into<Arc<str>>) -> PersistenceError {
    PersistenceError::Corrupt {
        reason: reason.into(),
    }
}

impl Snapshot {
    fn into_tree(self) -> Result<LevelSetTree, PersistenceError> {
        if self.format_version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.background_sets.len() != self.levels.len() {
            return Err(corrupt(format!(
                "{} background sets for {} levels",
                self.background_sets.len(),
                self.levels.len()
            )));
        }

        let point_count = self.density.len();
        let mut nodes = BTreeMap::new();
        for node in self.nodes {
            if let Some(&point) = node.members.iter().find(|&&point| point >= point_count) {
                return Err(corrupt(format!(
                    "node {} lists point {point} but the tree has {point_count} points",
                    node.id
                )));
            }
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(corrupt(format!("node {id} appears more than once")));
            }
        }
        check_links(&nodes)?;

        Ok(LevelSetTree::from_parts(
            nodes,
            self.density,
            self.levels,
            self.background_sets,
        ))
    }
}

fn check_links(nodes: &BTreeMap<NodeId, Node>) -> Result<(), PersistenceError> {
    for node in nodes.values() {
        if node.start_level > node.end_level || node.start_mass > node.end_mass {
            return Err(corrupt(format!(
                "node {} ends before it starts (levels {}..{}, masses {}..{})",
                node.id, node.start_level, node.end_level, node.start_mass, node.end_mass
            )));
        }
        if let Some(parent) = node.parent {
            let Some(owner) = nodes
                .get(&parent)
                .filter(|candidate| candidate.children.contains(&node.id))
            else {
                return Err(corrupt(format!(
                    "node {} names parent {parent}, which does not list it as a child",
                    node.id
                )));
            };
            if node.start_level != owner.end_level || node.start_mass != owner.end_mass {
                return Err(corrupt(format!(
                    "node {} starts at level {} mass {} but parent {parent} ends at level {} mass {}",
                    node.id, node.start_level, node.start_mass, owner.end_level, owner.end_mass
                )));
            }
        }
        for child in &node.children {
            let linked = nodes
                .get(child)
                .is_some_and(|candidate| candidate.parent == Some(node.id));
            if !linked {
                return Err(corrupt(format!(
                    "node {} lists child {child}, which does not name it as parent",
                    node.id
                )));
            }
        }
    }
    Ok(())
}

impl LevelSetTree {
    fn snapshot(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            format_version: FORMAT_VERSION,
            density: &self.density,
            levels: &self.levels,
            background_sets: &self.background_sets,
            nodes: self.nodes.values().collect(),
        }
    }

    /// Serialises the tree as JSON into `writer`.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Format`] when encoding or writing fails.
    pub fn to_writer(&self, writer: impl Write) -> Result<(), PersistenceError> {
        serde_json::to_writer(writer, &self.snapshot())?;
        Ok(())
    }

    /// Restores a tree previously written by [`Self::to_writer`].
    ///
    /// Besides the parent/child links, every node must end no earlier than it
    /// starts and every child must start where its parent ends.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Format`] when the input is not a valid
    /// snapshot and [`PersistenceError::Corrupt`] when it decodes to an
    /// inconsistent tree.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::LevelSetTree;
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// let mut buffer = Vec::new();
    /// tree.to_writer(&mut buffer)?;
    /// let restored = LevelSetTree::from_reader(buffer.as_slice())?;
    /// assert_eq!(restored, tree);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader(reader: impl Read) -> Result<Self, PersistenceError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        snapshot.into_tree()
    }

    /// Writes the tree to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Io`] when the file cannot be created or
    /// flushed and [`PersistenceError::Format`] when encoding fails.
    #[instrument(name = "core.save", err, skip(self, path), fields(path = %path.as_ref().display(), nodes = self.len()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let io_error = |source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(io_error)
    }
}

/// Loads a tree previously written by [`LevelSetTree::save`].
///
/// # Errors
/// Returns [`PersistenceError::Io`] when the file cannot be opened and the
/// errors of [`LevelSetTree::from_reader`].
#[instrument(name = "core.load", err, skip(path), fields(path = %path.as_ref().display()))]
pub fn load_tree(path: impl AsRef<Path>) -> Result<LevelSetTree, PersistenceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    LevelSetTree::from_reader(BufReader::new(file))
}
