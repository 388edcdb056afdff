//! Labelling policy guarantees.
//!
//! For every policy, verifies that no point carries two labels, that labels
//! are dense, and that each cluster's points belong to the node behind it.
//! Policy-specific checks cover the leaf set before and after a size-merge
//! prune, the split budget of `first-k`, the alive-at-threshold rule of
//! `upper-set`, and the cut chosen for `k-level`.

use std::{collections::BTreeSet, num::NonZeroUsize};

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    ClusterMethod, ExecutionStrategy, ForegroundClusters, LevelSetTree, Node, NodeId,
    PruneMethod, Scale,
};

use super::types::TreeFixture;

/// Runs the extraction property for the given fixture.
///
/// `fraction` in `[0, 1)` places the upper-set threshold along both the
/// level range and the mass range.
pub(super) fn run_extraction_property(
    fixture: &TreeFixture,
    k: NonZeroUsize,
    fraction: f64,
) -> TestCaseResult {
    let tree = fixture.build(ExecutionStrategy::Sequential)?;

    validate_leaf(&tree)?;
    let threshold = fixture.point_count() / 4;
    validate_leaf(&tree.prune(PruneMethod::SizeMerge { threshold }))?;

    validate_first_k(&tree, k)?;

    let max_level = tree.levels().last().copied().unwrap_or_default();
    for (threshold, scale) in [(fraction * max_level, Scale::Level), (fraction, Scale::Mass)] {
        let clusters = labelled(&tree, ClusterMethod::UpperSet { threshold, scale })?;
        let alive = |node: &&Node| match scale {
            Scale::Level => node.spans_level(threshold),
            Scale::Mass => node.spans_mass(threshold),
        };
        let expected: Vec<NodeId> = tree.nodes().filter(alive).map(Node::id).collect();
        if clusters.nodes() != expected.as_slice() {
            return Err(TestCaseError::fail(format!(
                "upper-set at {threshold} ({scale:?}) chose {:?}, expected {expected:?}",
                clusters.nodes(),
            )));
        }
    }

    validate_k_level(&tree, k)
}

/// The leaf policy labels exactly the childless nodes.
fn validate_leaf(tree: &LevelSetTree) -> TestCaseResult {
    let leaf = labelled(tree, ClusterMethod::Leaf)?;
    let leaves: Vec<NodeId> = tree.leaves().map(Node::id).collect();
    if leaf.nodes() != leaves.as_slice() {
        return Err(TestCaseError::fail(format!(
            "leaf clusters {:?} differ from leaves {leaves:?} ({} nodes)",
            leaf.nodes(),
            tree.len(),
        )));
    }
    Ok(())
}

/// Labels the tree and checks the policy-independent guarantees.
fn labelled(tree: &LevelSetTree, method: ClusterMethod) -> Result<ForegroundClusters, TestCaseError> {
    let clusters = tree.cluster_labels(method);
    let mut seen = BTreeSet::new();
    for assignment in clusters.assignments() {
        let point = assignment.point();
        if !seen.insert(point) {
            return Err(TestCaseError::fail(format!(
                "{method:?}: point {point} labelled twice"
            )));
        }
        let node = usize::try_from(assignment.cluster().get())
            .ok()
            .and_then(|label| clusters.nodes().get(label))
            .and_then(|&id| tree.node(id))
            .ok_or_else(|| {
                TestCaseError::fail(format!(
                    "{method:?}: cluster {} has no backing node",
                    assignment.cluster(),
                ))
            })?;
        if !node.members().contains(&point) {
            return Err(TestCaseError::fail(format!(
                "{method:?}: point {point} is not a member of node {}",
                node.id(),
            )));
        }
    }
    Ok(clusters)
}

fn validate_first_k(tree: &LevelSetTree, k: NonZeroUsize) -> TestCaseResult {
    let clusters = labelled(tree, ClusterMethod::FirstK { k })?;
    let reachable = tree.roots().count() + tree.internal_nodes().count();
    let floor = k.get().min(reachable);
    if clusters.cluster_count() < floor {
        return Err(TestCaseError::fail(format!(
            "first-k with k={k} found {} clusters, expected at least {floor}",
            clusters.cluster_count(),
        )));
    }
    if clusters.cluster_count() > tree.leaves().count() {
        return Err(TestCaseError::fail(format!(
            "first-k with k={k} found more clusters than leaves ({} > {})",
            clusters.cluster_count(),
            tree.leaves().count(),
        )));
    }
    Ok(())
}

fn validate_k_level(tree: &LevelSetTree, k: NonZeroUsize) -> TestCaseResult {
    let clusters = labelled(tree, ClusterMethod::KLevel { k })?;
    let Some(cut) = tree.find_k_cut(k) else {
        return if clusters.is_empty() {
            Ok(())
        } else {
            Err(TestCaseError::fail("k-level labelled points without a cut"))
        };
    };

    let alive: Vec<NodeId> = tree
        .nodes()
        .filter(|node| node.spans_level(cut))
        .map(Node::id)
        .collect();
    if clusters.nodes() != alive.as_slice() {
        return Err(TestCaseError::fail(format!(
            "k-level at {cut} chose {:?}, alive nodes are {alive:?}",
            clusters.nodes(),
        )));
    }

    let counts = tree.alive_counts();
    let achievable = counts.iter().any(|&(_, count)| count == k.get());
    if achievable && clusters.cluster_count() != k.get() {
        return Err(TestCaseError::fail(format!(
            "k-level found {} clusters although {k} are alive at some cut",
            clusters.cluster_count(),
        )));
    }
    Ok(())
}
