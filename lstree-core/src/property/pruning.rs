//! Size-merge pruning guarantees.
//!
//! For any constructed tree and threshold `τ`, verifies that pruning with
//! `τ = 0` is the identity, that pruning is idempotent, that the input tree
//! is left untouched, and that the result keeps consistent links, drops
//! every root with at most `τ` members, and leaves no internal node with
//! fewer than two children of at least `τ` members.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, LevelSetTree, PruneMethod};

use super::structural::{validate_links, validate_nesting};
use super::types::TreeFixture;

/// Runs the pruning property for the given fixture and threshold.
pub(super) fn run_pruning_property(fixture: &TreeFixture, threshold: usize) -> TestCaseResult {
    let tree = fixture.build(ExecutionStrategy::Sequential)?;
    let snapshot = tree.clone();

    if tree.prune(PruneMethod::SizeMerge { threshold: 0 }) != tree {
        return Err(TestCaseError::fail(format!(
            "pruning with threshold 0 changed the tree (profile={:?})",
            fixture.profile,
        )));
    }

    let method = PruneMethod::SizeMerge { threshold };
    let pruned = tree.prune(method);
    if tree != snapshot {
        return Err(TestCaseError::fail("pruning mutated its input"));
    }
    if pruned.prune(method) != pruned {
        return Err(TestCaseError::fail(format!(
            "pruning with threshold {threshold} is not idempotent (profile={:?}, nodes={})",
            fixture.profile,
            tree.len(),
        )));
    }

    validate_links(&pruned)?;
    validate_nesting(&pruned)?;
    validate_roots(&pruned, threshold)?;
    validate_branches(&pruned, threshold)
}

fn validate_roots(tree: &LevelSetTree, threshold: usize) -> TestCaseResult {
    match tree.roots().find(|root| root.size() <= threshold) {
        Some(root) => Err(TestCaseError::fail(format!(
            "root {} with {} members survived threshold {threshold}",
            root.id(),
            root.size(),
        ))),
        None => Ok(()),
    }
}

fn validate_branches(tree: &LevelSetTree, threshold: usize) -> TestCaseResult {
    for node in tree.internal_nodes() {
        let big = node
            .children()
            .iter()
            .filter_map(|&child| tree.node(child))
            .filter(|child| child.size() >= threshold)
            .count();
        if big < 2 {
            return Err(TestCaseError::fail(format!(
                "node {} keeps {big} children of at least {threshold} members",
                node.id(),
            )));
        }
    }
    Ok(())
}
