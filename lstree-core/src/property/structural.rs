//! Structural invariants of a constructed tree.
//!
//! For any tree produced by the level sweep, verifies:
//!
//! - **Links**: every child names its parent and vice versa.
//! - **Continuity**: a child starts at the level and mass its parent ends at.
//! - **Lifetimes**: every node ends strictly after it starts.
//! - **Nesting**: children hold disjoint subsets of their parent's members.
//! - **Roots**: root members partition the input points.
//! - **Background**: background sets partition the input points and the
//!   level masses rise monotonically to one.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, LevelSetTree, Node};

use super::types::TreeFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &TreeFixture) -> TestCaseResult {
    let tree = fixture.build(ExecutionStrategy::Sequential)?;
    validate_links(&tree)?;
    validate_lifetimes(&tree)?;
    validate_nesting(&tree)?;
    validate_roots(&tree, fixture.point_count())?;
    validate_background(&tree, fixture.point_count())?;
    Ok(())
}

/// Checks parent and child references agree and that children continue
/// where their parent stops.
pub(super) fn validate_links(tree: &LevelSetTree) -> TestCaseResult {
    for node in tree.nodes() {
        if let Some(parent_id) = node.parent() {
            let parent = tree.node(parent_id).ok_or_else(|| {
                TestCaseError::fail(format!("node {}: missing parent {parent_id}", node.id()))
            })?;
            if !parent.children().contains(&node.id()) {
                return Err(TestCaseError::fail(format!(
                    "node {}: parent {parent_id} does not list it as a child",
                    node.id(),
                )));
            }
            if node.start_level() != parent.end_level() || node.start_mass() != parent.end_mass() {
                return Err(TestCaseError::fail(format!(
                    "node {}: starts at ({}, {}) but parent {parent_id} ends at ({}, {})",
                    node.id(),
                    node.start_level(),
                    node.start_mass(),
                    parent.end_level(),
                    parent.end_mass(),
                )));
            }
        }
        for &child in node.children() {
            match tree.node(child) {
                Some(found) if found.parent() == Some(node.id()) => {}
                _ => {
                    return Err(TestCaseError::fail(format!(
                        "node {}: child {child} is missing or names another parent",
                        node.id(),
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_lifetimes(tree: &LevelSetTree) -> TestCaseResult {
    match tree
        .nodes()
        .find(|node| node.start_level() >= node.end_level() || node.start_mass() > node.end_mass())
    {
        Some(node) => Err(TestCaseError::fail(format!(
            "node {}: lifetime [{}, {}) with mass [{}, {}) is empty or inverted",
            node.id(),
            node.start_level(),
            node.end_level(),
            node.start_mass(),
            node.end_mass(),
        ))),
        None => Ok(()),
    }
}

/// Checks children hold disjoint subsets of their parent's members.
pub(super) fn validate_nesting(tree: &LevelSetTree) -> TestCaseResult {
    for node in tree.internal_nodes() {
        let members: BTreeSet<usize> = node.members().iter().copied().collect();
        let mut seen = BTreeSet::new();
        for child in node.children().iter().filter_map(|&child| tree.node(child)) {
            for &point in child.members() {
                if !members.contains(&point) {
                    return Err(TestCaseError::fail(format!(
                        "node {}: point {point} is not a member of parent {}",
                        child.id(),
                        node.id(),
                    )));
                }
                if !seen.insert(point) {
                    return Err(TestCaseError::fail(format!(
                        "node {}: point {point} appears in two children",
                        node.id(),
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_roots(tree: &LevelSetTree, point_count: usize) -> TestCaseResult {
    let members = tree.roots().flat_map(Node::members);
    validate_partition("roots", members, point_count)?;
    match tree.roots().find(|root| root.start_level() != 0.0 || root.start_mass() != 0.0) {
        Some(root) => Err(TestCaseError::fail(format!(
            "root {}: starts at ({}, {}) instead of the origin",
            root.id(),
            root.start_level(),
            root.start_mass(),
        ))),
        None => Ok(()),
    }
}

fn validate_background(tree: &LevelSetTree, point_count: usize) -> TestCaseResult {
    if tree.background_sets().len() != tree.levels().len() {
        return Err(TestCaseError::fail(format!(
            "{} background sets for {} levels",
            tree.background_sets().len(),
            tree.levels().len(),
        )));
    }
    validate_partition("background sets", tree.background_sets().iter().flatten(), point_count)?;

    let masses = tree.level_masses();
    if masses.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(TestCaseError::fail(format!("level masses decrease: {masses:?}")));
    }
    match masses.last() {
        Some(&last) if (last - 1.0).abs() > 1e-9 => Err(TestCaseError::fail(format!(
            "final level mass is {last}, expected 1"
        ))),
        _ => Ok(()),
    }
}

/// Checks `points` lists every index below `point_count` exactly once.
fn validate_partition<'a>(
    label: &str,
    points: impl Iterator<Item = &'a usize>,
    point_count: usize,
) -> TestCaseResult {
    let mut seen = vec![false; point_count];
    for &point in points {
        match seen.get_mut(point) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(TestCaseError::fail(format!("{label}: point {point} repeated")));
            }
            None => {
                return Err(TestCaseError::fail(format!(
                    "{label}: point {point} out of range for {point_count} points"
                )));
            }
        }
    }
    match seen.iter().position(|covered| !covered) {
        Some(point) => Err(TestCaseError::fail(format!("{label}: point {point} missing"))),
        None => Ok(()),
    }
}
