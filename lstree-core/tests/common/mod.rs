use lstree_core::{ExecutionStrategy, LevelSetTree, TreeBuilder};

/// Builder pinned to the calling thread so tracing captures see every event.
#[must_use]
pub fn sequential() -> TreeBuilder {
    LevelSetTree::builder()
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("sequential strategy is always available")
}

/// Symmetric adjacency list of the path `0 - 1 - ... - (n - 1)`.
#[must_use]
pub fn path(n: usize) -> Vec<Vec<usize>> {
    (0..n)
        .map(|point| {
            let mut row = Vec::new();
            if point > 0 {
                row.push(point - 1);
            }
            if point + 1 < n {
                row.push(point + 1);
            }
            row
        })
        .collect()
}

/// Two disjoint triangles, `{0, 1, 2}` and `{3, 4, 5}`.
#[must_use]
pub fn two_triangles() -> Vec<Vec<usize>> {
    vec![
        vec![1, 2],
        vec![0, 2],
        vec![0, 1],
        vec![4, 5],
        vec![3, 5],
        vec![3, 4],
    ]
}
