//! Compressed neighbour graph used by the level sweep.

use crate::{builder::AdjacencyMode, error::InputError};

/// Undirected neighbour graph in compressed sparse row form.
///
/// Rows are sorted and deduplicated; self loops are dropped because they
/// never affect connectivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NeighbourGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl NeighbourGraph {
    pub(crate) fn from_adjacency(
        adjacency: &[Vec<usize>],
        mode: AdjacencyMode,
    ) -> Result<Self, InputError> {
        let point_count = adjacency.len();
        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); point_count];

        for (point, neighbours) in adjacency.iter().enumerate() {
            for &neighbour in neighbours {
                if neighbour >= point_count {
                    return Err(InputError::NeighbourOutOfBounds {
                        point,
                        neighbour,
                        point_count,
                    });
                }
                if neighbour == point {
                    continue;
                }
                rows[point].push(neighbour);
                if mode == AdjacencyMode::Symmetrize {
                    rows[neighbour].push(point);
                }
            }
        }

        for row in &mut rows {
            row.sort_unstable();
            row.dedup();
        }

        if mode == AdjacencyMode::Strict {
            check_symmetric(&rows)?;
        }

        let mut offsets = Vec::with_capacity(point_count + 1);
        let mut targets = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        offsets.push(0);
        for row in rows {
            targets.extend(row);
            offsets.push(targets.len());
        }
        Ok(Self { offsets, targets })
    }

    pub(crate) fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub(crate) fn neighbours(&self, point: usize) -> &[usize] {
        match (self.offsets.get(point), self.offsets.get(point + 1)) {
            (Some(&start), Some(&end)) => &self.targets[start..end],
            _ => &[],
        }
    }
}

fn check_symmetric(rows: &[Vec<usize>]) -> Result<(), InputError> {
    for (from, row) in rows.iter().enumerate() {
        for &to in row {
            if rows[to].binary_search(&from).is_err() {
                return Err(InputError::AsymmetricEdge { from, to });
            }
        }
    }
    Ok(())
}
