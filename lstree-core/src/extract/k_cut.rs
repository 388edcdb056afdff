//! Search for the density level that best yields `k` components.

use std::num::NonZeroUsize;

use crate::tree::LevelSetTree;

impl LevelSetTree {
    /// Finds the lowest level at which exactly `k` nodes are alive.
    ///
    /// Candidate cuts are the distinct start and end levels; a node is alive
    /// at `c` when `start_level <= c < end_level`. When no candidate has `k`
    /// alive nodes the search falls back to the lowest cut with the most
    /// alive nodes if that maximum is below `k`, and otherwise to the lowest
    /// cut with the smallest count above `k`. Returns `None` for an empty
    /// tree.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    /// use lstree_core::LevelSetTree;
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// assert_eq!(tree.find_k_cut(NonZeroUsize::MIN), Some(0.0));
    /// assert_eq!(tree.find_k_cut(NonZeroUsize::new(5).ok_or("zero")?), Some(1.0));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn find_k_cut(&self, k: NonZeroUsize) -> Option<f64> {
        let counts = self.alive_counts();
        let k = k.get();

        if let Some(&(cut, _)) = counts.iter().find(|(_, alive)| *alive == k) {
            return Some(cut);
        }

        let widest = counts.iter().map(|&(_, alive)| alive).max()?;
        let target = if widest < k {
            widest
        } else {
            counts
                .iter()
                .map(|&(_, alive)| alive)
                .filter(|&alive| alive > k)
                .min()?
        };
        counts
            .iter()
            .find(|(_, alive)| *alive == target)
            .map(|&(cut, _)| cut)
    }

    /// Alive-node counts at every distinct start or end level, ascending.
    pub(crate) fn alive_counts(&self) -> Vec<(f64, usize)> {
        let mut cuts: Vec<f64> = self
            .nodes()
            .flat_map(|node| [node.start_level(), node.end_level()])
            .collect();
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();

        let position = |level: f64| cuts.partition_point(|&cut| cut < level);
        let mut opened = vec![0_usize; cuts.len()];
        let mut closed = vec![0_usize; cuts.len()];
        for node in self.nodes() {
            opened[position(node.start_level())] += 1;
            closed[position(node.end_level())] += 1;
        }

        let mut alive = 0_usize;
        cuts.iter()
            .zip(opened.iter().zip(&closed))
            .map(|(&cut, (&opens, &closes))| {
                alive = (alive + opens).saturating_sub(closes);
                (cut, alive)
            })
            .collect()
    }
}
