//! Benchmark parameter types.

use std::fmt;

/// Parameters for a construction benchmark run.
#[derive(Clone, Debug)]
pub struct ConstructionBenchParams {
    /// Number of points in the graph.
    pub point_count: usize,
    /// Number of levels in the grid; `None` uses every distinct density.
    pub levels: Option<usize>,
}

impl fmt::Display for ConstructionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.levels {
            Some(levels) => write!(f, "n={},levels={levels}", self.point_count),
            None => write!(f, "n={},levels=distinct", self.point_count),
        }
    }
}

/// Parameters for an extraction benchmark run.
#[derive(Clone, Debug)]
pub struct ExtractionBenchParams {
    /// Number of points in the graph.
    pub point_count: usize,
    /// Labelling policy name.
    pub method: &'static str,
}

impl fmt::Display for ExtractionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},method={}", self.point_count, self.method)
    }
}
