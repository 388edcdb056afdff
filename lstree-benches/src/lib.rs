//! Benchmark support crate for the level set tree.
//!
//! Provides seeded synthetic neighbour graphs and parameter types used by
//! the Criterion benchmarks for tree construction and cluster extraction.

pub mod error;
pub mod params;
pub mod source;
