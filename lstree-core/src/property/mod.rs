//! Property-based tests for level set tree construction and extraction.
//!
//! Generates neighbour graphs with varied density profiles, then checks the
//! structural invariants of the constructed tree, the guarantees of
//! size-merge pruning and the labelling policies, and that every execution
//! strategy and a persistence round trip yield the same tree.

mod equivalence;
mod extraction;
mod pruning;
mod strategies;
mod structural;
mod types;
