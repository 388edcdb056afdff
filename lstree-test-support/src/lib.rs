//! Shared test utilities used across the lstree crates.
//!
//! - [`recording`] captures `tracing` spans and events so suites can assert
//!   on the diagnostics emitted by the level sweep and extraction entry
//!   points.
//! - [`ci`] hosts the environment-driven property-test profile.

pub mod ci;
pub mod recording;
