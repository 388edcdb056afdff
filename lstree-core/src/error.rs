//! Error types for the level set tree core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, io, path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{builder::ExecutionStrategy, tree::NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A malformed construction input, detected before the level sweep starts.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    /// The adjacency list and density vector describe different point counts.
    #[error("adjacency list has {adjacency} rows but density has {density} values")]
    LengthMismatch {
        /// Number of adjacency rows supplied.
        adjacency: usize,
        /// Number of density values supplied.
        density: usize,
    },
    /// A neighbour index does not name a point.
    #[error("point {point} lists neighbour {neighbour}, but only {point_count} points exist")]
    NeighbourOutOfBounds {
        /// Point whose adjacency row holds the bad entry.
        point: usize,
        /// The out-of-range neighbour index.
        neighbour: usize,
        /// Number of points in the graph.
        point_count: usize,
    },
    /// An edge is listed in one direction only.
    #[error("edge ({from}, {to}) has no reverse edge ({to}, {from})")]
    AsymmetricEdge {
        /// Point whose row lists the edge.
        from: usize,
        /// Point whose row is missing the reverse entry.
        to: usize,
    },
    /// A density value is negative or not finite.
    #[error("density at point {index} is {value}; densities must be finite and non-negative")]
    InvalidDensity {
        /// Offending point.
        index: usize,
        /// Offending density value.
        value: f64,
    },
    /// The level grid is empty although points were supplied.
    #[error("level grid is empty but {point_count} points were supplied")]
    EmptyLevels {
        /// Number of points awaiting removal.
        point_count: usize,
    },
    /// A level is not finite.
    #[error("level {index} is {value}; levels must be finite")]
    NonFiniteLevel {
        /// Position of the level in the grid.
        index: usize,
        /// Offending level value.
        value: f64,
    },
    /// The level grid is not strictly ascending.
    #[error("level {index} ({current}) does not exceed the previous level ({previous})")]
    NonAscendingLevels {
        /// Position of the offending level.
        index: usize,
        /// Level preceding the offending one.
        previous: f64,
        /// Offending level value.
        current: f64,
    },
    /// A density falls outside every background bucket of the grid, so the
    /// buckets would not partition the point set.
    #[error("density {density} at point {index} lies outside the level grid [0, {max_level}]")]
    UncoveredDensity {
        /// Offending point.
        index: usize,
        /// Its density.
        density: f64,
        /// Highest level of the grid.
        max_level: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`InputError`] variants.
    enum InputErrorCode for InputError {
        /// Adjacency and density lengths differ.
        LengthMismatch => LengthMismatch { .. } => "INPUT_LENGTH_MISMATCH",
        /// A neighbour index is out of range.
        NeighbourOutOfBounds => NeighbourOutOfBounds { .. } => "INPUT_NEIGHBOUR_OUT_OF_BOUNDS",
        /// An edge lacks its reverse entry.
        AsymmetricEdge => AsymmetricEdge { .. } => "INPUT_ASYMMETRIC_EDGE",
        /// A density is negative or not finite.
        InvalidDensity => InvalidDensity { .. } => "INPUT_INVALID_DENSITY",
        /// The level grid is empty.
        EmptyLevels => EmptyLevels { .. } => "INPUT_EMPTY_LEVELS",
        /// A level is not finite.
        NonFiniteLevel => NonFiniteLevel { .. } => "INPUT_NON_FINITE_LEVEL",
        /// The level grid is not strictly ascending.
        NonAscendingLevels => NonAscendingLevels { .. } => "INPUT_NON_ASCENDING_LEVELS",
        /// A density lies outside the level grid.
        UncoveredDensity => UncoveredDensity { .. } => "INPUT_UNCOVERED_DENSITY",
    }
}

/// Error type produced when building or querying a
/// [`crate::LevelSetTree`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LevelSetTreeError {
    /// Construction input failed validation.
    #[error("invalid construction input: {error}")]
    Input {
        /// Underlying validation failure.
        #[from]
        error: InputError,
    },
    /// A node id does not exist in the tree.
    #[error("node {id} does not exist in the tree")]
    NodeNotFound {
        /// The missing node id.
        id: NodeId,
    },
    /// A method name was not recognised.
    #[error("unknown {kind} method `{name}`")]
    UnknownMethod {
        /// Family of the method (`pruning` or `cluster labeling`).
        kind: &'static str,
        /// Name supplied by the caller.
        name: Arc<str>,
    },
    /// A method was selected without one of its required parameters.
    #[error("the `{method}` method requires the `{parameter}` parameter")]
    MissingParameter {
        /// Method that was selected.
        method: &'static str,
        /// Parameter that was not supplied.
        parameter: &'static str,
    },
    /// A method parameter has an unusable value.
    #[error("invalid `{parameter}` for the `{method}` method: {reason}")]
    InvalidParameter {
        /// Method that was selected.
        method: &'static str,
        /// Parameter at fault.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: Arc<str>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The sweep observed its cancellation flag.
    #[error("construction cancelled before level {level_index} ({level})")]
    Cancelled {
        /// Index of the first level that was not processed.
        level_index: usize,
        /// Value of that level.
        level: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`LevelSetTreeError`] variants.
    enum LevelSetTreeErrorCode for LevelSetTreeError {
        /// Construction input failed validation.
        InvalidInput => Input { .. } => "LSTREE_INVALID_INPUT",
        /// A node id does not exist in the tree.
        NodeNotFound => NodeNotFound { .. } => "LSTREE_NODE_NOT_FOUND",
        /// A method name was not recognised.
        UnknownMethod => UnknownMethod { .. } => "LSTREE_UNKNOWN_METHOD",
        /// A required method parameter was missing.
        MissingParameter => MissingParameter { .. } => "LSTREE_MISSING_PARAMETER",
        /// A method parameter was rejected.
        InvalidParameter => InvalidParameter { .. } => "LSTREE_INVALID_PARAMETER",
        /// The requested execution strategy is unavailable.
        BackendUnavailable => BackendUnavailable { .. } => "LSTREE_BACKEND_UNAVAILABLE",
        /// The sweep was cancelled.
        Cancelled => Cancelled { .. } => "LSTREE_CANCELLED",
    }
}

impl LevelSetTreeError {
    /// Retrieve the inner [`InputErrorCode`] when the error originated in
    /// input validation.
    #[must_use]
    pub const fn input_code(&self) -> Option<InputErrorCode> {
        match self {
            Self::Input { error } => Some(error.code()),
            _ => None,
        }
    }
}

/// Errors raised while saving or loading a tree snapshot.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The snapshot file could not be opened, created, or flushed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The snapshot could not be encoded or decoded.
    #[error("failed to encode or decode the tree snapshot: {source}")]
    Format {
        /// Underlying serialisation error.
        #[from]
        source: serde_json::Error,
    },
    /// The snapshot decoded but does not describe a well-formed tree.
    #[error("tree snapshot is inconsistent: {reason}")]
    Corrupt {
        /// Description of the inconsistency.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`PersistenceError`] variants.
    enum PersistenceErrorCode for PersistenceError {
        /// File access failed.
        Io => Io { .. } => "PERSISTENCE_IO",
        /// Encoding or decoding failed.
        Format => Format { .. } => "PERSISTENCE_FORMAT",
        /// The decoded snapshot is inconsistent.
        Corrupt => Corrupt { .. } => "PERSISTENCE_CORRUPT",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LevelSetTreeError>;
