//! Foreground cluster extraction.
//!
//! Four labelling policies turn a [`LevelSetTree`] into
//! [`ForegroundClusters`]; `k-level` relies on the k-cut search in
//! [`LevelSetTree::find_k_cut`].

mod k_cut;
mod policies;

use std::{num::NonZeroUsize, str::FromStr, sync::Arc};

use tracing::instrument;

use crate::{Result, error::LevelSetTreeError, result::ForegroundClusters, tree::LevelSetTree};

/// Axis on which an upper-set cut is expressed.
///
/// # Examples
/// ```
/// use lstree_core::Scale;
///
/// assert_eq!("lambda".parse::<Scale>()?, Scale::Level);
/// assert_eq!("alpha".parse::<Scale>()?, Scale::Mass);
/// # Ok::<(), lstree_core::LevelSetTreeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    /// Density level (`lambda`).
    Level,
    /// Cumulative background mass (`alpha`).
    #[default]
    Mass,
}

impl FromStr for Scale {
    type Err = LevelSetTreeError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "lambda" | "level" => Ok(Self::Level),
            "alpha" | "mass" => Ok(Self::Mass),
            other => Err(LevelSetTreeError::InvalidParameter {
                method: ClusterMethod::UPPER_SET,
                parameter: "scale",
                reason: Arc::from(format!(
                    "`{other}` is not one of `lambda`, `level`, `alpha`, `mass`"
                )),
            }),
        }
    }
}

/// Labelling policy applied by [`LevelSetTree::cluster_labels`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum ClusterMethod {
    /// Every leaf is a cluster holding its full membership.
    Leaf,
    /// Clusters from the `k - roots` lowest splits; may yield fewer than `k`
    /// clusters when the tree lacks enough splits.
    FirstK {
        /// Desired number of clusters.
        k: NonZeroUsize,
    },
    /// Components alive at `threshold`, restricted to the points above it.
    UpperSet {
        /// Cut position on `scale`.
        threshold: f64,
        /// Axis the threshold is expressed on.
        scale: Scale,
    },
    /// Components alive at the level chosen by the k-cut search, each with
    /// its full membership.
    KLevel {
        /// Desired number of clusters.
        k: NonZeroUsize,
    },
}

/// Optional parameters consumed by [`ClusterMethod::from_name`].
///
/// # Examples
/// ```
/// use lstree_core::{ClusterMethod, MethodParams, Scale};
///
/// let params = MethodParams::new().with_threshold(0.5).with_scale(Scale::Level);
/// let method = ClusterMethod::from_name("upper-set", &params)?;
/// assert_eq!(method, ClusterMethod::UpperSet { threshold: 0.5, scale: Scale::Level });
/// # Ok::<(), lstree_core::LevelSetTreeError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MethodParams {
    k: Option<usize>,
    threshold: Option<f64>,
    scale: Option<Scale>,
}

impl MethodParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the desired cluster count.
    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the upper-set cut position.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the upper-set scale; [`Scale::Mass`] when omitted.
    #[must_use]
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }
}

impl ClusterMethod {
    const FIRST_K: &'static str = "first-k";
    const UPPER_SET: &'static str = "upper-set";
    const K_LEVEL: &'static str = "k-level";

    /// Builds a method from its configuration name.
    ///
    /// Accepts `leaf`, `first-k`, `upper-set`, and `k-level`, with
    /// underscores in place of hyphens as well.
    ///
    /// # Errors
    /// Returns [`LevelSetTreeError::UnknownMethod`] for unrecognised names,
    /// [`LevelSetTreeError::MissingParameter`] when a required parameter is
    /// absent, and [`LevelSetTreeError::InvalidParameter`] for a zero `k` or a
    /// non-finite threshold.
    pub fn from_name(name: &str, params: &MethodParams) -> Result<Self> {
        match name {
            "leaf" => Ok(Self::Leaf),
            "first-k" | "first_k" => Ok(Self::FirstK {
                k: require_k(Self::FIRST_K, params)?,
            }),
            "k-level" | "k_level" => Ok(Self::KLevel {
                k: require_k(Self::K_LEVEL, params)?,
            }),
            "upper-set" | "upper_set" => {
                let threshold = params.threshold.ok_or(LevelSetTreeError::MissingParameter {
                    method: Self::UPPER_SET,
                    parameter: "threshold",
                })?;
                if !threshold.is_finite() {
                    return Err(LevelSetTreeError::InvalidParameter {
                        method: Self::UPPER_SET,
                        parameter: "threshold",
                        reason: Arc::from(format!("{threshold} is not finite")),
                    });
                }
                Ok(Self::UpperSet {
                    threshold,
                    scale: params.scale.unwrap_or_default(),
                })
            }
            other => Err(LevelSetTreeError::UnknownMethod {
                kind: "cluster labeling",
                name: Arc::from(other),
            }),
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::FirstK { .. } => Self::FIRST_K,
            Self::UpperSet { .. } => Self::UPPER_SET,
            Self::KLevel { .. } => Self::K_LEVEL,
        }
    }
}

fn require_k(method: &'static str, params: &MethodParams) -> Result<NonZeroUsize> {
    let k = params.k.ok_or(LevelSetTreeError::MissingParameter {
        method,
        parameter: "k",
    })?;
    NonZeroUsize::new(k).ok_or_else(|| LevelSetTreeError::InvalidParameter {
        method,
        parameter: "k",
        reason: Arc::from("must be at least 1"),
    })
}

impl LevelSetTree {
    /// Labels foreground points according to `method`.
    ///
    /// An empty tree yields no clusters under every policy.
    ///
    /// # Examples
    /// ```
    /// use lstree_core::{ClusterMethod, LevelSetTree};
    ///
    /// let tree = LevelSetTree::builder()
    ///     .build()?
    ///     .construct(&[vec![1], vec![0, 2], vec![1]], &[2.0, 1.0, 2.0], &[1.0, 2.0])?;
    /// let clusters = tree.cluster_labels(ClusterMethod::Leaf);
    /// assert_eq!(clusters.cluster_count(), 2);
    /// assert_eq!(clusters.members_of(lstree_core::ClusterId::new(1)).collect::<Vec<_>>(), [2]);
    /// # Ok::<(), lstree_core::LevelSetTreeError>(())
    /// ```
    #[must_use]
    #[instrument(
        name = "core.cluster_labels",
        skip(self),
        fields(method = method.name(), nodes = self.len(), clusters = tracing::field::Empty),
    )]
    pub fn cluster_labels(&self, method: ClusterMethod) -> ForegroundClusters {
        let clusters = match method {
            ClusterMethod::Leaf => policies::leaf(self),
            ClusterMethod::FirstK { k } => policies::first_k(self, k),
            ClusterMethod::UpperSet { threshold, scale } => {
                policies::upper_set(self, threshold, scale)
            }
            ClusterMethod::KLevel { k } => policies::k_level(self, k),
        };
        tracing::Span::current().record("clusters", clusters.cluster_count());
        clusters
    }
}
