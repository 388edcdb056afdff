//! Cooperative cancellation for long level sweeps.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag that asks an in-flight construction to stop.
///
/// Clones observe the same flag. The sweep checks it once per density level,
/// so cancellation takes effect before the next level is processed.
///
/// # Examples
/// ```
/// use lstree_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
