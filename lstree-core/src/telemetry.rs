//! Optional counters emitted through the `metrics` facade.

#[cfg(feature = "metrics")]
pub(crate) fn record_level() {
    metrics::counter!("lstree_levels_processed").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_level() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_split() {
    metrics::counter!("lstree_splits").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_split() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_nodes_created(count: usize) {
    metrics::counter!("lstree_nodes_created").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_nodes_created(_count: usize) {}
