//! Domain layer: the pure index and the filter predicate.

pub mod filters;
pub mod store;
