//! Command implementations.

pub mod evaluate;
pub mod hash;
pub mod preprocess;
pub mod rules;

pub use evaluate::run_evaluate;
pub use hash::run_hash;
pub use preprocess::run_preprocess;
pub use rules::run_parse_rules;

/// Placeholder for absent values in tables.
pub(crate) const NONE: &str = "-";
