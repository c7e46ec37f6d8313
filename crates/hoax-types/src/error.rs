// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Hoax Kernel failures.
///
/// Only `Config` and `Validation` ever reach callers, and only at
/// construction time. The inference variants are absorbed by
/// `FuzzySystem::infer` into the fallback result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoaxError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid membership function or rule base.
    #[error("validation error: {0}")]
    Validation(String),

    /// No rule fired: the aggregated output curve is zero everywhere.
    #[error("degenerate aggregate: no rule fired")]
    DegenerateAggregate,

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type HoaxResult<T> = Result<T, HoaxError>;
