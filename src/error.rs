//! error.rs — engine error taxonomy.
//!
//! Three failure classes cross the public surface:
//! - `InvalidInput`: malformed numeric signal or mismatched value/weight vectors.
//! - `NotFound`: roster or candidate absent; produced only by fit assessment
//!   (profiling treats an unknown roster as an empty one).
//! - `Lookup`: transient repository I/O failure, wrapping the store's error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed numeric input: non-finite signal value or value/weight
    /// vectors of different lengths.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required entity (roster or candidate) does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A repository lookup failed for transient reasons.
    #[error("lookup failed: {0}")]
    Lookup(anyhow::Error),
}

impl EngineError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn roster_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "roster",
            id: id.into(),
        }
    }

    pub fn candidate_not_found(slug: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "candidate",
            id: slug.into(),
        }
    }

    /// True when the error represents a missing entity rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
