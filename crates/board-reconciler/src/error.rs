//! Error types for gesture reconciliation.

use board_store::StoreError;
use thiserror::Error;

/// Errors that can occur while reconciling a gesture.
///
/// Input problems never show up here; they are reported as
/// [`Outcome::Ignored`](crate::Outcome::Ignored). An error means the store
/// rejected a mutation, which points at a broken invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The store rejected a mutation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
