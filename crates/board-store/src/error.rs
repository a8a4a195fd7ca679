//! Error types for store operations.

use board_models::OrderId;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Both variants mean a caller broke an invariant upstream; a correct host
/// never sees them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An order with this id is already on the board.
    #[error("duplicate order id: {0}")]
    DuplicateId(OrderId),

    /// No order with this id exists.
    #[error("order not found: {0}")]
    NotFound(OrderId),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
