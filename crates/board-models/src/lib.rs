//! Core data models for the order board.
//!
//! This crate provides the plain data types shared by the store, the
//! reconciler and the terminal host: orders, the closed set of board
//! columns, and the transient drag state.

pub mod column;
pub mod drag;
pub mod ids;
pub mod order;

// Re-export main types
pub use column::{ColumnId, ParseColumnError};
pub use drag::{DragState, DragUpdate, FieldUpdate};
pub use ids::OrderId;
pub use order::{Order, OrderPatch};
