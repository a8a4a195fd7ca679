//! Order and drag state store for the order board.
//!
//! This crate provides the `OrderStore`, the single owner of board state:
//! - Orders kept in board order, unique by id
//! - The transient drag state of the current gesture
//! - Render notifications using `mpsc` channels
//!
//! # Example
//!
//! ```
//! use board_store::{OrderStore, OrderFilter};
//! use board_models::{ColumnId, DragUpdate, Order};
//!
//! let mut store = OrderStore::new();
//! let renders = store.subscribe();
//!
//! store.add_order(Order::new("order-1", "Burger", "5")).unwrap();
//! store.set_drag_state(DragUpdate::new().over(ColumnId::Ready)).unwrap();
//!
//! let snapshot = renders.try_iter().last().unwrap();
//! assert_eq!(snapshot.orders_in(ColumnId::Ordered).len(), 1);
//!
//! let on_table_5 = store.list(Some(OrderFilter::new().with_table("5")));
//! assert_eq!(on_table_5.len(), 1);
//! ```

pub mod error;
pub mod filter;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use filter::OrderFilter;
pub use snapshot::{BoardSnapshot, ColumnOrders};
pub use store::OrderStore;
