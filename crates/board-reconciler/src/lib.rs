//! Gesture reconciliation for the order board.
//!
//! The `Reconciler` sits between a host that delivers raw UI gestures and
//! the `OrderStore` that owns board state. For each gesture it extracts the
//! intent (target column, order identity, form values), validates it, and
//! calls the store. The host is never trusted to know board rules:
//! - Drop areas are found by walking the pointer's ancestor chain
//! - Drag end always clears the dragged order, whatever happened before
//! - Form input is trimmed and empty submissions are silently ignored
//!
//! # Example
//!
//! ```
//! use board_models::ColumnId;
//! use board_reconciler::{DragTransfer, Element, FormFields, Outcome, Reconciler, SequentialIds};
//! use board_store::OrderStore;
//!
//! let mut store = OrderStore::new();
//! let mut reconciler = Reconciler::new(SequentialIds::new("order"));
//!
//! reconciler.submit_add(&mut store, &FormFields::new("Burger", "5")).unwrap();
//! let id = store.list(None)[0].id.clone();
//!
//! let card = [Element::new("article").with_data("id", id.as_str())];
//! let ready = [Element::new("span"), Element::new("section").with_data("area", "ready")];
//! let mut transfer = DragTransfer::new();
//!
//! reconciler.drag_start(&mut store, &card, &mut transfer).unwrap();
//! reconciler.drag_over(&mut store, &ready).unwrap();
//! assert_eq!(reconciler.commit_drop(&mut store, &ready, &transfer).unwrap(), Outcome::Handled);
//! reconciler.drag_end(&mut store).unwrap();
//!
//! assert_eq!(store.get_order_by_id(&id).unwrap().column, ColumnId::Ready);
//! ```

pub mod ancestry;
pub mod error;
pub mod form;
pub mod ids;
pub mod overlay;
pub mod reconciler;
pub mod transfer;

pub use ancestry::{find_tagged_ancestor, resolve_area, resolve_order, Element, AREA_ATTR, ID_ATTR};
pub use error::{ReconcileError, Result};
pub use form::{FormFields, ValidFields};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use overlay::{Focus, Overlay, OverlayState};
pub use reconciler::{Outcome, Reconciler};
pub use transfer::{DragTransfer, TEXT_PLAIN};
