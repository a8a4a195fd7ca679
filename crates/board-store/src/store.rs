//! OrderStore - owned board state with render notifications.
//!
//! The store is the only owner of orders and drag state. It is an ordinary
//! value: the host constructs it, lends it out by `&mut` to whatever handles
//! the current gesture, and drops it on shutdown, which disconnects every
//! render subscriber.

use std::sync::mpsc::{self, Receiver, Sender};

use board_models::{ColumnId, DragState, DragUpdate, FieldUpdate, Order, OrderId, OrderPatch};
use tracing::{debug, trace};

use crate::error::{Result, StoreError};
use crate::filter::OrderFilter;
use crate::snapshot::BoardSnapshot;

/// Board state store with pub/sub render notifications.
///
/// Every mutation that changes state broadcasts a fresh [`BoardSnapshot`]
/// to all subscribers. Mutations that leave the state as it was (for example
/// clearing an already clear drag state) broadcast nothing.
///
/// # Example
///
/// ```
/// use board_store::OrderStore;
/// use board_models::{ColumnId, Order, OrderPatch};
///
/// let mut store = OrderStore::new();
/// store.add_order(Order::new("X", "Burger", "5")).unwrap();
/// store
///     .update_order(OrderPatch::new("X", "Burger", "7", ColumnId::Ordered))
///     .unwrap();
///
/// assert_eq!(store.get_order_by_id(&"X".into()).unwrap().table, "7");
/// ```
#[derive(Debug, Default)]
pub struct OrderStore {
    /// Orders in board order.
    orders: Vec<Order>,
    /// Drag state of the current gesture.
    drag: DragState,
    /// Render subscriber channels.
    subscribers: Vec<Sender<BoardSnapshot>>,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with orders.
    ///
    /// # Returns
    ///
    /// `DuplicateId` if two of the orders share an id.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Result<Self> {
        let mut store = Self::new();
        for order in orders {
            store.insert(order)?;
        }
        Ok(store)
    }

    /// Subscribes to render notifications.
    ///
    /// Returns a receiver that gets a snapshot after every state change.
    /// The receiver is disconnected when the store is dropped.
    pub fn subscribe(&mut self) -> Receiver<BoardSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Appends an order to the board.
    ///
    /// # Returns
    ///
    /// `DuplicateId` if an order with the same id already exists.
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        debug!(id = %order.id, table = %order.table, "adding order");
        self.insert(order)?;
        self.broadcast();
        Ok(())
    }

    /// Replaces text, table and column of an existing order.
    ///
    /// # Returns
    ///
    /// `NotFound` if no order has the patch's id.
    pub fn update_order(&mut self, patch: OrderPatch) -> Result<()> {
        let order = self.find_mut(&patch.id)?;
        order.apply(&patch);
        debug!(id = %patch.id, column = %patch.column, "updated order");
        self.broadcast();
        Ok(())
    }

    /// Removes an order from the board.
    ///
    /// Clears the dragged order if it was the one removed.
    ///
    /// # Returns
    ///
    /// `NotFound` if no order has this id.
    pub fn delete_order(&mut self, id: &OrderId) -> Result<()> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        self.orders.remove(index);
        if self.drag.is_dragging(id) {
            self.drag.dragging = None;
        }
        debug!(%id, "deleted order");
        self.broadcast();
        Ok(())
    }

    /// Gets an order by id.
    pub fn get_order_by_id(&self, id: &OrderId) -> Option<Order> {
        self.orders.iter().find(|o| o.id == *id).cloned()
    }

    /// Merges a partial update into the drag state.
    ///
    /// # Returns
    ///
    /// `NotFound` if the update sets the dragged order to an unknown id.
    pub fn set_drag_state(&mut self, update: DragUpdate) -> Result<()> {
        if let FieldUpdate::Set(ref id) = update.dragging {
            if !self.contains(id) {
                return Err(StoreError::NotFound(id.clone()));
            }
        }

        if update.apply_to(&mut self.drag) {
            debug!(dragging = ?self.drag.dragging, over = ?self.drag.over, "drag state changed");
            self.broadcast();
        } else {
            trace!("drag state unchanged");
        }
        Ok(())
    }

    /// Returns a copy of the current drag state.
    pub fn get_drag_state(&self) -> DragState {
        self.drag.clone()
    }

    /// Moves an order to a column and clears the drag state in one step.
    ///
    /// This is the commit of a successful drop; subscribers see a single
    /// snapshot with the order in its new column and no gesture in flight.
    ///
    /// # Returns
    ///
    /// `NotFound` if no order has this id.
    pub fn commit_move(&mut self, id: &OrderId, column: ColumnId) -> Result<()> {
        let order = self.find_mut(id)?;
        order.column = column;
        self.drag = DragState::default();
        debug!(%id, %column, "moved order");
        self.broadcast();
        Ok(())
    }

    /// Lists orders in board order, optionally filtered.
    pub fn list(&self, filter: Option<OrderFilter>) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| filter.as_ref().map(|f| f.matches(o)).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Returns the current board snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(&self.orders, &self.drag)
    }

    /// Returns true if an order with this id exists.
    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.iter().any(|o| o.id == *id)
    }

    /// Returns the number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the board has no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn insert(&mut self, order: Order) -> Result<()> {
        if self.contains(&order.id) {
            return Err(StoreError::DuplicateId(order.id));
        }
        self.orders.push(order);
        Ok(())
    }

    fn find_mut(&mut self, id: &OrderId) -> Result<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Sends the current snapshot to all subscribers.
    ///
    /// Removes any disconnected subscribers (closed receivers).
    fn broadcast(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}
