//! Immutable board snapshots handed to render subscribers.

use board_models::{ColumnId, DragState, Order, OrderId};
use serde::Serialize;

/// Orders of a single column, in board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOrders {
    /// The column.
    pub column: ColumnId,
    /// Orders currently in the column.
    pub orders: Vec<Order>,
}

/// Full board state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// One entry per column, in [`ColumnId::ALL`] order.
    pub columns: Vec<ColumnOrders>,
    /// Drag state at the time of the snapshot.
    pub drag: DragState,
}

impl BoardSnapshot {
    /// Groups orders by column.
    pub fn new(orders: &[Order], drag: &DragState) -> Self {
        let columns = ColumnId::ALL
            .iter()
            .map(|&column| ColumnOrders {
                column,
                orders: orders
                    .iter()
                    .filter(|o| o.column == column)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            columns,
            drag: drag.clone(),
        }
    }

    /// Orders in the given column.
    pub fn orders_in(&self, column: ColumnId) -> &[Order] {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.orders.as_slice())
            .unwrap_or(&[])
    }

    /// Finds an order anywhere on the board.
    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.columns
            .iter()
            .flat_map(|c| c.orders.iter())
            .find(|o| o.id == *id)
    }

    /// Total number of orders.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.orders.len()).sum()
    }

    /// Returns true if the board has no orders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::new(&[], &DragState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_column_in_board_order() {
        let orders = vec![
            Order::new("a", "Burger", "5").in_column(ColumnId::Ready),
            Order::new("b", "Fries", "5"),
            Order::new("c", "Shake", "7"),
        ];

        let snapshot = BoardSnapshot::new(&orders, &DragState::default());

        let columns: Vec<ColumnId> = snapshot.columns.iter().map(|c| c.column).collect();
        assert_eq!(columns, ColumnId::ALL.to_vec());

        let ordered: Vec<&str> = snapshot
            .orders_in(ColumnId::Ordered)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["b", "c"]);
        assert!(snapshot.orders_in(ColumnId::InProgress).is_empty());
        assert_eq!(snapshot.orders_in(ColumnId::Ready).len(), 1);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_find() {
        let orders = vec![Order::new("a", "Burger", "5")];
        let snapshot = BoardSnapshot::new(&orders, &DragState::default());

        assert_eq!(snapshot.find(&"a".into()).map(|o| o.text.as_str()), Some("Burger"));
        assert!(snapshot.find(&"z".into()).is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let snapshot = BoardSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.drag.is_clear());
        assert_eq!(snapshot.columns.len(), ColumnId::ALL.len());
    }
}
