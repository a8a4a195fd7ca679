//! Order types.
//!
//! An order is one ticket on the board: what was ordered, for which table,
//! and which workflow column it currently sits in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::ids::OrderId;

/// A single order on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, immutable once assigned.
    pub id: OrderId,

    /// What was ordered.
    pub text: String,

    /// Table the order belongs to.
    pub table: String,

    /// Column the order currently sits in.
    pub column: ColumnId,

    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in the board's initial column.
    pub fn new(id: impl Into<OrderId>, text: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            table: table.into(),
            column: ColumnId::initial(),
            created_at: Utc::now(),
        }
    }

    /// Places the order in a specific column.
    pub fn in_column(mut self, column: ColumnId) -> Self {
        self.column = column;
        self
    }

    /// Overwrites the mutable fields from a patch. The id is left untouched.
    pub fn apply(&mut self, patch: &OrderPatch) {
        self.text.clone_from(&patch.text);
        self.table.clone_from(&patch.table);
        self.column = patch.column;
    }
}

/// Replacement values for an existing order's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPatch {
    /// Order to update.
    pub id: OrderId,
    /// New text.
    pub text: String,
    /// New table.
    pub table: String,
    /// New column.
    pub column: ColumnId,
}

impl OrderPatch {
    /// Creates a patch for the given order.
    pub fn new(
        id: impl Into<OrderId>,
        text: impl Into<String>,
        table: impl Into<String>,
        column: ColumnId,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            table: table.into(),
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_in_initial_column() {
        let order = Order::new("X", "Burger", "5");

        assert_eq!(order.id.as_str(), "X");
        assert_eq!(order.text, "Burger");
        assert_eq!(order.table, "5");
        assert_eq!(order.column, ColumnId::initial());
    }

    #[test]
    fn test_in_column() {
        let order = Order::new("X", "Burger", "5").in_column(ColumnId::Ready);
        assert_eq!(order.column, ColumnId::Ready);
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let mut order = Order::new("X", "Burger", "5");
        let created_at = order.created_at;

        order.apply(&OrderPatch::new("X", "Fries", "7", ColumnId::InProgress));

        assert_eq!(order.id.as_str(), "X");
        assert_eq!(order.text, "Fries");
        assert_eq!(order.table, "7");
        assert_eq!(order.column, ColumnId::InProgress);
        assert_eq!(order.created_at, created_at);
    }

    #[test]
    fn test_order_serialization() {
        let order = Order::new("X", "Burger", "5");
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], "X");
        assert_eq!(json["column"], "ordered");

        let parsed: Order = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, order);
    }
}
