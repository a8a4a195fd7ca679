//! Transient drag state.
//!
//! A drag gesture records which order is being carried and which column
//! the pointer is currently over. The state lives only for the duration of
//! one gesture and is never stored with the orders.

use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::ids::OrderId;

/// Snapshot of the current drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragState {
    /// Order being dragged, if any.
    pub dragging: Option<OrderId>,
    /// Column currently hovered, if any.
    pub over: Option<ColumnId>,
}

impl DragState {
    /// Returns true when neither field is set.
    pub fn is_clear(&self) -> bool {
        self.dragging.is_none() && self.over.is_none()
    }

    /// Returns true if the given order is the one being dragged.
    pub fn is_dragging(&self, id: &OrderId) -> bool {
        self.dragging.as_ref() == Some(id)
    }
}

/// How a single field of a partial update is treated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the field as it is.
    #[default]
    Keep,
    /// Replace the field with a value.
    Set(T),
    /// Reset the field to empty.
    Clear,
}

impl<T: PartialEq + Clone> FieldUpdate<T> {
    /// Applies the update to a field. Returns true if the field changed.
    pub fn apply(&self, field: &mut Option<T>) -> bool {
        let next = match self {
            FieldUpdate::Keep => return false,
            FieldUpdate::Set(value) => Some(value.clone()),
            FieldUpdate::Clear => None,
        };
        if *field == next {
            return false;
        }
        *field = next;
        true
    }
}

/// Partial update merged into a [`DragState`].
///
/// Omitted fields are left unchanged; cleared fields are reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragUpdate {
    /// Update for the dragged order.
    pub dragging: FieldUpdate<OrderId>,
    /// Update for the hovered column.
    pub over: FieldUpdate<ColumnId>,
}

impl DragUpdate {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update that clears both fields.
    pub fn clear_all() -> Self {
        Self {
            dragging: FieldUpdate::Clear,
            over: FieldUpdate::Clear,
        }
    }

    /// Sets the dragged order.
    pub fn dragging(mut self, id: impl Into<OrderId>) -> Self {
        self.dragging = FieldUpdate::Set(id.into());
        self
    }

    /// Clears the dragged order.
    pub fn clear_dragging(mut self) -> Self {
        self.dragging = FieldUpdate::Clear;
        self
    }

    /// Sets the hovered column.
    pub fn over(mut self, column: ColumnId) -> Self {
        self.over = FieldUpdate::Set(column);
        self
    }

    /// Clears the hovered column.
    pub fn clear_over(mut self) -> Self {
        self.over = FieldUpdate::Clear;
        self
    }

    /// Merges this update into a state. Returns true if anything changed.
    pub fn apply_to(&self, state: &mut DragState) -> bool {
        let dragging_changed = self.dragging.apply(&mut state.dragging);
        let over_changed = self.over.apply(&mut state.over);
        dragging_changed || over_changed
    }
}
