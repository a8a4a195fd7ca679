//! TUI application state.

use std::sync::mpsc::Receiver;

use board_models::{ColumnId, Order, OrderId};
use board_reconciler::{DragTransfer, Element, FormFields, Reconciler, Result, UuidIds};
use board_store::{BoardSnapshot, OrderStore};
use tracing::info;

use super::hitmap::HitMap;

/// Orders placed on the board by `--seed`.
const SAMPLE_ORDERS: &[(&str, &str)] = &[
    ("Burger", "5"),
    ("Fries", "5"),
    ("Milkshake", "2"),
    ("Caesar salad", "7"),
];

/// Field of the add/edit form that receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// What was ordered.
    #[default]
    Text,
    /// Table number.
    Table,
}

impl FormField {
    /// The other field.
    pub fn toggle(self) -> Self {
        match self {
            FormField::Text => FormField::Table,
            FormField::Table => FormField::Text,
        }
    }
}

/// A mouse press that may turn into a drag.
#[derive(Debug, Clone)]
pub(super) struct PointerGesture {
    /// Ancestor chain under the pointer when the button went down.
    pub(super) press_chain: Vec<Element>,
    /// Whether the pointer has moved since the press.
    pub(super) dragging: bool,
}

/// TUI application state.
pub struct App {
    /// Board state. Only mutated through the reconciler.
    pub store: OrderStore,
    /// Gesture handling and overlay state.
    pub reconciler: Reconciler,
    /// Snapshots published by the store.
    renders: Receiver<BoardSnapshot>,
    /// Latest snapshot, drawn on every frame.
    pub snapshot: BoardSnapshot,
    /// Regions drawn in the last frame.
    pub hits: HitMap,
    /// Card with keyboard selection.
    pub selected: Option<OrderId>,
    /// Form field receiving typing.
    pub field: FormField,

    // Gesture state
    /// Mouse gesture in progress.
    pub(super) pointer: Option<PointerGesture>,
    /// Whether a keyboard drag is in progress.
    pub(super) carrying: bool,
    /// Payload of the drag in progress.
    pub(super) transfer: DragTransfer,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new App with an empty board.
    pub fn new() -> Self {
        let mut store = OrderStore::new();
        let renders = store.subscribe();
        let snapshot = store.snapshot();

        Self {
            store,
            reconciler: Reconciler::new(UuidIds),
            renders,
            snapshot,
            hits: HitMap::new(),
            selected: None,
            field: FormField::Text,
            pointer: None,
            carrying: false,
            transfer: DragTransfer::new(),
            should_quit: false,
        }
    }

    /// Adds the sample orders through the regular add flow.
    pub fn seed(&mut self) -> Result<()> {
        for (text, table) in SAMPLE_ORDERS {
            self.reconciler
                .submit_add(&mut self.store, &FormFields::new(*text, *table))?;
        }
        info!(count = SAMPLE_ORDERS.len(), "seeded sample orders");
        self.pump_renders();
        Ok(())
    }

    /// Takes the newest snapshot from the store's render channel.
    ///
    /// Returns true if anything arrived.
    pub fn pump_renders(&mut self) -> bool {
        let Some(latest) = self.renders.try_iter().last() else {
            return false;
        };
        self.snapshot = latest;
        self.ensure_selection();
        true
    }

    /// Currently selected order, if it is still on the board.
    pub fn selected_order(&self) -> Option<&Order> {
        self.selected.as_ref().and_then(|id| self.snapshot.find(id))
    }

    /// Whether a drag gesture (mouse or keyboard) is in progress.
    pub fn is_dragging(&self) -> bool {
        self.carrying || self.pointer.as_ref().is_some_and(|p| p.dragging)
    }

    /// Keeps the selection on an existing card.
    fn ensure_selection(&mut self) {
        if self.selected_order().is_some() {
            return;
        }
        self.selected = self
            .snapshot
            .columns
            .iter()
            .flat_map(|c| c.orders.first())
            .map(|o| o.id.clone())
            .next();
    }

    /// Moves the selection up or down within its column.
    pub(super) fn select_vertical(&mut self, down: bool) {
        let Some(current) = self.selected_order() else {
            self.ensure_selection();
            return;
        };
        let orders = self.snapshot.orders_in(current.column);
        let Some(pos) = orders.iter().position(|o| o.id == current.id) else {
            return;
        };
        let next = if down {
            (pos + 1).min(orders.len() - 1)
        } else {
            pos.saturating_sub(1)
        };
        self.selected = Some(orders[next].id.clone());
    }

    /// Moves the selection to the nearest non-empty column in a direction.
    pub(super) fn select_horizontal(&mut self, right: bool) {
        let Some(mut column) = self.selected_order().map(|o| o.column) else {
            self.ensure_selection();
            return;
        };
        while let Some(next) = step(column, right) {
            if let Some(first) = self.snapshot.orders_in(next).first() {
                self.selected = Some(first.id.clone());
                return;
            }
            column = next;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Neighbouring column in a direction.
pub(super) fn step(column: ColumnId, right: bool) -> Option<ColumnId> {
    if right {
        column.next()
    } else {
        column.prev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_is_empty() {
        let app = App::new();
        assert!(app.snapshot.is_empty());
        assert!(app.selected.is_none());
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_seed_populates_initial_column() {
        let mut app = App::new();
        app.seed().unwrap();

        assert_eq!(app.snapshot.orders_in(ColumnId::initial()).len(), SAMPLE_ORDERS.len());
        assert_eq!(app.selected_order().map(|o| o.text.as_str()), Some("Burger"));
    }

    #[test]
    fn test_select_vertical() {
        let mut app = App::new();
        app.seed().unwrap();

        app.select_vertical(true);
        assert_eq!(app.selected_order().unwrap().text, "Fries");

        app.select_vertical(false);
        app.select_vertical(false);
        assert_eq!(app.selected_order().unwrap().text, "Burger");
    }

    #[test]
    fn test_select_horizontal_skips_empty_columns() {
        let mut app = App::new();
        app.seed().unwrap();
        let last = app.snapshot.orders_in(ColumnId::Ordered)[3].id.clone();
        app.store.commit_move(&last, ColumnId::Ready).unwrap();
        app.pump_renders();

        app.select_horizontal(true);
        assert_eq!(app.selected.as_ref(), Some(&last));

        app.select_horizontal(true);
        assert_eq!(app.selected.as_ref(), Some(&last));
    }

    #[test]
    fn test_form_field_toggle() {
        assert_eq!(FormField::Text.toggle(), FormField::Table);
        assert_eq!(FormField::Table.toggle(), FormField::Text);
    }
}
