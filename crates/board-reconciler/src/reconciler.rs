//! Reconciler - maps UI gestures onto store mutations.
//!
//! Drag gesture state machine:
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_over*--> Dragging --drag_end--> Idle
//!                                      \--commit_drop--> Idle
//! ```
//!
//! `commit_drop` and `drag_end` may arrive in either order. Each one leaves
//! the board consistent on its own: a drop commits and clears the whole drag
//! state, drag end clears the dragged order whether or not a drop happened,
//! and clearing an already clear field is a no-op.

use board_models::{DragUpdate, Order, OrderId, OrderPatch};
use board_store::{OrderStore, StoreError};
use tracing::{debug, trace};

use crate::ancestry::{resolve_area, resolve_order, Element};
use crate::error::Result;
use crate::form::FormFields;
use crate::ids::{IdGenerator, UuidIds};
use crate::overlay::{Focus, OverlayState};
use crate::transfer::{DragTransfer, TEXT_PLAIN};

/// What a gesture amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gesture changed board or overlay state.
    Handled,
    /// The gesture carried no usable intent and changed nothing.
    Ignored,
}

/// Translates gestures and form submissions into store calls.
///
/// The reconciler never owns the store; each handler borrows it for the
/// duration of one gesture.
#[derive(Debug, Default)]
pub struct Reconciler<G = UuidIds> {
    ids: G,
    overlays: OverlayState,
}

impl<G: IdGenerator> Reconciler<G> {
    /// Creates a reconciler drawing fresh order ids from `ids`.
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            overlays: OverlayState::new(),
        }
    }

    /// Overlay and focus state.
    pub fn overlays(&self) -> &OverlayState {
        &self.overlays
    }

    /// Control that should hold focus.
    pub fn focus(&self) -> Focus {
        self.overlays.focus()
    }

    /// Fields of the open add or edit form, for the host to edit.
    pub fn form_mut(&mut self) -> Option<&mut FormFields> {
        self.overlays.fields_mut()
    }

    /// Starts dragging the card found in `chain`.
    ///
    /// Any hovered column left over from a previous gesture is cleared.
    ///
    /// The order id is mirrored into `transfer` so a drop target can recover
    /// it without access to the store's drag state.
    pub fn drag_start(
        &mut self,
        store: &mut OrderStore,
        chain: &[Element],
        transfer: &mut DragTransfer,
    ) -> Result<Outcome> {
        let Some(id) = resolve_order(chain) else {
            trace!("drag start outside any card");
            return Ok(Outcome::Ignored);
        };
        if !store.contains(&id) {
            trace!(%id, "drag start on unknown order");
            return Ok(Outcome::Ignored);
        }

        transfer.set_data(TEXT_PLAIN, id.as_str());
        debug!(%id, "drag started");
        // Hover from an earlier gesture must not become this one's target
        store.set_drag_state(DragUpdate::new().dragging(id).clear_over())?;
        Ok(Outcome::Handled)
    }

    /// Records the column under the pointer.
    ///
    /// A chain without a drop area changes nothing.
    pub fn drag_over(&mut self, store: &mut OrderStore, chain: &[Element]) -> Result<Outcome> {
        let Some(column) = resolve_area(chain) else {
            trace!("drag over outside any drop area");
            return Ok(Outcome::Ignored);
        };

        store.set_drag_state(DragUpdate::new().over(column))?;
        Ok(Outcome::Handled)
    }

    /// Ends the gesture. Always clears the dragged order.
    pub fn drag_end(&mut self, store: &mut OrderStore) -> Result<Outcome> {
        debug!("drag ended");
        store.set_drag_state(DragUpdate::new().clear_dragging())?;
        Ok(Outcome::Handled)
    }

    /// Commits a drop: moves the dragged order into the target column.
    ///
    /// The target is the drop area in `chain`, falling back to the hovered
    /// column. The order is the one in the drag state, falling back to the
    /// id carried in `transfer`. If either cannot be determined the drop is
    /// ignored and the drag state is left for `drag_end` to clean up.
    pub fn commit_drop(
        &mut self,
        store: &mut OrderStore,
        chain: &[Element],
        transfer: &DragTransfer,
    ) -> Result<Outcome> {
        let drag = store.get_drag_state();

        let Some(column) = resolve_area(chain).or(drag.over) else {
            trace!("drop outside any drop area");
            return Ok(Outcome::Ignored);
        };

        let id = drag.dragging.or_else(|| {
            transfer
                .get_data(TEXT_PLAIN)
                .map(OrderId::from)
                .filter(|id| store.contains(id))
        });
        let Some(id) = id else {
            trace!(%column, "drop without a dragged order");
            return Ok(Outcome::Ignored);
        };

        store.commit_move(&id, column)?;
        Ok(Outcome::Handled)
    }

    /// Opens the add form, or closes it if it is open. Fields start empty.
    pub fn toggle_add(&mut self) -> Outcome {
        if self.overlays.is_add_open() {
            self.overlays.close();
        } else {
            self.overlays.open_add();
        }
        Outcome::Handled
    }

    /// Adds a new order from the add form.
    ///
    /// Empty text or table (after trimming) is ignored and the form stays
    /// open. On success the order lands in the initial column, any stale
    /// hover is cleared and the add form, if open, closes.
    ///
    /// Submissions while the edit form or help is open are ignored and leave
    /// that overlay open. With no overlay open the fields are still accepted,
    /// which is how sample orders are seeded.
    pub fn submit_add(&mut self, store: &mut OrderStore, fields: &FormFields) -> Result<Outcome> {
        if self.overlays.current().is_some() && !self.overlays.is_add_open() {
            trace!("add submitted while another overlay is open");
            return Ok(Outcome::Ignored);
        }
        let Some(valid) = fields.validate() else {
            trace!("add form incomplete");
            return Ok(Outcome::Ignored);
        };

        let order = Order::new(self.ids.next_id(), valid.text, valid.table);
        debug!(id = %order.id, "order submitted");
        store.add_order(order)?;
        store.set_drag_state(DragUpdate::new().clear_over())?;
        if self.overlays.is_add_open() {
            self.overlays.close();
        }
        Ok(Outcome::Handled)
    }

    /// Opens the edit form for the card found in `chain`.
    ///
    /// Unknown or missing orders are ignored.
    pub fn open_edit(&mut self, store: &OrderStore, chain: &[Element]) -> Outcome {
        let Some(order) = resolve_order(chain).and_then(|id| store.get_order_by_id(&id)) else {
            trace!("edit requested for no known order");
            return Outcome::Ignored;
        };

        let fields = FormFields::new(order.text, order.table);
        self.overlays.open_edit(order.id, fields);
        Outcome::Handled
    }

    /// Closes the edit form without saving.
    pub fn cancel_edit(&mut self) -> Outcome {
        if !self.overlays.is_edit_open() {
            return Outcome::Ignored;
        }
        self.overlays.close();
        Outcome::Handled
    }

    /// Saves the edit form.
    ///
    /// Uses the same validation as adding. The order keeps its column.
    pub fn submit_edit(&mut self, store: &mut OrderStore, fields: &FormFields) -> Result<Outcome> {
        let Some(id) = self.overlays.editing().cloned() else {
            trace!("edit submitted with no edit form open");
            return Ok(Outcome::Ignored);
        };
        let Some(valid) = fields.validate() else {
            trace!(%id, "edit form incomplete");
            return Ok(Outcome::Ignored);
        };

        let column = store
            .get_order_by_id(&id)
            .map(|o| o.column)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        store.update_order(OrderPatch::new(id, valid.text, valid.table, column))?;
        self.overlays.close();
        Ok(Outcome::Handled)
    }

    /// Deletes the order in the open edit form and closes it.
    pub fn delete(&mut self, store: &mut OrderStore) -> Result<Outcome> {
        let Some(id) = self.overlays.editing().cloned() else {
            return Ok(Outcome::Ignored);
        };

        store.delete_order(&id)?;
        self.overlays.close();
        Ok(Outcome::Handled)
    }

    /// Shows help, or hides it if shown.
    pub fn toggle_help(&mut self) -> Outcome {
        if self.overlays.is_help_open() {
            self.overlays.close();
        } else {
            self.overlays.open_help();
        }
        Outcome::Handled
    }

    /// Handles a click on an overlay's backdrop.
    ///
    /// Clicks inside the overlay's content are ignored; clicks outside it
    /// close the overlay and return focus to the add button.
    pub fn dismiss_overlay(&mut self, inside_content: bool) -> Outcome {
        if inside_content || !self.overlays.close() {
            return Outcome::Ignored;
        }
        Outcome::Handled
    }
}
