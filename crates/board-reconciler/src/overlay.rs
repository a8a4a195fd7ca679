//! Modal overlays and focus handoff.
//!
//! At most one overlay is open at a time. The reconciler decides which one
//! and where focus goes; drawing them is up to the host.

use board_models::OrderId;

use crate::form::FormFields;

/// An open modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// The add-order form.
    Add {
        /// Current form values.
        fields: FormFields,
    },
    /// The edit-order form for one order.
    Edit {
        /// Order being edited.
        id: OrderId,
        /// Current form values, pre-filled from the order.
        fields: FormFields,
    },
    /// Keyboard and mouse help.
    Help,
}

/// Control that should hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The board's add button, the default control.
    #[default]
    AddButton,
    /// Text input of the add form.
    AddInput,
    /// Text input of the edit form.
    EditInput,
    /// The help overlay itself.
    HelpOverlay,
}

/// Which overlay is open and which control has focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    open: Option<Overlay>,
    focus: Focus,
}

impl OverlayState {
    /// Creates a state with no overlay open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open overlay, if any.
    pub fn current(&self) -> Option<&Overlay> {
        self.open.as_ref()
    }

    /// Control that should hold focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns true if the add form is open.
    pub fn is_add_open(&self) -> bool {
        matches!(self.open, Some(Overlay::Add { .. }))
    }

    /// Returns true if the edit form is open.
    pub fn is_edit_open(&self) -> bool {
        matches!(self.open, Some(Overlay::Edit { .. }))
    }

    /// Returns true if help is shown.
    pub fn is_help_open(&self) -> bool {
        matches!(self.open, Some(Overlay::Help))
    }

    /// Mutable access to the open form's fields.
    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match self.open.as_mut()? {
            Overlay::Add { fields } | Overlay::Edit { fields, .. } => Some(fields),
            Overlay::Help => None,
        }
    }

    /// Id of the order in the open edit form.
    pub fn editing(&self) -> Option<&OrderId> {
        match &self.open {
            Some(Overlay::Edit { id, .. }) => Some(id),
            _ => None,
        }
    }

    /// Opens the add form with empty fields.
    pub(crate) fn open_add(&mut self) {
        self.open = Some(Overlay::Add {
            fields: FormFields::default(),
        });
        self.focus = Focus::AddInput;
    }

    /// Opens the edit form.
    pub(crate) fn open_edit(&mut self, id: OrderId, fields: FormFields) {
        self.open = Some(Overlay::Edit { id, fields });
        self.focus = Focus::EditInput;
    }

    /// Opens help.
    pub(crate) fn open_help(&mut self) {
        self.open = Some(Overlay::Help);
        self.focus = Focus::HelpOverlay;
    }

    /// Closes whatever is open and returns focus to the add button.
    ///
    /// Returns false if nothing was open.
    pub(crate) fn close(&mut self) -> bool {
        self.focus = Focus::AddButton;
        self.open.take().is_some()
    }
}
