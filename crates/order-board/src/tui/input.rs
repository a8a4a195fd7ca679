//! Keyboard and mouse handling.
//!
//! Turns crossterm events into reconciler calls. Mouse gestures go through
//! the hit map so that the reconciler sees the same kind of ancestor chain
//! for a drag as it would for any other pointer event; keyboard carrying
//! builds the equivalent chains directly.

use board_models::ColumnId;
use board_reconciler::{find_tagged_ancestor, resolve_area, resolve_order, Element, Outcome, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use super::app::{step, App, FormField, PointerGesture};

/// Data attribute naming a header button's action.
pub(super) const ACTION_ATTR: &str = "action";

/// Data attribute marking an overlay's content box.
pub(super) const ROLE_ATTR: &str = "role";

/// Header button opening the add form.
pub(super) const ACTION_ADD: &str = "add";

/// Header button toggling help.
pub(super) const ACTION_HELP: &str = "help";

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        let overlays = self.reconciler.overlays();
        if overlays.is_help_open() {
            self.handle_help_key(key);
        } else if overlays.current().is_some() {
            self.handle_form_key(key)?;
        } else {
            self.handle_board_key(key)?;
        }

        self.pump_renders();
        Ok(())
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.reconciler.overlays().current().is_some() {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                let chain = self.hits.chain_at(mouse.column, mouse.row);
                let inside = find_tagged_ancestor(&chain, |e| e.data(ROLE_ATTR)).is_some();
                self.reconciler.dismiss_overlay(inside);
            }
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_drag(mouse.column, mouse.row)?,
            MouseEventKind::Up(MouseButton::Left) => self.pointer_up(mouse.column, mouse.row)?,
            _ => {}
        }

        self.pump_renders();
        Ok(())
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            self.reconciler.toggle_help();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let editing = self.reconciler.overlays().is_edit_open();

        match key.code {
            KeyCode::Esc => {
                if editing {
                    self.reconciler.cancel_edit();
                } else {
                    self.reconciler.toggle_add();
                }
            }
            KeyCode::Enter => {
                let fields = self.reconciler.form_mut().cloned().unwrap_or_default();
                let outcome = if editing {
                    self.reconciler.submit_edit(&mut self.store, &fields)?
                } else {
                    self.reconciler.submit_add(&mut self.store, &fields)?
                };
                if outcome == Outcome::Ignored {
                    debug!("form submission incomplete");
                }
            }
            KeyCode::Char('d') if editing && key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reconciler.delete(&mut self.store)?;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = self.field.toggle();
            }
            KeyCode::Backspace => {
                let field = self.field;
                if let Some(fields) = self.reconciler.form_mut() {
                    match field {
                        FormField::Text => fields.text.pop(),
                        FormField::Table => fields.table.pop(),
                    };
                }
            }
            KeyCode::Char(c) => {
                let field = self.field;
                if let Some(fields) = self.reconciler.form_mut() {
                    match field {
                        FormField::Text => fields.text.push(c),
                        FormField::Table => fields.table.push(c),
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.carrying {
            return self.handle_carry_key(key);
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('?') => {
                self.reconciler.toggle_help();
            }
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char(' ') => self.pick_up_selected()?,
            KeyCode::Up | KeyCode::Char('k') => self.select_vertical(false),
            KeyCode::Down | KeyCode::Char('j') => self.select_vertical(true),
            KeyCode::Left | KeyCode::Char('h') => self.select_horizontal(false),
            KeyCode::Right | KeyCode::Char('l') => self.select_horizontal(true),
            _ => {}
        }
        Ok(())
    }

    fn handle_carry_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.carry_towards(false)?,
            KeyCode::Right | KeyCode::Char('l') => self.carry_towards(true)?,
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.reconciler.commit_drop(&mut self.store, &[], &self.transfer)?;
                self.finish_drag()?;
            }
            KeyCode::Esc => self.finish_drag()?,
            _ => {}
        }
        Ok(())
    }

    fn open_add(&mut self) {
        self.reconciler.toggle_add();
        self.field = FormField::Text;
    }

    fn edit_selected(&mut self) {
        let Some(order) = self.selected_order() else {
            return;
        };
        let chain = [Element::order("article", &order.id)];
        self.reconciler.open_edit(&self.store, &chain);
        self.field = FormField::Text;
    }

    /// Starts a keyboard drag of the selected card.
    fn pick_up_selected(&mut self) -> Result<()> {
        let Some(order) = self.selected_order() else {
            return Ok(());
        };
        let card = [Element::order("article", &order.id)];
        let column = [Element::area("section", order.column)];

        let outcome = self
            .reconciler
            .drag_start(&mut self.store, &card, &mut self.transfer)?;
        if outcome == Outcome::Handled {
            self.reconciler.drag_over(&mut self.store, &column)?;
            self.carrying = true;
        }
        Ok(())
    }

    /// Hovers the column next to the current one.
    fn carry_towards(&mut self, right: bool) -> Result<()> {
        let drag = self.store.get_drag_state();
        let from = drag
            .over
            .or_else(|| self.selected_order().map(|o| o.column))
            .unwrap_or_else(ColumnId::initial);

        if let Some(target) = step(from, right) {
            let chain = [Element::area("section", target)];
            self.reconciler.drag_over(&mut self.store, &chain)?;
        }
        Ok(())
    }

    fn pointer_down(&mut self, x: u16, y: u16) {
        let chain = self.hits.chain_at(x, y);

        match find_tagged_ancestor(&chain, |e| e.data(ACTION_ATTR)) {
            Some(ACTION_ADD) => {
                self.open_add();
                return;
            }
            Some(ACTION_HELP) => {
                self.reconciler.toggle_help();
                return;
            }
            _ => {}
        }

        if let Some(id) = resolve_order(&chain) {
            self.selected = Some(id);
            self.pointer = Some(PointerGesture {
                press_chain: chain,
                dragging: false,
            });
        }
    }

    fn pointer_drag(&mut self, x: u16, y: u16) -> Result<()> {
        let Some(pointer) = self.pointer.as_mut() else {
            return Ok(());
        };

        if !pointer.dragging {
            let press_chain = pointer.press_chain.clone();
            let outcome = self
                .reconciler
                .drag_start(&mut self.store, &press_chain, &mut self.transfer)?;
            if outcome == Outcome::Ignored {
                self.pointer = None;
                return Ok(());
            }
            if let Some(pointer) = self.pointer.as_mut() {
                pointer.dragging = true;
            }
        }

        let chain = self.hits.chain_at(x, y);
        self.reconciler.drag_over(&mut self.store, &chain)?;
        Ok(())
    }

    fn pointer_up(&mut self, x: u16, y: u16) -> Result<()> {
        let Some(pointer) = self.pointer.take() else {
            return Ok(());
        };

        if pointer.dragging {
            let chain = self.hits.chain_at(x, y);
            // Outside every column the gesture is abandoned, not dropped
            if resolve_area(&chain).is_some() {
                self.reconciler.commit_drop(&mut self.store, &chain, &self.transfer)?;
            }
            self.finish_drag()?;
        } else {
            self.reconciler.open_edit(&self.store, &pointer.press_chain);
            self.field = FormField::Text;
        }
        Ok(())
    }

    /// Ends the current drag gesture, whatever state it is in.
    fn finish_drag(&mut self) -> Result<()> {
        self.reconciler.drag_end(&mut self.store)?;
        self.transfer.clear();
        self.carrying = false;
        self.pointer = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_models::OrderId;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect { x, y, width, height }
    }

    /// Registers the regions a render would for one card in the first column.
    fn layout(app: &mut App, id: &OrderId) {
        app.hits.clear();
        app.hits.push(rect(0, 0, 90, 30), 0, Element::new("main"));
        app.hits.push(rect(0, 1, 30, 28), 1, Element::area("section", ColumnId::Ordered));
        app.hits.push(rect(30, 1, 30, 28), 1, Element::area("section", ColumnId::InProgress));
        app.hits.push(rect(60, 1, 30, 28), 1, Element::area("section", ColumnId::Ready));
        app.hits.push(rect(1, 2, 28, 4), 3, Element::order("article", id));
    }

    fn seeded() -> App {
        let mut app = App::new();
        app.seed().unwrap();
        app
    }

    #[test]
    fn test_add_through_form() {
        let mut app = App::new();

        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Burger");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "5");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        let orders = app.snapshot.orders_in(ColumnId::Ordered);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].text, "Burger");
        assert_eq!(orders[0].table, "5");
        assert!(app.reconciler.overlays().current().is_none());
    }

    #[test]
    fn test_incomplete_add_keeps_form_open() {
        let mut app = App::new();

        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Burger");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(app.snapshot.is_empty());
        assert!(app.reconciler.overlays().is_add_open());
    }

    #[test]
    fn test_edit_table_through_form() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();

        app.handle_key(key(KeyCode::Char('e'))).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        type_text(&mut app, "7");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        let order = app.store.get_order_by_id(&id).unwrap();
        assert_eq!(order.table, "7");
        assert_eq!(order.column, ColumnId::Ordered);
    }

    #[test]
    fn test_delete_through_edit_form() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();

        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(ctrl('d')).unwrap();

        assert!(app.store.get_order_by_id(&id).is_none());
        assert!(app.reconciler.overlays().current().is_none());
        assert_ne!(app.selected, Some(id));
    }

    #[test]
    fn test_keyboard_carry_and_drop() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();

        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert!(app.is_dragging());
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap();

        assert_eq!(app.store.get_order_by_id(&id).unwrap().column, ColumnId::Ready);
        assert!(app.store.get_drag_state().is_clear());
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_keyboard_carry_aborted() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();

        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Esc)).unwrap();

        assert_eq!(app.store.get_order_by_id(&id).unwrap().column, ColumnId::Ordered);
        assert_eq!(app.store.get_drag_state().dragging, None);
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_mouse_drag_and_drop() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();
        layout(&mut app, &id);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 10)).unwrap();
        assert_eq!(app.snapshot.drag.over, Some(ColumnId::InProgress));
        assert_eq!(app.snapshot.drag.dragging.as_ref(), Some(&id));

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 70, 10)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 70, 10)).unwrap();

        assert_eq!(app.store.get_order_by_id(&id).unwrap().column, ColumnId::Ready);
        assert!(app.snapshot.drag.is_clear());
    }

    #[test]
    fn test_mouse_drag_released_outside_board() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();
        layout(&mut app, &id);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 10)).unwrap();
        assert_eq!(app.snapshot.drag.over, Some(ColumnId::InProgress));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 95, 40)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 95, 40)).unwrap();

        assert_eq!(app.store.get_order_by_id(&id).unwrap().column, ColumnId::Ordered);
        assert_eq!(app.store.get_drag_state().dragging, None);
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_aborted_carry_does_not_steer_next_drag() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();

        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Right)).unwrap();
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.store.get_drag_state().over, Some(ColumnId::Ready));

        layout(&mut app, &id);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 95, 40)).unwrap();
        assert_eq!(app.store.get_drag_state().over, None);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 95, 40)).unwrap();

        assert_eq!(app.store.get_order_by_id(&id).unwrap().column, ColumnId::Ordered);
    }

    #[test]
    fn test_click_opens_edit() {
        let mut app = seeded();
        let id = app.selected.clone().unwrap();
        layout(&mut app, &id);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3)).unwrap();
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 3)).unwrap();

        assert_eq!(app.reconciler.overlays().editing(), Some(&id));
    }

    #[test]
    fn test_backdrop_click_dismisses_overlay() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        app.hits.push(rect(0, 0, 90, 30), 10, Element::new("overlay"));
        app.hits.push(
            rect(20, 10, 40, 10),
            11,
            Element::new("dialog").with_data(ROLE_ATTR, "content"),
        );

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 12)).unwrap();
        assert!(app.reconciler.overlays().is_help_open());

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2)).unwrap();
        assert!(app.reconciler.overlays().current().is_none());
    }

    #[test]
    fn test_header_buttons() {
        let mut app = App::new();
        app.hits.push(rect(0, 0, 8, 1), 1, Element::new("button").with_data(ACTION_ATTR, ACTION_ADD));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 0)).unwrap();

        assert!(app.reconciler.overlays().is_add_open());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(ctrl('c')).unwrap();
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }
}
