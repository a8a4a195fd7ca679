//! TUI rendering using ratatui.
//!
//! Every region that can receive a pointer event is registered in the app's
//! hit map while it is drawn, with its nesting depth, so that input handling
//! can rebuild the ancestor chain under the pointer.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use board_models::{ColumnId, Order};
use board_reconciler::{Element, Focus, Overlay};

use super::app::{App, FormField};
use super::input::{ACTION_ADD, ACTION_ATTR, ACTION_HELP, ROLE_ATTR};

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 4;

const DEPTH_ROOT: u8 = 0;
const DEPTH_COLUMN: u8 = 1;
const DEPTH_LIST: u8 = 2;
const DEPTH_CARD: u8 = 3;
const DEPTH_CARD_TEXT: u8 = 4;
const DEPTH_BACKDROP: u8 = 10;
const DEPTH_DIALOG: u8 = 11;

/// Draw the TUI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    // Regions are rebuilt every frame
    app.hits.clear();
    app.hits.push(frame.area(), DEPTH_ROOT, Element::new("main"));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(CARD_HEIGHT + 2), // Board
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_board(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    if let Some(overlay) = app.reconciler.overlays().current().cloned() {
        draw_overlay(frame, app, &overlay);
    }
}

/// Draw the header bar with its buttons.
fn draw_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(9), Constraint::Length(10)])
        .split(area);

    let bar = Style::default().bg(Color::Blue).fg(Color::White);

    let title = Paragraph::new(format!(" Order Board - {} orders ", app.snapshot.len()))
        .style(bar.add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    let add_style = if app.reconciler.focus() == Focus::AddButton {
        Style::default().bg(Color::Yellow).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        bar
    };
    frame.render_widget(Paragraph::new(" [+ Add] ").style(add_style), chunks[1]);
    frame.render_widget(Paragraph::new(" [? Help] ").style(bar), chunks[2]);

    app.hits.push(
        chunks[1],
        DEPTH_COLUMN,
        Element::new("button").with_data(ACTION_ATTR, ACTION_ADD),
    );
    app.hits.push(
        chunks[2],
        DEPTH_COLUMN,
        Element::new("button").with_data(ACTION_ATTR, ACTION_HELP),
    );
}

/// Draw the three columns.
fn draw_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let now = Utc::now();
    for (column, area) in ColumnId::ALL.into_iter().zip(areas.iter().copied()) {
        draw_column(frame, app, column, area, now);
    }
}

/// Draw one column and its cards.
fn draw_column(frame: &mut Frame, app: &mut App, column: ColumnId, area: Rect, now: DateTime<Utc>) {
    let drag = &app.snapshot.drag;
    let hovered = drag.dragging.is_some() && drag.over == Some(column);

    let orders = app.snapshot.orders_in(column);
    let border_style = if hovered {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ({}) ", column.title(), orders.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.hits.push(area, DEPTH_COLUMN, Element::area("section", column));
    app.hits.push(inner, DEPTH_LIST, Element::new("ul"));

    let shown = visible_cards(orders.len(), inner.height);
    let mut y = inner.y;
    for order in &orders[..shown] {
        let rect = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let selected = app.selected.as_ref() == Some(&order.id);
        let dragged = drag.is_dragging(&order.id);
        draw_card(frame, order, rect, selected, dragged, now);

        app.hits.push(rect, DEPTH_CARD, Element::order("article", &order.id));
        let text = Rect::new(rect.x + 1, rect.y + 1, rect.width.saturating_sub(2), 2);
        app.hits.push(text, DEPTH_CARD_TEXT, Element::new("p"));
        y += CARD_HEIGHT;
    }

    let hidden = orders.len() - shown;
    if hidden > 0 && y < inner.y + inner.height {
        let more = Paragraph::new(format!(" +{} more", hidden)).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(more, Rect::new(inner.x, y, inner.width, 1));
    }
}

/// How many of `total` cards fit in `height` rows.
///
/// When not all fit, one row is kept back for the "+N more" line.
fn visible_cards(total: usize, height: u16) -> usize {
    let fit = usize::from(height / CARD_HEIGHT);
    if total <= fit {
        return total;
    }
    usize::from(height.saturating_sub(1) / CARD_HEIGHT)
}

/// Draw a single order card.
fn draw_card(frame: &mut Frame, order: &Order, area: Rect, selected: bool, dragged: bool, now: DateTime<Utc>) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let text_style = if dragged {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(order.text.clone(), text_style)),
        Line::from(Span::styled(
            format!("Table {} | {}", order.table, format_age(order.created_at, now)),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

/// Draw the footer with keybindings for the current mode.
fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.reconciler.overlays().current() {
        Some(Overlay::Help) => " Esc/?/q close help ",
        Some(Overlay::Add { .. }) => " Tab switch field | Enter add | Esc cancel ",
        Some(Overlay::Edit { .. }) => " Tab switch field | Enter save | Ctrl+D delete | Esc cancel ",
        None if app.is_dragging() => " Left/Right choose column | Space drop | Esc cancel ",
        None => " a add | Enter edit | Space move | arrows select | ? help | q quit ",
    };

    let footer = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}

/// Draw the open overlay above the board.
fn draw_overlay(frame: &mut Frame, app: &mut App, overlay: &Overlay) {
    let full = frame.area();
    app.hits.push(full, DEPTH_BACKDROP, Element::new("overlay"));

    let (title, lines, height) = match overlay {
        Overlay::Add { fields } => (" New order ", form_lines(&fields.text, &fields.table, app.field), 6),
        Overlay::Edit { fields, .. } => (" Edit order ", form_lines(&fields.text, &fields.table, app.field), 6),
        Overlay::Help => (" Help ", help_lines(), 13),
    };

    let area = centered_rect(50, height, full);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    frame.render_widget(dialog, area);

    app.hits.push(
        area,
        DEPTH_DIALOG,
        Element::new("dialog").with_data(ROLE_ATTR, "content"),
    );
}

/// Lines of the add/edit form.
fn form_lines(text: &str, table: &str, active: FormField) -> Vec<Line<'static>> {
    let field = |label: &str, value: &str, is_active: bool| {
        let marker = if is_active { "> " } else { "  " };
        let style = if is_active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}{:<7}", marker, label), style),
            Span::raw(value.to_string()),
            Span::styled(if is_active { "_" } else { "" }.to_string(), style),
        ])
    };

    vec![
        field("Order:", text, active == FormField::Text),
        field("Table:", table, active == FormField::Table),
        Line::from(""),
        Line::from(Span::styled(
            "Both fields are required",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Lines of the help overlay.
fn help_lines() -> Vec<Line<'static>> {
    [
        "Mouse",
        "  drag a card onto a column to move it",
        "  click a card to edit it",
        "Keyboard",
        "  arrows/hjkl  select a card",
        "  Space        pick up, then drop the selected card",
        "  Enter/e      edit the selected card",
        "  a            add an order",
        "  ?            toggle this help",
        "  q            quit",
        "Click outside a dialog to close it.",
    ]
    .into_iter()
    .map(Line::from)
    .collect()
}

/// A rectangle of the given width percentage and height, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Human readable time since an order was placed.
fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::seconds(59), now), "just now");
        assert_eq!(format_age(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_age(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_format_age_clock_skew() {
        let now = Utc::now();
        assert_eq!(format_age(now + Duration::seconds(30), now), "just now");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let small = centered_rect(50, 10, Rect::new(0, 0, 20, 4));
        assert_eq!(small.height, 4);
    }

    #[test]
    fn test_centered_rect_wide_terminal() {
        let rect = centered_rect(50, 10, Rect::new(0, 0, 2000, 40));
        assert_eq!(rect.width, 1000);
        assert_eq!(rect.x, 500);
    }

    #[test]
    fn test_visible_cards() {
        assert_eq!(visible_cards(3, 12), 3);
        assert_eq!(visible_cards(4, 12), 2);
        assert_eq!(visible_cards(5, 13), 3);
        assert_eq!(visible_cards(2, 3), 0);
    }

    #[test]
    fn test_overflowing_column_shows_more_line() {
        let mut app = App::new();
        for i in 0..8 {
            app.reconciler
                .submit_add(&mut app.store, &board_reconciler::FormFields::new(format!("Dish {}", i), "1"))
                .unwrap();
        }
        app.pump_renders();
        // 12 board rows leave 10 inner rows: two cards and the summary line
        let mut terminal = Terminal::new(TestBackend::new(90, 14)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (1..29).map(|x| buffer[(x, 10)].symbol().to_string()).collect();
        assert!(row.contains("+6 more"), "row was {:?}", row);
        let regions = app.hits.len();
        // root, 2 buttons, 3 columns with lists, 2 cards with text lines
        assert_eq!(regions, 1 + 2 + 6 + 4);
    }

    #[test]
    fn test_draw_registers_drop_areas() {
        let mut app = App::new();
        app.seed().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let chain = app.hits.chain_at(75, 20);
        assert_eq!(board_reconciler::resolve_area(&chain), Some(ColumnId::Ready));

        // First card of the first column, on its text line
        let chain = app.hits.chain_at(5, 3);
        let first = app.snapshot.orders_in(ColumnId::Ordered)[0].id.clone();
        assert_eq!(chain[0].tag, "p");
        assert_eq!(board_reconciler::resolve_order(&chain), Some(first));
        assert_eq!(board_reconciler::resolve_area(&chain), Some(ColumnId::Ordered));
    }

    #[test]
    fn test_draw_overlay_on_top() {
        let mut app = App::new();
        app.reconciler.toggle_help();
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let chain = app.hits.chain_at(45, 15);
        assert_eq!(chain[0].tag, "dialog");
        let chain = app.hits.chain_at(1, 1);
        assert_eq!(chain[0].tag, "overlay");
    }
}
