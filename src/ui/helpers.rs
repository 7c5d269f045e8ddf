use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::models::Book;

/// Column headings for every book table.
pub(crate) const TABLE_HEADERS: [&str; 5] = ["ID", "Title", "Author", "Genre", "Year"];

/// Accent used for headings.
pub(crate) const HEADING_COLOR: Color = Color::Rgb(210, 105, 30);

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Column for a text cursor `offset` cells into `area`, pinned to the last
/// column when the text is wider than the area.
pub(crate) fn clamp_cursor(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}

/// Five-column table over `books`. Column order is fixed.
pub(crate) fn book_table(books: &[Book]) -> Table<'static> {
    let header = Row::new(TABLE_HEADERS.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    );

    let rows = books.iter().map(|book| {
        Row::new(vec![
            Cell::from(book.id.to_string()),
            Cell::from(book.title.clone()),
            Cell::from(book.author.clone()),
            Cell::from(book.genre.clone()),
            Cell::from(book.year.map(|year| year.to_string()).unwrap_or_default()),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Length(6),
    ];

    Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("▶ ")
}

/// Yellow informational paragraph for "nothing here" states.
pub(crate) fn notice(text: &str, block: Block<'static>) -> Paragraph<'static> {
    Paragraph::new(Line::from(text.to_string()))
        .style(Style::default().fg(Color::Yellow))
        .block(block)
        .wrap(Wrap { trim: true })
}

/// Bordered block with a heading title, highlighted when it has focus.
pub(crate) fn pane(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::styled(
            title.to_string(),
            Style::default()
                .fg(HEADING_COLOR)
                .add_modifier(Modifier::BOLD),
        ))
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn surface_error_reports_root_cause() {
        let err = Err::<(), _>(anyhow!("database is locked"))
            .context("failed to insert book")
            .unwrap_err();
        assert_eq!(surface_error(&err), "database is locked");
    }

    #[test]
    fn cursor_is_pinned_to_last_column() {
        let area = Rect::new(10, 0, 20, 1);
        assert_eq!(clamp_cursor(area, 0), 10);
        assert_eq!(clamp_cursor(area, 5), 15);
        assert_eq!(clamp_cursor(area, 500), 29);
        assert_eq!(clamp_cursor(area, usize::MAX), 29);
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 30, area);
        assert!(popup.x >= 20 && popup.right() <= 80);
        assert!(popup.y >= 14 && popup.bottom() <= 26);
    }
}
