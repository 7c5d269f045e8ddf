use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, TableState, Wrap,
};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::db::Library;

use super::forms::{BookField, BookForm, ConfirmRemove};
use super::helpers::{
    book_table, centered_rect, clamp_cursor, notice, pane, surface_error, HEADING_COLOR,
};
use super::screens::{BookTable, MenuItem, SearchScreen};

/// Application banner.
const APP_TITLE: &str = "Personal Library Manager";
/// Height of the banner, borders included.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the navigation sidebar.
const MENU_WIDTH: u16 = 22;
/// Rows skipped by PageUp/PageDown in tables and selectors.
const PAGE_STEP: isize = 5;

/// The view currently shown in the right pane. Each variant owns the snapshot
/// it was built from; nothing is carried over when switching views.
enum Screen {
    Home,
    AddBook(BookForm),
    SearchBooks(SearchScreen),
    ViewBooks(BookTable),
    RemoveBook(BookTable),
}

/// Whether keys drive the sidebar or the open view.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Menu,
    View,
}

/// Modal overlays drawn on top of the current screen.
enum Mode {
    Normal,
    ConfirmRemove(ConfirmRemove),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    library: Library,
    menu_selected: usize,
    screen: Screen,
    focus: Focus,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            menu_selected: 0,
            screen: Screen::Home,
            focus: Focus::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route one key press. Returns `true` when the user asked to quit.
    ///
    /// Storage failures while loading a view are returned as errors; failures
    /// while adding or removing a book are shown in the footer instead.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.focus {
                Focus::Menu => self.handle_menu_key(code, &mut exit)?,
                Focus::View => self.handle_view_key(code)?,
            },
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm)?,
        };

        Ok(exit)
    }

    fn current_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_selected]
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.move_menu(-1)?,
            KeyCode::Down => self.move_menu(1)?,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => {
                if self.current_item() != MenuItem::Home {
                    self.refresh_view()?;
                    self.focus = Focus::View;
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn move_menu(&mut self, offset: isize) -> Result<()> {
        let last = MenuItem::ALL.len() as isize - 1;
        let next = (self.menu_selected as isize + offset).clamp(0, last) as usize;
        if next != self.menu_selected {
            self.menu_selected = next;
            self.open_view(self.current_item())?;
        }
        Ok(())
    }

    /// Build the screen for `item` from the current contents of the library.
    fn open_view(&mut self, item: MenuItem) -> Result<()> {
        self.clear_status();
        self.screen = match item {
            MenuItem::Home => Screen::Home,
            MenuItem::AddBook => Screen::AddBook(BookForm::default()),
            MenuItem::SearchBooks => Screen::SearchBooks(SearchScreen::default()),
            MenuItem::ViewBooks => Screen::ViewBooks(BookTable::new(self.library.list_books()?)),
            MenuItem::RemoveBook => {
                Screen::RemoveBook(BookTable::new(self.library.list_books()?))
            }
        };
        debug!(view = item.label(), "opened view");
        Ok(())
    }

    /// Re-read storage for the open view, keeping its cursor and query.
    fn refresh_view(&mut self) -> Result<()> {
        match &mut self.screen {
            Screen::ViewBooks(table) | Screen::RemoveBook(table) => {
                table.replace(self.library.list_books()?);
            }
            Screen::SearchBooks(search) if !search.query.is_empty() => {
                let books = self.library.search_books(&search.query)?;
                search.set_results(Some(books));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_view_key(&mut self, code: KeyCode) -> Result<Mode> {
        if code == KeyCode::Esc {
            self.focus = Focus::Menu;
            return Ok(Mode::Normal);
        }

        let mut mode = Mode::Normal;
        let screen = mem::replace(&mut self.screen, Screen::Home);
        let screen = match screen {
            Screen::Home => Screen::Home,
            Screen::AddBook(form) => Screen::AddBook(self.handle_add_book(code, form)),
            Screen::SearchBooks(search) => {
                Screen::SearchBooks(self.handle_search(code, search)?)
            }
            Screen::ViewBooks(mut table) => {
                navigate(&mut table, code);
                Screen::ViewBooks(table)
            }
            Screen::RemoveBook(mut table) => {
                if code == KeyCode::Enter {
                    if let Some(book) = table.current_book().cloned() {
                        self.clear_status();
                        mode = Mode::ConfirmRemove(ConfirmRemove { book });
                    }
                } else {
                    navigate(&mut table, code);
                }
                Screen::RemoveBook(table)
            }
        };
        self.screen = screen;
        Ok(mode)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> BookForm {
        match code {
            KeyCode::Tab => form.cycle_field(true),
            KeyCode::BackTab => form.cycle_field(false),
            KeyCode::Up => form.arrow(true),
            KeyCode::Down => form.arrow(false),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(()) => form = BookForm::default(),
                Err(err) => {
                    let message = surface_error(&err);
                    warn!(error = %message, "book not added");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        form
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let book = form.parse_inputs()?;
        self.library.add_book(book)?;
        self.set_status("Book successfully added!", StatusKind::Info);
        Ok(())
    }

    fn handle_search(&mut self, code: KeyCode, mut search: SearchScreen) -> Result<SearchScreen> {
        let edited = match code {
            KeyCode::Char(ch) => search.push_char(ch),
            KeyCode::Backspace => search.backspace(),
            _ => {
                if let Some(results) = search.results_mut() {
                    navigate(results, code);
                }
                false
            }
        };

        if edited {
            let results = if search.query.is_empty() {
                None
            } else {
                Some(self.library.search_books(&search.query)?)
            };
            search.set_results(results);
        }
        Ok(search)
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.library.remove_book(confirm.book.id) {
                    Ok(true) => self.set_status("Book successfully removed!", StatusKind::Info),
                    Ok(false) => self.set_status(
                        format!("Book #{} was already removed.", confirm.book.id),
                        StatusKind::Warning,
                    ),
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        return Ok(Mode::ConfirmRemove(confirm));
                    }
                }
                self.reload_remove_list()?;
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmRemove(confirm)),
        }
    }

    fn reload_remove_list(&mut self) -> Result<()> {
        let books = self.library.list_books()?;
        match &mut self.screen {
            Screen::RemoveBook(table) => table.replace(books),
            screen => *screen = Screen::RemoveBook(BookTable::new(books)),
        }
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(rows[1]);

        self.draw_menu(frame, columns[0]);

        let view_area = columns[1];
        let heading = self.current_item().heading();
        let block = pane(heading, self.focus == Focus::View);
        match &self.screen {
            Screen::Home => self.draw_home(frame, view_area, block),
            Screen::AddBook(form) => self.draw_add_book(frame, view_area, block, form),
            Screen::SearchBooks(search) => self.draw_search(frame, view_area, block, search),
            Screen::ViewBooks(table) => {
                self.draw_books(frame, view_area, block, table, "Your library is currently empty.")
            }
            Screen::RemoveBook(table) => self.draw_remove(frame, view_area, block, table),
        }

        self.draw_footer(frame, rows[2]);

        if let Mode::ConfirmRemove(confirm) = &self.mode {
            self.draw_confirm_remove(frame, area, confirm);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(HEADING_COLOR)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Menu;
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let highlight = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let list = List::new(items)
            .block(pane("Select an Option", focused))
            .highlight_style(highlight)
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.menu_selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect, block: Block<'static>) {
        let lines = vec![
            Line::from(Span::styled(
                "Welcome to Your Personal Library!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Manage your library using the options on the left sidebar."),
        ];
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_add_book(&self, frame: &mut Frame, area: Rect, block: Block<'static>, form: &BookForm) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let fields = [
            BookField::Title,
            BookField::Author,
            BookField::Genre,
            BookField::Year,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|field| form.build_line(*field)).collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to add • Tab to switch • ↑↓ on the year to adjust",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if self.focus == Focus::View && matches!(self.mode, Mode::Normal) {
            let row = fields
                .iter()
                .position(|field| *field == form.active)
                .unwrap_or(0) as u16;
            let prefix = format!("{}: ", form.active.label()).chars().count();
            let cursor_x = clamp_cursor(inner, prefix + form.value_len(form.active));
            frame.set_cursor_position((cursor_x, inner.y + row));
        }
    }

    fn draw_search(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block<'static>,
        search: &SearchScreen,
    ) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("Search by title, author, or genre");
        let input = Paragraph::new(search.query.clone()).block(input_block.clone());
        frame.render_widget(input, chunks[0]);

        if self.focus == Focus::View && matches!(self.mode, Mode::Normal) {
            let input_inner = input_block.inner(chunks[0]);
            let cursor_x = clamp_cursor(input_inner, search.query.chars().count());
            frame.set_cursor_position((cursor_x, input_inner.y));
        }

        if let Some(results) = &search.results {
            self.draw_books(
                frame,
                chunks[1],
                Block::default(),
                results,
                "No books found that match your query.",
            );
        }
    }

    fn draw_books(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block<'static>,
        table: &BookTable,
        empty_message: &str,
    ) {
        if table.is_empty() {
            frame.render_widget(notice(empty_message, block), area);
            return;
        }

        let mut state = TableState::default();
        state.select(Some(table.selected));
        frame.render_stateful_widget(book_table(&table.books).block(block), area, &mut state);
    }

    fn draw_remove(&self, frame: &mut Frame, area: Rect, block: Block<'static>, table: &BookTable) {
        if table.is_empty() {
            frame.render_widget(notice("No books to remove.", block), area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(Paragraph::new("Select a book to remove"), chunks[0]);

        let items: Vec<ListItem> = table
            .books
            .iter()
            .map(|book| ListItem::new(format!("#{:<5} {}", book.id, book)))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(table.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Remove Book").borders(Borders::ALL);
        let lines = vec![
            Line::from(format!("Remove #{} {}?", confirm.book.id, confirm.book)),
            Line::from(""),
            Line::from(Span::styled(
                "y / Enter to remove • n / Esc to keep",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.mode, self.focus, &self.screen) {
            (Mode::ConfirmRemove(_), _, _) => &[("[y]", "Remove"), ("[n]", "Keep")],
            (_, Focus::Menu, _) => &[("[↑↓]", "Choose"), ("[Enter]", "Open"), ("[q]", "Quit")],
            (_, Focus::View, Screen::AddBook(_)) => &[
                ("[Tab]", "Next Field"),
                ("[Enter]", "Add Book"),
                ("[Esc]", "Menu"),
            ],
            (_, Focus::View, Screen::SearchBooks(_)) => {
                &[("[type]", "Search"), ("[↑↓]", "Scroll"), ("[Esc]", "Menu")]
            }
            (_, Focus::View, Screen::RemoveBook(_)) => {
                &[("[↑↓]", "Select"), ("[Enter]", "Remove Book"), ("[Esc]", "Menu")]
            }
            (_, Focus::View, _) => &[("[↑↓]", "Scroll"), ("[Esc]", "Menu")],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }
}

/// Shared cursor keys for tables and selectors.
fn navigate(table: &mut BookTable, code: KeyCode) {
    match code {
        KeyCode::Up => table.move_selection(-1),
        KeyCode::Down => table.move_selection(1),
        KeyCode::PageUp => table.move_selection(-PAGE_STEP),
        KeyCode::PageDown => table.move_selection(PAGE_STEP),
        KeyCode::Home => table.select_first(),
        KeyCode::End => table.select_last(),
        _ => {}
    }
}
