use crate::models::Book;

/// Entries of the navigation sidebar, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuItem {
    Home,
    AddBook,
    SearchBooks,
    ViewBooks,
    RemoveBook,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 5] = [
        MenuItem::Home,
        MenuItem::AddBook,
        MenuItem::SearchBooks,
        MenuItem::ViewBooks,
        MenuItem::RemoveBook,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::AddBook => "Add Book",
            MenuItem::SearchBooks => "Search Books",
            MenuItem::ViewBooks => "View Books",
            MenuItem::RemoveBook => "Remove Book",
        }
    }

    /// Heading drawn above the view.
    pub(crate) fn heading(self) -> &'static str {
        match self {
            MenuItem::Home => "Welcome",
            MenuItem::AddBook => "Add a New Book",
            MenuItem::SearchBooks => "Search for Books",
            MenuItem::ViewBooks => "View All Books in Your Library",
            MenuItem::RemoveBook => "Remove a Book",
        }
    }
}

/// Snapshot of books with a cursor. Backs the results table, the full
/// listing, and the removal selector.
#[derive(Clone, Debug, Default)]
pub(crate) struct BookTable {
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl BookTable {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        Self { books, selected: 0 }
    }

    /// Swap in fresh rows, keeping the cursor where it was when possible.
    pub(crate) fn replace(&mut self, books: Vec<Book>) {
        self.books = books;
        self.ensure_in_bounds();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let last = self.books.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.selected >= self.books.len() {
            self.selected = self.books.len().saturating_sub(1);
        }
    }
}

/// State of the "Search Books" view. `results` stays `None` while the query
/// is empty, which is when no search runs at all.
#[derive(Clone, Debug, Default)]
pub(crate) struct SearchScreen {
    pub(crate) query: String,
    pub(crate) results: Option<BookTable>,
}

impl SearchScreen {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.query.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub(crate) fn set_results(&mut self, books: Option<Vec<Book>>) {
        self.results = books.map(BookTable::new);
    }

    pub(crate) fn results_mut(&mut self) -> Option<&mut BookTable> {
        self.results.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(count: i64) -> Vec<Book> {
        (1..=count)
            .map(|id| Book {
                id,
                title: format!("Title {id}"),
                author: "Author".to_string(),
                genre: String::new(),
                year: Some(2000),
            })
            .collect()
    }

    #[test]
    fn menu_lists_five_views_in_order() {
        let labels: Vec<_> = MenuItem::ALL.iter().map(|item| item.label()).collect();
        assert_eq!(
            labels,
            ["Home", "Add Book", "Search Books", "View Books", "Remove Book"]
        );
    }

    #[test]
    fn selection_is_clamped() {
        let mut table = BookTable::new(books(3));
        table.move_selection(-5);
        assert_eq!(table.selected, 0);
        table.move_selection(10);
        assert_eq!(table.current_book().map(|b| b.id), Some(3));
        table.select_first();
        assert_eq!(table.selected, 0);
        table.select_last();
        assert_eq!(table.selected, 2);
    }

    #[test]
    fn replace_pulls_cursor_back_inside() {
        let mut table = BookTable::new(books(3));
        table.select_last();
        table.replace(books(2));
        assert_eq!(table.selected, 1);
        table.replace(Vec::new());
        assert_eq!(table.selected, 0);
        assert!(table.current_book().is_none());
        table.move_selection(1);
        assert_eq!(table.selected, 0);
    }

    #[test]
    fn search_query_edits() {
        let mut search = SearchScreen::default();
        assert!(search.push_char('d'));
        assert!(!search.push_char('\n'));
        assert_eq!(search.query, "d");
        assert!(search.backspace());
        assert!(!search.backspace());
        search.set_results(Some(books(1)));
        assert_eq!(search.results_mut().map(|r| r.books.len()), Some(1));
        search.set_results(None);
        assert!(search.results.is_none());
    }
}
