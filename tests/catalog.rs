use personal_library::{Book, BookError, Library, NewBook, YEAR_MAX};
use tempfile::TempDir;

fn fresh_library() -> (TempDir, Library) {
    let dir = TempDir::new().unwrap();
    let library = Library::open(dir.path().join("library.sqlite")).unwrap();
    (dir, library)
}

fn add(library: &Library, title: &str, author: &str, genre: &str, year: i64) -> Book {
    library
        .add_book(NewBook::new(title, author, genre, year).unwrap())
        .unwrap()
}

fn ids(books: &[Book]) -> Vec<i64> {
    books.iter().map(|book| book.id).collect()
}

#[test]
fn fresh_store_is_empty() {
    let (_dir, library) = fresh_library();
    assert!(library.list_books().unwrap().is_empty());
    assert!(library.search_books("anything").unwrap().is_empty());
}

#[test]
fn add_then_list_contains_exactly_one_new_row() {
    let (_dir, library) = fresh_library();
    add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    let before = library.list_books().unwrap();

    let added = add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    let after = library.list_books().unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(!ids(&before).contains(&added.id));
    let matching: Vec<_> = after.iter().filter(|book| book.id == added.id).collect();
    assert_eq!(matching, vec![&added]);
    assert_eq!(added.title, "Dune");
    assert_eq!(added.year, Some(1965));
}

#[test]
fn remove_drops_exactly_that_row() {
    let (_dir, library) = fresh_library();
    let first = add(&library, "A", "One", "", 2000);
    let second = add(&library, "B", "Two", "", 2001);

    assert!(library.remove_book(first.id).unwrap());
    let remaining = library.list_books().unwrap();
    assert_eq!(ids(&remaining), vec![second.id]);
}

#[test]
fn removing_unknown_id_changes_nothing() {
    let (_dir, library) = fresh_library();
    add(&library, "A", "One", "", 2000);
    let before = library.list_books().unwrap();

    assert!(!library.remove_book(12345).unwrap());
    assert!(!library.remove_book(12345).unwrap());
    assert_eq!(library.list_books().unwrap(), before);
}

#[test]
fn search_finds_rows_by_any_substring() {
    let (_dir, library) = fresh_library();
    let book = add(&library, "The Left Hand of Darkness", "Ursula K. Le Guin", "Sci-Fi", 1969);
    add(&library, "Emma", "Jane Austen", "Romance", 1915);

    for query in ["left hand", "DARK", "le guin", "k. le", "sci-f", "-"] {
        let found = library.search_books(query).unwrap();
        assert!(found.contains(&book), "query {query:?} missed");
    }
}

#[test]
fn search_ignores_id_and_year() {
    let (_dir, library) = fresh_library();
    add(&library, "Emma", "Jane Austen", "Romance", 1915);
    assert!(library.search_books("1915").unwrap().is_empty());
    assert!(library.search_books("1").unwrap().is_empty());
}

#[test]
fn empty_query_matches_full_listing() {
    let (_dir, library) = fresh_library();
    add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    add(&library, "1984", "George Orwell", "Dystopian", 1949);
    add(&library, "Untitled", "Anon", "", YEAR_MAX);

    assert_eq!(library.search_books("").unwrap(), library.list_books().unwrap());
}

#[test]
fn invalid_books_never_reach_storage() {
    let (_dir, library) = fresh_library();
    assert_eq!(
        NewBook::new("", "Frank Herbert", "Sci-Fi", 1965).unwrap_err(),
        BookError::MissingTitle
    );
    assert_eq!(
        NewBook::new("Dune", "", "Sci-Fi", 1965).unwrap_err(),
        BookError::MissingAuthor
    );
    assert_eq!(
        NewBook::new("Dune", "Frank Herbert", "Sci-Fi", 1899).unwrap_err(),
        BookError::YearOutOfRange(1899)
    );
    assert!(library.list_books().unwrap().is_empty());
}

#[test]
fn duplicates_are_allowed() {
    let (_dir, library) = fresh_library();
    let first = add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    let second = add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    assert_ne!(first.id, second.id);
    assert_eq!(library.list_books().unwrap().len(), 2);
}

#[test]
fn dune_and_nineteen_eighty_four() {
    let (_dir, library) = fresh_library();
    let dune = add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965);
    let orwell = add(&library, "1984", "George Orwell", "Dystopian", 1949);

    assert_eq!(library.list_books().unwrap().len(), 2);
    assert_eq!(library.search_books("orwell").unwrap(), vec![orwell.clone()]);

    library.remove_book(dune.id).unwrap();
    assert_eq!(library.list_books().unwrap(), vec![orwell]);
}

#[test]
fn data_survives_reopening() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.sqlite");
    let added = {
        let library = Library::open(&path).unwrap();
        add(&library, "Dune", "Frank Herbert", "Sci-Fi", 1965)
    };

    let reopened = Library::open(&path).unwrap();
    assert_eq!(reopened.list_books().unwrap(), vec![added]);
}
