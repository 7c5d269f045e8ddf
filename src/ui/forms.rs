use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, NewBook, YEAR_MAX, YEAR_MIN};

/// Shown when the add form is submitted without a title or an author.
pub(crate) const MISSING_FIELDS: &str = "Please fill in all fields!";
/// Longest year the numeric control lets the user type.
const YEAR_DIGITS: usize = 4;

/// Bounded numeric control for the publication year. Digits are collected as
/// text while typing; the value is clamped into the accepted window whenever
/// it is read, stepped, or committed.
#[derive(Clone, Debug)]
pub(crate) struct YearInput {
    buffer: String,
}

impl Default for YearInput {
    fn default() -> Self {
        Self {
            buffer: YEAR_MIN.to_string(),
        }
    }
}

impl YearInput {
    /// Current value, clamped. An empty buffer reads as the lower bound.
    pub(crate) fn value(&self) -> i64 {
        self.buffer
            .parse::<i64>()
            .map(|year| year.clamp(YEAR_MIN, YEAR_MAX))
            .unwrap_or(YEAR_MIN)
    }

    pub(crate) fn text(&self) -> &str {
        &self.buffer
    }

    fn push_digit(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() && self.buffer.len() < YEAR_DIGITS {
            self.buffer.push(ch);
            true
        } else {
            false
        }
    }

    fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Move the year by `delta`, staying inside the window.
    pub(crate) fn step(&mut self, delta: i64) {
        let year = (self.value() + delta).clamp(YEAR_MIN, YEAR_MAX);
        self.buffer = year.to_string();
    }

    /// Replace whatever was typed with the clamped value.
    pub(crate) fn commit(&mut self) {
        self.buffer = self.value().to_string();
    }
}

/// Fields available within the add form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Genre,
    Year,
}

impl Default for BookField {
    fn default() -> Self {
        BookField::Title
    }
}

impl BookField {
    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Book Title",
            BookField::Author => "Author",
            BookField::Genre => "Genre",
            BookField::Year => "Publication Year",
        }
    }

    fn next(self) -> Self {
        match self {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Genre,
            BookField::Genre => BookField::Year,
            BookField::Year => BookField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            BookField::Title => BookField::Year,
            BookField::Author => BookField::Title,
            BookField::Genre => BookField::Author,
            BookField::Year => BookField::Genre,
        }
    }
}

/// State of the "Add Book" view.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
    pub(crate) year: YearInput,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl BookForm {
    /// Move focus forward or backward, committing the year when leaving it.
    pub(crate) fn cycle_field(&mut self, forward: bool) {
        if self.active == BookField::Year {
            self.year.commit();
        }
        self.active = if forward {
            self.active.next()
        } else {
            self.active.previous()
        };
    }

    /// Append a character to the active field. The year only takes digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Genre => self.genre.push(ch),
            BookField::Year => return self.year.push_digit(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Year => self.year.backspace(),
        }
    }

    /// Up/Down: step the year when it has focus, otherwise move between
    /// fields.
    pub(crate) fn arrow(&mut self, up: bool) {
        if self.active == BookField::Year {
            self.year.step(if up { 1 } else { -1 });
        } else {
            self.cycle_field(!up);
        }
    }

    /// Required-field check followed by the accessor's own validation.
    pub(crate) fn parse_inputs(&self) -> Result<NewBook> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return Err(anyhow!(MISSING_FIELDS));
        }
        Ok(NewBook::new(
            self.title.clone(),
            self.author.clone(),
            self.genre.clone(),
            self.year.value(),
        )?)
    }

    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Genre => &self.genre,
            BookField::Year => self.year.text(),
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            BookField::Title | BookField::Author => "<required>".to_string(),
            BookField::Genre => "<optional>".to_string(),
            BookField::Year => format!("<{YEAR_MIN}-{YEAR_MAX}>"),
        };
        let display = if value.is_empty() {
            placeholder
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// Book awaiting a yes/no before it is removed.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmRemove {
    pub(crate) book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut BookForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn year_defaults_to_lower_bound() {
        let form = BookForm::default();
        assert_eq!(form.year.value(), YEAR_MIN);
        assert_eq!(form.year.text(), "1900");
    }

    #[test]
    fn year_steps_stay_in_range() {
        let mut year = YearInput::default();
        year.step(-1);
        assert_eq!(year.value(), YEAR_MIN);
        year.step(1);
        assert_eq!(year.value(), YEAR_MIN + 1);
        year.step(10_000);
        assert_eq!(year.value(), YEAR_MAX);
    }

    #[test]
    fn typed_year_is_clamped_on_commit() {
        let mut form = BookForm {
            active: BookField::Year,
            ..BookForm::default()
        };
        for _ in 0..4 {
            form.backspace();
        }
        type_text(&mut form, "3000x");
        assert_eq!(form.year.text(), "3000");
        form.cycle_field(true);
        assert_eq!(form.year.text(), "2025");
        assert_eq!(form.active, BookField::Title);
    }

    #[test]
    fn arrows_move_between_text_fields() {
        let mut form = BookForm::default();
        form.arrow(false);
        assert_eq!(form.active, BookField::Author);
        form.arrow(true);
        assert_eq!(form.active, BookField::Title);
        form.cycle_field(false);
        assert_eq!(form.active, BookField::Year);
    }

    #[test]
    fn missing_author_is_rejected_before_storage() {
        let mut form = BookForm::default();
        type_text(&mut form, "Dune");
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);
    }

    #[test]
    fn whitespace_title_counts_as_missing() {
        let form = BookForm {
            title: "  ".to_string(),
            author: "Frank Herbert".to_string(),
            ..BookForm::default()
        };
        assert_eq!(form.parse_inputs().unwrap_err().to_string(), MISSING_FIELDS);
    }

    #[test]
    fn complete_form_builds_new_book() {
        let form = BookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Sci-Fi".to_string(),
            ..BookForm::default()
        };
        let book = form.parse_inputs().unwrap();
        assert_eq!(book, NewBook::new("Dune", "Frank Herbert", "Sci-Fi", YEAR_MIN).unwrap());
    }
}
