use crate::document::utf16_len;
use serde::Serialize;

/// A zero-based location in a document. `character` counts UTF-16 code units.
///
/// Ordering is line first, then character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    pub fn is_before_or_equal(&self, other: &Position) -> bool {
        self <= other
    }

    pub fn is_after_or_equal(&self, other: &Position) -> bool {
        self >= other
    }
}

/// A range of UTF-16 columns on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.line, self.start)
    }

    pub fn end_position(&self) -> Position {
        Position::new(self.line, self.end)
    }

    /// Inclusive on both ends, so a cursor resting on a delimiter still hits.
    pub fn contains(&self, position: Position) -> bool {
        self.start_position().is_before_or_equal(&position)
            && self.end_position().is_after_or_equal(&position)
    }
}

/// A `<...>` reference found on a line. `span` covers the text between the
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRef {
    pub text: String,
    pub span: Span,
}

/// Splits a reference on `/`, dropping empty components.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// A quoted name introduced by one of the declaration keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub line: usize,
    pub keyword: String,
    pub name: String,
    /// Column of the first character of `name`.
    pub column: usize,
}

impl Declaration {
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column, self.column + utf16_len(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ordering_is_line_major() {
        let a = Position::new(1, 40);
        let b = Position::new(2, 0);
        assert!(a.is_before_or_equal(&b));
        assert!(b.is_after_or_equal(&a));
        assert!(a.is_before_or_equal(&a));
        assert!(a.is_after_or_equal(&a));
        assert!(!b.is_before_or_equal(&a));
    }

    #[test]
    fn span_contains_is_inclusive() {
        let span = Span::new(3, 5, 8);
        assert!(span.contains(Position::new(3, 5)));
        assert!(span.contains(Position::new(3, 8)));
        assert!(!span.contains(Position::new(3, 4)));
        assert!(!span.contains(Position::new(3, 9)));
        assert!(!span.contains(Position::new(2, 6)));
    }

    #[test]
    fn split_path_drops_empty_components() {
        assert_eq!(split_path("a//b/"), vec!["a", "b"]);
        assert!(split_path("").is_empty());
        assert!(split_path("///").is_empty());
    }

    #[test]
    fn declaration_span_counts_utf16_units() {
        let decl = Declaration {
            line: 0,
            keyword: "enum".into(),
            name: "Ä𝄞".into(),
            column: 6,
        };
        assert_eq!(decl.span(), Span::new(0, 6, 9));
    }
}
