//! Finds `<path/reference>` tokens on a line.

use crate::document::{LineSource, byte_offset};
use crate::model::{PathRef, Position, Span};
use crate::settings::{Settings, UnmatchedClose};

/// Scans `text` left to right from `first_non_whitespace` and returns every
/// bracketed token in order.
///
/// The most recent `<` always wins, so `<a <b>` yields `b`. An unmatched `<`
/// yields nothing. See [`UnmatchedClose`] for what a stray `>` does.
pub fn extract_paths(
    text: &str,
    line: usize,
    first_non_whitespace: usize,
    unmatched_close: UnmatchedClose,
) -> Vec<PathRef> {
    let mut paths = Vec::new();
    let mut open = match unmatched_close {
        UnmatchedClose::Ignore => None,
        UnmatchedClose::LineStart => Some(0),
    };

    let mut column = 0;
    for c in text.chars() {
        if column >= first_non_whitespace {
            match c {
                '<' => open = Some(column),
                '>' => {
                    if let Some(start) = open {
                        paths.push(token(text, line, start + 1, column));
                        if unmatched_close == UnmatchedClose::Ignore {
                            open = None;
                        }
                    }
                }
                _ => {}
            }
        }
        column += c.len_utf16();
    }

    paths
}

// A `>` at column 0 under the line-start sentinel closes before it opens;
// the bounds are swapped so the span still covers exactly `text`.
fn token(text: &str, line: usize, start: usize, end: usize) -> PathRef {
    let (start, end) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let slice = &text[byte_offset(text, start)..byte_offset(text, end)];
    PathRef {
        text: slice.to_string(),
        span: Span::new(line, start, end),
    }
}

/// All tokens on line `line` of `document`. Out-of-range lines yield nothing.
pub fn paths_on_line<D>(document: &D, line: usize, settings: &Settings) -> Vec<PathRef>
where
    D: LineSource + ?Sized,
{
    match document.line(line) {
        Some(text) => extract_paths(
            text,
            line,
            document.first_non_whitespace(line),
            settings.unmatched_close,
        ),
        None => Vec::new(),
    }
}

/// Every token on the cursor's line whose span contains the cursor, left to
/// right by closing `>`. Spans only overlap under
/// [`UnmatchedClose::LineStart`], where one `<` can open several tokens.
pub fn paths_at<D>(document: &D, position: Position, settings: &Settings) -> Vec<PathRef>
where
    D: LineSource + ?Sized,
{
    paths_on_line(document, position.line, settings)
        .into_iter()
        .filter(|p| p.span.contains(position))
        .collect()
}

/// The first token on the cursor's line whose span contains the cursor.
pub fn path_at<D>(document: &D, position: Position, settings: &Settings) -> Option<PathRef>
where
    D: LineSource + ?Sized,
{
    paths_at(document, position, settings).into_iter().next()
}
