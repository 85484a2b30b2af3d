//! Declaration markers: a keyword, a space, then a quoted name later on the
//! same line, e.g. `struct "Point"` or `enum Color "Rgb"`.
//!
//! The keyword has to appear, followed by one space, somewhere between the
//! previous `"` (or the line start) and the opening quote of the name. It is
//! matched as plain text, with no word boundary. The name runs from the
//! opening quote to the next `"` or to the end of the line, and is never
//! empty.

use crate::document::{LineSource, utf16_len};
use crate::model::Declaration;

/// Lazily yields the declarations on one line, left to right.
pub struct Declarations<'a> {
    text: &'a str,
    line: usize,
    keywords: &'a [String],
    /// Byte just after the last quote examined.
    cursor: usize,
}

impl<'a> Declarations<'a> {
    pub fn new(text: &'a str, line: usize, keywords: &'a [String]) -> Self {
        Self {
            text,
            line,
            keywords,
            cursor: 0,
        }
    }
}

impl Iterator for Declarations<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        let text = self.text;
        while let Some(offset) = text[self.cursor..].find('"') {
            let quote = self.cursor + offset;
            let segment = &text[self.cursor..quote];
            self.cursor = quote + 1;

            let Some(keyword) = self
                .keywords
                .iter()
                .find(|k| introduces_name(segment, k))
            else {
                continue;
            };

            let rest = &text[quote + 1..];
            let name = &rest[..rest.find('"').unwrap_or(rest.len())];
            if name.is_empty() {
                continue;
            }

            return Some(Declaration {
                line: self.line,
                keyword: keyword.clone(),
                name: name.to_string(),
                column: utf16_len(&text[..quote + 1]),
            });
        }
        None
    }
}

fn introduces_name(segment: &str, keyword: &str) -> bool {
    !keyword.is_empty()
        && segment
            .match_indices(keyword)
            .any(|(i, _)| segment[i + keyword.len()..].starts_with(' '))
}

/// Every declaration in `document`, top to bottom.
pub fn declarations<D>(document: &D, keywords: &[String]) -> Vec<Declaration>
where
    D: LineSource + ?Sized,
{
    (0..document.line_count())
        .filter_map(|line| document.line(line).map(|text| (line, text)))
        .flat_map(|(line, text)| Declarations::new(text, line, keywords).collect::<Vec<_>>())
        .collect()
}
