use crate::error::{GalahError, Result};
use crate::model::Position;
use std::ops::Range;

/// Line-oriented read access to a document.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Text of line `index` without its terminator.
    fn line(&self, index: usize) -> Option<&str>;

    /// UTF-16 column of the first non-whitespace character, or the line
    /// length when the line is blank.
    fn first_non_whitespace(&self, index: usize) -> usize {
        self.line(index).map(first_non_whitespace_column).unwrap_or(0)
    }
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

pub fn first_non_whitespace_column(text: &str) -> usize {
    let mut column = 0;
    for c in text.chars() {
        if !c.is_whitespace() {
            return column;
        }
        column += c.len_utf16();
    }
    column
}

/// Byte offset of UTF-16 `column` in `text`, clamped to the end of the text.
/// A column that falls inside a surrogate pair rounds up to the next char.
pub fn byte_offset(text: &str, column: usize) -> usize {
    let mut utf16 = 0;
    for (byte, c) in text.char_indices() {
        if utf16 >= column {
            return byte;
        }
        utf16 += c.len_utf16();
    }
    text.len()
}

/// Snapshot of an open document's text plus a line index.
#[derive(Debug, Clone)]
pub struct TextDocument {
    content: String,
    lines: Vec<Range<usize>>,
    pub version: i32,
}

impl TextDocument {
    pub fn new(content: String, version: i32) -> Self {
        let lines = line_ranges(&content);
        Self {
            content,
            lines,
            version,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn check_line(&self, line: usize) -> Result<()> {
        if line < self.lines.len() {
            Ok(())
        } else {
            Err(GalahError::InvalidPosition {
                line,
                line_count: self.lines.len(),
            })
        }
    }

    /// Byte offset of `position`, clamped to the containing line and then to
    /// the end of the document.
    pub fn offset_at(&self, position: Position) -> usize {
        match self.lines.get(position.line) {
            Some(range) => {
                let text = &self.content[range.clone()];
                range.start + byte_offset(text, position.character)
            }
            None => self.content.len(),
        }
    }

    /// Applies one content change. `None` replaces the whole text.
    pub fn apply_change(&mut self, range: Option<(Position, Position)>, text: &str) {
        match range {
            Some((start, end)) => {
                let start = self.offset_at(start);
                let end = self.offset_at(end).max(start);
                self.content.replace_range(start..end, text);
            }
            None => {
                self.content = text.to_string();
            }
        }
        self.lines = line_ranges(&self.content);
    }
}

impl LineSource for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|r| &self.content[r.clone()])
    }
}

// `\n`, `\r\n` and a lone `\r` all end a line.
fn line_ranges(content: &str) -> Vec<Range<usize>> {
    let bytes = content.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                ranges.push(start..i);
                i += 1;
                start = i;
            }
            b'\r' => {
                ranges.push(start..i);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    ranges.push(start..bytes.len());
    ranges
}
