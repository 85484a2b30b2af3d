use galah_core::{Position, Span};
use tower_lsp::lsp_types;

pub fn from_lsp_position(position: lsp_types::Position) -> Position {
    Position::new(position.line as usize, position.character as usize)
}

pub fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line as u32, position.character as u32)
}

pub fn from_lsp_range(range: lsp_types::Range) -> (Position, Position) {
    (from_lsp_position(range.start), from_lsp_position(range.end))
}

pub fn to_lsp_range(span: Span) -> lsp_types::Range {
    lsp_types::Range {
        start: to_lsp_position(span.start_position()),
        end: to_lsp_position(span.end_position()),
    }
}
