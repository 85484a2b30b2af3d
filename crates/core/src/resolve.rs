//! Resolves a `/`-separated reference against the declarations of a single
//! document.
//!
//! Components are matched in order by one top-down sweep. A component can
//! only match at or below the line where the previous one matched, and the
//! span returned is that of the last component.

use crate::cancel::Cancellation;
use crate::declaration::Declarations;
use crate::document::LineSource;
use crate::model::{Declaration, Span, split_path};
use crate::settings::{DeclarationsPerLine, Settings};

struct Cursor<'p> {
    components: Vec<&'p str>,
    index: usize,
    last_line: Option<usize>,
}

impl<'p> Cursor<'p> {
    fn new(components: Vec<&'p str>) -> Self {
        Self {
            components,
            index: 0,
            last_line: None,
        }
    }

    /// Consumes the current component if `declaration` names it.
    fn advance(&mut self, declaration: &Declaration) -> bool {
        if declaration.name != self.components[self.index] {
            return false;
        }
        tracing::trace!(
            "matched `{}` at {}:{} (previous match on line {:?})",
            declaration.name,
            declaration.line,
            declaration.column,
            self.last_line
        );
        self.index += 1;
        self.last_line = Some(declaration.line);
        true
    }

    fn is_complete(&self) -> bool {
        self.index == self.components.len()
    }
}

/// Returns the span of the declaration named by the last component of
/// `definition`, or `None` if the path is empty, some component is missing,
/// or `cancel` fires. Cancellation is polled before every line.
pub fn resolve<D, C>(
    document: &D,
    definition: &str,
    cancel: &C,
    settings: &Settings,
) -> Option<Span>
where
    D: LineSource + ?Sized,
    C: Cancellation + ?Sized,
{
    let components = split_path(definition);
    if components.is_empty() {
        tracing::debug!("refusing to resolve empty path {:?}", definition);
        return None;
    }

    let per_line = match settings.declarations_per_line {
        DeclarationsPerLine::First => 1,
        DeclarationsPerLine::All => usize::MAX,
    };

    let mut cursor = Cursor::new(components);
    for line in 0..document.line_count() {
        if cancel.is_cancelled() {
            tracing::debug!("resolution of `{}` cancelled at line {}", definition, line);
            return None;
        }
        let Some(text) = document.line(line) else {
            break;
        };

        let found = Declarations::new(text, line, &settings.keywords).take(per_line);
        for (i, declaration) in found.enumerate() {
            if i > 0 && cancel.is_cancelled() {
                return None;
            }
            if cursor.advance(&declaration) && cursor.is_complete() {
                let span = declaration.span();
                tracing::debug!("resolved `{}` to {:?}", definition, span);
                return Some(span);
            }
        }
    }

    tracing::debug!(
        "`{}` not found ({} of {} components matched)",
        definition,
        cursor.index,
        cursor.components.len()
    );
    None
}
