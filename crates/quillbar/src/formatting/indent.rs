//! Multi-line indent and outdent.
//!
//! Indent inserts one tab at the start of every line a multi-line selection
//! touches; for single-line or caret selections the host widget's default
//! tab behavior applies and this engine does nothing. Outdent strips one
//! leading tab, or up to [`OUTDENT_SPACES`] leading spaces, from every line
//! the selection touches. Both reselect the full affected line range
//! afterwards, with offsets re-read from the buffer to account for the
//! inserted or removed characters.

use crate::buffer::{AttributedBuffer, Selection};
use crate::formatting::batch::BatchScope;

/// Maximum number of leading spaces one outdent removes from a line.
pub const OUTDENT_SPACES: usize = 4;

/// Insert one leading tab on every line of a multi-line selection.
///
/// Returns `true` if tabs were inserted (i.e. the selection really spanned
/// more than one line).
pub fn indent<B: AttributedBuffer>(buffer: &mut B) -> bool {
    let selection = buffer.selection();
    let start_line = buffer.line_of(selection.start);
    let end_line = buffer.line_of(selection.end());

    if start_line == end_line {
        // Single line or caret: the widget's own tab handling applies.
        return false;
    }

    let mut scope = BatchScope::new(buffer);
    for line in start_line..=end_line {
        // Offsets shift as tabs go in, so each line start is re-read.
        let at = scope.line_start(line);
        scope.replace_range(at..at, "\t");
    }
    drop(scope);

    reselect_lines(buffer, start_line, end_line);

    tracing::trace!(
        target: "quillbar::indent",
        lines = end_line - start_line + 1,
        "indented selection"
    );
    true
}

/// Strip one level of leading indentation from every line the selection
/// touches.
///
/// A leading tab is removed whole; otherwise up to [`OUTDENT_SPACES`]
/// leading spaces are removed, bounded by however many the line actually
/// has. Lines starting with neither are untouched. Returns `true` if
/// anything was removed.
pub fn outdent<B: AttributedBuffer>(buffer: &mut B) -> bool {
    let selection = buffer.selection();
    let start_line = buffer.line_of(selection.start);
    let end_line = buffer.line_of(selection.end());
    let mut modified = false;

    let mut scope = BatchScope::new(buffer);
    for line in start_line..=end_line {
        let at = scope.line_start(line);
        let len = scope.line_len(line);
        if len == 0 {
            continue;
        }

        let head = scope.text_in(at..at + len.min(OUTDENT_SPACES));
        if head.starts_with('\t') {
            scope.replace_range(at..at + 1, "");
            modified = true;
        } else {
            let spaces = head.chars().take_while(|&c| c == ' ').count();
            if spaces > 0 {
                scope.replace_range(at..at + spaces, "");
                modified = true;
            }
        }
    }
    drop(scope);

    reselect_lines(buffer, start_line, end_line);

    tracing::trace!(
        target: "quillbar::indent",
        lines = end_line - start_line + 1,
        modified,
        "outdented selection"
    );
    modified
}

/// Select from the first character of `start_line` to the end of
/// `end_line`.
fn reselect_lines<B: AttributedBuffer>(buffer: &mut B, start_line: usize, end_line: usize) {
    let first = buffer.line_start(start_line);
    let last = buffer.line_start(end_line) + buffer.line_len(end_line);
    buffer.set_selection(Selection::new(first, last - first));
}
