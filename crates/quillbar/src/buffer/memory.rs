//! In-memory reference implementation of the buffer contract.
//!
//! [`MemoryBuffer`] stores text with character-level and paragraph-level
//! attributes and implements [`AttributedBuffer`] for tests and headless
//! hosts. Attributes are kept as sorted, non-overlapping runs; characters
//! not covered by a run carry the buffer's default attributes.

use std::ops::Range;

use quillbar_core::Signal;

use super::{AttributedBuffer, Selection};
use crate::attrs::{CharAttributes, Color, FontSpec, ParagraphFormat};

// ============================================================================
// Runs
// ============================================================================

/// A run of characters sharing one attribute set.
///
/// Runs are stored as character-index ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrRun {
    /// The character range this run covers (start..end).
    pub range: Range<usize>,
    /// The attributes applied to this range.
    pub attrs: CharAttributes,
}

impl AttrRun {
    fn new(range: Range<usize>, attrs: CharAttributes) -> Self {
        Self { range, attrs }
    }

    fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    fn overlaps(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }

    fn contains(&self, pos: usize) -> bool {
        self.range.contains(&pos)
    }
}

/// A run of paragraphs sharing one paragraph format.
///
/// Paragraph runs track line indices, not character positions.
#[derive(Debug, Clone, PartialEq)]
struct ParaRun {
    /// The paragraph range this run covers (start..end, 0-based indices).
    range: Range<usize>,
    /// The format applied to these paragraphs.
    format: ParagraphFormat,
}

impl ParaRun {
    fn new(range: Range<usize>, format: ParagraphFormat) -> Self {
        Self { range, format }
    }

    fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    fn overlaps(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }

    fn contains(&self, para: usize) -> bool {
        self.range.contains(&para)
    }
}

// ============================================================================
// MemoryBuffer
// ============================================================================

/// An in-memory attributed text buffer.
///
/// The buffer keeps:
/// - the plain text content as a `String` (addressed by character index)
/// - attribute runs, sorted and non-overlapping; absence of a run means the
///   default attributes
/// - paragraph runs keyed by line index
/// - the current selection and the caret's typing attributes
///
/// # Signals
///
/// - `content_changed`: emitted when text or attributes change
/// - `selection_changed`: emitted when the selection changes
///
/// While a batch is open both signals are withheld; closing the outermost
/// batch delivers at most one emission per kind.
#[derive(Debug)]
pub struct MemoryBuffer {
    /// The plain text content.
    text: String,
    /// Attribute runs sorted by start position, only stored for
    /// non-default attributes.
    runs: Vec<AttrRun>,
    /// Paragraph runs sorted by start line, only stored for non-default
    /// formats.
    para_runs: Vec<ParaRun>,
    /// Attributes of characters not covered by any run.
    default_attrs: CharAttributes,
    /// Attributes applied to text typed at a caret.
    typing_attrs: CharAttributes,
    /// The current selection.
    selection: Selection,
    /// Nesting depth of open batch scopes.
    batch_depth: u32,
    /// A content notification is pending for the outermost `end_batch`.
    content_pending: bool,
    /// A selection notification is pending for the outermost `end_batch`.
    selection_pending: bool,

    /// Signal emitted when text or attributes change.
    pub content_changed: Signal<()>,

    /// Signal emitted when the selection changes.
    pub selection_changed: Signal<()>,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
            para_runs: Vec::new(),
            default_attrs: CharAttributes::default(),
            typing_attrs: CharAttributes::default(),
            selection: Selection::default(),
            batch_depth: 0,
            content_pending: false,
            selection_pending: false,
            content_changed: Signal::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Create a buffer from plain text with default attributes.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.text = text.into();
        buffer
    }

    /// Builder method to set the default (and initial typing) attributes.
    pub fn with_default_attributes(mut self, attrs: CharAttributes) -> Self {
        self.default_attrs = attrs.clone();
        self.typing_attrs = attrs;
        self
    }

    /// Get the attribute runs.
    pub fn attribute_runs(&self) -> &[AttrRun] {
        &self.runs
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Byte offset of a character index.
    fn byte_of(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Clamp a character range to the document.
    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let count = self.char_count();
        let start = range.start.min(count);
        let end = range.end.min(count).max(start);
        start..end
    }

    fn notify_content(&mut self) {
        if self.batch_depth > 0 {
            self.content_pending = true;
        } else {
            self.content_changed.emit(());
        }
    }

    fn notify_selection(&mut self) {
        if self.batch_depth > 0 {
            self.selection_pending = true;
        } else {
            self.selection_changed.emit(());
        }
    }

    /// Find the next character position at or before `max` where attributes
    /// might change.
    fn next_attr_change(&self, pos: usize, max: usize) -> usize {
        let mut next = max;
        for run in &self.runs {
            if run.range.start > pos && run.range.start < next {
                next = run.range.start;
            }
            if run.range.end > pos && run.range.end < next {
                next = run.range.end;
            }
        }
        next
    }

    /// Set the full attribute set for a range.
    ///
    /// Splits, truncates, or removes overlapping runs as needed, then
    /// normalizes. Default attributes are represented by absence of a run.
    fn set_run(&mut self, range: Range<usize>, attrs: CharAttributes) {
        if range.is_empty() {
            return;
        }

        // Split and remove overlapping runs.
        let mut new_runs = Vec::new();
        let mut to_remove = Vec::new();

        for (i, run) in self.runs.iter_mut().enumerate() {
            if !run.overlaps(&range) {
                continue;
            }

            if run.range.start < range.start && run.range.end > range.end {
                // Run spans the entire range - split into head and tail
                new_runs.push(AttrRun::new(range.end..run.range.end, run.attrs.clone()));
                run.range.end = range.start;
            } else if run.range.start < range.start {
                // Run overlaps start - truncate
                run.range.end = range.start;
            } else if run.range.end > range.end {
                // Run overlaps end - truncate
                run.range.start = range.end;
            } else {
                // Run is entirely within range - remove
                to_remove.push(i);
            }
        }

        for i in to_remove.into_iter().rev() {
            self.runs.remove(i);
        }
        self.runs.extend(new_runs);

        if attrs != self.default_attrs {
            self.runs.push(AttrRun::new(range, attrs));
        }

        self.normalize_runs();
    }

    /// Normalize runs: sort by position and merge adjacent runs with equal
    /// attributes.
    fn normalize_runs(&mut self) {
        self.runs.sort_by_key(|r| r.range.start);

        let mut i = 0;
        while i + 1 < self.runs.len() {
            if self.runs[i].range.end == self.runs[i + 1].range.start
                && self.runs[i].attrs == self.runs[i + 1].attrs
            {
                self.runs[i].range.end = self.runs[i + 1].range.end;
                self.runs.remove(i + 1);
            } else {
                i += 1;
            }
        }

        let default_attrs = self.default_attrs.clone();
        self.runs.retain(|r| !r.is_empty() && r.attrs != default_attrs);
    }

    /// Rewrite one attribute channel across a range, preserving the others.
    ///
    /// Walks the attribute boundaries inside `range` and performs a
    /// read-modify-write per uniform segment.
    fn write_channel(&mut self, range: Range<usize>, apply: impl Fn(&mut CharAttributes)) {
        let range = self.clamp_range(range);
        if range.is_empty() {
            return;
        }

        let mut pos = range.start;
        while pos < range.end {
            let segment_end = self.next_attr_change(pos, range.end);
            let mut attrs = self.attributes_at(pos);
            apply(&mut attrs);
            self.set_run(pos..segment_end, attrs);
            pos = segment_end;
        }

        self.notify_content();
    }

    /// Adjust attribute runs for a deletion of `range`.
    fn shift_runs_for_delete(&mut self, range: Range<usize>) {
        let len = range.len();
        let mut to_remove = Vec::new();

        for (i, run) in self.runs.iter_mut().enumerate() {
            if run.range.start >= range.end {
                // Run is after deletion - shift it back
                run.range.start -= len;
                run.range.end -= len;
            } else if run.range.end <= range.start {
                // Run is before deletion - no change
            } else if run.range.start >= range.start && run.range.end <= range.end {
                // Run is entirely within deletion - remove
                to_remove.push(i);
            } else if run.range.start < range.start && run.range.end > range.end {
                // Run spans the deletion - shrink it
                run.range.end -= len;
            } else if run.range.start < range.start {
                // Run overlaps start of deletion
                run.range.end = range.start;
            } else {
                // Run overlaps end of deletion
                run.range.start = range.start;
                run.range.end -= len;
            }
        }

        for i in to_remove.into_iter().rev() {
            self.runs.remove(i);
        }
        self.runs.retain(|r| !r.is_empty());
    }

    /// Adjust attribute runs for an insertion of `len` characters at `pos`.
    ///
    /// Runs containing the insertion point grow; runs after it shift.
    /// Inserted characters take the attributes of the run they land inside,
    /// or the default attributes between runs.
    fn shift_runs_for_insert(&mut self, pos: usize, len: usize) {
        for run in &mut self.runs {
            if run.range.start >= pos {
                run.range.start += len;
                run.range.end += len;
            } else if run.range.end > pos {
                run.range.end += len;
            }
        }
    }

    /// Set the paragraph format for a range of line indices.
    fn set_para_run(&mut self, range: Range<usize>, format: ParagraphFormat) {
        if range.is_empty() {
            return;
        }

        let mut new_runs = Vec::new();
        let mut to_remove = Vec::new();

        for (i, run) in self.para_runs.iter_mut().enumerate() {
            if !run.overlaps(&range) {
                continue;
            }

            if run.range.start < range.start && run.range.end > range.end {
                new_runs.push(ParaRun::new(range.end..run.range.end, run.format.clone()));
                run.range.end = range.start;
            } else if run.range.start < range.start {
                run.range.end = range.start;
            } else if run.range.end > range.end {
                run.range.start = range.end;
            } else {
                to_remove.push(i);
            }
        }

        for i in to_remove.into_iter().rev() {
            self.para_runs.remove(i);
        }
        self.para_runs.extend(new_runs);

        if format != ParagraphFormat::default() {
            self.para_runs.push(ParaRun::new(range, format));
        }

        self.normalize_para_runs();
    }

    fn normalize_para_runs(&mut self) {
        self.para_runs.sort_by_key(|r| r.range.start);

        let mut i = 0;
        while i + 1 < self.para_runs.len() {
            if self.para_runs[i].range.end == self.para_runs[i + 1].range.start
                && self.para_runs[i].format == self.para_runs[i + 1].format
            {
                self.para_runs[i].range.end = self.para_runs[i + 1].range.end;
                self.para_runs.remove(i + 1);
            } else {
                i += 1;
            }
        }

        self.para_runs
            .retain(|r| !r.is_empty() && r.format != ParagraphFormat::default());
    }
}

impl AttributedBuffer for MemoryBuffer {
    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn line_count(&self) -> usize {
        self.text.chars().filter(|&c| c == '\n').count() + 1
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let count = self.char_count();
        let start = selection.start.min(count);
        let len = selection.len.min(count - start);
        let clamped = Selection::new(start, len);
        if self.selection != clamped {
            self.selection = clamped;
            self.notify_selection();
        }
    }

    fn text_in(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        let byte_start = self.byte_of(range.start);
        let byte_end = self.byte_of(range.end);
        self.text[byte_start..byte_end].to_string()
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        let range = self.clamp_range(range);
        let old_len = range.len();
        let new_len = replacement.chars().count();
        if old_len == 0 && new_len == 0 {
            return;
        }

        let byte_start = self.byte_of(range.start);
        let byte_end = self.byte_of(range.end);
        self.text.replace_range(byte_start..byte_end, replacement);

        // Same-length substitution keeps every attribute position intact.
        if new_len != old_len {
            if old_len > 0 {
                self.shift_runs_for_delete(range.clone());
            }
            if new_len > 0 {
                self.shift_runs_for_insert(range.start, new_len);
            }

            let count = self.char_count();
            if self.selection.end() > count {
                let start = self.selection.start.min(count);
                self.selection = Selection::new(start, count - start);
            }
        }

        self.notify_content();
    }

    fn font_at(&self, index: usize) -> FontSpec {
        self.attributes_at(index).font
    }

    fn set_font(&mut self, range: Range<usize>, font: &FontSpec) {
        self.write_channel(range, |attrs| attrs.font = font.clone());
    }

    fn text_color_at(&self, index: usize) -> Color {
        self.attributes_at(index).text_color
    }

    fn set_text_color(&mut self, range: Range<usize>, color: Color) {
        self.write_channel(range, |attrs| attrs.text_color = color);
    }

    fn background_color_at(&self, index: usize) -> Color {
        self.attributes_at(index).background_color
    }

    fn set_background_color(&mut self, range: Range<usize>, color: Color) {
        self.write_channel(range, |attrs| attrs.background_color = color);
    }

    fn baseline_offset_at(&self, index: usize) -> i32 {
        self.attributes_at(index).baseline_offset
    }

    fn set_baseline_offset(&mut self, range: Range<usize>, offset: i32) {
        self.write_channel(range, |attrs| attrs.baseline_offset = offset);
    }

    fn paragraph_format_at(&self, index: usize) -> ParagraphFormat {
        let para = self.line_of(index);
        for run in &self.para_runs {
            if run.contains(para) {
                return run.format.clone();
            }
            if run.range.start > para {
                break;
            }
        }
        ParagraphFormat::default()
    }

    fn set_paragraph_format(&mut self, range: Range<usize>, format: &ParagraphFormat) {
        let range = self.clamp_range(range);
        let first = self.line_of(range.start);
        let last = if range.is_empty() {
            first
        } else {
            self.line_of(range.end - 1)
        };
        self.set_para_run(first..last + 1, format.clone());
        self.notify_content();
    }

    fn typing_attributes(&self) -> CharAttributes {
        self.typing_attrs.clone()
    }

    fn set_typing_attributes(&mut self, attrs: CharAttributes) {
        self.typing_attrs = attrs;
    }

    fn line_of(&self, index: usize) -> usize {
        self.text
            .chars()
            .take(index)
            .filter(|&c| c == '\n')
            .count()
    }

    fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        let mut seen = 0;
        for (i, c) in self.text.chars().enumerate() {
            if c == '\n' {
                seen += 1;
                if seen == line {
                    return i + 1;
                }
            }
        }
        self.char_count()
    }

    fn line_len(&self, line: usize) -> usize {
        let start = self.line_start(line);
        self.text
            .chars()
            .skip(start)
            .take_while(|&c| c != '\n')
            .count()
    }

    fn begin_batch(&mut self) {
        if self.batch_depth == 0 {
            self.content_changed.set_blocked(true);
            self.selection_changed.set_blocked(true);
        }
        self.batch_depth += 1;
    }

    fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.content_changed.set_blocked(false);
            self.selection_changed.set_blocked(false);
            if std::mem::take(&mut self.content_pending) {
                self.content_changed.emit(());
            }
            if std::mem::take(&mut self.selection_pending) {
                self.selection_changed.emit(());
            }
        }
    }

    fn attributes_at(&self, index: usize) -> CharAttributes {
        for run in &self.runs {
            if run.contains(index) {
                return run.attrs.clone();
            }
            if run.range.start > index {
                break;
            }
        }
        self.default_attrs.clone()
    }
}
