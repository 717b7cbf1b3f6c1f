//! The formatting engine.
//!
//! This module provides [`FormatController`], the command dispatcher that
//! sits between a formatting toolbar and an [`AttributedBuffer`]. Each
//! toolbar command maps to exactly one engine:
//!
//! - [`font_writer`]: uniform family/size writes that preserve runs
//! - [`case`]: sentence/word/character case transforms
//! - [`indent`]: multi-line tab indent and tab/space outdent
//! - [`baseline`]: subscript/superscript with size compensation
//! - [`painter`]: the one-shot format painter state machine
//! - [`batch`]: the redraw-suppressing batch scope all of them write under
//!
//! # Command flow
//!
//! Every command validates its input before the first write, cancels an
//! armed format painter, performs its writes inside a [`BatchScope`],
//! restores the logical selection, and finishes by emitting
//! `content_changed` (if the document changed) and `indicators_changed`
//! with freshly re-read attribute state. A re-entrancy guard makes the
//! notification sinks inert while a command runs, so programmatic writes
//! that echo back as widget notifications cannot dispatch a second command.
//!
//! # Example
//!
//! ```
//! use quillbar::buffer::{AttributedBuffer, MemoryBuffer, Selection};
//! use quillbar::fonts::FontCatalog;
//! use quillbar::formatting::FormatController;
//!
//! let mut buffer = MemoryBuffer::from_text("hello world");
//! buffer.set_selection(Selection::new(0, 5));
//!
//! let catalog = FontCatalog::with_families(["Georgia"]);
//! let mut controller = FormatController::new(buffer, catalog);
//!
//! controller.toggle_bold();
//! controller.set_font_family("Georgia");
//! assert!(controller.buffer().font_at(0).bold);
//! assert_eq!(controller.buffer().font_at(0).family, "Georgia");
//! ```

pub mod baseline;
pub mod batch;
pub mod case;
pub mod font_writer;
pub mod indent;
pub mod painter;

use quillbar_core::Signal;

use crate::attrs::{Alignment, Color, ParagraphFormat, StyleFlag};
use crate::buffer::AttributedBuffer;
use crate::fonts::FontCatalog;
use crate::indicators::ToolbarIndicators;

pub use baseline::BaselineDirection;
pub use batch::BatchScope;
pub use case::{CaseMode, CaseTransformer};
pub use font_writer::FontValue;
pub use painter::{FormatPainter, FormatSnapshot};

// ============================================================================
// Commands
// ============================================================================

/// The fixed operation set a toolbar dispatches.
///
/// Font sizes arrive as the raw toolbar text; parsing is part of the
/// command so an unparseable entry can revert the control instead of
/// failing upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatCommand {
    /// Set the font family of the selection.
    SetFontFamily(String),
    /// Set the font size of the selection from raw toolbar text.
    SetFontSize(String),
    /// Toggle bold on the selection.
    ToggleBold,
    /// Toggle italic on the selection.
    ToggleItalic,
    /// Toggle underline on the selection.
    ToggleUnderline,
    /// Apply a text color to the selection.
    ApplyTextColor(Color),
    /// Apply a background (highlight) color to the selection.
    ApplyBackgroundColor(Color),
    /// Set the paragraph alignment of the selection's lines.
    SetAlignment(Alignment),
    /// Toggle the bullet marker on the selection's lines.
    ToggleBullet,
    /// Toggle subscript on the selection.
    ToggleSubscript,
    /// Toggle superscript on the selection.
    ToggleSuperscript,
    /// Rewrite the selection's casing.
    TransformCase(CaseMode),
    /// Indent the selected lines by one tab.
    Indent,
    /// Remove one level of leading indentation from the selected lines.
    Outdent,
    /// Arm the format painter with the selection's format.
    CaptureFormat,
}

// ============================================================================
// FormatController
// ============================================================================

/// The selection-scoped attribute-mutation engine.
///
/// Owns the buffer it formats, the font catalog used for validation, the
/// format painter, and the current color swatches. The host wires widget
/// notifications into the `note_*` sinks and connects the outward signals
/// to its toolbar.
///
/// # Signals
///
/// - `content_changed`: emitted once per user-visible edit
/// - `indicators_changed`: emitted after every command with freshly
///   re-read [`ToolbarIndicators`]
pub struct FormatController<B: AttributedBuffer> {
    /// The buffer being formatted.
    buffer: B,
    /// Catalog used to validate requested font families.
    fonts: FontCatalog,
    /// Tokenizing case transformer (compiled patterns).
    case: CaseTransformer,
    /// One-shot format painter.
    painter: painter::FormatPainter,
    /// Current text color swatch.
    text_color: Color,
    /// Current highlight color swatch.
    background_color: Color,
    /// Re-entrancy guard: set while a command runs.
    busy: bool,
    /// The document changed since the host last reset the flag.
    modified: bool,

    /// Signal emitted once per user-visible edit.
    pub content_changed: Signal<()>,

    /// Signal emitted after every command with fresh indicator state.
    pub indicators_changed: Signal<ToolbarIndicators>,
}

impl<B: AttributedBuffer> FormatController<B> {
    /// Create a controller over `buffer`, validating families against
    /// `fonts`.
    pub fn new(buffer: B, fonts: FontCatalog) -> Self {
        Self {
            buffer,
            fonts,
            case: CaseTransformer::new(),
            painter: painter::FormatPainter::new(),
            text_color: Color::BLACK,
            background_color: Color::YELLOW,
            busy: false,
            modified: false,
            content_changed: Signal::new(),
            indicators_changed: Signal::new(),
        }
    }

    /// The buffer being formatted.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Mutable access to the buffer, for host-driven edits.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// The font catalog.
    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// The current text color swatch.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// The current highlight color swatch.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Whether the format painter is armed.
    pub fn painter_armed(&self) -> bool {
        self.painter.is_armed()
    }

    /// Whether the document changed since the last
    /// [`reset_content_modified`](Self::reset_content_modified).
    pub fn content_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modification flag. Hosts call this after saving.
    pub fn reset_content_modified(&mut self) {
        self.modified = false;
    }

    /// Freshly read indicator state for the current selection.
    pub fn indicators(&self) -> ToolbarIndicators {
        ToolbarIndicators::read(&self.buffer, self.painter.is_armed())
    }

    // =========================================================================
    // Command dispatch
    // =========================================================================

    /// Dispatch one toolbar command.
    pub fn execute(&mut self, command: FormatCommand) {
        match command {
            FormatCommand::SetFontFamily(name) => self.set_font_family(&name),
            FormatCommand::SetFontSize(input) => self.set_font_size(&input),
            FormatCommand::ToggleBold => self.toggle_bold(),
            FormatCommand::ToggleItalic => self.toggle_italic(),
            FormatCommand::ToggleUnderline => self.toggle_underline(),
            FormatCommand::ApplyTextColor(color) => self.apply_text_color(color),
            FormatCommand::ApplyBackgroundColor(color) => self.apply_background_color(color),
            FormatCommand::SetAlignment(alignment) => self.set_alignment(alignment),
            FormatCommand::ToggleBullet => self.toggle_bullet(),
            FormatCommand::ToggleSubscript => self.toggle_subscript(),
            FormatCommand::ToggleSuperscript => self.toggle_superscript(),
            FormatCommand::TransformCase(mode) => self.transform_case(mode),
            FormatCommand::Indent => self.indent(),
            FormatCommand::Outdent => self.outdent(),
            FormatCommand::CaptureFormat => self.capture_format(),
        }
    }

    /// Run one command body under the re-entrancy guard.
    ///
    /// Cancels an armed painter, runs `op`, then emits `content_changed`
    /// (when `op` reports a document change) and `indicators_changed`.
    fn command(&mut self, name: &'static str, op: impl FnOnce(&mut Self) -> bool) {
        if self.busy {
            tracing::trace!(target: "quillbar::format", command = name, "re-entrant command ignored");
            return;
        }
        self.busy = true;
        self.painter.cancel();
        let wrote = op(self);
        self.busy = false;

        tracing::trace!(target: "quillbar::format", command = name, wrote, "command finished");
        if wrote {
            self.modified = true;
            self.content_changed.emit(());
        }
        self.refresh_indicators();
    }

    fn refresh_indicators(&self) {
        self.indicators_changed.emit(self.indicators());
    }

    // =========================================================================
    // Font commands
    // =========================================================================

    /// Set the selection's font family, preserving per-run sizes and style
    /// flags.
    ///
    /// An unknown family aborts before any write; the indicator refresh
    /// reverts the toolbar combo.
    pub fn set_font_family(&mut self, name: &str) {
        self.command("set_font_family", |c| {
            let family = match c.fonts.resolve(name) {
                Ok(family) => family,
                Err(error) => {
                    tracing::debug!(target: "quillbar::format", %error, "rejected font family");
                    return false;
                }
            };
            let had_selection = !c.buffer.selection().is_empty();
            font_writer::apply_uniform(&mut c.buffer, &FontValue::Family(family));
            had_selection
        });
    }

    /// Set the selection's font size from raw toolbar text, preserving
    /// per-run families and style flags.
    ///
    /// Text that does not parse as a positive number aborts before any
    /// write; the indicator refresh reverts the toolbar combo.
    pub fn set_font_size(&mut self, input: &str) {
        self.command("set_font_size", |c| {
            let size = match font_writer::parse_size(input) {
                Ok(size) => size,
                Err(error) => {
                    tracing::debug!(target: "quillbar::format", %error, "rejected font size");
                    return false;
                }
            };
            let had_selection = !c.buffer.selection().is_empty();
            font_writer::apply_uniform(&mut c.buffer, &FontValue::Size(size));
            had_selection
        });
    }

    /// Toggle bold on the selection.
    pub fn toggle_bold(&mut self) {
        self.command("toggle_bold", |c| c.apply_style_toggle(StyleFlag::Bold));
    }

    /// Toggle italic on the selection.
    pub fn toggle_italic(&mut self) {
        self.command("toggle_italic", |c| c.apply_style_toggle(StyleFlag::Italic));
    }

    /// Toggle underline on the selection.
    pub fn toggle_underline(&mut self) {
        self.command("toggle_underline", |c| {
            c.apply_style_toggle(StyleFlag::Underline)
        });
    }

    /// Flip one style flag for every character in the selection, so a
    /// double toggle is always the identity. A caret flips the typing
    /// attributes instead.
    fn apply_style_toggle(&mut self, flag: StyleFlag) -> bool {
        let selection = self.buffer.selection();

        if selection.is_empty() {
            let mut attrs = self.buffer.typing_attributes();
            attrs.font.toggle_style_flag(flag);
            self.buffer.set_typing_attributes(attrs);
            return false;
        }

        let mut scope = BatchScope::new(&mut self.buffer);
        for index in selection.range() {
            let mut font = scope.font_at(index);
            font.toggle_style_flag(flag);
            scope.set_font(index..index + 1, &font);
        }
        drop(scope);
        self.buffer.set_selection(selection);
        true
    }

    // =========================================================================
    // Color commands
    // =========================================================================

    /// Apply a text color to the selection and remember it as the current
    /// swatch.
    pub fn apply_text_color(&mut self, color: Color) {
        self.command("apply_text_color", |c| {
            c.text_color = color;
            let selection = c.buffer.selection();
            if selection.is_empty() {
                let mut attrs = c.buffer.typing_attributes();
                attrs.text_color = color;
                c.buffer.set_typing_attributes(attrs);
                return false;
            }
            c.buffer.set_text_color(selection.range(), color);
            true
        });
    }

    /// Apply a background (highlight) color to the selection and remember
    /// it as the current swatch.
    pub fn apply_background_color(&mut self, color: Color) {
        self.command("apply_background_color", |c| {
            c.background_color = color;
            let selection = c.buffer.selection();
            if selection.is_empty() {
                let mut attrs = c.buffer.typing_attributes();
                attrs.background_color = color;
                c.buffer.set_typing_attributes(attrs);
                return false;
            }
            c.buffer.set_background_color(selection.range(), color);
            true
        });
    }

    // =========================================================================
    // Paragraph commands
    // =========================================================================

    /// Set the alignment of every paragraph the selection touches.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.command("set_alignment", |c| {
            c.rewrite_paragraphs(|format| format.with_alignment(alignment))
        });
    }

    /// Toggle the bullet marker on every paragraph the selection touches.
    ///
    /// The new state is the flipped bullet flag of the paragraph at the
    /// selection start.
    pub fn toggle_bullet(&mut self) {
        self.command("toggle_bullet", |c| {
            let start = c.buffer.selection().start;
            let bullet = !c.buffer.paragraph_format_at(start).bullet;
            c.rewrite_paragraphs(|format| format.with_bullet(bullet))
        });
    }

    /// Read-modify-write the paragraph format of every line the selection
    /// touches, preserving the fields `apply` leaves alone.
    fn rewrite_paragraphs(&mut self, apply: impl Fn(ParagraphFormat) -> ParagraphFormat) -> bool {
        let selection = self.buffer.selection();
        let first = self.buffer.line_of(selection.start);
        let last = self.buffer.line_of(selection.end());

        let mut scope = BatchScope::new(&mut self.buffer);
        for line in first..=last {
            let start = scope.line_start(line);
            let len = scope.line_len(line);
            let format = apply(scope.paragraph_format_at(start));
            scope.set_paragraph_format(start..start + len, &format);
        }
        true
    }

    // =========================================================================
    // Baseline commands
    // =========================================================================

    /// Toggle subscript on the selection.
    pub fn toggle_subscript(&mut self) {
        self.command("toggle_subscript", |c| {
            baseline::toggle(&mut c.buffer, BaselineDirection::Subscript)
        });
    }

    /// Toggle superscript on the selection.
    pub fn toggle_superscript(&mut self) {
        self.command("toggle_superscript", |c| {
            baseline::toggle(&mut c.buffer, BaselineDirection::Superscript)
        });
    }

    // =========================================================================
    // Case, indent, painter commands
    // =========================================================================

    /// Rewrite the selection's casing.
    pub fn transform_case(&mut self, mode: CaseMode) {
        self.command("transform_case", |c| c.case.transform(&mut c.buffer, mode));
    }

    /// Indent the selected lines by one tab (multi-line selections only).
    pub fn indent(&mut self) {
        self.command("indent", |c| indent::indent(&mut c.buffer));
    }

    /// Remove one level of leading indentation from the selected lines.
    pub fn outdent(&mut self) {
        self.command("outdent", |c| indent::outdent(&mut c.buffer));
    }

    /// Disarm the format painter without applying.
    ///
    /// Formatting commands cancel an armed painter themselves; hosts call
    /// this for the external paths that must also cancel it, such as
    /// opening the font-properties dialog.
    pub fn cancel_capture(&mut self) {
        if self.painter.cancel() {
            self.refresh_indicators();
        }
    }

    /// Capture the selection's format and arm the format painter.
    ///
    /// This is the one command that leaves the painter armed, so it does
    /// not go through the cancelling dispatch path.
    pub fn capture_format(&mut self) {
        if self.busy {
            tracing::trace!(target: "quillbar::format", "re-entrant capture ignored");
            return;
        }
        self.busy = true;
        self.painter.capture(&self.buffer);
        self.busy = false;
        self.refresh_indicators();
    }

    // =========================================================================
    // Notification sinks
    // =========================================================================

    /// The host widget reports a selection change. Refreshes indicators.
    ///
    /// Inert while a command runs: programmatic writes echo selection
    /// notifications that must not re-dispatch.
    pub fn note_selection_changed(&mut self) {
        if self.busy {
            return;
        }
        self.refresh_indicators();
    }

    /// The host widget reports a content edit (typing, paste, undo).
    pub fn note_content_changed(&mut self) {
        if self.busy {
            return;
        }
        self.modified = true;
        self.content_changed.emit(());
        self.refresh_indicators();
    }

    /// The host widget reports a pointer release.
    ///
    /// This is the format painter's commit trigger: an armed painter
    /// applies its snapshot to the selection as it stands now.
    pub fn note_pointer_released(&mut self) {
        if self.busy {
            return;
        }
        self.busy = true;
        let applied = self.painter.commit(&mut self.buffer);
        self.busy = false;

        if applied {
            self.modified = true;
            self.content_changed.emit(());
        }
        self.refresh_indicators();
    }
}
