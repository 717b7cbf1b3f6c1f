//! One-shot format painter.
//!
//! The painter spans two unrelated interactions: a capture command on one
//! selection, then a commit when the user releases the pointer after making
//! a new selection. Between the two it is `Armed`; any other formatting
//! command disarms it without applying. The snapshot is consumed exactly
//! once.

use crate::attrs::{Alignment, Color, FontSpec, ParagraphFormat};
use crate::buffer::AttributedBuffer;
use crate::formatting::batch::BatchScope;

/// A captured, immutable copy of one selection's full attribute set,
/// pending one-time application elsewhere.
///
/// The baseline offset is deliberately not captured: painting a format onto
/// text never raises or lowers it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSnapshot {
    /// Captured font (family, size, style flags).
    pub font: FontSpec,
    /// Captured text color.
    pub text_color: Color,
    /// Captured background color.
    pub background_color: Color,
    /// Captured bullet flag.
    pub bullet: bool,
    /// Captured bullet indent.
    pub bullet_indent: i32,
    /// Captured paragraph alignment.
    pub alignment: Alignment,
}

/// Painter state: either idle, or armed with a pending snapshot.
#[derive(Debug, Default)]
enum PainterState {
    /// Nothing captured; commits and cancels are no-ops.
    #[default]
    Idle,
    /// A snapshot is waiting for the next selection commit.
    Armed(FormatSnapshot),
}

/// The format painter state machine.
#[derive(Debug, Default)]
pub struct FormatPainter {
    state: PainterState,
}

impl FormatPainter {
    /// Create an idle painter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot is armed and waiting for a selection commit.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, PainterState::Armed(_))
    }

    /// Capture the current selection's format and arm the painter.
    ///
    /// A repeated capture simply replaces the pending snapshot.
    pub fn capture<B: AttributedBuffer>(&mut self, buffer: &B) {
        let attrs = buffer.probe_attributes();
        let paragraph = buffer.paragraph_format_at(buffer.selection().start);

        self.state = PainterState::Armed(FormatSnapshot {
            font: attrs.font,
            text_color: attrs.text_color,
            background_color: attrs.background_color,
            bullet: paragraph.bullet,
            bullet_indent: paragraph.bullet_indent,
            alignment: paragraph.alignment,
        });

        tracing::trace!(target: "quillbar::painter", "captured format snapshot");
    }

    /// Disarm without applying.
    ///
    /// Returns `true` if the painter was armed. Called when any other
    /// formatting command fires first.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.is_armed();
        if was_armed {
            self.state = PainterState::Idle;
            tracing::trace!(target: "quillbar::painter", "cancelled format snapshot");
        }
        was_armed
    }

    /// Apply the pending snapshot to the current selection and disarm.
    ///
    /// Every captured field overwrites the target's attributes, whatever
    /// they were. A caret target receives the character attributes as
    /// typing attributes; the paragraph format applies to the caret's
    /// paragraph either way. Idle painters ignore the commit and return
    /// `false`.
    pub fn commit<B: AttributedBuffer>(&mut self, buffer: &mut B) -> bool {
        let snapshot = match std::mem::take(&mut self.state) {
            PainterState::Idle => return false,
            PainterState::Armed(snapshot) => snapshot,
        };

        let selection = buffer.selection();
        let mut scope = BatchScope::new(buffer);

        if selection.is_empty() {
            let mut attrs = scope.typing_attributes();
            attrs.font = snapshot.font.clone();
            attrs.text_color = snapshot.text_color;
            attrs.background_color = snapshot.background_color;
            scope.set_typing_attributes(attrs);
        } else {
            scope.set_font(selection.range(), &snapshot.font);
            scope.set_text_color(selection.range(), snapshot.text_color);
            scope.set_background_color(selection.range(), snapshot.background_color);
        }

        let paragraph = ParagraphFormat::new()
            .with_alignment(snapshot.alignment)
            .with_bullet(snapshot.bullet)
            .with_bullet_indent(snapshot.bullet_indent);
        scope.set_paragraph_format(selection.range(), &paragraph);

        drop(scope);
        buffer.set_selection(selection);

        tracing::trace!(
            target: "quillbar::painter",
            chars = selection.len,
            "applied format snapshot"
        );
        true
    }
}
