//! Toolbar indicator state.
//!
//! After every command and selection change the toolbar re-reads the
//! attributes under the selection; indicator state is always derived fresh
//! from the buffer, never cached or mutated in place.
//!
//! When the selection's font is mixed, the family and size fields read
//! blank and the style checks read unchecked, matching the behavior of
//! classic rich-edit toolbars.

use crate::attrs::{Alignment, FontSpec};
use crate::buffer::{AttributedBuffer, Selection};

/// A snapshot of everything the formatting toolbar displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarIndicators {
    /// Font family combo text. Blank when the selection's font is mixed.
    pub family_text: String,
    /// Font size combo text. Blank when the selection's font is mixed.
    pub size_text: String,
    /// Bold button check state.
    pub bold: bool,
    /// Italic button check state.
    pub italic: bool,
    /// Underline button check state.
    pub underline: bool,
    /// Bullet-list button check state.
    pub bullet: bool,
    /// Subscript button check state (baseline offset below normal).
    pub subscript: bool,
    /// Superscript button check state (baseline offset above normal).
    pub superscript: bool,
    /// Active alignment button.
    pub alignment: Alignment,
    /// Format painter button check state.
    pub painter_armed: bool,
}

impl ToolbarIndicators {
    /// Read fresh indicator state from `buffer`.
    pub fn read<B: AttributedBuffer>(buffer: &B, painter_armed: bool) -> Self {
        let selection = buffer.selection();
        let attrs = buffer.probe_attributes();
        let paragraph = buffer.paragraph_format_at(selection.start);

        let (family_text, size_text, bold, italic, underline) =
            match uniform_font(buffer, selection) {
                Some(font) => (
                    font.family.clone(),
                    format!("{}", font.size),
                    font.bold,
                    font.italic,
                    font.underline,
                ),
                None => (String::new(), String::new(), false, false, false),
            };

        Self {
            family_text,
            size_text,
            bold,
            italic,
            underline,
            bullet: paragraph.bullet,
            subscript: attrs.baseline_offset < 0,
            superscript: attrs.baseline_offset > 0,
            alignment: paragraph.alignment,
            painter_armed,
        }
    }
}

/// The selection's font if it is uniform, `None` when mixed.
///
/// A caret reports the font that would apply to typed text.
fn uniform_font<B: AttributedBuffer>(buffer: &B, selection: Selection) -> Option<FontSpec> {
    if selection.is_empty() {
        return Some(buffer.probe_attributes().font);
    }

    let first = buffer.font_at(selection.start);
    for index in selection.range().skip(1) {
        if buffer.font_at(index) != first {
            return None;
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::ParagraphFormat;
    use crate::buffer::MemoryBuffer;

    #[test]
    fn test_uniform_selection_reports_font() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_font(0..5, &FontSpec::new("Arial", 14.0).with_bold(true));
        buffer.set_selection(Selection::new(0, 5));

        let indicators = ToolbarIndicators::read(&buffer, false);

        assert_eq!(indicators.family_text, "Arial");
        assert_eq!(indicators.size_text, "14");
        assert!(indicators.bold);
        assert!(!indicators.italic);
    }

    #[test]
    fn test_mixed_selection_reads_blank() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_font(0..2, &FontSpec::new("Arial", 14.0));
        buffer.set_font(2..5, &FontSpec::new("Georgia", 14.0));
        buffer.set_selection(Selection::new(0, 5));

        let indicators = ToolbarIndicators::read(&buffer, false);

        assert_eq!(indicators.family_text, "");
        assert_eq!(indicators.size_text, "");
        assert!(!indicators.bold);
    }

    #[test]
    fn test_caret_reports_typing_font() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_selection(Selection::caret(5));
        let mut attrs = buffer.typing_attributes();
        attrs.font = FontSpec::new("Georgia", 18.0).with_italic(true);
        buffer.set_typing_attributes(attrs);

        let indicators = ToolbarIndicators::read(&buffer, false);

        assert_eq!(indicators.family_text, "Georgia");
        assert_eq!(indicators.size_text, "18");
        assert!(indicators.italic);
    }

    #[test]
    fn test_fractional_size_text() {
        let mut buffer = MemoryBuffer::from_text("hi");
        buffer.set_font(0..2, &FontSpec::new("Arial", 10.5));
        buffer.set_selection(Selection::new(0, 2));

        let indicators = ToolbarIndicators::read(&buffer, false);
        assert_eq!(indicators.size_text, "10.5");
    }

    #[test]
    fn test_baseline_and_paragraph_state() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_baseline_offset(0..5, -3);
        buffer.set_paragraph_format(
            0..5,
            &ParagraphFormat::new()
                .with_alignment(Alignment::Right)
                .with_bullet(true),
        );
        buffer.set_selection(Selection::new(0, 5));

        let indicators = ToolbarIndicators::read(&buffer, true);

        assert!(indicators.subscript);
        assert!(!indicators.superscript);
        assert!(indicators.bullet);
        assert_eq!(indicators.alignment, Alignment::Right);
        assert!(indicators.painter_armed);
    }
}
