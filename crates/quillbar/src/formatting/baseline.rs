//! Subscript and superscript toggles with size compensation.
//!
//! Raised and lowered text is drawn at [`BASELINE_SCALE`] of its base size.
//! Toggling always restores the base size first and then reapplies the
//! scale, so switching directly from subscript to superscript (or back)
//! never compounds the factor.

use crate::buffer::AttributedBuffer;
use crate::formatting::batch::BatchScope;
use crate::formatting::font_writer::{self, FontValue};

/// Size factor applied to raised or lowered text.
pub const BASELINE_SCALE: f32 = 0.8;

/// Baseline displacement applied to raised or lowered text.
pub const BASELINE_SHIFT: i32 = 3;

/// Which baseline toggle was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineDirection {
    /// Raise above the baseline (positive offset).
    Superscript,
    /// Lower below the baseline (negative offset).
    Subscript,
}

impl BaselineDirection {
    /// The baseline offset this direction applies when turned on.
    fn shift(self) -> i32 {
        match self {
            Self::Superscript => BASELINE_SHIFT,
            Self::Subscript => -BASELINE_SHIFT,
        }
    }

    /// Whether an existing offset means this direction is already on.
    fn is_active(self, offset: i32) -> bool {
        match self {
            Self::Superscript => offset > 0,
            Self::Subscript => offset < 0,
        }
    }
}

/// Toggle subscript or superscript on the current selection.
///
/// Probes the font size and baseline offset at the selection start. If the
/// character is displaced in any direction, its size is first restored to
/// `size / 0.8`; the toggle then either applies `base * 0.8` with the
/// direction's offset (turning on) or leaves the base size with offset 0
/// (turning off). Per-character families and style flags survive because
/// the size is written through the run-coalescing font writer.
///
/// An empty selection updates the typing attributes instead. Returns `true`
/// if document characters were written.
pub fn toggle<B: AttributedBuffer>(buffer: &mut B, direction: BaselineDirection) -> bool {
    let selection = buffer.selection();

    if selection.is_empty() {
        let mut attrs = buffer.typing_attributes();
        let (size, offset) = toggled(attrs.font.size, attrs.baseline_offset, direction);
        attrs.font.size = size;
        attrs.baseline_offset = offset;
        buffer.set_typing_attributes(attrs);
        return false;
    }

    let current_size = buffer.font_at(selection.start).size;
    let current_offset = buffer.baseline_offset_at(selection.start);
    let (new_size, new_offset) = toggled(current_size, current_offset, direction);

    let mut scope = BatchScope::new(buffer);
    font_writer::apply_uniform(&mut *scope, &FontValue::Size(new_size));
    scope.set_baseline_offset(selection.range(), new_offset);
    drop(scope);

    buffer.set_selection(selection);

    tracing::trace!(
        target: "quillbar::format",
        ?direction,
        new_offset,
        "baseline toggle"
    );
    true
}

/// Compute the restored-then-reapplied size and offset.
fn toggled(size: f32, offset: i32, direction: BaselineDirection) -> (f32, i32) {
    // Restore the base size before deciding anything else.
    let base = if offset != 0 { size / BASELINE_SCALE } else { size };

    if direction.is_active(offset) {
        // Turning off: back to the base size on the normal baseline.
        (base, 0)
    } else {
        (base * BASELINE_SCALE, direction.shift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::FontSpec;
    use crate::buffer::{MemoryBuffer, Selection};

    fn buffer_with_size(size: f32) -> MemoryBuffer {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_font(0..5, &FontSpec::new("Arial", size));
        buffer.set_selection(Selection::new(0, 5));
        buffer
    }

    #[test]
    fn test_superscript_on() {
        let mut buffer = buffer_with_size(10.0);

        assert!(toggle(&mut buffer, BaselineDirection::Superscript));

        assert_eq!(buffer.font_at(0).size, 8.0);
        assert_eq!(buffer.baseline_offset_at(0), BASELINE_SHIFT);
        assert_eq!(buffer.selection(), Selection::new(0, 5));
    }

    #[test]
    fn test_superscript_roundtrip_restores_size() {
        let mut buffer = buffer_with_size(10.0);

        toggle(&mut buffer, BaselineDirection::Superscript);
        toggle(&mut buffer, BaselineDirection::Superscript);

        assert!((buffer.font_at(0).size - 10.0).abs() < 1e-4);
        assert_eq!(buffer.baseline_offset_at(0), 0);
    }

    #[test]
    fn test_subscript_on() {
        let mut buffer = buffer_with_size(12.0);

        toggle(&mut buffer, BaselineDirection::Subscript);

        assert!((buffer.font_at(0).size - 9.6).abs() < 1e-4);
        assert_eq!(buffer.baseline_offset_at(0), -BASELINE_SHIFT);
    }

    #[test]
    fn test_switch_subscript_to_superscript_does_not_compound() {
        let mut buffer = buffer_with_size(10.0);

        toggle(&mut buffer, BaselineDirection::Subscript);
        toggle(&mut buffer, BaselineDirection::Superscript);

        // The scale factor applies to the restored base size, once.
        assert!((buffer.font_at(0).size - 8.0).abs() < 1e-4);
        assert_eq!(buffer.baseline_offset_at(0), BASELINE_SHIFT);

        toggle(&mut buffer, BaselineDirection::Superscript);
        assert!((buffer.font_at(0).size - 10.0).abs() < 1e-4);
        assert_eq!(buffer.baseline_offset_at(0), 0);
    }

    #[test]
    fn test_mixed_families_survive_toggle() {
        let mut buffer = MemoryBuffer::from_text("aabb");
        buffer.set_font(0..2, &FontSpec::new("Arial", 10.0));
        buffer.set_font(2..4, &FontSpec::new("Georgia", 10.0));
        buffer.set_selection(Selection::new(0, 4));

        toggle(&mut buffer, BaselineDirection::Superscript);

        assert_eq!(buffer.font_at(0).family, "Arial");
        assert_eq!(buffer.font_at(2).family, "Georgia");
        assert_eq!(buffer.font_at(0).size, 8.0);
        assert_eq!(buffer.font_at(2).size, 8.0);
    }

    #[test]
    fn test_caret_updates_typing_attributes() {
        let mut buffer = MemoryBuffer::from_text("hello");
        buffer.set_selection(Selection::caret(5));

        assert!(!toggle(&mut buffer, BaselineDirection::Subscript));

        let attrs = buffer.typing_attributes();
        assert_eq!(attrs.baseline_offset, -BASELINE_SHIFT);
        assert!((attrs.font.size - crate::attrs::DEFAULT_FONT_SIZE * 0.8).abs() < 1e-4);
    }
}
