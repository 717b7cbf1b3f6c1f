//! Run-coalescing font writer.
//!
//! Applies a uniform value for one font dimension (family or size) across a
//! selection while leaving the other dimension and the style flags of every
//! character exactly as they were. The buffer contract only answers
//! point probes, so the writer walks the selection one character at a time,
//! re-seeding its candidate font whenever the probe shows a new run, and
//! writing only the characters whose targeted dimension actually differs.
//!
//! A selection spanning runs of different sizes therefore keeps each run's
//! own size when the family changes, and symmetrically for size changes
//! across mixed families.

use std::str::FromStr;

use crate::attrs::FontSpec;
use crate::buffer::AttributedBuffer;
use crate::error::{FormatError, FormatResult};
use crate::formatting::batch::BatchScope;

/// The uniform value a font write applies: one dimension, one value.
#[derive(Debug, Clone, PartialEq)]
pub enum FontValue {
    /// Set the font family, preserving per-run sizes.
    Family(String),
    /// Set the font size, preserving per-run families.
    Size(f32),
}

/// Parse toolbar text into a font size.
///
/// Accepts any positive finite real; everything else is
/// [`FormatError::InvalidNumericInput`].
pub fn parse_size(input: &str) -> FormatResult<f32> {
    match f32::from_str(input.trim()) {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        _ => Err(FormatError::InvalidNumericInput {
            input: input.to_string(),
        }),
    }
}

/// Apply `value` uniformly across the current selection.
///
/// An empty selection (caret) updates the typing attributes instead of
/// looping over characters. A non-empty selection runs inside a batch scope
/// and restores the original selection afterwards.
///
/// The caller validates `value` first; this function never fails.
pub fn apply_uniform<B: AttributedBuffer>(buffer: &mut B, value: &FontValue) {
    let selection = buffer.selection();

    if selection.is_empty() {
        // Degenerate caret case: only subsequent typing is affected.
        let mut attrs = buffer.typing_attributes();
        match value {
            FontValue::Family(family) => attrs.font.family = family.clone(),
            FontValue::Size(size) => attrs.font.size = *size,
        }
        buffer.set_typing_attributes(attrs);
        return;
    }

    let mut scope = BatchScope::new(buffer);

    // Seed from the first character's actual font; the candidate is the
    // seed with the targeted dimension replaced.
    let mut seed = scope.font_at(selection.start);
    let mut candidate = merged(&seed, value);
    let mut writes = 0usize;

    for index in selection.range() {
        let current = scope.font_at(index);

        // A new run starts wherever the untargeted parts of the font
        // diverge from the seed; re-derive the candidate from the actual
        // attributes there so they survive the write untouched.
        let run_broke = match value {
            FontValue::Family(_) => !current.same_except_family(&seed),
            FontValue::Size(_) => !current.same_except_size(&seed),
        };
        if run_broke {
            seed = current.clone();
            candidate = merged(&seed, value);
        }

        let differs = match value {
            FontValue::Family(family) => current.family != *family,
            FontValue::Size(size) => current.size != *size,
        };
        if differs {
            scope.set_font(index..index + 1, &candidate);
            writes += 1;
        }
    }

    drop(scope);
    buffer.set_selection(selection);

    tracing::trace!(
        target: "quillbar::font_writer",
        chars = selection.len,
        writes,
        "applied uniform font value"
    );
}

/// The seed font with the targeted dimension replaced by `value`.
fn merged(seed: &FontSpec, value: &FontValue) -> FontSpec {
    let mut font = seed.clone();
    match value {
        FontValue::Family(family) => font.family = family.clone(),
        FontValue::Size(size) => font.size = *size,
    }
    font
}
