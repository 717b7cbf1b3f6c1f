//! Prelude module for Quillbar.
//!
//! This module re-exports the most commonly used types for convenient
//! importing:
//!
//! ```
//! use quillbar::prelude::*;
//!
//! let mut buffer = MemoryBuffer::from_text("hello");
//! buffer.set_selection(Selection::new(0, 5));
//! let mut controller = FormatController::new(buffer, FontCatalog::with_families(["Arial"]));
//! controller.toggle_bold();
//! ```

// ============================================================================
// Attribute Model
// ============================================================================

pub use crate::attrs::{Alignment, CharAttributes, Color, FontSpec, ParagraphFormat, StyleFlag};

// ============================================================================
// Buffer Contract
// ============================================================================

pub use crate::buffer::{AttributedBuffer, MemoryBuffer, Selection};

// ============================================================================
// Formatting Engine
// ============================================================================

pub use crate::formatting::{
    BaselineDirection, BatchScope, CaseMode, FormatCommand, FormatController, FormatPainter,
    FormatSnapshot,
};

// ============================================================================
// Fonts, Errors, Indicators
// ============================================================================

pub use crate::error::{FormatError, FormatResult};
pub use crate::fonts::FontCatalog;
pub use crate::indicators::ToolbarIndicators;

// Signal primitives are re-exported so hosts can connect without depending
// on quillbar-core directly.
pub use quillbar_core::{ConnectionId, Signal};
