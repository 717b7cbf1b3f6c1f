//! Toolbar-driven rich text formatting for attributed text widgets.
//!
//! Quillbar is the engine behind a rich-text formatting toolbar. It does
//! not render, lay out, or edit text itself: the host widget keeps those
//! jobs and exposes its document through the
//! [`AttributedBuffer`](buffer::AttributedBuffer) contract. Quillbar turns
//! each toolbar command into the minimal set of per-character attribute
//! writes that applies the requested formatting while preserving every
//! attribute the command does not target.
//!
//! The host only answers point probes ("what are the attributes at this
//! index?"), so the engine reconstructs attribute runs by walking the
//! selection, and wraps its write loops in a redraw-suppressing batch
//! scope so the document never flickers mid-command.
//!
//! # Components
//!
//! - [`formatting::FormatController`]: the command dispatcher toolbars talk to
//! - [`formatting::font_writer`]: run-preserving family/size writes
//! - [`formatting::case`]: sentence/word/character case transforms
//! - [`formatting::indent`]: multi-line indent and outdent
//! - [`formatting::baseline`]: subscript/superscript with size compensation
//! - [`formatting::painter`]: the one-shot format painter
//! - [`buffer::MemoryBuffer`]: an in-memory reference buffer for tests and
//!   headless hosts
//! - [`fonts::FontCatalog`]: font family validation
//! - [`indicators::ToolbarIndicators`]: the state toolbar controls display
//!
//! # Example
//!
//! ```
//! use quillbar::buffer::{AttributedBuffer, MemoryBuffer, Selection};
//! use quillbar::fonts::FontCatalog;
//! use quillbar::formatting::{CaseMode, FormatController};
//!
//! let mut buffer = MemoryBuffer::from_text("hello world. new sentence");
//! buffer.set_selection(Selection::new(0, 25));
//!
//! let mut controller =
//!     FormatController::new(buffer, FontCatalog::with_families(["Georgia"]));
//!
//! controller.transform_case(CaseMode::SentenceStart);
//! assert_eq!(controller.buffer().text(), "Hello world. New sentence");
//!
//! // The selection the user made is still in place.
//! assert_eq!(controller.buffer().selection(), Selection::new(0, 25));
//! ```

pub mod attrs;
pub mod buffer;
pub mod error;
pub mod fonts;
pub mod formatting;
pub mod indicators;

pub mod prelude;

pub use error::{FormatError, FormatResult};
