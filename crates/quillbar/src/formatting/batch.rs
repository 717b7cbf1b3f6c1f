//! Scoped batch updates.
//!
//! Every formatting operation that performs more than one attribute write
//! wraps the writes in a [`BatchScope`], so the host widget suppresses
//! redraw and coalesces its change notifications for the duration. The
//! scope is a drop guard: the batch is closed on every exit path, including
//! early aborts.

use std::ops::{Deref, DerefMut};

use crate::buffer::AttributedBuffer;

/// RAII guard over a buffer's batch scope.
///
/// Opens a batch on construction and closes it when dropped. The scope
/// dereferences to the buffer, so writes go through the guard:
///
/// ```
/// use quillbar::buffer::{AttributedBuffer, MemoryBuffer};
/// use quillbar::formatting::BatchScope;
/// use quillbar::attrs::Color;
///
/// let mut buffer = MemoryBuffer::from_text("hello");
/// {
///     let mut scope = BatchScope::new(&mut buffer);
///     scope.set_text_color(0..2, Color::RED);
///     scope.set_text_color(2..5, Color::RED);
/// } // batch closes here, one coalesced notification
/// ```
pub struct BatchScope<'a, B: AttributedBuffer> {
    buffer: &'a mut B,
}

impl<'a, B: AttributedBuffer> BatchScope<'a, B> {
    /// Open a batch on `buffer`.
    pub fn new(buffer: &'a mut B) -> Self {
        buffer.begin_batch();
        Self { buffer }
    }
}

impl<B: AttributedBuffer> Deref for BatchScope<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.buffer
    }
}

impl<B: AttributedBuffer> DerefMut for BatchScope<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.buffer
    }
}

impl<B: AttributedBuffer> Drop for BatchScope<'_, B> {
    fn drop(&mut self) {
        self.buffer.end_batch();
    }
}
