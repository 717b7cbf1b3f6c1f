//! Logging facilities for Quillbar.
//!
//! Quillbar uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Host application code...
//! }
//! ```
//!
//! Engines log individual attribute writes and skipped writes at `trace`
//! level and validation failures at `debug` level. Use the constants in
//! [`targets`] with `tracing` directives (e.g. `RUST_LOG`) to filter by
//! subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "quillbar_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "quillbar_core::signal";
    /// Formatting command dispatch target.
    pub const FORMAT: &str = "quillbar::format";
    /// Run-coalescing font writer target.
    pub const FONT_WRITER: &str = "quillbar::font_writer";
    /// Case transformer target.
    pub const CASE: &str = "quillbar::case";
    /// Indent engine target.
    pub const INDENT: &str = "quillbar::indent";
    /// Format painter target.
    pub const PAINTER: &str = "quillbar::painter";
    /// Reference buffer target.
    pub const BUFFER: &str = "quillbar::buffer";
}
