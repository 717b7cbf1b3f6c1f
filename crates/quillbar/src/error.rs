//! Error types for the formatting layer.

use thiserror::Error;

/// Errors raised while validating a formatting command.
///
/// All of these are handled locally by the command dispatch: the operation
/// aborts before the first attribute write and the toolbar indicators are
/// re-emitted so the originating control reverts to the true state. None of
/// them are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The requested font family does not resolve to an available font.
    #[error("font family '{family}' is not available")]
    InvalidFontFamily { family: String },

    /// The requested font size does not parse as a positive number.
    #[error("'{input}' is not a valid font size")]
    InvalidNumericInput { input: String },

    /// The operation requires a non-empty selection.
    #[error("operation requires a non-empty selection")]
    NoOpSelection,
}

/// Result type for formatting validation.
pub type FormatResult<T> = Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let family = FormatError::InvalidFontFamily {
            family: "Wingbats".to_string(),
        };
        assert_eq!(family.to_string(), "font family 'Wingbats' is not available");

        let size = FormatError::InvalidNumericInput {
            input: "abc".to_string(),
        };
        assert_eq!(size.to_string(), "'abc' is not a valid font size");

        assert_eq!(
            FormatError::NoOpSelection.to_string(),
            "operation requires a non-empty selection"
        );
    }
}
