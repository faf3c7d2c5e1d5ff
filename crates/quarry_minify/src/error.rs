//! Error types for the built-in minifiers.

/// Errors raised by the built-in minifiers on malformed input.
///
/// The minifiers are total over well-formed input; these errors are only
/// produced for input the scanner cannot safely tokenize. Line numbers
/// refer to the line where the offending construct starts (1-based).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MinifyError {
    /// A string literal is not closed before a newline or end of input.
    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString {
        /// Line where the string literal opens.
        line: usize,
    },

    /// A block comment is not closed before end of input.
    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment {
        /// Line where the comment opens.
        line: usize,
    },

    /// A regular expression literal is not closed before a newline or end of input.
    #[error("unterminated regular expression literal at line {line}")]
    UnterminatedRegex {
        /// Line where the regex literal opens.
        line: usize,
    },

    /// A template literal is not closed before end of input.
    #[error("unterminated template literal starting at line {line}")]
    UnterminatedTemplate {
        /// Line where the template literal opens.
        line: usize,
    },
}
