//! Error codes for diagram document diagnostics.
//!
//! - `E0xx` - Lexical errors inside a tag
//! - `E1xx` - Document structure errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unterminated attribute value.
    ///
    /// A quoted attribute value was opened but never closed.
    E001,

    /// Unexpected character.
    ///
    /// A character was encountered that is not valid inside a tag.
    E002,

    /// Unterminated markup declaration.
    ///
    /// A comment, processing instruction, CDATA section or declaration
    /// reached the end of the input without its terminator.
    E003,

    /// Mismatched closing tag.
    ///
    /// A closing tag names a different element than the one currently open.
    E100,

    /// Unclosed element.
    ///
    /// The input ended while an element was still open.
    E101,

    /// Missing root element.
    ///
    /// The document contains no element at all.
    E102,

    /// Trailing content.
    ///
    /// Something other than comments, processing instructions or whitespace
    /// follows the root element.
    E103,

    /// Nesting too deep.
    ///
    /// Elements are nested beyond the supported depth.
    E104,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated attribute value",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "unterminated markup declaration",
            ErrorCode::E100 => "mismatched closing tag",
            ErrorCode::E101 => "unclosed element",
            ErrorCode::E102 => "missing root element",
            ErrorCode::E103 => "trailing content",
            ErrorCode::E104 => "nesting too deep",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E103.to_string(), "E103");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::E001.description(),
            "unterminated attribute value"
        );
        assert_eq!(ErrorCode::E100.description(), "mismatched closing tag");
    }
}
