/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template parsing and formatting.

use std::fmt;

use thiserror::Error;

/// A position in a template source (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    /// Byte offset from the start of the template.
    pub offset: usize,
    /// Row number (0-indexed).
    pub row: usize,
    /// Column number (0-indexed, in characters not bytes).
    pub column: usize,
}

impl Location {
    /// Convert a byte offset into `source` to a row/column location.
    ///
    /// Offsets past the end of `source` are clamped to its length.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut row = 0;
        let mut column = 0;

        for (idx, ch) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                row += 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        Location {
            offset,
            row,
            column,
        }
    }
}

/// Errors raised while scanning a template.
///
/// Every variant records the byte offset of the open marker at fault and
/// the complete template that was being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The template ends immediately after an open marker.
    TrailingOpenMarker { offset: usize, input: String },

    /// An open marker has no close marker anywhere after it.
    UnterminatedPlaceholder { offset: usize, input: String },

    /// The text following an open marker is not a valid placeholder.
    InvalidPlaceholder { offset: usize, input: String },
}

impl ParseError {
    /// Byte offset of the open marker that caused the failure.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::TrailingOpenMarker { offset, .. }
            | ParseError::UnterminatedPlaceholder { offset, .. }
            | ParseError::InvalidPlaceholder { offset, .. } => *offset,
        }
    }

    /// The template that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            ParseError::TrailingOpenMarker { input, .. }
            | ParseError::UnterminatedPlaceholder { input, .. }
            | ParseError::InvalidPlaceholder { input, .. } => input,
        }
    }

    /// Row/column position of the failure within the input.
    pub fn location(&self) -> Location {
        Location::from_offset(self.input(), self.offset())
    }

    /// The one-line message, without the echoed input.
    pub fn summary(&self) -> String {
        match self {
            ParseError::TrailingOpenMarker { .. } => {
                "Encountered trailing opening brackets".to_string()
            }
            ParseError::UnterminatedPlaceholder { .. } => {
                "Encountered opening brackets ({{) without corresponding closing brackets (}})"
                    .to_string()
            }
            ParseError::InvalidPlaceholder { offset, .. } => {
                format!("Parameter located at index {offset} is invalid")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())?;
        let input = self.input();
        if !input.trim().is_empty() {
            write!(f, "\n\nInput: {input}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur during stencil operations.
#[derive(Debug, Error)]
pub enum StencilError {
    /// The template could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A placeholder names a parameter that was not supplied.
    #[error("Parameter {name} was required but no value was provided")]
    MissingParameter { name: String },

    /// The formatter's output destination was already closed.
    #[error("This formatter instance was closed")]
    Closed,

    /// A code point does not denote a Unicode scalar value.
    #[error("Invalid character code point: U+{code:04X}")]
    InvalidCharacter { code: u32 },

    /// A locale tag could not be understood.
    #[error("Invalid locale tag: {tag:?}")]
    InvalidLocale { tag: String },

    /// The output destination rejected a write.
    #[error("Failed to write formatted output")]
    Write(#[from] std::fmt::Error),
}

/// Result type for stencil operations.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_offset() {
        let source = "ab\ncd{{ x";
        assert_eq!(
            Location::from_offset(source, 5),
            Location {
                offset: 5,
                row: 1,
                column: 2
            }
        );
        assert_eq!(Location::from_offset(source, 0).column, 0);
    }

    #[test]
    fn test_location_counts_characters() {
        // "é" is two bytes but one column
        let source = "é{{";
        let loc = Location::from_offset(source, 2);
        assert_eq!(loc.row, 0);
        assert_eq!(loc.column, 1);
    }

    #[test]
    fn test_location_clamps_offset() {
        assert_eq!(Location::from_offset("abc", 99).offset, 3);
    }

    #[test]
    fn test_parse_error_message_includes_input() {
        let err = ParseError::InvalidPlaceholder {
            offset: 4,
            input: "Hi, {{ a b }}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parameter located at index 4 is invalid\n\nInput: Hi, {{ a b }}"
        );
        assert_eq!(err.summary(), "Parameter located at index 4 is invalid");
    }

    #[test]
    fn test_parse_error_blank_input_omitted() {
        let err = ParseError::TrailingOpenMarker {
            offset: 0,
            input: "   ".to_string(),
        };
        assert_eq!(err.to_string(), "Encountered trailing opening brackets");
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = StencilError::MissingParameter {
            name: "user".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parameter user was required but no value was provided"
        );
    }
}
