/*
 * segment.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parsed template segments.
//!
//! Segments own their text and carry the byte range they were parsed from,
//! so a parsed template can outlive its source and be shared freely.

use std::fmt;
use std::ops::Range;

/// One unit of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied to the output verbatim.
    Literal(Literal),

    /// A `{{ name }}` substitution point.
    Placeholder(Placeholder),
}

impl Segment {
    /// Byte range of this segment in the template source.
    pub fn range(&self) -> Range<usize> {
        match self {
            Segment::Literal(literal) => literal.range.clone(),
            Segment::Placeholder(placeholder) => placeholder.range.clone(),
        }
    }
}

/// A verbatim run of template text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// The literal text content.
    pub text: String,
    /// Byte range of the text in the template source.
    pub range: Range<usize>,
}

/// A validated placeholder reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// The referenced parameter name.
    pub name: String,
    /// Byte range of the whole `{{ ... }}` occurrence, markers included.
    pub range: Range<usize>,
}

impl fmt::Display for Segment {
    /// Literal text as-is; placeholders in the normalized `{{ name }}` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(literal) => f.write_str(&literal.text),
            Segment::Placeholder(placeholder) => write!(f, "{{{{ {} }}}}", placeholder.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let literal = Segment::Literal(Literal {
            text: "Hi, ".to_string(),
            range: 0..4,
        });
        let placeholder = Segment::Placeholder(Placeholder {
            name: "user".to_string(),
            range: 4..14,
        });
        assert_eq!(literal.to_string(), "Hi, ");
        assert_eq!(placeholder.to_string(), "{{ user }}");
        assert_eq!(placeholder.range(), 4..14);
    }
}
