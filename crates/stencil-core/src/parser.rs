/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template scanner.
//!
//! The scanner walks the source looking for `{{` open markers. Text between
//! markers becomes [`Literal`] segments. At each open marker the strict
//! placeholder grammar must match starting exactly at the marker:
//!
//! ```text
//! {{ <whitespace>* <name> <whitespace>* }}
//! name := [A-Za-z0-9_.-]+
//! ```
//!
//! Whitespace inside the markers may include newlines. There is no escape
//! syntax: every `{{` in the source must begin a valid placeholder.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, StencilError};
use crate::segment::{Literal, Placeholder, Segment};

const OPEN_MARKER: &str = "{{";
const CLOSE_MARKER: &str = "}}";

/// The placeholder grammar, anchored to the start of the haystack.
static PLACEHOLDER_SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A\{\{[ \t\n\x0B\x0C\r]*(?P<name>[A-Za-z0-9_.\-]+)[ \t\n\x0B\x0C\r]*\}\}")
        .expect("placeholder grammar is a valid regex")
});

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// The parsed segments, in source order.
    pub(crate) segments: Vec<Segment>,

    /// Original source.
    pub(crate) source: String,
}

impl Template {
    /// Parse a template from source text.
    ///
    /// # Returns
    /// The parsed template, or the first syntax error in the source.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let segments = parse_segments(source)?;
        tracing::trace!(
            segments = segments.len(),
            bytes = source.len(),
            "parsed template"
        );
        Ok(Template {
            segments,
            source: source.to_string(),
        })
    }

    /// The parsed segments, in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The source text this template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(placeholder) = segment {
                if !names.contains(&placeholder.name.as_str()) {
                    names.push(&placeholder.name);
                }
            }
        }
        names
    }
}

impl fmt::Display for Template {
    /// Re-serialize the template with placeholders in normalized form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Template {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Template::parse(s)?)
    }
}

fn literal(source: &str, start: usize, end: usize) -> Segment {
    Segment::Literal(Literal {
        text: source[start..end].to_string(),
        range: start..end,
    })
}

/// Split `source` into literal and placeholder segments.
pub(crate) fn parse_segments(source: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let max = source.len();

    while cursor < max {
        let Some(found) = source[cursor..].find(OPEN_MARKER) else {
            // No more placeholders
            segments.push(literal(source, cursor, max));
            break;
        };
        let open = cursor + found;

        if open != cursor {
            segments.push(literal(source, cursor, open));
        }

        let after_open = open + OPEN_MARKER.len();
        if after_open >= max {
            return Err(ParseError::TrailingOpenMarker {
                offset: open,
                input: source.to_string(),
            });
        }

        if !source[after_open..].contains(CLOSE_MARKER) {
            return Err(ParseError::UnterminatedPlaceholder {
                offset: open,
                input: source.to_string(),
            });
        }

        let Some(captures) = PLACEHOLDER_SYNTAX.captures(&source[open..]) else {
            return Err(ParseError::InvalidPlaceholder {
                offset: open,
                input: source.to_string(),
            });
        };

        // Group 0 always participates in a match
        let end = open + captures.get(0).map_or(0, |m| m.end());
        segments.push(Segment::Placeholder(Placeholder {
            name: captures["name"].to_string(),
            range: open..end,
        }));
        cursor = end;
    }

    Ok(segments)
}
