/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Terminal reports for template parse errors.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use stencil_core::ParseError;

/// Render a parse error as an ariadne report pointing at the open marker.
///
/// `source_name` labels the report (a file path or `<template>`).
pub fn render_parse_error(err: &ParseError, source_name: &str, color: bool) -> String {
    let input = err.input();
    let (start, end) = marker_span(input, err.offset());

    let label = match err {
        ParseError::TrailingOpenMarker { .. } => "nothing follows this marker",
        ParseError::UnterminatedPlaceholder { .. } => "no closing `}}` after this marker",
        ParseError::InvalidPlaceholder { .. } => {
            "expected `{{ name }}` with a name of letters, digits, `_`, `-` or `.`"
        }
    };

    let name = source_name.to_string();
    let report = Report::build(ReportKind::Error, name.clone(), start)
        .with_config(Config::default().with_color(color))
        .with_message(err.summary())
        .with_label(
            Label::new((name.clone(), start..end))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish();

    let mut output = Vec::new();
    match report.write((name, Source::from(input)), &mut output) {
        Ok(()) => String::from_utf8_lossy(&output).into_owned(),
        // Fall back to the plain message
        Err(_) => err.to_string(),
    }
}

/// Character span of the two-character open marker at byte `offset`.
///
/// ariadne positions are character indices, not byte offsets.
fn marker_span(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let start = input
        .char_indices()
        .take_while(|(idx, _)| *idx < offset)
        .count();
    (start, start + 2)
}
