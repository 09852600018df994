/*
 * input_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Parsing edge cases exercised through the public formatting API.
 */

use pretty_assertions::assert_eq;
use stencil_core::{ParseError, ParameterSet, StencilError, format_default};

fn with_param(name: &str, value: &str) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.text(name, value);
    params
}

fn parse_error(template: &str, params: &ParameterSet) -> ParseError {
    match format_default(template, params) {
        Err(StencilError::Parse(err)) => err,
        other => panic!("expected a parse error for {template:?}, got {other:?}"),
    }
}

#[test]
fn test_invalid_name_whitespace() {
    let err = parse_error(
        "some idiot named {{ some name }} was here",
        &with_param("some name", "name"),
    );
    assert!(matches!(err, ParseError::InvalidPlaceholder { .. }));
}

#[test]
fn test_invalid_name_symbol() {
    let err = parse_error("{{ someName+ }}", &with_param("someName+", "name"));
    assert!(matches!(err, ParseError::InvalidPlaceholder { .. }));
}

#[test]
fn test_trailing_brackets() {
    let err = parse_error("{{ someName }} {{", &with_param("someName", "name"));
    assert!(matches!(err, ParseError::TrailingOpenMarker { offset: 15, .. }));
}

#[test]
fn test_missing_closing_brackets() {
    let err = parse_error("{{ someName ", &with_param("someName", "name"));
    assert!(matches!(err, ParseError::UnterminatedPlaceholder { offset: 0, .. }));
}

#[test]
fn test_nesting_brackets() {
    let err = parse_error(
        "{{ someName {{ other }} }}",
        &with_param("someName", "name"),
    );
    assert!(matches!(err, ParseError::InvalidPlaceholder { offset: 0, .. }));
}

#[test]
fn test_extra_bracket_at_start() {
    let err = parse_error("{{{ someName }}", &with_param("someName", "John"));
    assert!(matches!(err, ParseError::InvalidPlaceholder { .. }));
}

#[test]
fn test_extra_bracket_at_end() {
    let output = format_default("{{ someName }}}", &with_param("someName", "John")).unwrap();
    assert_eq!(output, "John}");
}

#[test]
fn test_multiline_parameter() {
    let template = "{{\n    someName\n}} hi";
    let output = format_default(template, &with_param("someName", "John")).unwrap();
    assert_eq!(output, "John hi");
}

#[test]
fn test_parse_error_reports_input() {
    let err = parse_error("Hi {{ a b }}", &with_param("a", "x"));
    assert_eq!(err.input(), "Hi {{ a b }}");
    assert_eq!(
        err.to_string(),
        "Parameter located at index 3 is invalid\n\nInput: Hi {{ a b }}"
    );
}

#[test]
fn test_invalid_template_passes_without_parameters() {
    let params = ParameterSet::new();
    for template in ["{{", "{{ some name }}", "{{{ x }}", "plain"] {
        assert_eq!(format_default(template, &params).unwrap(), template);
    }
}
