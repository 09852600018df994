/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Named-parameter string templating for localized strings.
//!
//! Templates mark substitution points with `{{ name }}`. Parameters are
//! supplied by name, so translators may reorder them freely:
//!
//! - Text: `{{ user }}`, optionally uppercased with the locale's case rules
//! - Numbers rendered as whole integers
//! - Single characters
//! - Byte sequences rendered as hexadecimal, optionally `0x`-prefixed
//! - Custom values with a caller-supplied render function
//!
//! # Architecture
//!
//! Parsing and rendering are separate steps. [`Template::parse`] scans the
//! source once into immutable [`Segment`]s which can be rendered against
//! any number of [`ParameterSet`]s, from any number of threads. The
//! [`format`] family of functions does both steps in one call.
//!
//! # Example
//!
//! ```
//! use stencil_core::{Locale, ParameterSet, Text};
//!
//! let mut params = ParameterSet::new();
//! params.text("name", "Stencil").insert("lang", Text::new("rust").uppercase(true));
//!
//! let output = stencil_core::format(
//!     "Hello, my name is {{ name }}, written in {{ lang }}.",
//!     &Locale::root(),
//!     &params,
//! )?;
//! assert_eq!(output, "Hello, my name is Stencil, written in RUST.");
//! # Ok::<(), stencil_core::StencilError>(())
//! ```

pub mod cache;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod locale;
pub mod parameter;
pub mod params;
pub mod parser;
pub mod segment;

// Re-export main types at crate root
pub use cache::TemplateCache;
pub use error::{Location, ParseError, StencilError, StencilResult};
pub use formatter::Formatter;
pub use locale::Locale;
pub use parameter::{Character, Custom, Hex, Number, Parameter, ParameterValue, Text};
pub use params::ParameterSet;
pub use parser::Template;
pub use segment::{Literal, Placeholder, Segment};

/// Substitute `parameters` into `template`.
///
/// When `parameters` is empty the template is returned unchanged without
/// being parsed, so strings that need no substitution may contain
/// arbitrary braces.
pub fn format(template: &str, locale: &Locale, parameters: &ParameterSet) -> StencilResult<String> {
    if parameters.is_empty() {
        return Ok(template.to_string());
    }
    Template::parse(template)?.render(parameters, locale)
}

/// [`format`] using the root locale.
pub fn format_default(template: &str, parameters: &ParameterSet) -> StencilResult<String> {
    format(template, &Locale::root(), parameters)
}

/// [`format`] with parameters supplied by a builder closure.
///
/// ```
/// use stencil_core::{Hex, Locale};
///
/// let output = stencil_core::format_with("{{ id }}", &Locale::root(), |p| {
///     p.insert("id", Hex::from(21i32).uppercase(true));
/// })?;
/// assert_eq!(output, "00000015");
/// # Ok::<(), stencil_core::StencilError>(())
/// ```
pub fn format_with<F>(template: &str, locale: &Locale, build: F) -> StencilResult<String>
where
    F: FnOnce(&mut ParameterSet),
{
    let mut parameters = ParameterSet::new();
    build(&mut parameters);
    format(template, locale, &parameters)
}
