/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template rendering.
//!
//! Rendering is all-or-nothing: the first placeholder without a matching
//! parameter aborts the render and no partial output is returned.

use crate::error::{StencilError, StencilResult};
use crate::locale::Locale;
use crate::params::ParameterSet;
use crate::parser::Template;
use crate::segment::Segment;

impl Template {
    /// Render this template with the given parameters.
    ///
    /// # Arguments
    /// * `parameters` - Values for the template's placeholders
    /// * `locale` - Locale used by locale-sensitive parameters
    ///
    /// # Returns
    /// The rendered output string, or the first missing parameter.
    pub fn render(&self, parameters: &ParameterSet, locale: &Locale) -> StencilResult<String> {
        let mut output = String::with_capacity(self.source.len());
        render_into(&self.segments, parameters, locale, &mut output)?;
        Ok(output)
    }
}

/// Render a segment sequence to a new string.
pub fn render(
    segments: &[Segment],
    parameters: &ParameterSet,
    locale: &Locale,
) -> StencilResult<String> {
    let mut output = String::new();
    render_into(segments, parameters, locale, &mut output)?;
    Ok(output)
}

/// Append the rendering of `segments` to `output`.
///
/// On error `output` may hold a partial rendering; callers that expose the
/// buffer must discard it.
pub(crate) fn render_into(
    segments: &[Segment],
    parameters: &ParameterSet,
    locale: &Locale,
    output: &mut String,
) -> StencilResult<()> {
    for segment in segments {
        match segment {
            Segment::Literal(literal) => output.push_str(&literal.text),
            Segment::Placeholder(placeholder) => {
                let Some(parameter) = parameters.get(&placeholder.name) else {
                    tracing::debug!(name = %placeholder.name, "missing template parameter");
                    return Err(StencilError::MissingParameter {
                        name: placeholder.name.clone(),
                    });
                };
                output.push_str(&parameter.render(locale));
            }
        }
    }
    Ok(())
}
