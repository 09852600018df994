/*
 * formatter.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! An output destination that accumulates formatted templates.

use std::fmt;

use crate::error::{StencilError, StencilResult};
use crate::evaluator::render_into;
use crate::locale::Locale;
use crate::params::ParameterSet;
use crate::parser::Template;

/// Formats templates into a [`fmt::Write`] destination.
///
/// Each call appends one complete rendering. A call that fails leaves the
/// destination exactly as it was. Once [`close`](Formatter::close)d, every
/// operation fails with [`StencilError::Closed`].
///
/// ```
/// use stencil_core::{Formatter, Locale, ParameterSet};
///
/// let mut params = ParameterSet::new();
/// params.text("name", "Stencil");
///
/// let mut formatter = Formatter::new(Locale::root());
/// formatter
///     .format("Hello, {{ name }}.", &params)?
///     .format(" Bye, {{ name }}.", &params)?;
/// assert_eq!(formatter.as_str()?, "Hello, Stencil. Bye, Stencil.");
/// # Ok::<(), stencil_core::StencilError>(())
/// ```
#[derive(Debug)]
pub struct Formatter<W: fmt::Write = String> {
    destination: Option<W>,
    locale: Locale,
}

impl Formatter<String> {
    /// Create a formatter writing to a new string buffer.
    pub fn new(locale: Locale) -> Self {
        Self::with_destination(String::new(), locale)
    }

    /// The accumulated output.
    pub fn as_str(&self) -> StencilResult<&str> {
        self.output().map(String::as_str)
    }
}

impl Default for Formatter<String> {
    fn default() -> Self {
        Self::new(Locale::root())
    }
}

impl<W: fmt::Write> Formatter<W> {
    /// Create a formatter appending to an existing destination.
    pub fn with_destination(destination: W, locale: Locale) -> Self {
        Self {
            destination: Some(destination),
            locale,
        }
    }

    /// The locale used when none is given explicitly.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Parse `template` and append its rendering using the formatter's locale.
    pub fn format(&mut self, template: &str, parameters: &ParameterSet) -> StencilResult<&mut Self> {
        let locale = self.locale.clone();
        self.format_with_locale(&locale, template, parameters)
    }

    /// Parse `template` and append its rendering using `locale`.
    pub fn format_with_locale(
        &mut self,
        locale: &Locale,
        template: &str,
        parameters: &ParameterSet,
    ) -> StencilResult<&mut Self> {
        self.ensure_open()?;
        let template = Template::parse(template)?;
        self.append(&template, parameters, locale)
    }

    /// Append the rendering of an already parsed template.
    pub fn format_template(
        &mut self,
        template: &Template,
        parameters: &ParameterSet,
    ) -> StencilResult<&mut Self> {
        let locale = self.locale.clone();
        self.append(template, parameters, &locale)
    }

    fn append(
        &mut self,
        template: &Template,
        parameters: &ParameterSet,
        locale: &Locale,
    ) -> StencilResult<&mut Self> {
        let destination = self.destination.as_mut().ok_or(StencilError::Closed)?;

        // Render fully before touching the destination
        let mut rendered = String::with_capacity(template.source().len());
        render_into(template.segments(), parameters, locale, &mut rendered)?;
        destination.write_str(&rendered)?;
        Ok(self)
    }

    /// Borrow the destination.
    pub fn output(&self) -> StencilResult<&W> {
        self.destination.as_ref().ok_or(StencilError::Closed)
    }

    /// Whether [`close`](Formatter::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.destination.is_none()
    }

    /// Release the destination. Returns `None` if already closed.
    pub fn close(&mut self) -> Option<W> {
        let destination = self.destination.take();
        if destination.is_some() {
            tracing::trace!("formatter closed");
        }
        destination
    }

    /// Consume the formatter, returning its destination.
    pub fn into_inner(mut self) -> StencilResult<W> {
        self.close().ok_or(StencilError::Closed)
    }

    fn ensure_open(&self) -> StencilResult<()> {
        if self.is_closed() {
            Err(StencilError::Closed)
        } else {
            Ok(())
        }
    }
}
