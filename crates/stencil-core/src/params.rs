/*
 * params.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The set of named parameters supplied to one formatting call.

use std::collections::HashMap;
use std::fmt;

use crate::locale::Locale;
use crate::parameter::{Character, Custom, Hex, Number, Parameter, ParameterValue, Text};

/// Parameters keyed by case-sensitive name.
///
/// Adding a parameter whose name is already present replaces the earlier
/// one. The setters return `&mut Self` so they can be chained:
///
/// ```
/// use stencil_core::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.text("name", "Stencil").number("count", 3);
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    parameters: HashMap<String, Parameter>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any parameter with the same name.
    pub fn param(&mut self, parameter: Parameter) -> &mut Self {
        self.parameters
            .insert(parameter.name().to_string(), parameter);
        self
    }

    /// Add a value of any parameter type under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> &mut Self {
        self.param(Parameter::new(name, value))
    }

    /// Add a text parameter.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(name, Text::new(value))
    }

    /// Add a parameter rendered from the `Display` form of `value`.
    pub fn display(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.insert(name, Text::display(value))
    }

    /// Add a numeric parameter.
    pub fn number(&mut self, name: impl Into<String>, value: impl Into<Number>) -> &mut Self {
        let value: Number = value.into();
        self.insert(name, value)
    }

    /// Add a character parameter.
    pub fn character(&mut self, name: impl Into<String>, value: char) -> &mut Self {
        self.insert(name, Character::new(value))
    }

    /// Add a hexadecimal parameter from anything convertible to bytes.
    pub fn hex(&mut self, name: impl Into<String>, value: impl Into<Hex>) -> &mut Self {
        let value: Hex = value.into();
        self.insert(name, value)
    }

    /// Add a parameter with a caller-supplied render function.
    pub fn custom<T, F>(&mut self, name: impl Into<String>, value: T, render: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &Locale) -> String + Send + Sync + 'static,
    {
        self.insert(name, Custom::new(value, render))
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over the parameters in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Parameter> for ParameterSet {
    fn extend<I: IntoIterator<Item = Parameter>>(&mut self, iter: I) {
        for parameter in iter {
            self.param(parameter);
        }
    }
}
