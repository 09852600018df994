/*
 * parameter.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Typed parameter values and their rendering rules.
//!
//! Each value type carries its own rendering options, set by consuming
//! builder methods:
//!
//! ```
//! use stencil_core::{Hex, Locale, Parameter};
//!
//! let id = Parameter::new("id", Hex::from(21i32).prefixed(true));
//! assert_eq!(id.render(&Locale::root()), "0x00000015");
//! ```
//!
//! Rendering never fails. Payloads that cannot be represented (such as an
//! out-of-range character code) are rejected when the value is built.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::StencilError;
use crate::locale::Locale;

/// A named value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: ParameterValue,
}

impl Parameter {
    /// Create a parameter. Names are case sensitive.
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value.
    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    /// Render the value for substitution.
    pub fn render(&self, locale: &Locale) -> String {
        self.value.render(locale)
    }
}

/// The value of a [`Parameter`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Text, optionally uppercased.
    Text(Text),

    /// A number rendered as a whole base-10 integer.
    Number(Number),

    /// A single character, optionally uppercased.
    Character(Character),

    /// Raw bytes rendered as hexadecimal.
    Hex(Hex),

    /// A caller-supplied value and render function.
    Custom(Custom),
}

impl ParameterValue {
    /// Render this value for substitution.
    pub fn render(&self, locale: &Locale) -> String {
        match self {
            ParameterValue::Text(v) => v.render(locale),
            ParameterValue::Number(v) => v.render(),
            ParameterValue::Character(v) => v.render(locale),
            ParameterValue::Hex(v) => v.render(),
            ParameterValue::Custom(v) => v.render(locale),
        }
    }
}

/// A text value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    value: String,
    uppercase: bool,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            uppercase: false,
        }
    }

    /// Capture the `Display` form of any value.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::new(value.to_string())
    }

    /// Uppercase the text at render time, using the locale's case rules.
    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    pub fn render(&self, locale: &Locale) -> String {
        if self.uppercase {
            locale.uppercase(&self.value)
        } else {
            self.value.clone()
        }
    }
}

/// A numeric value.
///
/// Only whole numbers are rendered: fractional parts are truncated toward
/// zero, NaN renders as `0` and infinities saturate at the `i64` bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    // TODO: precision and digit grouping options, once a format for them is agreed
    pub fn render(&self) -> String {
        match *self {
            Number::Signed(n) => n.to_string(),
            Number::Unsigned(n) => n.to_string(),
            // `as` truncates toward zero and saturates, mapping NaN to 0
            Number::Float(n) => (n as i64).to_string(),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(value: $source) -> Self {
                    Number::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

number_from!(Signed as i64: i8, i16, i32, i64);
number_from!(Unsigned as u64: u8, u16, u32, u64);
number_from!(Float as f64: f32, f64);

/// A single character value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Character {
    value: char,
    uppercase: bool,
}

impl Character {
    pub fn new(value: char) -> Self {
        Self {
            value,
            uppercase: false,
        }
    }

    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn value(&self) -> char {
        self.value
    }

    pub fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    /// Uppercasing may produce more than one character.
    pub fn render(&self, locale: &Locale) -> String {
        if self.uppercase {
            locale.uppercase_char(self.value)
        } else {
            self.value.to_string()
        }
    }
}

impl From<char> for Character {
    fn from(value: char) -> Self {
        Character::new(value)
    }
}

impl TryFrom<u32> for Character {
    type Error = StencilError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        char::from_u32(code)
            .map(Character::new)
            .ok_or(StencilError::InvalidCharacter { code })
    }
}

impl TryFrom<u16> for Character {
    type Error = StencilError;

    /// A lone UTF-16 code unit; surrogates are rejected.
    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Character::try_from(u32::from(code))
    }
}

/// A byte sequence rendered as hexadecimal digit pairs.
///
/// Equality compares the bytes and the `uppercase` option only.
#[derive(Debug, Clone)]
pub struct Hex {
    bytes: Vec<u8>,
    uppercase: bool,
    prefixed: bool,
}

impl Hex {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            uppercase: false,
            prefixed: false,
        }
    }

    /// Use uppercase hex digits.
    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Prepend `0x`. A prefixed value always uses uppercase digits.
    pub fn prefixed(mut self, prefixed: bool) -> Self {
        self.prefixed = prefixed;
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefixed
    }

    pub fn render(&self) -> String {
        let digits = if self.uppercase || self.prefixed {
            hex::encode_upper(&self.bytes)
        } else {
            hex::encode(&self.bytes)
        };
        if self.prefixed {
            format!("0x{digits}")
        } else {
            digits
        }
    }
}

impl PartialEq for Hex {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.uppercase == other.uppercase
    }
}

impl Eq for Hex {}

macro_rules! hex_from_be_bytes {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Hex {
                /// Big-endian byte representation.
                fn from(value: $source) -> Self {
                    Hex::new(value.to_be_bytes().to_vec())
                }
            }
        )+
    };
}

hex_from_be_bytes!(i16, i32, i64, f32, f64);

impl From<&str> for Hex {
    /// UTF-8 bytes of the text.
    fn from(value: &str) -> Self {
        Hex::new(value.as_bytes())
    }
}

impl From<String> for Hex {
    fn from(value: String) -> Self {
        Hex::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for Hex {
    fn from(value: Vec<u8>) -> Self {
        Hex::new(value)
    }
}

impl From<&[u8]> for Hex {
    fn from(value: &[u8]) -> Self {
        Hex::new(value)
    }
}

impl<const N: usize> From<[u8; N]> for Hex {
    fn from(value: [u8; N]) -> Self {
        Hex::new(value.to_vec())
    }
}

type RenderFn = dyn Fn(&Locale) -> String + Send + Sync;

/// A caller-supplied value with its own render function.
///
/// Clones share the value and the function.
#[derive(Clone)]
pub struct Custom {
    value: Arc<dyn Any + Send + Sync>,
    render: Arc<RenderFn>,
}

impl Custom {
    pub fn new<T, F>(value: T, render: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &Locale) -> String + Send + Sync + 'static,
    {
        let value = Arc::new(value);
        let captured = Arc::clone(&value);
        Self {
            value,
            render: Arc::new(move |locale: &Locale| render(&captured, locale)),
        }
    }

    /// Borrow the stored value if it has type `T`.
    pub fn value<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn render(&self, locale: &Locale) -> String {
        (self.render)(locale)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").finish_non_exhaustive()
    }
}

impl PartialEq for Custom {
    /// Custom values are only equal to their own clones.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.render, &other.render)
    }
}

impl From<Text> for ParameterValue {
    fn from(value: Text) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(Text::new(value))
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(Text::new(value))
    }
}

impl From<Number> for ParameterValue {
    fn from(value: Number) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<Character> for ParameterValue {
    fn from(value: Character) -> Self {
        ParameterValue::Character(value)
    }
}

impl From<char> for ParameterValue {
    fn from(value: char) -> Self {
        ParameterValue::Character(Character::new(value))
    }
}

impl From<Hex> for ParameterValue {
    fn from(value: Hex) -> Self {
        ParameterValue::Hex(value)
    }
}

impl From<Custom> for ParameterValue {
    fn from(value: Custom) -> Self {
        ParameterValue::Custom(value)
    }
}

macro_rules! value_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ParameterValue {
                fn from(value: $source) -> Self {
                    ParameterValue::Number(Number::from(value))
                }
            }
        )+
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
