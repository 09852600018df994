/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Configuration files and parameter specifications.
//!
//! A configuration file is TOML (or JSON, by extension) of the form:
//!
//! ```toml
//! locale = "tr-TR"
//!
//! [params.name]
//! type = "string"
//! value = "Stencil"
//! uppercase = true
//!
//! [params.id]
//! type = "hex"
//! value = 21
//! prefixed = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use stencil_core::{Character, Hex, Locale, Number, Parameter, ParameterValue, Text};

/// Contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StencilConfig {
    /// Locale used when none is given on the command line.
    pub locale: Option<Locale>,

    /// Parameters keyed by name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamSpec>,
}

impl StencilConfig {
    /// Load a configuration file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?
        } else {
            toml::from_str(&text)
                .with_context(|| format!("Invalid TOML config {}", path.display()))?
        };

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// A parameter description, before it becomes a [`Parameter`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamSpec {
    String {
        value: String,
        #[serde(default)]
        uppercase: bool,
    },
    Number {
        value: NumberSpec,
    },
    Char {
        value: char,
        #[serde(default)]
        uppercase: bool,
    },
    Hex {
        value: HexSpec,
        #[serde(default)]
        uppercase: bool,
        #[serde(default)]
        prefixed: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberSpec {
    Integer(i64),
    Float(f64),
}

/// Source of a hex parameter's bytes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HexSpec {
    /// Four big-endian bytes when the value fits in an `i32`, else eight.
    Integer(i64),
    /// Explicit byte list.
    Bytes(Vec<u8>),
    /// UTF-8 bytes of the text.
    Text(String),
}

impl ParamSpec {
    /// Turn on the uppercase option. Fails for numbers, which have none.
    pub fn set_uppercase(&mut self, name: &str) -> Result<()> {
        match self {
            ParamSpec::String { uppercase, .. }
            | ParamSpec::Char { uppercase, .. }
            | ParamSpec::Hex { uppercase, .. } => {
                *uppercase = true;
                Ok(())
            }
            ParamSpec::Number { .. } => bail!("Parameter {name} is a number and cannot be uppercased"),
        }
    }

    /// Turn on the `0x` prefix. Only hex parameters have one.
    pub fn set_prefixed(&mut self, name: &str) -> Result<()> {
        match self {
            ParamSpec::Hex { prefixed, .. } => {
                *prefixed = true;
                Ok(())
            }
            _ => bail!("Parameter {name} is not a hex parameter and cannot be prefixed"),
        }
    }

    /// Build the named parameter.
    pub fn to_parameter(&self, name: &str) -> Parameter {
        let value: ParameterValue = match self {
            ParamSpec::String { value, uppercase } => {
                Text::new(value.as_str()).uppercase(*uppercase).into()
            }
            ParamSpec::Number { value } => match *value {
                NumberSpec::Integer(n) => Number::from(n).into(),
                NumberSpec::Float(n) => Number::from(n).into(),
            },
            ParamSpec::Char { value, uppercase } => {
                Character::new(*value).uppercase(*uppercase).into()
            }
            ParamSpec::Hex {
                value,
                uppercase,
                prefixed,
            } => {
                let hex = match value {
                    HexSpec::Integer(n) => match i32::try_from(*n) {
                        Ok(small) => Hex::from(small),
                        Err(_) => Hex::from(*n),
                    },
                    HexSpec::Bytes(bytes) => Hex::from(bytes.as_slice()),
                    HexSpec::Text(text) => Hex::from(text.as_str()),
                };
                hex.uppercase(*uppercase).prefixed(*prefixed).into()
            }
        };
        Parameter::new(name, value)
    }
}

/// Environment variables consulted for the locale, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Pick the locale: explicit flag, then config file, then environment.
///
/// An unparseable environment locale falls back to the root locale; an
/// unparseable flag is an error.
pub fn resolve_locale(
    flag: Option<&str>,
    config: Option<&Locale>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Locale> {
    if let Some(tag) = flag {
        return Locale::new(tag).with_context(|| format!("Invalid --locale {tag:?}"));
    }
    if let Some(locale) = config {
        return Ok(locale.clone());
    }

    let from_env = LOCALE_VARS
        .iter()
        .find_map(|var| env(var).filter(|value| !value.is_empty()));
    match from_env {
        Some(tag) => Ok(Locale::new(&tag).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring environment locale");
            Locale::root()
        })),
        None => Ok(Locale::root()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_toml_config() {
        let config: StencilConfig = toml::from_str(
            r#"
            locale = "tr_TR"

            [params.name]
            type = "string"
            value = "Stencil"
            uppercase = true

            [params.count]
            type = "number"
            value = 2.5

            [params.initial]
            type = "char"
            value = "s"

            [params.id]
            type = "hex"
            value = 21
            prefixed = true
            "#,
        )
        .unwrap();

        assert_eq!(config.locale.as_ref().map(Locale::tag), Some("tr-TR".to_string()));
        assert_eq!(
            config.params["name"],
            ParamSpec::String {
                value: "Stencil".to_string(),
                uppercase: true
            }
        );
        assert_eq!(
            config.params["count"],
            ParamSpec::Number {
                value: NumberSpec::Float(2.5)
            }
        );
        assert_eq!(
            config.params["id"],
            ParamSpec::Hex {
                value: HexSpec::Integer(21),
                uppercase: false,
                prefixed: true
            }
        );
        assert_eq!(
            config.params["initial"],
            ParamSpec::Char {
                value: 's',
                uppercase: false
            }
        );
    }

    #[test]
    fn test_json_config() {
        let config: StencilConfig = serde_json::from_str(
            r#"{"params": {"raw": {"type": "hex", "value": [222, 173]}, "n": {"type": "number", "value": 7}}}"#,
        )
        .unwrap();
        assert!(config.locale.is_none());
        assert_eq!(
            config.params["raw"].to_parameter("raw").render(&Locale::root()),
            "dead"
        );
        assert_eq!(
            config.params["n"],
            ParamSpec::Number {
                value: NumberSpec::Integer(7)
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<StencilConfig>("colour = true").is_err());
        assert!(toml::from_str::<StencilConfig>("[params.x]\ntype = \"date\"\nvalue = 1").is_err());
    }

    #[test]
    fn test_hex_integer_width() {
        let small = ParamSpec::Hex {
            value: HexSpec::Integer(21),
            uppercase: false,
            prefixed: false,
        };
        let large = ParamSpec::Hex {
            value: HexSpec::Integer(1 << 40),
            uppercase: false,
            prefixed: false,
        };
        let root = Locale::root();
        assert_eq!(small.to_parameter("x").render(&root), "00000015");
        assert_eq!(large.to_parameter("x").render(&root), "0000010000000000");
    }

    #[test]
    fn test_options() {
        let mut spec = ParamSpec::Hex {
            value: HexSpec::Text("ab".to_string()),
            uppercase: false,
            prefixed: false,
        };
        spec.set_prefixed("h").unwrap();
        assert_eq!(spec.to_parameter("h").render(&Locale::root()), "0x6162");

        let mut number = ParamSpec::Number {
            value: NumberSpec::Integer(1),
        };
        assert!(number.set_uppercase("n").is_err());
        assert!(number.set_prefixed("n").is_err());

        let mut text = ParamSpec::String {
            value: "hi".to_string(),
            uppercase: false,
        };
        text.set_uppercase("t").unwrap();
        assert_eq!(text.to_parameter("t").render(&Locale::root()), "HI");
    }

    #[test]
    fn test_resolve_locale_priority() {
        let config = Locale::new("fr").unwrap();
        let env = |var: &str| (var == "LANG").then(|| "de_DE.UTF-8".to_string());

        let flag = resolve_locale(Some("es"), Some(&config), env).unwrap();
        assert_eq!(flag.tag(), "es");

        let from_config = resolve_locale(None, Some(&config), env).unwrap();
        assert_eq!(from_config.tag(), "fr");

        let from_env = resolve_locale(None, None, env).unwrap();
        assert_eq!(from_env.tag(), "de-DE");

        assert!(resolve_locale(None, None, no_env).unwrap().is_root());
    }

    #[test]
    fn test_resolve_locale_env_order_and_errors() {
        let env = |var: &str| match var {
            "LC_ALL" => Some(String::new()),
            "LC_CTYPE" => Some("tr_TR".to_string()),
            "LANG" => Some("en_US".to_string()),
            _ => None,
        };
        assert_eq!(resolve_locale(None, None, env).unwrap().tag(), "tr-TR");

        let broken = |_: &str| Some("%%".to_string());
        assert!(resolve_locale(None, None, broken).unwrap().is_root());
        assert!(resolve_locale(Some("%%"), None, no_env).is_err());
    }
}
