/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use crate::config::{HexSpec, NumberSpec, ParamSpec};

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(version)]
#[command(about = "Substitute named parameters into a template")]
pub struct Args {
    /// Template text. Read from --file or stdin when omitted.
    pub template: Option<String>,

    /// Read the template from a file
    #[arg(short, long, conflicts_with = "template")]
    pub file: Option<PathBuf>,

    /// TOML or JSON file with a default locale and parameters
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Locale for case mapping (e.g. tr-TR). Defaults to the config file,
    /// then LC_ALL / LC_CTYPE / LANG.
    #[arg(short, long, value_name = "TAG")]
    pub locale: Option<String>,

    /// Text parameter
    #[arg(short = 's', long = "string", value_name = "NAME=VALUE")]
    pub strings: Vec<String>,

    /// Numeric parameter, rendered as a whole number
    #[arg(short = 'n', long = "number", value_name = "NAME=VALUE")]
    pub numbers: Vec<String>,

    /// Single character parameter
    #[arg(short = 'c', long = "char", value_name = "NAME=CHAR")]
    pub chars: Vec<String>,

    /// Hexadecimal parameter from an integer or the bytes of a string
    #[arg(short = 'x', long = "hex", value_name = "NAME=VALUE")]
    pub hexes: Vec<String>,

    /// Uppercase the named parameter
    #[arg(long = "upper", value_name = "NAME")]
    pub upper: Vec<String>,

    /// Prefix the named hex parameter with 0x
    #[arg(long = "prefixed", value_name = "NAME")]
    pub prefixed: Vec<String>,
}

impl Args {
    /// Parameters given on the command line, in application order.
    ///
    /// Kinds are applied strings, numbers, chars, then hexes, so a later
    /// kind wins when a name is repeated across kinds.
    pub fn param_specs(&self) -> Result<Vec<(String, ParamSpec)>> {
        let mut specs = Vec::new();
        for arg in &self.strings {
            let (name, value) = split_assignment(arg)?;
            specs.push((
                name,
                ParamSpec::String {
                    value,
                    uppercase: false,
                },
            ));
        }
        for arg in &self.numbers {
            let (name, value) = split_assignment(arg)?;
            specs.push((name, ParamSpec::Number { value: parse_number(&value)? }));
        }
        for arg in &self.chars {
            let (name, value) = split_assignment(arg)?;
            specs.push((
                name,
                ParamSpec::Char {
                    value: parse_char(&value)?,
                    uppercase: false,
                },
            ));
        }
        for arg in &self.hexes {
            let (name, value) = split_assignment(arg)?;
            let value = match value.parse::<i64>() {
                Ok(n) => HexSpec::Integer(n),
                Err(_) => HexSpec::Text(value),
            };
            specs.push((
                name,
                ParamSpec::Hex {
                    value,
                    uppercase: false,
                    prefixed: false,
                },
            ));
        }
        Ok(specs)
    }
}

/// Split `NAME=VALUE` at the first `=`.
fn split_assignment(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected NAME=VALUE, got {arg:?}"))?;
    if name.is_empty() {
        bail!("Missing parameter name in {arg:?}");
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_number(value: &str) -> Result<NumberSpec> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(NumberSpec::Integer(n));
    }
    value
        .parse::<f64>()
        .map(NumberSpec::Float)
        .with_context(|| format!("Not a number: {value:?}"))
}

fn parse_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => bail!("Expected exactly one character, got {value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("stencil").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(
            split_assignment("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert_eq!(
            split_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(split_assignment("novalue").is_err());
        assert!(split_assignment("=x").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("-12").unwrap(), NumberSpec::Integer(-12));
        assert_eq!(parse_number("2.75").unwrap(), NumberSpec::Float(2.75));
        assert!(parse_number("twelve").is_err());
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char("é").unwrap(), 'é');
        assert!(parse_char("").is_err());
        assert!(parse_char("ab").is_err());
    }

    #[test]
    fn test_param_specs_order() {
        let args = parse(&["-s", "x=text", "-x", "x=21", "-n", "n=3", "-c", "c=q", "hi"]);
        let specs = args.param_specs().unwrap();
        let names: Vec<&str> = specs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["x", "n", "c", "x"]);
        assert_eq!(
            specs[3].1,
            ParamSpec::Hex {
                value: HexSpec::Integer(21),
                uppercase: false,
                prefixed: false
            }
        );
        assert_eq!(args.template.as_deref(), Some("hi"));
    }

    #[test]
    fn test_hex_text_value() {
        let args = parse(&["-x", "tag=ok"]);
        assert_eq!(
            args.param_specs().unwrap()[0].1,
            ParamSpec::Hex {
                value: HexSpec::Text("ok".to_string()),
                uppercase: false,
                prefixed: false
            }
        );
    }

    #[test]
    fn test_file_conflicts_with_template() {
        let result = Args::try_parse_from(["stencil", "--file", "a.txt", "inline"]);
        assert!(result.is_err());
    }
}
