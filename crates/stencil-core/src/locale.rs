/*
 * locale.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Locale context for locale-sensitive rendering.
//!
//! A [`Locale`] is passed explicitly to every render call. The library never
//! consults the process environment; callers decide which locale applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{StencilError, StencilResult};

/// A language/region pair identifying formatting conventions.
///
/// Tags are normalized on construction: the language subtag is lowercased,
/// the region subtag uppercased, and script subtags title-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Locale {
    /// Lowercase language subtag; `None` for the root locale.
    language: Option<String>,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// The language-neutral root locale.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a locale tag such as `en-US`, `tr_TR` or `de_DE.UTF-8@euro`.
    pub fn new(tag: &str) -> StencilResult<Self> {
        let invalid = || StencilError::InvalidLocale {
            tag: tag.to_string(),
        };

        // POSIX names carry an encoding and modifier we have no use for
        let base = tag
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() {
            return Err(invalid());
        }
        if base == "C" || base == "POSIX" || base.eq_ignore_ascii_case("und") {
            return Ok(Self::root());
        }

        let mut subtags = base.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let mut locale = Locale {
            language: Some(language.to_ascii_lowercase()),
            script: None,
            region: None,
        };

        for subtag in subtags {
            let is_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let is_digit = subtag.chars().all(|c| c.is_ascii_digit());
            match subtag.len() {
                4 if is_alpha && locale.script.is_none() && locale.region.is_none() => {
                    let mut script = subtag.to_ascii_lowercase();
                    script[..1].make_ascii_uppercase();
                    locale.script = Some(script);
                }
                2 if is_alpha && locale.region.is_none() => {
                    locale.region = Some(subtag.to_ascii_uppercase());
                }
                3 if is_digit && locale.region.is_none() => {
                    locale.region = Some(subtag.to_string());
                }
                // Variants and extensions do not affect case mapping
                _ if !subtag.is_empty() && subtag.chars().all(|c| c.is_ascii_alphanumeric()) => {}
                _ => return Err(invalid()),
            }
        }

        Ok(locale)
    }

    /// Lowercase language subtag, or `None` for the root locale.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Title-cased script subtag, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Uppercase (or numeric) region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether this is the root locale.
    pub fn is_root(&self) -> bool {
        self.language.is_none()
    }

    /// The normalized tag, e.g. `tr-TR`. The root locale is `und`.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone().unwrap_or_else(|| "und".to_string());
        for part in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(part);
        }
        tag
    }

    /// Uses the Turkic dotted/dotless `i` case rules.
    fn is_turkic(&self) -> bool {
        matches!(self.language(), Some("tr" | "az"))
    }

    /// Uppercase `text` following this locale's case rules.
    pub fn uppercase(&self, text: &str) -> String {
        if !self.is_turkic() {
            return text.to_uppercase();
        }
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            self.push_uppercase(ch, &mut out);
        }
        out
    }

    /// Uppercase a single character. The result may be longer than one
    /// character (`ß` becomes `SS`).
    pub fn uppercase_char(&self, ch: char) -> String {
        let mut out = String::with_capacity(ch.len_utf8());
        self.push_uppercase(ch, &mut out);
        out
    }

    fn push_uppercase(&self, ch: char, out: &mut String) {
        if ch == 'i' && self.is_turkic() {
            out.push('\u{0130}');
        } else {
            out.extend(ch.to_uppercase());
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::new(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::new(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let locale = Locale::new("EN_us").unwrap();
        assert_eq!(locale.language(), Some("en"));
        assert_eq!(locale.region(), Some("US"));
        assert_eq!(locale.tag(), "en-US");
    }

    #[test]
    fn test_parse_posix_name() {
        let locale: Locale = "de_DE.UTF-8@euro".parse().unwrap();
        assert_eq!(locale.tag(), "de-DE");
        assert!(Locale::new("C").unwrap().is_root());
        assert!(Locale::new("POSIX.UTF-8").unwrap().is_root());
    }

    #[test]
    fn test_parse_script_and_numeric_region() {
        let locale = Locale::new("az-latn-az").unwrap();
        assert_eq!(locale.script(), Some("Latn"));
        assert_eq!(locale.region(), Some("AZ"));
        assert_eq!(Locale::new("es-419").unwrap().region(), Some("419"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Locale::new("").is_err());
        assert!(Locale::new("x").is_err());
        assert!(Locale::new("12").is_err());
        assert!(Locale::new("en-U$").is_err());
    }

    #[test]
    fn test_root_display() {
        assert_eq!(Locale::root().to_string(), "und");
        assert_eq!(Locale::default(), Locale::root());
    }

    #[test]
    fn test_turkish_dotted_i() {
        let tr = Locale::new("tr").unwrap();
        assert_eq!(tr.uppercase("istanbul"), "\u{0130}STANBUL");
        assert_eq!(tr.uppercase_char('i'), "\u{0130}");
        // Dotless i maps to plain I everywhere
        assert_eq!(tr.uppercase_char('\u{0131}'), "I");
    }

    #[test]
    fn test_default_case_mapping() {
        let en = Locale::new("en-US").unwrap();
        assert_eq!(en.uppercase("istanbul"), "ISTANBUL");
        assert_eq!(en.uppercase_char('ß'), "SS");
    }

    #[test]
    fn test_serde_as_string() {
        let locale = Locale::new("pt_BR").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"pt-BR\"");
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
        assert!(serde_json::from_str::<Locale>("\"?\"").is_err());
    }
}
