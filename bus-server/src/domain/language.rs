//! Languages and per-trip notices.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Error returned for an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0:?}")]
pub struct UnsupportedLanguage(pub String);

/// Languages the site is served in. Portuguese is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
    Fr,
    De,
}

impl Language {
    /// Two-letter code, also the key used in trip notices.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A trip notice in several languages ("School Period", "Período Escolar").
///
/// Absent notices and missing translations both resolve to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedText(HashMap<String, String>);

impl LocalizedText {
    /// No notice at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self(map)
    }

    /// Text for `lang`, or `""` if there is none.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use bus_server::domain::{Language, LocalizedText};
    ///
    /// let notice = LocalizedText::from_map(HashMap::from([
    ///     ("pt".to_string(), "Período Escolar".to_string()),
    ///     ("en".to_string(), "School Period".to_string()),
    /// ]));
    /// assert_eq!(notice.get(Language::En), "School Period");
    /// assert_eq!(notice.get(Language::De), "");
    /// assert_eq!(LocalizedText::none().get(Language::Pt), "");
    /// ```
    pub fn get(&self, lang: Language) -> &str {
        self.0.get(lang.code()).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
