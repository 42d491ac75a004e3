//! Stop names.
//!
//! Stops are identified by their display name, diacritics included
//! ("Povoação", "Ponta Garça"). Callers type names freely, so every name
//! is normalized before it is used as a lookup key.

use std::fmt;

/// Connector words that stay lowercase wherever they appear.
const CONNECTORS: [&str; 5] = ["do", "da", "de", "dos", "das"];

/// Canonicalize a free-text stop name.
///
/// Words are split on whitespace, each is capitalized unless it is a
/// connector word, and the result is joined with single spaces.
///
/// # Examples
///
/// ```
/// use bus_server::domain::normalize_stop_name;
///
/// assert_eq!(normalize_stop_name("  lomba DO  loução "), "Lomba do Loução");
/// assert_eq!(normalize_stop_name("DOS"), "dos");
/// assert_eq!(normalize_stop_name(""), "");
/// ```
pub fn normalize_stop_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(normalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if CONNECTORS.contains(&lower.as_str()) {
        return lower;
    }

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase and strip Portuguese diacritics, for fuzzy matching only.
///
/// ```
/// use bus_server::domain::fold_accents;
///
/// assert_eq!(fold_accents("Povoação"), "povoacao");
/// assert_eq!(fold_accents("São Brás"), "sao bras");
/// ```
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// A canonical stop name.
///
/// Only constructible through normalization, so two `Stop`s typed
/// differently by users compare equal when they name the same stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stop(String);

impl Stop {
    /// Normalize raw user input into a stop.
    pub fn normalized(raw: &str) -> Self {
        Stop(normalize_stop_name(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Stop {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
