//! Upstream spellings of stop names.
//!
//! The upstream directory stores a few stops under inconsistent encodings
//! ("Povoacão" for "Povoação"). Queries for those stops must send the
//! upstream spelling; results still come back keyed by canonical names.

use std::collections::{HashMap, HashSet};

use crate::domain::normalize_stop_name;

/// Canonical name → upstream spelling, for the stops that need one.
const BUILTIN: [(&str, &str); 3] = [
    ("Povoação", "Povoacão"),
    ("Lomba do Loução", "Lomba do Loucão"),
    ("Ponta Garça", "Ponta Garca"),
];

/// Error validating an alias table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// Key is not what the normalizer produces
    #[error("alias key {0:?} is not a normalized stop name")]
    NotCanonical(String),

    /// Key maps to itself
    #[error("alias for {0:?} is identical to the stop name")]
    Identity(String),

    /// Stop listed more than once
    #[error("stop {0:?} has more than one alias")]
    DuplicateKey(String),

    /// Two stops share an upstream spelling
    #[error("upstream spelling {0:?} is claimed by more than one stop")]
    DuplicateTarget(String),

    /// Empty upstream spelling
    #[error("alias for {0:?} is empty")]
    EmptyTarget(String),
}

/// Validated alias table.
#[derive(Debug, Clone, Default)]
pub struct StopAliases {
    map: HashMap<String, String>,
}

impl StopAliases {
    /// Build and validate an alias table.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        let mut targets = HashSet::new();

        for (stop, upstream) in pairs {
            let stop = stop.into();
            let upstream = upstream.into();

            if normalize_stop_name(&stop) != stop {
                return Err(AliasError::NotCanonical(stop));
            }
            if upstream.trim().is_empty() {
                return Err(AliasError::EmptyTarget(stop));
            }
            if upstream == stop {
                return Err(AliasError::Identity(stop));
            }
            if map.contains_key(&stop) {
                return Err(AliasError::DuplicateKey(stop));
            }
            if !targets.insert(upstream.clone()) {
                return Err(AliasError::DuplicateTarget(upstream));
            }
            map.insert(stop, upstream);
        }

        Ok(Self { map })
    }

    /// The production alias table.
    pub fn builtin() -> Result<Self, AliasError> {
        Self::from_pairs(BUILTIN)
    }

    /// Name to send upstream for a canonical stop.
    pub fn upstream_name<'a>(&'a self, stop: &'a str) -> &'a str {
        self.map.get(stop).map(String::as_str).unwrap_or(stop)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let aliases = StopAliases::builtin().unwrap();
        assert_eq!(aliases.len(), 3);
        assert_eq!(aliases.upstream_name("Povoação"), "Povoacão");
        assert_eq!(aliases.upstream_name("Lomba do Loução"), "Lomba do Loucão");
        assert_eq!(aliases.upstream_name("Ponta Garça"), "Ponta Garca");
    }

    #[test]
    fn unaliased_names_pass_through() {
        let aliases = StopAliases::builtin().unwrap();
        assert_eq!(aliases.upstream_name("Vila Franca"), "Vila Franca");
        assert_eq!(aliases.upstream_name(""), "");
    }

    #[test]
    fn rejects_non_canonical_keys() {
        let err = StopAliases::from_pairs([("povoação", "Povoacão")]).unwrap_err();
        assert_eq!(err, AliasError::NotCanonical("povoação".to_string()));
    }

    #[test]
    fn rejects_identity_and_empty() {
        assert_eq!(
            StopAliases::from_pairs([("Nordeste", "Nordeste")]).unwrap_err(),
            AliasError::Identity("Nordeste".to_string())
        );
        assert_eq!(
            StopAliases::from_pairs([("Nordeste", " ")]).unwrap_err(),
            AliasError::EmptyTarget("Nordeste".to_string())
        );
    }

    #[test]
    fn rejects_shared_targets() {
        let err = StopAliases::from_pairs([("Água Retorta", "Agua"), ("Água de Pau", "Agua")])
            .unwrap_err();
        assert_eq!(err, AliasError::DuplicateTarget("Agua".to_string()));
    }

    #[test]
    fn rejects_duplicate_stops() {
        let err = StopAliases::from_pairs([("Povoação", "A"), ("Povoação", "B")]).unwrap_err();
        assert_eq!(err, AliasError::DuplicateKey("Povoação".to_string()));
    }
}
