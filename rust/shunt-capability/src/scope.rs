use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ShuntCapabilityError;

/// A two-part namespaced chain identifier such as
/// `bip122:000000000019d6689c085ae165831e93` or `solana:mainnet`.
///
/// The namespace names a chain family and the reference names a concrete
/// network within it. Scope identifiers are the primary routing key: accounts
/// declare which scopes they serve, protocol grants declare per-scope method
/// sets, and every inbound request carries the scope it targets.
///
/// The grammar is fixed: the namespace is 3 to 8 characters of lowercase
/// alphanumerics or `-`, the reference is 1 to 32 characters of
/// alphanumerics, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScopeId {
    namespace: String,
    reference: String,
}

impl ScopeId {
    /// The chain family component (e.g., `bip122`, `solana`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The network component (e.g., a genesis hash or network name).
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

fn valid_namespace(namespace: &str) -> bool {
    (3..=8).contains(&namespace.len())
        && namespace
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn valid_reference(reference: &str) -> bool {
    (1..=32).contains(&reference.len())
        && reference
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for ScopeId {
    type Err = ShuntCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((namespace, reference)) = s.split_once(':') else {
            return Err(ShuntCapabilityError::InvalidScope(format!(
                "'{s}' is missing a ':' separator"
            )));
        };

        if !valid_namespace(namespace) {
            return Err(ShuntCapabilityError::InvalidScope(format!(
                "'{namespace}' is not a valid namespace"
            )));
        }

        if !valid_reference(reference) {
            return Err(ShuntCapabilityError::InvalidScope(format!(
                "'{reference}' is not a valid reference"
            )));
        }

        Ok(Self {
            namespace: namespace.to_owned(),
            reference: reference.to_owned(),
        })
    }
}

impl TryFrom<String> for ScopeId {
    type Error = ShuntCapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScopeId> for String {
    fn from(value: ScopeId) -> Self {
        value.to_string()
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

/// The scope declaration attached to an account: either one concrete scope or
/// a whole namespace (an account that serves every network of a chain
/// family).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScopePattern {
    /// Matches exactly one scope.
    Scope(ScopeId),
    /// Matches every scope within a namespace.
    Namespace(String),
}

impl ScopePattern {
    /// Whether this pattern covers the given scope.
    pub fn matches(&self, scope: &ScopeId) -> bool {
        match self {
            ScopePattern::Scope(declared) => declared == scope,
            ScopePattern::Namespace(namespace) => namespace == scope.namespace(),
        }
    }
}

impl FromStr for ScopePattern {
    type Err = ShuntCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            Ok(ScopePattern::Scope(s.parse()?))
        } else if valid_namespace(s) {
            Ok(ScopePattern::Namespace(s.to_owned()))
        } else {
            Err(ShuntCapabilityError::InvalidScope(format!(
                "'{s}' is not a valid namespace"
            )))
        }
    }
}

impl TryFrom<String> for ScopePattern {
    type Error = ShuntCapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScopePattern> for String {
    fn from(value: ScopePattern) -> Self {
        value.to_string()
    }
}

impl Display for ScopePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopePattern::Scope(scope) => write!(f, "{scope}"),
            ScopePattern::Namespace(namespace) => write!(f, "{namespace}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_a_well_formed_scope() {
        let scope: ScopeId = "bip122:000000000019d6689c085ae165831e93".parse().unwrap();

        assert_eq!(scope.namespace(), "bip122");
        assert_eq!(scope.reference(), "000000000019d6689c085ae165831e93");
        assert_eq!(scope.to_string(), "bip122:000000000019d6689c085ae165831e93");
    }

    #[test]
    fn it_rejects_scopes_without_a_separator() {
        assert!("solana".parse::<ScopeId>().is_err());
    }

    #[test]
    fn it_rejects_out_of_grammar_namespaces() {
        // Too short, too long, bad characters
        assert!("ab:1".parse::<ScopeId>().is_err());
        assert!("verylongns:1".parse::<ScopeId>().is_err());
        assert!("EIP155:1".parse::<ScopeId>().is_err());
    }

    #[test]
    fn it_rejects_out_of_grammar_references() {
        assert!("eip155:".parse::<ScopeId>().is_err());
        assert!(
            "bip122:000000000019d6689c085ae165831e93ff"
                .parse::<ScopeId>()
                .is_err()
        );
        assert!("eip155:1/extra".parse::<ScopeId>().is_err());
    }

    #[test]
    fn it_matches_patterns_by_scope_or_namespace() {
        let scope: ScopeId = "solana:mainnet".parse().unwrap();

        let exact: ScopePattern = "solana:mainnet".parse().unwrap();
        let family: ScopePattern = "solana".parse().unwrap();
        let other: ScopePattern = "solana:devnet".parse().unwrap();

        assert!(exact.matches(&scope));
        assert!(family.matches(&scope));
        assert!(!other.matches(&scope));
    }

    #[test]
    fn it_round_trips_scopes_through_json() {
        let scope: ScopeId = "eip155:1".parse().unwrap();
        let json = serde_json::to_string(&scope).unwrap();

        assert_eq!(json, "\"eip155:1\"");
        assert_eq!(serde_json::from_str::<ScopeId>(&json).unwrap(), scope);
    }
}
