//! Caveats: typed constraints attached to capabilities.
//!
//! A [`Caveat`] is a `(kind, value)` pair. The set of kinds is closed and
//! each kind lives in its own module here, owning three things:
//!
//! - a typed view of the caveat value (what consumers decode into),
//! - a validator that asserts a raw JSON value against the kind's schema and
//!   business rules,
//! - a mapper that synthesizes the caveat value from the raw, user-authored
//!   capability declaration.
//!
//! Validators run both when a grant is synthesized and when a consumer reads
//! a caveat back, so a value that was accepted at grant time is re-checked at
//! the moment it influences routing.

use std::fmt::Display;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::ShuntCapabilityError;

pub mod duration;
pub mod origins;
pub mod protocol;
pub mod schedule;
pub mod scopes;

/// A typed constraint attached to a [`Capability`](crate::Capability),
/// restricting or parameterizing what the grant authorizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caveat {
    /// Which kind of constraint this is.
    #[serde(rename = "type")]
    pub kind: CaveatKind,
    /// The constraint value, shaped per the kind's schema.
    pub value: Value,
}

impl Caveat {
    /// Construct a caveat of the given kind.
    ///
    /// The value is taken as-is; call [`Caveat::validate`] to assert it
    /// against the kind's schema.
    pub fn new(kind: CaveatKind, value: Value) -> Self {
        Self { kind, value }
    }

    /// Assert this caveat's value against the schema and business rules of
    /// its kind.
    pub fn validate(&self) -> Result<(), ShuntCapabilityError> {
        if self.value.is_null() {
            return Err(ShuntCapabilityError::MissingCaveatValue(
                self.kind.to_string(),
            ));
        }

        self.kind.validate(&self.value)
    }

    /// Decode this caveat into the typed value of definition `D`,
    /// re-validating on the way.
    pub fn decode<D: CaveatDefinition>(&self) -> Result<D::Value, ShuntCapabilityError> {
        if self.kind != D::KIND {
            return Err(ShuntCapabilityError::InvalidCaveatValue {
                kind: D::KIND.to_string(),
                message: format!("cannot decode a '{}' caveat as '{}'", self.kind, D::KIND),
            });
        }

        self.validate()?;

        serde_json::from_value(self.value.clone()).map_err(|error| {
            ShuntCapabilityError::InvalidCaveatValue {
                kind: self.kind.to_string(),
                message: format!("{error}"),
            }
        })
    }
}

/// The closed set of caveat kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaveatKind {
    /// Restricts a grant to a set of chain scopes.
    Scopes,
    /// Restricts which calling origins may reach the handler.
    Origins,
    /// Bounds the wall-clock duration of a single handler call.
    MaxDuration,
    /// Declares per-scope method sets for protocol handling.
    Protocols,
    /// Declares scheduled background jobs.
    Schedule,
}

impl CaveatKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaveatKind::Scopes => "scopes",
            CaveatKind::Origins => "origins",
            CaveatKind::MaxDuration => "max-duration",
            CaveatKind::Protocols => "protocols",
            CaveatKind::Schedule => "schedule",
        }
    }

    /// Assert a raw value against this kind's schema and business rules.
    pub fn validate(&self, value: &Value) -> Result<(), ShuntCapabilityError> {
        match self {
            CaveatKind::Scopes => scopes::Scopes::validate(value),
            CaveatKind::Origins => origins::Origins::validate(value),
            CaveatKind::MaxDuration => duration::MaxDuration::validate(value),
            CaveatKind::Protocols => protocol::Protocols::validate(value),
            CaveatKind::Schedule => schedule::Schedule::validate(value),
        }
    }

    /// Synthesize a caveat of this kind from a raw capability declaration.
    ///
    /// Returns `Ok(None)` when the declaration carries nothing for this kind.
    /// A synthesized caveat has already passed this kind's validator.
    pub fn map(&self, declaration: &Value) -> Result<Option<Caveat>, ShuntCapabilityError> {
        let value = match self {
            CaveatKind::Scopes => scopes::Scopes::map(declaration)?,
            CaveatKind::Origins => origins::Origins::map(declaration)?,
            CaveatKind::MaxDuration => duration::MaxDuration::map(declaration)?,
            CaveatKind::Protocols => protocol::Protocols::map(declaration)?,
            CaveatKind::Schedule => schedule::Schedule::map(declaration)?,
        };

        match value {
            Some(value) => {
                let caveat = Caveat::new(*self, value);
                caveat.validate()?;
                Ok(Some(caveat))
            }
            None => Ok(None),
        }
    }
}

impl Display for CaveatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The definition of one caveat kind: its typed value, its validator and its
/// mapper. Implemented once per kind by the modules in this directory.
pub trait CaveatDefinition {
    /// The kind this definition covers.
    const KIND: CaveatKind;

    /// The typed view of the caveat value.
    type Value: DeserializeOwned;

    /// Assert a raw value against this kind's schema and business rules.
    fn validate(value: &Value) -> Result<(), ShuntCapabilityError>;

    /// Extract this kind's caveat value from a raw capability declaration.
    ///
    /// Must return `Ok(None)` for an empty or absent declaration, never a
    /// zero-length collection.
    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_serializes_caveats_with_a_type_tag() {
        let caveat = Caveat::new(CaveatKind::Scopes, json!(["eip155:1"]));
        let encoded = serde_json::to_value(&caveat).unwrap();

        assert_eq!(encoded, json!({ "type": "scopes", "value": ["eip155:1"] }));
    }

    #[test]
    fn it_rejects_caveats_without_a_value() {
        let caveat = Caveat::new(CaveatKind::Scopes, Value::Null);

        assert_eq!(
            caveat.validate(),
            Err(ShuntCapabilityError::MissingCaveatValue("scopes".into()))
        );
    }

    #[test]
    fn it_refuses_to_decode_across_kinds() {
        let caveat = Caveat::new(CaveatKind::Scopes, json!(["eip155:1"]));

        assert!(caveat.decode::<duration::MaxDuration>().is_err());
    }
}
