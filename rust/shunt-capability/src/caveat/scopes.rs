//! The `scopes` caveat: restricts a grant to a set of chain scopes.

use serde_json::Value;

use crate::caveat::{CaveatDefinition, CaveatKind};
use crate::{ScopeId, ShuntCapabilityError};

/// Definition of the `scopes` caveat. The value is a non-empty array of
/// scope identifiers.
#[derive(Debug, Clone, Copy)]
pub struct Scopes;

impl CaveatDefinition for Scopes {
    const KIND: CaveatKind = CaveatKind::Scopes;

    type Value = Vec<ScopeId>;

    fn validate(value: &Value) -> Result<(), ShuntCapabilityError> {
        let invalid = |message: String| ShuntCapabilityError::InvalidCaveatValue {
            kind: Self::KIND.to_string(),
            message,
        };

        let Some(entries) = value.as_array() else {
            return Err(invalid("expected an array of scope identifiers".into()));
        };

        if entries.is_empty() {
            return Err(invalid("expected at least one scope identifier".into()));
        }

        for entry in entries {
            let Some(scope) = entry.as_str() else {
                return Err(invalid(format!("'{entry}' is not a string")));
            };

            scope
                .parse::<ScopeId>()
                .map_err(|error| invalid(format!("{error}")))?;
        }

        Ok(())
    }

    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError> {
        match declaration.get("scopes") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(entries)) if entries.is_empty() => Ok(None),
            Some(scopes) => Ok(Some(scopes.clone())),
        }
    }
}
