//! The `protocols` caveat: declares which chain scopes a handler serves and
//! the method set it accepts for each.
//!
//! This caveat is what makes a handler a *protocol-bound* routing candidate:
//! the router reads it to learn that a handler can service, say, `getVersion`
//! on `solana:mainnet` without being tied to any particular account address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::caveat::{CaveatDefinition, CaveatKind};
use crate::{ScopeId, ShuntCapabilityError};

/// The declared method set for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMethods {
    /// JSON-RPC methods the handler accepts for this scope.
    pub methods: Vec<String>,
}

/// Definition of the `protocols` caveat. The value is a non-empty map from
/// scope identifier to the method set declared for that scope.
#[derive(Debug, Clone, Copy)]
pub struct Protocols;

impl CaveatDefinition for Protocols {
    const KIND: CaveatKind = CaveatKind::Protocols;

    type Value = BTreeMap<ScopeId, ScopeMethods>;

    fn validate(value: &Value) -> Result<(), ShuntCapabilityError> {
        let invalid = |message: String| ShuntCapabilityError::InvalidCaveatValue {
            kind: Self::KIND.to_string(),
            message,
        };

        let Some(entries) = value.as_object() else {
            return Err(invalid(
                "expected a map from scope identifier to method declarations".into(),
            ));
        };

        if entries.is_empty() {
            return Err(invalid("expected at least one scope declaration".into()));
        }

        for (scope, declaration) in entries {
            scope
                .parse::<ScopeId>()
                .map_err(|error| invalid(format!("{error}")))?;

            let Some(methods) = declaration.get("methods").and_then(Value::as_array) else {
                return Err(invalid(format!(
                    "scope '{scope}' must declare an array of methods"
                )));
            };

            if methods.is_empty() {
                return Err(invalid(format!(
                    "scope '{scope}' must declare at least one method"
                )));
            }

            for method in methods {
                match method.as_str() {
                    Some(name) if !name.is_empty() => (),
                    _ => {
                        return Err(invalid(format!(
                            "scope '{scope}' declares a malformed method name"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError> {
        match declaration.get("scopes") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(entries)) if entries.is_empty() => Ok(None),
            Some(scopes) => Ok(Some(scopes.clone())),
        }
    }
}
