//! The `origins` caveat: restricts which calling origins may reach the
//! handler.

use serde_json::Value;

use crate::ShuntCapabilityError;
use crate::caveat::{CaveatDefinition, CaveatKind};

/// Definition of the `origins` caveat. The value is a non-empty allow-list
/// of origin strings.
#[derive(Debug, Clone, Copy)]
pub struct Origins;

impl CaveatDefinition for Origins {
    const KIND: CaveatKind = CaveatKind::Origins;

    type Value = Vec<String>;

    fn validate(value: &Value) -> Result<(), ShuntCapabilityError> {
        let invalid = |message: String| ShuntCapabilityError::InvalidCaveatValue {
            kind: Self::KIND.to_string(),
            message,
        };

        let Some(entries) = value.as_array() else {
            return Err(invalid("expected an array of origins".into()));
        };

        if entries.is_empty() {
            return Err(invalid("expected at least one origin".into()));
        }

        for entry in entries {
            match entry.as_str() {
                Some(origin) if !origin.is_empty() => (),
                Some(_) => return Err(invalid("origins may not be empty strings".into())),
                None => return Err(invalid(format!("'{entry}' is not a string"))),
            }
        }

        Ok(())
    }

    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError> {
        match declaration.get("allowedOrigins") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(entries)) if entries.is_empty() => Ok(None),
            Some(origins) => Ok(Some(origins.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_accepts_an_allow_list_of_origins() {
        assert!(Origins::validate(&json!(["https://wallet.example", "metamask"])).is_ok());
    }

    #[test]
    fn it_rejects_empty_lists_and_non_string_entries() {
        assert!(Origins::validate(&json!([])).is_err());
        assert!(Origins::validate(&json!([""])).is_err());
        assert!(Origins::validate(&json!([1])).is_err());
        assert!(Origins::validate(&json!("https://wallet.example")).is_err());
    }

    #[test]
    fn it_maps_nothing_from_an_empty_declaration() {
        assert_eq!(Origins::map(&json!({})).unwrap(), None);
        assert_eq!(Origins::map(&json!({ "allowedOrigins": [] })).unwrap(), None);
    }
}
