//! The `max-duration` caveat: bounds the wall-clock duration of a single
//! handler call.
//!
//! The bound is read by the invocation layer, which enforces it; the router
//! only validates and exposes the value.

use serde_json::Value;

use crate::ShuntCapabilityError;
use crate::caveat::{CaveatDefinition, CaveatKind};

/// The smallest permitted bound, in milliseconds.
pub const MIN_DURATION_MS: u64 = 5_000;

/// The largest permitted bound, in milliseconds.
pub const MAX_DURATION_MS: u64 = 180_000;

/// Definition of the `max-duration` caveat. The value is an integer number
/// of milliseconds within [`MIN_DURATION_MS`]..=[`MAX_DURATION_MS`].
#[derive(Debug, Clone, Copy)]
pub struct MaxDuration;

impl CaveatDefinition for MaxDuration {
    const KIND: CaveatKind = CaveatKind::MaxDuration;

    type Value = u64;

    fn validate(value: &Value) -> Result<(), ShuntCapabilityError> {
        let invalid = |message: String| ShuntCapabilityError::InvalidCaveatValue {
            kind: Self::KIND.to_string(),
            message,
        };

        let Some(milliseconds) = value.as_u64() else {
            return Err(invalid(format!(
                "expected an integer number of milliseconds, got {value}"
            )));
        };

        if !(MIN_DURATION_MS..=MAX_DURATION_MS).contains(&milliseconds) {
            return Err(invalid(format!(
                "duration must be between {MIN_DURATION_MS} and {MAX_DURATION_MS} milliseconds \
                 inclusive, got {milliseconds}"
            )));
        }

        Ok(())
    }

    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError> {
        match declaration.get("maxDuration") {
            None | Some(Value::Null) => Ok(None),
            Some(duration) => Ok(Some(duration.clone())),
        }
    }
}
