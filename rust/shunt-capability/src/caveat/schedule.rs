//! The `schedule` caveat: declares background jobs a handler wants invoked
//! on a recurring schedule.
//!
//! Scheduling itself is the host's concern; this module only validates the
//! declared jobs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ShuntCapabilityError;
use crate::caveat::{CaveatDefinition, CaveatKind};

/// One declared background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// A cron expression describing when the job fires.
    pub expression: String,
    /// The request delivered to the handler when the job fires.
    pub request: Value,
}

/// Definition of the `schedule` caveat. The value is a non-empty array of
/// [`Job`] declarations.
#[derive(Debug, Clone, Copy)]
pub struct Schedule;

impl CaveatDefinition for Schedule {
    const KIND: CaveatKind = CaveatKind::Schedule;

    type Value = Vec<Job>;

    fn validate(value: &Value) -> Result<(), ShuntCapabilityError> {
        let invalid = |message: String| ShuntCapabilityError::InvalidCaveatValue {
            kind: Self::KIND.to_string(),
            message,
        };

        let Some(jobs) = value.as_array() else {
            return Err(invalid("expected an array of jobs".into()));
        };

        if jobs.is_empty() {
            return Err(invalid("expected at least one job".into()));
        }

        for job in jobs {
            match job.get("expression").and_then(Value::as_str) {
                Some(expression) if !expression.is_empty() => (),
                _ => return Err(invalid("every job requires a cron expression".into())),
            }

            let Some(request) = job.get("request").and_then(Value::as_object) else {
                return Err(invalid("every job requires a request object".into()));
            };

            match request.get("method").and_then(Value::as_str) {
                Some(method) if !method.is_empty() => (),
                _ => return Err(invalid("every job request requires a method".into())),
            }
        }

        Ok(())
    }

    fn map(declaration: &Value) -> Result<Option<Value>, ShuntCapabilityError> {
        match declaration.get("jobs") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(jobs)) if jobs.is_empty() => Ok(None),
            Some(jobs) => Ok(Some(jobs.clone())),
        }
    }
}
