use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use shunt_common::ConditionalSync;

use crate::{Capability, CapabilityName};

/// Identifies one externally developed handler: the grantee of capabilities
/// and the unit the router dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct HandlerId(String);

impl HandlerId {
    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for HandlerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only accessor over the external grant store.
///
/// Implementations always reflect the latest granted state at call time; no
/// caching or write access is exposed here. The router consults this while
/// deciding where a request may go.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait CapabilityStore: ConditionalSync {
    /// All capabilities granted to the given handler, keyed by name, or
    /// `None` when the handler holds no grants at all.
    async fn capabilities(
        &self,
        handler: &HandlerId,
    ) -> Option<BTreeMap<CapabilityName, Capability>>;
}
