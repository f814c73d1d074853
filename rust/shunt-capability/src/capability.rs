use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::caveat::{Caveat, CaveatDefinition, CaveatKind};
use crate::ShuntCapabilityError;

/// A named grant authorizing a handler to be invoked for some category of
/// requests, optionally narrowed by caveats.
///
/// Capabilities are created by an authorization flow outside this crate and
/// are read-only here. A capability's caveat list must satisfy its
/// [specification](crate::CapabilitySpecification): every kind allowed, no
/// kind duplicated, no required kind absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    /// The name of the grant.
    pub name: CapabilityName,
    /// The caveats narrowing the grant, if any. Never an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveats: Option<Vec<Caveat>>,
}

impl Capability {
    /// Construct a capability, normalizing an empty caveat list to `None`.
    pub fn new(name: CapabilityName, caveats: Option<Vec<Caveat>>) -> Self {
        let caveats = caveats.filter(|caveats| !caveats.is_empty());
        Self { name, caveats }
    }

    /// Look up the caveat of the given kind, if present.
    pub fn caveat(&self, kind: CaveatKind) -> Option<&Caveat> {
        self.caveats
            .as_deref()
            .and_then(|caveats| caveats.iter().find(|caveat| caveat.kind == kind))
    }

    /// Look up and decode the caveat covered by definition `D`.
    ///
    /// Returns `Ok(None)` when the caveat is absent. A present caveat is
    /// re-validated before decoding, so a grant that was corrupted after
    /// synthesis surfaces as an error here rather than as garbage data.
    pub fn decode_caveat<D: CaveatDefinition>(
        &self,
    ) -> Result<Option<D::Value>, ShuntCapabilityError> {
        self.caveat(D::KIND)
            .map(|caveat| caveat.decode::<D>())
            .transpose()
    }
}

/// The closed registry of capability names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityName {
    /// The handler may act as a keyring, servicing account requests.
    Keyring,
    /// The handler may service protocol requests for declared scopes.
    Protocol,
    /// The handler may receive plain JSON-RPC calls.
    Rpc,
    /// The handler may declare scheduled background jobs.
    Cronjob,
}

impl CapabilityName {
    /// The wire name of this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityName::Keyring => "keyring",
            CapabilityName::Protocol => "protocol",
            CapabilityName::Rpc => "rpc",
            CapabilityName::Cronjob => "cronjob",
        }
    }
}

impl Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CapabilityName {
    type Err = ShuntCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyring" => Ok(CapabilityName::Keyring),
            "protocol" => Ok(CapabilityName::Protocol),
            "rpc" => Ok(CapabilityName::Rpc),
            "cronjob" => Ok(CapabilityName::Cronjob),
            other => Err(ShuntCapabilityError::UnknownCapability(other.to_owned())),
        }
    }
}
