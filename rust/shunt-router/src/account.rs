use std::fmt::Display;

use serde::{Deserialize, Serialize};
use shunt_capability::{HandlerId, ScopePattern};

/// A chain account address.
///
/// Addresses compare case-insensitively: chains disagree about checksum
/// casing, and the router must not treat `0xBEEF` and `0xbeef` as different
/// signers.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Address(String);

impl Address {
    /// The raw address string, casing preserved.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The origin a handler invocation is attributed to (e.g., the host wallet
/// itself, or a connected site).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Origin(String);

impl Origin {
    /// The raw origin string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Origin {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the external account registry: an address, the scope family
/// it serves, the methods it supports and the handler that owns it.
///
/// Accounts are produced by the registry and are immutable for the duration
/// of one routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The concrete account address.
    pub address: Address,
    /// The scope, or whole namespace, this account serves.
    pub scope: ScopePattern,
    /// JSON-RPC methods the owning handler supports for this account.
    pub methods: Vec<String>,
    /// The handler that owns this account.
    pub owner: HandlerId,
    /// Whether the owning handler currently accepts requests for it.
    pub enabled: bool,
}
