//! Typed ports onto the router's external collaborators.
//!
//! All calls that leave the routing core go through these traits. The host
//! environment implements them over whatever transport it uses (a message
//! bus, an in-process registry, a test double); the router only sees the
//! typed surface, never string-keyed indirection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shunt_capability::{HandlerId, ScopeId};
use shunt_common::ConditionalSync;

use crate::{Account, Envelope, OperationKind, Origin, ShuntRouterError, SigningRequest};

/// A handler as enumerated by the handler registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    /// The handler's identifier.
    pub id: HandlerId,
}

/// The external account registry.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait AccountRegistry: ConditionalSync {
    /// All accounts matching the given scope, namespace-wide or exact per
    /// the registry's own semantics, in the registry's own priority order.
    async fn list_accounts(&self, scope: &ScopeId) -> Vec<Account>;
}

/// The external handler registry, pre-filtered for handlers that can
/// currently run (not disabled or blocked).
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait HandlerDirectory: ConditionalSync {
    /// Every runnable handler, in enumeration order.
    async fn list_runnable_handlers(&self) -> Vec<HandlerDescriptor>;
}

/// The generic handler invocation channel, used both for the address
/// resolution round-trip and for protocol dispatch.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait HandlerExecutor: ConditionalSync {
    /// Invoke a handler with the given envelope and operation kind,
    /// returning the handler's JSON result.
    ///
    /// Enforcement of any `max-duration` caveat the handler's grants carry
    /// is this collaborator's responsibility, as is cancellation when the
    /// caller abandons the request.
    async fn invoke_handler(
        &self,
        handler: &HandlerId,
        origin: &Origin,
        envelope: Envelope,
        operation: OperationKind,
    ) -> Result<Value, ShuntRouterError>;
}

/// The final dispatch channel for address-bound selections.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait SigningBridge: ConditionalSync {
    /// Submit a signing/account request for the selected address, returning
    /// the servicing handler's JSON result verbatim.
    async fn submit_address_bound_request(
        &self,
        request: SigningRequest,
    ) -> Result<Value, ShuntRouterError>;
}
