use serde::{Deserialize, Serialize};
use serde_json::Value;
use shunt_capability::ScopeId;

use crate::Address;

/// A JSON-RPC request as received from the caller: the method name and its
/// parameters, with transport concerns (ids, versions) already stripped by
/// the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// The JSON-RPC method name.
    pub method: String,
    /// The JSON-RPC parameters, verbatim.
    #[serde(default)]
    pub params: Value,
}

/// The immutable input to one routing decision.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingRequest {
    /// Addresses the caller has connected; only these may be selected to
    /// service an address-bound request.
    pub connected_addresses: Vec<Address>,
    /// The chain scope the request targets.
    pub scope: ScopeId,
    /// The request itself.
    pub request: RpcRequest,
}

/// What a handler invocation is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// A synthetic round-trip asking a handler which of its addresses should
    /// service a request.
    ResolveAddress,
    /// Dispatch of a scope-bound protocol request.
    Protocol,
}

/// The payload delivered to a handler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// A scoped request, used both for address resolution and protocol
    /// dispatch.
    Request {
        /// The chain scope the request targets.
        scope: ScopeId,
        /// The request being serviced or resolved.
        request: RpcRequest,
    },
    /// An explicit method call addressed to a handler.
    Call {
        /// The chain scope the call targets.
        scope: ScopeId,
        /// The method to call.
        method: String,
        /// The call parameters, verbatim.
        params: Value,
    },
}

/// The final dispatch payload for an address-bound selection, handed to the
/// signing bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
    /// The selected account address.
    pub address: Address,
    /// The JSON-RPC method name.
    pub method: String,
    /// The JSON-RPC parameters, verbatim.
    pub params: Value,
    /// The chain scope the request targets.
    pub chain_id: ScopeId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_serializes_signing_requests_with_a_chain_id_field() {
        let request = SigningRequest {
            address: Address::from("bc1qexample"),
            method: "btc_sendmany".into(),
            params: json!({ "recipients": [] }),
            chain_id: "bip122:000000000019d6689c085ae165831e93".parse().unwrap(),
        };

        let encoded = serde_json::to_value(&request).unwrap();

        assert_eq!(
            encoded,
            json!({
                "address": "bc1qexample",
                "method": "btc_sendmany",
                "params": { "recipients": [] },
                "chainId": "bip122:000000000019d6689c085ae165831e93",
            })
        );
    }

    #[test]
    fn it_serializes_request_envelopes_without_a_tag() {
        let envelope = Envelope::Request {
            scope: "solana:mainnet".parse().unwrap(),
            request: RpcRequest {
                method: "getVersion".into(),
                params: Value::Null,
            },
        };

        let encoded = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            encoded,
            json!({
                "scope": "solana:mainnet",
                "request": { "method": "getVersion", "params": null },
            })
        );
    }
}
