//! Routing failure taxonomy.
//!
//! The three failure kinds a caller can observe are deliberately
//! distinguishable: hosts translate them into different JSON-RPC responses
//! and different user-facing treatments. [`ErrorCode`] provides that wire
//! projection so hosts never match on variants directly.

use serde::Serialize;
use thiserror::Error;

/// The common error type used by this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShuntRouterError {
    /// The address-resolution round-trip failed.
    ///
    /// The underlying cause is logged and withheld on purpose: handler
    /// internals must not leak to the router's caller through resolution
    /// failures.
    #[error("Internal error while resolving the signing address via handler '{handler}'")]
    Resolution {
        /// The handler that was asked to resolve.
        handler: String,
    },

    /// Address-bound candidates existed but none could be selected: either
    /// the resolved address is not among the connected addresses, or no
    /// candidate address is connected at all.
    #[error("Invalid parameters: {0}")]
    AmbiguousSelection(String),

    /// No handler of either category can service the request.
    #[error("Method not found: {0}")]
    NotFound(String),

    /// A dispatched collaborator call failed; its message is propagated
    /// verbatim.
    #[error("Handler failure: {0}")]
    Handler(String),
}

impl ShuntRouterError {
    /// The wire classification of this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ShuntRouterError::Resolution { .. } => ErrorCode::Unauthorized,
            ShuntRouterError::AmbiguousSelection(_) => ErrorCode::InvalidParams,
            ShuntRouterError::NotFound(_) => ErrorCode::MethodNotFound,
            ShuntRouterError::Handler(_) => ErrorCode::Internal,
        }
    }
}

/// Wire classification of routing failures.
///
/// Each code maps to a JSON-RPC error code via [`ErrorCode::rpc_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No eligible handler exists for the request.
    MethodNotFound,
    /// The request could not be unambiguously bound to a connected address.
    InvalidParams,
    /// A dispatched collaborator call failed.
    Internal,
    /// The address-resolution round-trip failed, so the request could not be
    /// authorized against a concrete signer.
    Unauthorized,
}

impl ErrorCode {
    /// The JSON-RPC error code for this classification.
    pub fn rpc_code(&self) -> i64 {
        match self {
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::Internal => -32603,
            ErrorCode::Unauthorized => 4100,
        }
    }
}
