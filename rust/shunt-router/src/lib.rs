#![warn(missing_docs)]

//! Capability-gated request routing across chain scopes.
//!
//! Given an inbound chain-scoped request, this crate decides which registered
//! handler is authorized and able to service it, resolves handler-specific
//! addressing ambiguity, and performs the final dispatch with well-defined
//! fallback and failure semantics.
//!
//! # How a request travels
//!
//! ```text
//! RoutingRequest
//!   └── CandidateFinder ── address-bound candidates?
//!         ├── yes → AddressResolver round-trip → selection → SigningBridge
//!         └── no  → protocol candidates → first method match → HandlerExecutor
//! ```
//!
//! Handlers become candidates two ways:
//!
//! - **Address-bound**: an account registry entry ties a concrete address to
//!   an owning handler that supports the requested method for the scope.
//! - **Protocol-bound**: a handler holds a `protocol` capability whose caveat
//!   declares the requested scope (see
//!   [`shunt_capability::caveat::protocol`]).
//!
//! The two categories never mix within one routing decision: once any
//! address-bound candidate exists, protocol handling is off the table, even
//! if address selection subsequently fails. At most one dispatch call is made
//! per routing decision, so handlers are never raced against each other.
//!
//! # Collaborators
//!
//! The router holds no state of its own. Everything it consults (the
//! account registry, the handler directory, the grant store, the handler
//! invocation channel, the signing bridge) is supplied by the environment
//! through the typed ports in [`ports`], which makes the routing policy
//! directly unit-testable against mock environments.
//!
//! # Failure taxonomy
//!
//! Routing fails in three distinguishable ways (see [`ShuntRouterError`]):
//! the address-resolution round-trip failed (cause deliberately withheld),
//! an address was resolvable but no eligible connected address matched, or
//! no candidate of either category exists. Each projects onto a JSON-RPC
//! error code via [`ErrorCode`].

mod account;
pub use account::*;

mod request;
pub use request::*;

mod error;
pub use error::*;

mod ports;
pub use ports::*;

mod candidates;
pub use candidates::*;

mod resolve;
pub use resolve::*;

mod router;
pub use router::*;
