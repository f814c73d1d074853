#![warn(missing_docs)]

//! Capability and caveat primitives for handler grants.
//!
//! A [`Capability`] is a named grant that authorizes an externally developed
//! handler to service some category of requests (act as a keyring, serve a
//! protocol, receive JSON-RPC calls, declare cronjobs). Grants are made by an
//! authorization flow that lives outside this crate; here they are immutable
//! data that the request router consults while deciding where an inbound
//! request should go.
//!
//! # Caveats
//!
//! Each capability may carry [`Caveat`]s: typed `(kind, value)` pairs that
//! narrow what the grant authorizes. A caveat kind owns exactly one validator
//! and one mapping function:
//!
//! - the **validator** asserts a caveat value against the kind's schema and
//!   business rules (scope identifiers must parse, durations must fall in an
//!   inclusive range, and so on). It runs when a caveat is synthesized from a
//!   raw declaration and again whenever a consumer reads the caveat back.
//! - the **mapper** translates the raw, user-authored declaration (for
//!   example `{ "scopes": [...] }`) into the internal caveat shape. Mapping
//!   an empty declaration yields no caveat at all, never an empty list.
//!
//! The set of kinds is closed: see [`CaveatKind`] and the per-kind modules
//! under [`caveat`].
//!
//! # Specifications
//!
//! Every capability name has an immutable [`CapabilitySpecification`] that
//! declares which caveat kinds the capability admits (and which are
//! required), and provides the structural validator used at grant time: no
//! unknown kinds, no duplicate kinds, no missing required kind. Structural
//! failures are grant-time errors; the router never surfaces them.
//!
//! # Example
//!
//! ```rust
//! use shunt_capability::{Capability, CapabilityName};
//! use serde_json::json;
//!
//! // Synthesize a protocol grant from its raw declaration...
//! let specification = CapabilityName::Protocol.specification();
//! let caveats = specification
//!     .build_caveats(&json!({
//!         "scopes": {
//!             "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp": { "methods": ["getVersion"] }
//!         }
//!     }))
//!     .unwrap();
//!
//! // ...and the resulting capability satisfies its own specification.
//! let capability = Capability::new(CapabilityName::Protocol, caveats);
//! assert!(specification.validate(&capability).is_ok());
//! ```

mod error;
pub use error::*;

mod scope;
pub use scope::*;

pub mod caveat;
pub use caveat::{Caveat, CaveatKind};

mod capability;
pub use capability::*;

mod specification;
pub use specification::*;

mod store;
pub use store::*;
