//! Thread-safety bounds that adapt to the compilation target.
//!
//! The port traits in the `shunt-*` crates want their implementers to be
//! shareable across threads on native targets, where an environment may be
//! consulted from a multi-threaded runtime. On `wasm32-unknown-unknown`
//! there is only one thread, and insisting on `Send`/`Sync` there would
//! reject implementers that are perfectly usable.
//!
//! These marker traits express that conditionally: on native targets they
//! alias `Send` (respectively `Send + Sync`), on wasm they impose no bound
//! at all. Every type satisfying the underlying bounds implements them
//! automatically.

#[allow(missing_docs)]
#[cfg(not(target_arch = "wasm32"))]
pub trait ConditionalSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<S> ConditionalSend for S where S: Send {}

#[allow(missing_docs)]
#[cfg(not(target_arch = "wasm32"))]
pub trait ConditionalSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<S> ConditionalSync for S where S: Send + Sync {}

#[allow(missing_docs)]
#[cfg(target_arch = "wasm32")]
pub trait ConditionalSend {}

#[cfg(target_arch = "wasm32")]
impl<S> ConditionalSend for S {}

#[allow(missing_docs)]
#[cfg(target_arch = "wasm32")]
pub trait ConditionalSync {}

#[cfg(target_arch = "wasm32")]
impl<S> ConditionalSync for S {}
