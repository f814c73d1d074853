#![warn(missing_docs)]

//! Small helpers shared by the other `shunt-*` crates, kept deliberately
//! free of dependencies so that depending on this crate costs nothing.

mod sync;
pub use sync::*;
