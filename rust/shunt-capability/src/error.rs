use thiserror::Error;

/// The common error type used by this crate.
///
/// All variants describe *structural* problems with a grant: a capability or
/// caveat whose shape violates its specification. They are raised while a
/// grant is synthesized or validated and must be handled by the grant flow;
/// request routing never propagates them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShuntCapabilityError {
    /// A string could not be interpreted as a scope identifier
    #[error("Invalid scope identifier: {0}")]
    InvalidScope(String),

    /// A string could not be interpreted as a capability name
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// A capability carried a caveat kind its specification does not allow
    #[error("Capability '{capability}' does not allow the '{kind}' caveat")]
    ForbiddenCaveat {
        /// The capability whose specification was violated
        capability: String,
        /// The caveat kind that is not allowed
        kind: String,
    },

    /// The same caveat kind appeared more than once on one capability
    #[error("Duplicate caveats are not allowed")]
    DuplicateCaveats,

    /// A caveat kind the specification requires was absent
    #[error("Capability '{capability}' requires the '{kind}' caveat")]
    MissingCaveat {
        /// The capability whose specification was violated
        capability: String,
        /// The caveat kind that must be present
        kind: String,
    },

    /// A caveat carried no value
    #[error("The '{0}' caveat requires a value")]
    MissingCaveatValue(String),

    /// A raw capability declaration was not a plain keyed structure
    #[error("Invalid capability declaration: {0}")]
    InvalidDeclaration(String),

    /// A caveat value did not conform to the schema for its kind
    #[error("Invalid '{kind}' caveat: {message}")]
    InvalidCaveatValue {
        /// The caveat kind whose schema was violated
        kind: String,
        /// What was wrong with the value
        message: String,
    },
}
