use std::collections::BTreeSet;

use serde_json::Value;

use crate::caveat::{Caveat, CaveatKind};
use crate::{Capability, CapabilityName, ShuntCapabilityError};

/// One entry in a specification's allowed-caveat set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaveatRequirement {
    /// The caveat kind this entry admits.
    pub kind: CaveatKind,
    /// Whether a grant of the capability must carry this caveat.
    pub required: bool,
}

impl CaveatRequirement {
    /// A caveat kind the capability admits but does not require.
    pub const fn optional(kind: CaveatKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    /// A caveat kind every grant of the capability must carry.
    pub const fn required(kind: CaveatKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }
}

/// The immutable specification of one capability name: which caveat kinds it
/// admits, and how grants of it are synthesized and validated.
///
/// The registry of specifications is closed and total: every
/// [`CapabilityName`] resolves to exactly one specification via
/// [`CapabilityName::specification`].
#[derive(Debug)]
pub struct CapabilitySpecification {
    target: CapabilityName,
    allowed_caveats: Option<&'static [CaveatRequirement]>,
}

impl CapabilitySpecification {
    /// Build a specification for `target` admitting the given caveat kinds.
    /// `None` means the capability admits no caveats at all.
    pub const fn new(
        target: CapabilityName,
        allowed_caveats: Option<&'static [CaveatRequirement]>,
    ) -> Self {
        Self {
            target,
            allowed_caveats,
        }
    }

    /// The capability name this specification covers.
    pub fn target(&self) -> CapabilityName {
        self.target
    }

    /// The caveat kinds grants of this capability may carry.
    pub fn allowed_caveats(&self) -> Option<&'static [CaveatRequirement]> {
        self.allowed_caveats
    }

    /// Structurally validate a grant against this specification.
    ///
    /// Rejects a caveat kind outside the allowed set, the same kind
    /// appearing twice, a required kind that is absent, and any caveat value
    /// that fails its kind's validator.
    pub fn validate(&self, capability: &Capability) -> Result<(), ShuntCapabilityError> {
        let caveats = capability.caveats.as_deref().unwrap_or_default();
        let mut seen = BTreeSet::new();

        for caveat in caveats {
            let allowed = self
                .allowed_caveats
                .is_some_and(|allowed| allowed.iter().any(|entry| entry.kind == caveat.kind));

            if !allowed {
                return Err(ShuntCapabilityError::ForbiddenCaveat {
                    capability: self.target.to_string(),
                    kind: caveat.kind.to_string(),
                });
            }

            if !seen.insert(caveat.kind) {
                return Err(ShuntCapabilityError::DuplicateCaveats);
            }

            caveat.validate()?;
        }

        for entry in self.allowed_caveats.unwrap_or_default() {
            if entry.required && !seen.contains(&entry.kind) {
                return Err(ShuntCapabilityError::MissingCaveat {
                    capability: self.target.to_string(),
                    kind: entry.kind.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Synthesize the caveats of a grant from its raw, user-authored
    /// declaration.
    ///
    /// Each allowed kind's mapper contributes at most one caveat; every
    /// synthesized caveat has passed its kind's validator. An empty or
    /// absent declaration yields `None`, never an empty list.
    pub fn build_caveats(
        &self,
        declaration: &Value,
    ) -> Result<Option<Vec<Caveat>>, ShuntCapabilityError> {
        match declaration {
            Value::Null => return Ok(None),
            Value::Object(_) => (),
            other => {
                return Err(ShuntCapabilityError::InvalidDeclaration(format!(
                    "expected a plain keyed structure, got {other}"
                )));
            }
        }

        let mut caveats = Vec::new();

        for entry in self.allowed_caveats.unwrap_or_default() {
            if let Some(caveat) = entry.kind.map(declaration)? {
                caveats.push(caveat);
            }
        }

        Ok((!caveats.is_empty()).then_some(caveats))
    }
}

const KEYRING_CAVEATS: &[CaveatRequirement] = &[
    CaveatRequirement::optional(CaveatKind::Origins),
    CaveatRequirement::optional(CaveatKind::Scopes),
    CaveatRequirement::optional(CaveatKind::MaxDuration),
];

const PROTOCOL_CAVEATS: &[CaveatRequirement] = &[
    CaveatRequirement::required(CaveatKind::Protocols),
    CaveatRequirement::optional(CaveatKind::MaxDuration),
];

const RPC_CAVEATS: &[CaveatRequirement] = &[
    CaveatRequirement::optional(CaveatKind::Origins),
    CaveatRequirement::optional(CaveatKind::MaxDuration),
];

const CRONJOB_CAVEATS: &[CaveatRequirement] = &[
    CaveatRequirement::required(CaveatKind::Schedule),
    CaveatRequirement::optional(CaveatKind::MaxDuration),
];

static KEYRING: CapabilitySpecification =
    CapabilitySpecification::new(CapabilityName::Keyring, Some(KEYRING_CAVEATS));
static PROTOCOL: CapabilitySpecification =
    CapabilitySpecification::new(CapabilityName::Protocol, Some(PROTOCOL_CAVEATS));
static RPC: CapabilitySpecification =
    CapabilitySpecification::new(CapabilityName::Rpc, Some(RPC_CAVEATS));
static CRONJOB: CapabilitySpecification =
    CapabilitySpecification::new(CapabilityName::Cronjob, Some(CRONJOB_CAVEATS));

impl CapabilityName {
    /// The immutable specification governing grants of this capability.
    pub fn specification(&self) -> &'static CapabilitySpecification {
        match self {
            CapabilityName::Keyring => &KEYRING,
            CapabilityName::Protocol => &PROTOCOL,
            CapabilityName::Rpc => &RPC,
            CapabilityName::Cronjob => &CRONJOB,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn protocol_caveat() -> Caveat {
        Caveat::new(
            CaveatKind::Protocols,
            json!({ "solana:mainnet": { "methods": ["getVersion"] } }),
        )
    }

    #[test]
    fn it_accepts_a_grant_satisfying_its_specification() {
        let capability = Capability::new(CapabilityName::Protocol, Some(vec![protocol_caveat()]));

        assert!(CapabilityName::Protocol
            .specification()
            .validate(&capability)
            .is_ok());
    }

    #[test]
    fn it_rejects_duplicate_caveats() {
        let capability = Capability::new(
            CapabilityName::Protocol,
            Some(vec![protocol_caveat(), protocol_caveat()]),
        );

        assert_eq!(
            CapabilityName::Protocol
                .specification()
                .validate(&capability),
            Err(ShuntCapabilityError::DuplicateCaveats)
        );
    }

    #[test]
    fn it_rejects_caveat_kinds_outside_the_allowed_set() {
        let capability = Capability::new(CapabilityName::Rpc, Some(vec![protocol_caveat()]));

        assert_eq!(
            CapabilityName::Rpc.specification().validate(&capability),
            Err(ShuntCapabilityError::ForbiddenCaveat {
                capability: "rpc".into(),
                kind: "protocols".into(),
            })
        );
    }

    #[test]
    fn it_rejects_any_caveat_when_none_are_allowed() {
        let bare = CapabilitySpecification::new(CapabilityName::Rpc, None);
        let capability = Capability::new(
            CapabilityName::Rpc,
            Some(vec![Caveat::new(CaveatKind::Origins, json!(["metamask"]))]),
        );

        assert!(matches!(
            bare.validate(&capability),
            Err(ShuntCapabilityError::ForbiddenCaveat { .. })
        ));
    }

    #[test]
    fn it_rejects_a_grant_missing_a_required_caveat() {
        let capability = Capability::new(CapabilityName::Protocol, None);

        assert_eq!(
            CapabilityName::Protocol
                .specification()
                .validate(&capability),
            Err(ShuntCapabilityError::MissingCaveat {
                capability: "protocol".into(),
                kind: "protocols".into(),
            })
        );
    }

    #[test]
    fn it_rejects_a_grant_whose_caveat_value_is_malformed() {
        let capability = Capability::new(
            CapabilityName::Protocol,
            Some(vec![Caveat::new(CaveatKind::Protocols, json!({}))]),
        );

        assert!(CapabilityName::Protocol
            .specification()
            .validate(&capability)
            .is_err());
    }

    #[test]
    fn it_builds_caveats_from_a_raw_declaration() {
        let caveats = CapabilityName::Keyring
            .specification()
            .build_caveats(&json!({
                "allowedOrigins": ["https://wallet.example"],
                "maxDuration": 30_000,
            }))
            .unwrap()
            .expect("caveats were declared");

        assert_eq!(caveats.len(), 2);
        assert_eq!(caveats[0].kind, CaveatKind::Origins);
        assert_eq!(caveats[1].kind, CaveatKind::MaxDuration);

        // Synthesis output satisfies structural validation (caveat round-trip)
        let capability = Capability::new(CapabilityName::Keyring, Some(caveats));
        assert!(CapabilityName::Keyring
            .specification()
            .validate(&capability)
            .is_ok());
    }

    #[test]
    fn it_builds_no_caveats_from_an_empty_declaration() {
        let specification = CapabilityName::Keyring.specification();

        assert_eq!(specification.build_caveats(&json!({})).unwrap(), None);
        assert_eq!(
            specification.build_caveats(&Value::Null).unwrap(),
            None
        );
    }

    #[test]
    fn it_rejects_non_object_declarations() {
        assert!(matches!(
            CapabilityName::Keyring
                .specification()
                .build_caveats(&json!(["scopes"])),
            Err(ShuntCapabilityError::InvalidDeclaration(_))
        ));
    }

    #[test]
    fn it_propagates_validator_failures_during_synthesis() {
        // maxDuration below the permitted minimum fails at mapping time
        let result = CapabilityName::Keyring
            .specification()
            .build_caveats(&json!({ "maxDuration": 1 }));

        assert!(matches!(
            result,
            Err(ShuntCapabilityError::InvalidCaveatValue { .. })
        ));
    }
}
