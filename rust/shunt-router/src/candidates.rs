use shunt_capability::caveat::protocol::Protocols;
use shunt_capability::{CapabilityName, CapabilityStore, HandlerId, ScopeId};
use tracing::warn;

use crate::{AccountRegistry, Address, HandlerDirectory};

/// A handler eligible to service a request via ownership of a concrete
/// account address. Transient: lives for one routing decision only.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressCandidate {
    /// The candidate account address.
    pub address: Address,
    /// The handler owning that address.
    pub handler: HandlerId,
}

/// A handler eligible to service a request via a scope-level protocol grant,
/// not tied to any address. Transient: lives for one routing decision only.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolCandidate {
    /// The eligible handler.
    pub handler: HandlerId,
    /// The methods the handler declared for the requested scope.
    pub methods: Vec<String>,
}

/// Walks the account registry and the grant-filtered handler registry to
/// produce the candidates for one routing decision.
pub struct CandidateFinder<'a, Env> {
    env: &'a Env,
}

impl<'a, Env> CandidateFinder<'a, Env> {
    /// Create a finder over the given environment.
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl<Env> CandidateFinder<'_, Env>
where
    Env: AccountRegistry + HandlerDirectory + CapabilityStore,
{
    /// Address-bound candidates for the given scope and method.
    ///
    /// Registry order is preserved: the registry's own ordering is treated
    /// as priority order, and the first entry is the deterministic
    /// tie-break downstream. Whether a candidate's address is actually
    /// connected is selection's concern, not the finder's. An empty result
    /// is a normal outcome.
    pub async fn find_address_candidates(
        &self,
        scope: &ScopeId,
        method: &str,
    ) -> Vec<AddressCandidate> {
        self.env
            .list_accounts(scope)
            .await
            .into_iter()
            .filter(|account| account.enabled)
            .filter(|account| account.methods.iter().any(|m| m == method))
            .map(|account| AddressCandidate {
                address: account.address,
                handler: account.owner,
            })
            .collect()
    }

    /// Protocol-bound candidates for the given scope, in handler
    /// enumeration order.
    ///
    /// A handler qualifies when it is runnable and its `protocol` grant
    /// declares the requested scope. A grant whose caveat no longer passes
    /// validation is skipped rather than surfaced: structural errors belong
    /// to grant time, never to routing time.
    pub async fn find_protocol_candidates(&self, scope: &ScopeId) -> Vec<ProtocolCandidate> {
        let mut candidates = Vec::new();

        for descriptor in self.env.list_runnable_handlers().await {
            let Some(capabilities) = self.env.capabilities(&descriptor.id).await else {
                continue;
            };

            let Some(capability) = capabilities.get(&CapabilityName::Protocol) else {
                continue;
            };

            let declared = match capability.decode_caveat::<Protocols>() {
                Ok(Some(declared)) => declared,
                Ok(None) => continue,
                Err(error) => {
                    warn!(
                        handler = %descriptor.id,
                        %error,
                        "Skipping handler with a malformed protocol grant"
                    );
                    continue;
                }
            };

            if let Some(methods) = declared.get(scope) {
                candidates.push(ProtocolCandidate {
                    handler: descriptor.id,
                    methods: methods.methods.clone(),
                });
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Account, HandlerDescriptor};
    use serde_json::json;
    use shunt_capability::caveat::{Caveat, CaveatKind};
    use shunt_capability::{Capability, ScopePattern};
    use std::collections::BTreeMap;

    /// A canned environment: a fixed account list and fixed grants.
    struct Fixture {
        accounts: Vec<Account>,
        handlers: Vec<HandlerDescriptor>,
        grants: BTreeMap<HandlerId, BTreeMap<CapabilityName, Capability>>,
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
    impl AccountRegistry for Fixture {
        async fn list_accounts(&self, scope: &ScopeId) -> Vec<Account> {
            self.accounts
                .iter()
                .filter(|account| account.scope.matches(scope))
                .cloned()
                .collect()
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
    impl HandlerDirectory for Fixture {
        async fn list_runnable_handlers(&self) -> Vec<HandlerDescriptor> {
            self.handlers.clone()
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
    impl CapabilityStore for Fixture {
        async fn capabilities(
            &self,
            handler: &HandlerId,
        ) -> Option<BTreeMap<CapabilityName, Capability>> {
            self.grants.get(handler).cloned()
        }
    }

    fn account(address: &str, scope: &str, methods: &[&str], owner: &str, enabled: bool) -> Account {
        Account {
            address: Address::from(address),
            scope: scope.parse::<ScopePattern>().unwrap(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            owner: HandlerId::from(owner),
            enabled,
        }
    }

    fn protocol_grant(value: serde_json::Value) -> BTreeMap<CapabilityName, Capability> {
        BTreeMap::from([(
            CapabilityName::Protocol,
            Capability::new(
                CapabilityName::Protocol,
                Some(vec![Caveat::new(CaveatKind::Protocols, value)]),
            ),
        )])
    }

    #[tokio::test]
    async fn it_filters_address_candidates_by_enablement_and_method() {
        let scope: ScopeId = "bip122:000000000019d6689c085ae165831e93".parse().unwrap();
        let fixture = Fixture {
            accounts: vec![
                account("bc1qfirst", "bip122", &["btc_sendmany"], "keyring-a", true),
                account("bc1qmuted", "bip122", &["btc_sendmany"], "keyring-b", false),
                account("bc1qother", "bip122", &["btc_getbalance"], "keyring-c", true),
            ],
            handlers: vec![],
            grants: BTreeMap::new(),
        };

        let finder = CandidateFinder::new(&fixture);
        let candidates = finder.find_address_candidates(&scope, "btc_sendmany").await;

        assert_eq!(
            candidates,
            vec![AddressCandidate {
                address: Address::from("bc1qfirst"),
                handler: HandlerId::from("keyring-a"),
            }]
        );
    }

    #[tokio::test]
    async fn it_preserves_registry_order_for_address_candidates() {
        let scope: ScopeId = "eip155:1".parse().unwrap();
        let fixture = Fixture {
            accounts: vec![
                account("0xaaaa", "eip155:1", &["eth_sign"], "keyring-z", true),
                account("0xbbbb", "eip155:1", &["eth_sign"], "keyring-a", true),
            ],
            handlers: vec![],
            grants: BTreeMap::new(),
        };

        let finder = CandidateFinder::new(&fixture);
        let candidates = finder.find_address_candidates(&scope, "eth_sign").await;

        let addresses: Vec<_> = candidates.iter().map(|c| c.address.as_str()).collect();
        assert_eq!(addresses, vec!["0xaaaa", "0xbbbb"]);
    }

    #[tokio::test]
    async fn it_finds_protocol_candidates_declaring_the_scope() {
        let scope: ScopeId = "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp".parse().unwrap();
        let fixture = Fixture {
            accounts: vec![],
            handlers: vec![
                HandlerDescriptor {
                    id: HandlerId::from("solana-handler"),
                },
                HandlerDescriptor {
                    id: HandlerId::from("bitcoin-handler"),
                },
            ],
            grants: BTreeMap::from([
                (
                    HandlerId::from("solana-handler"),
                    protocol_grant(json!({
                        "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp": { "methods": ["getVersion"] }
                    })),
                ),
                (
                    HandlerId::from("bitcoin-handler"),
                    protocol_grant(json!({
                        "bip122:000000000019d6689c085ae165831e93": { "methods": ["getFees"] }
                    })),
                ),
            ]),
        };

        let finder = CandidateFinder::new(&fixture);
        let candidates = finder.find_protocol_candidates(&scope).await;

        assert_eq!(
            candidates,
            vec![ProtocolCandidate {
                handler: HandlerId::from("solana-handler"),
                methods: vec!["getVersion".into()],
            }]
        );
    }

    #[tokio::test]
    async fn it_skips_handlers_with_malformed_protocol_grants() {
        let scope: ScopeId = "eip155:1".parse().unwrap();
        let fixture = Fixture {
            accounts: vec![],
            handlers: vec![HandlerDescriptor {
                id: HandlerId::from("decayed-handler"),
            }],
            // methods array went missing after grant time
            grants: BTreeMap::from([(
                HandlerId::from("decayed-handler"),
                protocol_grant(json!({ "eip155:1": {} })),
            )]),
        };

        let finder = CandidateFinder::new(&fixture);

        assert!(finder.find_protocol_candidates(&scope).await.is_empty());
    }

    #[tokio::test]
    async fn it_treats_no_candidates_as_a_normal_outcome() {
        let scope: ScopeId = "eip155:1".parse().unwrap();
        let fixture = Fixture {
            accounts: vec![],
            handlers: vec![],
            grants: BTreeMap::new(),
        };

        let finder = CandidateFinder::new(&fixture);

        assert!(finder.find_address_candidates(&scope, "eth_sign").await.is_empty());
        assert!(finder.find_protocol_candidates(&scope).await.is_empty());
    }
}
