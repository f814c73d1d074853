use serde_json::Value;
use shunt_capability::{CapabilityStore, ScopeId};
use tracing::debug;

use crate::{
    AccountRegistry, Address, AddressCandidate, AddressResolver, CandidateFinder, Envelope,
    HandlerDirectory, HandlerExecutor, OperationKind, Origin, RoutingRequest, RpcRequest,
    ShuntRouterError, SigningBridge, SigningRequest,
};

/// The top-level dispatcher: finds candidates, disambiguates addresses and
/// performs the final dispatch call.
///
/// The router holds no mutable state across calls; concurrent
/// [`handle_request`](RequestRouter::handle_request) invocations are
/// independent. Each invocation awaits at most two external calls in
/// sequence (the optional address-resolution round-trip, then the single
/// dispatch) and never races multiple candidate handlers against each
/// other.
pub struct RequestRouter<Env> {
    env: Env,
    origin: Origin,
}

impl<Env> RequestRouter<Env> {
    /// Create a router over the given environment. Dispatched handler
    /// invocations are attributed to `origin`.
    pub fn new(env: Env, origin: Origin) -> Self {
        Self { env, origin }
    }

    /// The environment this router dispatches through.
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl<Env> RequestRouter<Env>
where
    Env: AccountRegistry + HandlerDirectory + CapabilityStore + HandlerExecutor + SigningBridge,
{
    /// Route and dispatch one request, returning the servicing handler's
    /// result verbatim.
    ///
    /// Selection policy:
    ///
    /// 1. If any address-bound candidate exists for the scope and method,
    ///    the request is address-bound, full stop. The first candidate in
    ///    registry order acts as the resolution authority; its answer (or
    ///    abstention) narrows the candidate list against the connected
    ///    addresses. Failure here is surfaced, never papered over by
    ///    falling through to protocol handling.
    /// 2. Otherwise the first protocol candidate declaring the requested
    ///    method for the scope is dispatched to.
    /// 3. Otherwise the method is not serviceable:
    ///    [`ShuntRouterError::NotFound`].
    pub async fn handle_request(
        &self,
        routing: RoutingRequest,
    ) -> Result<Value, ShuntRouterError> {
        let RoutingRequest {
            connected_addresses,
            scope,
            request,
        } = routing;

        let finder = CandidateFinder::new(&self.env);

        let address_candidates = finder
            .find_address_candidates(&scope, &request.method)
            .await;

        if !address_candidates.is_empty() {
            return self
                .dispatch_address_bound(&connected_addresses, scope, request, address_candidates)
                .await;
        }

        let protocol_candidate = finder
            .find_protocol_candidates(&scope)
            .await
            .into_iter()
            .find(|candidate| candidate.methods.iter().any(|m| m == &request.method));

        if let Some(candidate) = protocol_candidate {
            debug!(handler = %candidate.handler, %scope, method = %request.method,
                "Dispatching protocol-bound request");

            return self
                .env
                .invoke_handler(
                    &candidate.handler,
                    &self.origin,
                    Envelope::Request { scope, request },
                    OperationKind::Protocol,
                )
                .await;
        }

        Err(ShuntRouterError::NotFound(request.method))
    }

    /// Select among address-bound candidates and submit the signing request.
    async fn dispatch_address_bound(
        &self,
        connected: &[Address],
        scope: ScopeId,
        request: RpcRequest,
        candidates: Vec<AddressCandidate>,
    ) -> Result<Value, ShuntRouterError> {
        // Deterministic tie-break: the first candidate in registry order is
        // the resolution authority.
        let authority = &candidates[0].handler;

        let resolver = AddressResolver::new(&self.env, &self.origin);
        let resolved = resolver.resolve_address(authority, &scope, &request).await?;

        let connected_candidate = |candidate: &&AddressCandidate| {
            connected.iter().any(|address| *address == candidate.address)
        };

        let selected = match &resolved {
            Some(address) => candidates
                .iter()
                .filter(connected_candidate)
                .find(|candidate| candidate.address == *address),
            None => candidates.iter().find(connected_candidate),
        };

        let Some(candidate) = selected else {
            return Err(ShuntRouterError::AmbiguousSelection(format!(
                "no connected address is eligible to service '{}' on '{scope}'",
                request.method
            )));
        };

        debug!(handler = %candidate.handler, address = %candidate.address, %scope,
            method = %request.method, "Dispatching address-bound request");

        self.env
            .submit_address_bound_request(SigningRequest {
                address: candidate.address.clone(),
                method: request.method,
                params: request.params,
                chain_id: scope,
            })
            .await
    }
}
