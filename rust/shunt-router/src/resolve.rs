use serde_json::Value;
use shunt_capability::{HandlerId, ScopeId};
use tracing::debug;

use crate::{Address, Envelope, HandlerExecutor, OperationKind, Origin, RpcRequest, ShuntRouterError};

/// Performs the best-effort round-trip that asks an address-bound handler
/// which of its addresses should sign a request.
///
/// A handler may decline to resolve by answering `null`; that is a normal
/// outcome. An invocation failure or a malformed payload, on the other hand,
/// is a hard [`ShuntRouterError::Resolution`] error that aborts routing, with
/// the underlying cause logged and withheld.
pub struct AddressResolver<'a, Env> {
    env: &'a Env,
    origin: &'a Origin,
}

impl<'a, Env> AddressResolver<'a, Env> {
    /// Create a resolver invoking handlers through the given environment,
    /// attributed to the given origin.
    pub fn new(env: &'a Env, origin: &'a Origin) -> Self {
        Self { env, origin }
    }
}

impl<Env> AddressResolver<'_, Env>
where
    Env: HandlerExecutor,
{
    /// Ask `handler` which address should service `request` on `scope`.
    pub async fn resolve_address(
        &self,
        handler: &HandlerId,
        scope: &ScopeId,
        request: &RpcRequest,
    ) -> Result<Option<Address>, ShuntRouterError> {
        let resolution_failed = || ShuntRouterError::Resolution {
            handler: handler.to_string(),
        };

        let envelope = Envelope::Request {
            scope: scope.clone(),
            request: request.clone(),
        };

        let reply = self
            .env
            .invoke_handler(handler, self.origin, envelope, OperationKind::ResolveAddress)
            .await
            .map_err(|error| {
                debug!(%handler, %error, "Address resolution call failed");
                resolution_failed()
            })?;

        match reply {
            Value::Null => Ok(None),
            Value::Object(ref fields) => match fields.get("address").and_then(Value::as_str) {
                Some(address) => Ok(Some(Address::from(address))),
                None => {
                    debug!(%handler, %reply, "Malformed address resolution reply");
                    Err(resolution_failed())
                }
            },
            other => {
                debug!(%handler, reply = %other, "Malformed address resolution reply");
                Err(resolution_failed())
            }
        }
    }
}
