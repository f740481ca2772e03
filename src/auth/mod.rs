use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::types::ClientId;

pub mod error;
pub mod revocation;

pub use error::{ErrorCode, ProtocolError};
pub use revocation::{Parameters, RevocationRequest};

/// The identity the surrounding request pipeline authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    client_id: ClientId,
}

impl Principal {
    pub fn new(client_id: ClientId) -> Self {
        Self { client_id }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }
}

/// Request-scoped security state.
///
/// Cloning yields another handle onto the same request's state, so the
/// host that established the principal sees it cleared after a failure.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    inner: Arc<Mutex<Option<Principal>>>,
}

impl SecurityContext {
    pub fn new(principal: Option<Principal>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(principal)),
        }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self::new(Some(principal))
    }

    pub fn principal(&self) -> Option<Principal> {
        self.lock().clone()
    }

    pub fn set_principal(&self, principal: Principal) {
        *self.lock() = Some(principal);
    }

    pub fn clear(&self) {
        self.lock().take();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Principal>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marker returned by an authenticator that accepted a revocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revoked;

/// Decides the outcome of a parsed revocation request.
#[async_trait::async_trait]
pub trait RevocationAuthenticator: Send + Sync {
    async fn authenticate(&self, request: RevocationRequest) -> Result<Revoked, ProtocolError>;
}
