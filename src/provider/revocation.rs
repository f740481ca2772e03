use std::sync::Arc;

use tracing::{event, Level};

use crate::auth::{ErrorCode, ProtocolError, RevocationAuthenticator, RevocationRequest, Revoked};
use crate::core::models::TokenRecord;
use crate::core::types::{HashedToken, Token, TokenType};
use crate::db::Store;
use crate::util::hash::hash_without_salt;

/// Revokes tokens held in a [`Store`] on behalf of authenticated clients.
#[derive(Debug)]
pub struct RevocationProvider<S> {
    store: Arc<S>,
    revoke_access_tokens: bool,
}

impl<S: Store> RevocationProvider<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            revoke_access_tokens: true,
        }
    }

    /// When disabled, access tokens are answered with `unsupported_token_type`.
    pub fn revoke_access_tokens(mut self, enabled: bool) -> Self {
        self.revoke_access_tokens = enabled;
        self
    }

    async fn invalidate(&self, token: &HashedToken, record: &TokenRecord) -> Result<(), ProtocolError> {
        let result = match (record.token_type, &record.seed) {
            (TokenType::RefreshToken, Some(seed)) => {
                event!(Level::DEBUG, seed = ?seed, "Invalidating persistent seed");
                self.store.invalidate_seed(seed).await.map(|_| ())
            }
            _ => self.store.invalidate_token(token).await,
        };

        result.map_err(|e| {
            event!(Level::ERROR, error = %e, "Failed to invalidate token");
            ProtocolError::server_error()
        })
    }
}

#[async_trait::async_trait]
impl<S: Store + 'static> RevocationAuthenticator for RevocationProvider<S> {
    #[tracing::instrument(
        skip(self, request),
        fields(token_type_hint = ?request.token_type_hint())
    )]
    async fn authenticate(&self, request: RevocationRequest) -> Result<Revoked, ProtocolError> {
        let client_id = match request.principal() {
            Some(principal) => principal.client_id().clone(),
            None => {
                event!(Level::WARN, "Revocation attempted without client authentication");
                return Err(ProtocolError::invalid_client());
            }
        };

        let hashed: HashedToken = hash_without_salt(&Token::from(request.token()));
        let record = self.store.find_token(&hashed).await.map_err(|e| {
            event!(Level::ERROR, error = %e, "Failed to look up token");
            ProtocolError::server_error()
        })?;

        let record = match record {
            Some(record) if !record.revoked => record,
            _ => {
                event!(Level::DEBUG, "Unknown or inactive token");
                return Ok(Revoked);
            }
        };

        if record.client_id != client_id {
            event!(
                Level::WARN,
                original_client_id = ?record.client_id,
                revoke_client_id = ?client_id,
                "client_ids do not match"
            );
            return Err(ProtocolError::invalid_client());
        }

        let hint = request.token_type_hint().and_then(TokenType::from_hint);
        if hint.map_or(false, |hint| hint != record.token_type) {
            event!(Level::DEBUG, actual = ?record.token_type, "token_type_hint does not match");
        }

        if record.token_type == TokenType::AccessToken && !self.revoke_access_tokens {
            event!(Level::WARN, "Unsupported revocation type");
            return Err(ProtocolError::new(
                ErrorCode::UnsupportedTokenType,
                "Access tokens cannot be revoked",
            ));
        }

        self.invalidate(&hashed, &record).await?;
        event!(Level::INFO, client_id = ?client_id, token_type = ?record.token_type, "Token revoked");

        Ok(Revoked)
    }
}
