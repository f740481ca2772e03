use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tokio::sync::RwLock;
use tracing::{event, Level};

use crate::core::models::{Client, TokenRecord};
use crate::core::types::{ClientId, ClientSecret, HashedToken, SeedId, Token, TokenType};
use crate::util::hash::hash_without_salt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Unavailable(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read state: {}", e),
            Self::Serde(e) => write!(f, "malformed state: {}", e),
            Self::Unavailable(reason) => write!(f, "store unavailable: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error>;
    async fn find_token(&self, token: &HashedToken) -> Result<Option<TokenRecord>, Error>;
    async fn invalidate_token(&self, token: &HashedToken) -> Result<(), Error>;
    /// Invalidates every token issued from `seed`, returning how many changed.
    async fn invalidate_seed(&self, seed: &SeedId) -> Result<usize, Error>;
}

/// Initial contents of a [`MemoryStore`], as read from disk.
#[derive(Debug, Default, serde::Deserialize)]
pub struct State {
    #[serde(default)]
    pub clients: Vec<ClientEntry>,
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ClientEntry {
    pub id: ClientId,
    pub secret: ClientSecret,
}

#[derive(Debug, serde::Deserialize)]
pub struct TokenEntry {
    pub token: Token,
    pub client_id: ClientId,
    pub token_type: TokenType,
    #[serde(default)]
    pub seed: Option<SeedId>,
}

impl State {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Keeps hashed client secrets and hashed tokens in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clients: RwLock<HashMap<ClientId, Client>>,
    tokens: RwLock<HashMap<HashedToken, TokenRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: State) -> Self {
        let clients = state
            .clients
            .into_iter()
            .map(|c| {
                let client = Client {
                    id: c.id.clone(),
                    secret: hash_without_salt(&c.secret),
                };
                (c.id, client)
            })
            .collect();

        let tokens = state
            .tokens
            .into_iter()
            .map(|t| {
                let record = TokenRecord {
                    client_id: t.client_id,
                    token_type: t.token_type,
                    seed: t.seed,
                    revoked: false,
                };
                (hash_without_salt(&t.token), record)
            })
            .collect();

        Self {
            clients: RwLock::new(clients),
            tokens: RwLock::new(tokens),
        }
    }

    pub async fn put_client(&self, client_id: ClientId, secret: &ClientSecret) -> Client {
        let client = Client {
            id: client_id.clone(),
            secret: hash_without_salt(secret),
        };
        self.clients.write().await.insert(client_id, client.clone());
        client
    }

    pub async fn put_token(&self, token: &Token, record: TokenRecord) {
        self.tokens
            .write()
            .await
            .insert(hash_without_salt(token), record);
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        Ok(self.clients.read().await.get(client_id).cloned())
    }

    async fn find_token(&self, token: &HashedToken) -> Result<Option<TokenRecord>, Error> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn invalidate_token(&self, token: &HashedToken) -> Result<(), Error> {
        if let Some(record) = self.tokens.write().await.get_mut(token) {
            record.revoked = true;
        }
        Ok(())
    }

    async fn invalidate_seed(&self, seed: &SeedId) -> Result<usize, Error> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;
        for record in tokens.values_mut() {
            if record.seed.as_ref() == Some(seed) && !record.revoked {
                record.revoked = true;
                count += 1;
            }
        }
        event!(Level::DEBUG, seed = ?seed, count, "Invalidated seed");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: &str = r#"{
        "clients": [{ "id": "client-1", "secret": "hunter2" }],
        "tokens": [
            { "token": "refresh-1", "client_id": "client-1", "token_type": "refresh_token", "seed": "seed-1" },
            { "token": "access-1", "client_id": "client-1", "token_type": "access_token", "seed": "seed-1" },
            { "token": "access-2", "client_id": "client-1", "token_type": "access_token" }
        ]
    }"#;

    fn store() -> MemoryStore {
        MemoryStore::from_state(serde_json::from_str(STATE).unwrap())
    }

    async fn is_revoked(store: &MemoryStore, token: &str) -> bool {
        store
            .find_token(&hash_without_salt(&Token::from(token)))
            .await
            .unwrap()
            .unwrap()
            .revoked
    }

    #[tokio::test]
    async fn loads_hashed_state() {
        let store = store();

        let client = store.get_client(&ClientId("client-1".into())).await.unwrap().unwrap();
        assert_ne!(client.secret.0, "hunter2");

        let record = store
            .find_token(&hash_without_salt(&Token::from("refresh-1")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.token_type, TokenType::RefreshToken);
        assert_eq!(record.seed, Some(SeedId("seed-1".into())));
        assert!(!record.revoked);

        assert!(store
            .find_token(&HashedToken("refresh-1".into()))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn invalidating_a_seed_covers_its_tokens_only() {
        let store = store();
        let count = store.invalidate_seed(&SeedId("seed-1".into())).await.unwrap();
        assert_eq!(count, 2);

        assert!(is_revoked(&store, "refresh-1").await);
        assert!(is_revoked(&store, "access-1").await);
        assert!(!is_revoked(&store, "access-2").await);

        assert_eq!(store.invalidate_seed(&SeedId("seed-1".into())).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalidating_unknown_token_is_a_no_op() {
        let store = MemoryStore::new();
        store
            .invalidate_token(&HashedToken("nope".into()))
            .await
            .unwrap();
        assert!(store.find_token(&HashedToken("nope".into())).await.unwrap().is_none());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let state: State = serde_json::from_str("{}").unwrap();
        assert!(state.clients.is_empty());
        assert!(state.tokens.is_empty());
    }
}
