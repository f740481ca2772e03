use super::types::*;

#[derive(Clone, Debug)]
pub struct Client {
    pub id: ClientId,
    pub secret: HashedClientSecret,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRecord {
    pub client_id: ClientId,
    pub token_type: TokenType,
    pub seed: Option<SeedId>,
    pub revoked: bool,
}
