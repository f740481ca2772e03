#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HashedClientSecret(pub String);

impl From<String> for HashedClientSecret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for HashedClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A raw token as presented by a client. Never stored.
#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HashedToken(pub String);

impl From<String> for HashedToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifies the grant a family of tokens was issued from.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct SeedId(pub String);

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    AccessToken,
    RefreshToken,
}

impl TokenType {
    /// Interprets a `token_type_hint` value. Unknown hints are ignored.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "access_token" => Some(Self::AccessToken),
            "refresh_token" => Some(Self::RefreshToken),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_from_hint() {
        assert_eq!(TokenType::from_hint("access_token"), Some(TokenType::AccessToken));
        assert_eq!(TokenType::from_hint("refresh_token"), Some(TokenType::RefreshToken));
        assert_eq!(TokenType::from_hint("id_token"), None);
        assert_eq!(TokenType::from_hint("Refresh_Token"), None);
    }
}
