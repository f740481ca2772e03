use std::fmt;

use serde::{Serialize, Serializer};

/// OAuth 2.0 error codes that can end a revocation request.
///
/// Codes this crate does not know about are kept verbatim in `Other`
/// so that a delegate's error reaches the client unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRequest,
    InvalidClient,
    UnauthorizedClient,
    UnsupportedTokenType,
    ServerError,
    TemporarilyUnavailable,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedTokenType => "unsupported_token_type",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "invalid_request" => Self::InvalidRequest,
            "invalid_client" => Self::InvalidClient,
            "unauthorized_client" => Self::UnauthorizedClient,
            "unsupported_token_type" => Self::UnsupportedTokenType,
            "server_error" => Self::ServerError,
            "temporarily_unavailable" => Self::TemporarilyUnavailable,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

const RFC7009_REVOCATION_REQUEST: &str = "https://tools.ietf.org/html/rfc7009#section-2.1";
const RFC7009_ERROR_RESPONSE: &str = "https://tools.ietf.org/html/rfc7009#section-2.2.1";
const RFC6749_TOKEN_ERROR: &str = "https://tools.ietf.org/html/rfc6749#section-5.2";
const RFC6749_AUTHORIZATION_ERROR: &str = "https://tools.ietf.org/html/rfc6749#section-4.1.2.1";

/// Documentation link attached to each error code.
const REFERENCE_URIS: &[(&str, &str)] = &[
    ("invalid_request", RFC7009_REVOCATION_REQUEST),
    ("invalid_client", RFC6749_TOKEN_ERROR),
    ("unauthorized_client", RFC6749_TOKEN_ERROR),
    ("unsupported_token_type", RFC7009_ERROR_RESPONSE),
    ("server_error", RFC6749_AUTHORIZATION_ERROR),
    ("temporarily_unavailable", RFC7009_ERROR_RESPONSE),
];

pub fn reference_uri(code: &ErrorCode) -> Option<&'static str> {
    REFERENCE_URIS
        .iter()
        .find(|(c, _)| *c == code.as_str())
        .map(|(_, uri)| *uri)
}

/// An RFC-shaped error, rendered verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct ProtocolError {
    #[serde(rename = "error")]
    code: ErrorCode,
    #[serde(rename = "error_description")]
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "error_uri")]
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
}

impl ProtocolError {
    /// Builds an error whose reference link is looked up from its code.
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        let uri = reference_uri(&code).map(ToString::to_string);
        Self {
            code,
            description: Some(description.into()),
            uri,
        }
    }

    /// Builds an error exactly as given, without consulting the reference table.
    pub fn from_parts(code: ErrorCode, description: Option<String>, uri: Option<String>) -> Self {
        Self {
            code,
            description,
            uri,
        }
    }

    pub fn invalid_parameter(name: &str) -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            format!("Token Revocation Request Parameter: {}", name),
        )
    }

    pub fn invalid_client() -> Self {
        Self::new(ErrorCode::InvalidClient, "Client authentication failed")
    }

    pub fn server_error() -> Self {
        Self::new(ErrorCode::ServerError, "The token could not be revoked")
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code)?;
        if let Some(description) = &self.description {
            write!(f, " {}", description)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}
