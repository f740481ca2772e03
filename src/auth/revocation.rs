use std::collections::HashMap;
use std::iter::FromIterator;

use super::{error::ProtocolError, Principal};

const TOKEN: &str = "token";
const TOKEN_TYPE_HINT: &str = "token_type_hint";

/// Multi-valued request parameters, in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(HashMap<String, Vec<String>>);

impl Parameters {
    /// Parses `application/x-www-form-urlencoded` input.
    pub fn parse(input: &[u8]) -> Self {
        let mut parameters = Self::default();
        parameters.extend_from(input);
        parameters
    }

    pub fn extend_from(&mut self, input: &[u8]) {
        for (name, value) in form_urlencoded::parse(input) {
            self.append(name.into_owned(), value.into_owned());
        }
    }

    pub fn append(&mut self, name: String, value: String) {
        self.0.entry(name).or_default().push(value);
    }

    pub fn get(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::default();
        for (name, value) in iter {
            parameters.append(name.into(), value.into());
        }
        parameters
    }
}

/// A validated token revocation request (RFC 7009 section 2.1).
///
/// Only [`parse`] builds one, so `token` always holds exactly one value
/// with text in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationRequest {
    token: String,
    token_type_hint: Option<String>,
    principal: Option<Principal>,
}

impl RevocationRequest {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_type_hint(&self) -> Option<&str> {
        self.token_type_hint.as_deref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Extracts a revocation request from raw parameters.
///
/// `principal` is whatever identity the caller already established for
/// this request; it is carried over untouched.
pub fn parse(
    parameters: &Parameters,
    principal: Option<Principal>,
) -> Result<RevocationRequest, ProtocolError> {
    // token (REQUIRED)
    let token = match parameters.get(TOKEN) {
        [token] if has_text(token) => token.clone(),
        _ => return Err(ProtocolError::invalid_parameter(TOKEN)),
    };

    // token_type_hint (OPTIONAL)
    let token_type_hint = parameters.first(TOKEN_TYPE_HINT).map(ToString::to_string);

    Ok(RevocationRequest {
        token,
        token_type_hint,
        principal,
    })
}

fn has_text(s: &str) -> bool {
    s.chars().any(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::error::ErrorCode;
    use crate::core::types::ClientId;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().cloned().collect()
    }

    fn assert_rejects_token(parameters: Parameters) {
        let error = parse(&parameters, None).unwrap_err();
        assert_eq!(error.code(), &ErrorCode::InvalidRequest);
        assert!(error.description().unwrap().contains("token"));
        assert_eq!(error.uri(), Some("https://tools.ietf.org/html/rfc7009#section-2.1"));
    }

    #[test]
    fn missing_token_is_rejected() {
        assert_rejects_token(params(&[("token_type_hint", "access_token")]));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_rejects_token(params(&[("token", "")]));
    }

    #[test]
    fn blank_token_is_rejected() {
        assert_rejects_token(params(&[("token", "  \t")]));
    }

    #[test]
    fn duplicated_token_is_rejected() {
        assert_rejects_token(params(&[("token", "abc"), ("token", "def")]));
        assert_rejects_token(params(&[("token", "abc"), ("token", "abc")]));
    }

    #[test]
    fn hint_is_optional() {
        let request = parse(&params(&[("token", "abc123")]), None).unwrap();
        assert_eq!(request.token(), "abc123");
        assert_eq!(request.token_type_hint(), None);
        assert_eq!(request.principal(), None);
    }

    #[test]
    fn hint_is_passed_through() {
        let request = parse(
            &params(&[("token", "abc123"), ("token_type_hint", "refresh_token")]),
            None,
        )
        .unwrap();
        assert_eq!(request.token(), "abc123");
        assert_eq!(request.token_type_hint(), Some("refresh_token"));

        let request = parse(
            &params(&[("token", "abc123"), ("token_type_hint", "Not A Real Type")]),
            None,
        )
        .unwrap();
        assert_eq!(request.token_type_hint(), Some("Not A Real Type"));
    }

    #[test]
    fn first_hint_wins() {
        let request = parse(
            &params(&[
                ("token", "abc123"),
                ("token_type_hint", "access_token"),
                ("token_type_hint", "refresh_token"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(request.token_type_hint(), Some("access_token"));
    }

    #[test]
    fn principal_is_carried_over() {
        let principal = Principal::new(ClientId("client-1".into()));
        let request = parse(&params(&[("token", "abc123")]), Some(principal.clone())).unwrap();
        assert_eq!(request.principal(), Some(&principal));
    }

    #[test]
    fn parsing_is_repeatable() {
        let parameters = params(&[("token", "abc123"), ("token_type_hint", "access_token")]);
        let principal = Some(Principal::new(ClientId("client-1".into())));
        let first = parse(&parameters, principal.clone()).unwrap();
        let second = parse(&parameters, principal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parameters_decode_form_input() {
        let parameters = Parameters::parse(b"token=a%2Bb%3D&token_type_hint=access_token&token=c+d");
        assert_eq!(parameters.get("token"), ["a+b=".to_string(), "c d".to_string()]);
        assert_eq!(parameters.first("token_type_hint"), Some("access_token"));
        assert!(parameters.get("missing").is_empty());
    }
}
