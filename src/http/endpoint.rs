use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tracing::{event, Level};
use warp::http::Method;
use warp::path::FullPath;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

use super::encoding::{
    self,
    error::{error_response, ErrorConverter, JsonErrorConverter},
};
use super::matcher::{ConfigError, PathPattern, RouteMatcher};
use crate::auth::{
    revocation, Parameters, ProtocolError, RevocationAuthenticator, Revoked, SecurityContext,
};

/// The default endpoint path for token revocation requests.
pub const DEFAULT_REVOCATION_PATH: &str = "/oauth2/revoke";

/// Handles OAuth 2.0 Token Revocation requests (RFC 7009).
///
/// Built once at startup and shared read-only between requests.
pub struct RevocationEndpoint {
    matcher: RouteMatcher,
    authenticator: Arc<dyn RevocationAuthenticator>,
    converter: Arc<dyn ErrorConverter>,
}

impl std::fmt::Debug for RevocationEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationEndpoint")
            .field("matcher", &self.matcher)
            .field("converter", &self.converter)
            .finish()
    }
}

impl RevocationEndpoint {
    pub fn new(authenticator: Arc<dyn RevocationAuthenticator>) -> Self {
        Self::with_matcher(authenticator, RouteMatcher::default())
    }

    pub fn with_path(
        authenticator: Arc<dyn RevocationAuthenticator>,
        path: &str,
    ) -> Result<Self, ConfigError> {
        let matcher = RouteMatcher::new(PathPattern::parse(path)?);
        Ok(Self::with_matcher(authenticator, matcher))
    }

    fn with_matcher(authenticator: Arc<dyn RevocationAuthenticator>, matcher: RouteMatcher) -> Self {
        Self {
            matcher,
            authenticator,
            converter: Arc::new(JsonErrorConverter),
        }
    }

    /// Replaces the converter used to write error bodies.
    pub fn with_converter(mut self, converter: Arc<dyn ErrorConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.matcher.matches(method, path)
    }

    pub fn path(&self) -> &str {
        self.matcher.pattern().as_str()
    }

    /// Validates the request and hands it to the authenticator.
    ///
    /// On any failure the security context is cleared before returning.
    #[tracing::instrument(skip_all, fields(path = %self.path()))]
    pub async fn revoke(
        &self,
        parameters: &Parameters,
        context: &SecurityContext,
    ) -> Result<Revoked, ProtocolError> {
        let result = match revocation::parse(parameters, context.principal()) {
            Ok(request) => self.authenticator.authenticate(request).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            event!(Level::DEBUG, error = %e, "Token revocation request failed");
            context.clear();
        }
        result
    }

    pub fn error_response(&self, error: &ProtocolError) -> Response {
        error_response(&*self.converter, error)
    }
}

/// Serves `endpoint`; every other request is rejected as not found so that
/// later routes can take it.
///
/// The request path is percent-decoded before it is matched.
///
/// `context` supplies the request's security context, established by the
/// host before the endpoint runs.
pub fn revocation<C>(
    endpoint: Arc<RevocationEndpoint>,
    context: C,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    C: Filter<Extract = (SecurityContext,), Error = Rejection> + Clone + Send + Sync + 'static,
{
    let matched = {
        let endpoint = Arc::clone(&endpoint);
        warp::method()
            .and(warp::path::full())
            .and_then(move |method: Method, path: FullPath| {
                let path = percent_decode_str(path.as_str()).decode_utf8_lossy();
                let matched = endpoint.matches(&method, &path);
                async move {
                    if matched {
                        Ok(())
                    } else {
                        Err(warp::reject::not_found())
                    }
                }
            })
            .untuple_one()
    };
    let with_endpoint = warp::any().map(move || Arc::clone(&endpoint));

    matched
        .and(with_endpoint)
        .and(context)
        .and(encoding::parameters())
        .and_then(
            |endpoint: Arc<RevocationEndpoint>, context: SecurityContext, parameters: Parameters| async move {
                let response = match endpoint.revoke(&parameters, &context).await {
                    Ok(revoked) => revoked.into_response(),
                    Err(error) => endpoint.error_response(&error),
                };
                Ok::<_, Rejection>(response)
            },
        )
}
