use std::fmt;

use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use super::reply::FormEncoded;
use crate::auth::ProtocolError;

/// Writes a [`ProtocolError`] into a response body.
///
/// Converters own the media type and encoding; the status code is set
/// by [`error_response`].
pub trait ErrorConverter: fmt::Debug + Send + Sync {
    fn write(&self, error: &ProtocolError) -> Response;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorConverter;

impl ErrorConverter for JsonErrorConverter {
    fn write(&self, error: &ProtocolError) -> Response {
        warp::reply::json(error).into_response()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormErrorConverter;

impl ErrorConverter for FormErrorConverter {
    fn write(&self, error: &ProtocolError) -> Response {
        FormEncoded::encode(error).into_response()
    }
}

/// Renders a failed revocation. Always `400 Bad Request`, unless the
/// converter itself failed to produce a body.
pub fn error_response(converter: &dyn ErrorConverter, error: &ProtocolError) -> Response {
    let mut response = converter.write(error);
    if !response.status().is_server_error() {
        *response.status_mut() = StatusCode::BAD_REQUEST;
    }
    response
}
