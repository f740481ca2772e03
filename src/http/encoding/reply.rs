use warp::http::StatusCode;
use warp::hyper::header::{HeaderValue, CONTENT_TYPE};
use warp::reply::{Reply, Response};

/// A body serialized as `application/x-www-form-urlencoded`.
pub struct FormEncoded {
    inner: Result<String, serde_urlencoded::ser::Error>,
}

impl FormEncoded {
    pub fn encode(body: impl serde::Serialize) -> Self {
        let inner = serde_urlencoded::to_string(body);
        Self { inner }
    }
}

impl Reply for FormEncoded {
    fn into_response(self) -> Response {
        match self.inner {
            Ok(body) => {
                let mut response = Response::new(body.into());
                response.headers_mut().insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                response
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to form-encode reply");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
