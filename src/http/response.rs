use crate::auth::Revoked;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

/// RFC 7009 section 2.2: a successful revocation is answered with an
/// empty `200 OK`.
impl Reply for Revoked {
    fn into_response(self) -> Response {
        warp::reply::with_status(warp::reply(), StatusCode::OK).into_response()
    }
}
