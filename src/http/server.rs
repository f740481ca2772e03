use std::net::SocketAddr;
use std::sync::Arc;

use warp::Filter;

use super::encoding::security_context;
use super::endpoint::{revocation, RevocationEndpoint};
use crate::db::Store;

#[derive(Debug)]
pub struct Server<S> {
    endpoint: Arc<RevocationEndpoint>,
    store: Arc<S>,
}

impl<S: Store + 'static> Server<S> {
    pub fn new(endpoint: Arc<RevocationEndpoint>, store: Arc<S>) -> Self {
        Self { endpoint, store }
    }

    pub async fn serve(self, addr: SocketAddr) {
        let routes = revocation(self.endpoint, security_context(self.store))
            .with(warp::log("http-api"));

        tracing::info!(%addr, "Listening");
        warp::serve(routes).run(addr).await;
    }
}
