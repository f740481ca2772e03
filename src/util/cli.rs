use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::db::{self, MemoryStore, State, Store};
use crate::http::encoding::error::{ErrorConverter, FormErrorConverter, JsonErrorConverter};
use crate::http::server::Server;
use crate::http::{ConfigError, RevocationEndpoint, DEFAULT_REVOCATION_PATH};
use crate::provider::RevocationProvider;

#[derive(Debug, Parser)]
#[clap(
    name = "revoked",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    /// Address to listen on
    #[clap(long, env = "REVOKED_LISTEN", default_value = "0.0.0.0:8001")]
    pub listen: SocketAddr,
    /// Path (or ant-style pattern) answered by the revocation endpoint
    #[clap(long, env = "REVOKED_PATH", default_value = DEFAULT_REVOCATION_PATH)]
    pub path: String,
    /// JSON file holding registered clients and issued tokens
    #[clap(long, env = "REVOKED_STATE_FILE")]
    pub state_file: PathBuf,
    /// Media type used for error bodies
    #[clap(long, env = "REVOKED_ERROR_FORMAT", arg_enum, default_value = "json")]
    pub error_format: ErrorFormat,
    /// Refuse to revoke access tokens, answering `unsupported_token_type`
    #[clap(long)]
    pub no_revoke_access_tokens: bool,
}

impl Options {
    fn provider<S: Store>(&self, store: Arc<S>) -> RevocationProvider<S> {
        RevocationProvider::new(store).revoke_access_tokens(!self.no_revoke_access_tokens)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ArgEnum)]
pub enum ErrorFormat {
    Json,
    Form,
}

impl ErrorFormat {
    fn converter(self) -> Arc<dyn ErrorConverter> {
        match self {
            Self::Json => Arc::new(JsonErrorConverter),
            Self::Form => Arc::new(FormErrorConverter),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    State(db::Error),
    Config(ConfigError),
}

impl From<db::Error> for Error {
    fn from(e: db::Error) -> Self {
        Self::State(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(e) => write!(f, "{}", e),
            Self::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

/// Builds the endpoint described by `opts` and serves it until shutdown.
pub async fn run(opts: Options) -> Result<(), Error> {
    let state = State::from_file(&opts.state_file)?;
    tracing::info!(
        clients = state.clients.len(),
        tokens = state.tokens.len(),
        "Loaded state"
    );
    let store = Arc::new(MemoryStore::from_state(state));

    let provider = opts.provider(Arc::clone(&store));
    let endpoint = RevocationEndpoint::with_path(Arc::new(provider), &opts.path)?
        .with_converter(opts.error_format.converter());

    let server = Server::new(Arc::new(endpoint), store);
    server.serve(opts.listen).await;
    Ok(())
}
