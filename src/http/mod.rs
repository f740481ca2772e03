pub mod encoding;
pub mod endpoint;
pub mod matcher;
pub mod response;
pub mod server;

pub use endpoint::{revocation, RevocationEndpoint, DEFAULT_REVOCATION_PATH};
pub use matcher::{ConfigError, PathPattern, RouteMatcher};
