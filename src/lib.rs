pub mod core;
pub mod auth;
pub mod http;
pub mod db;
pub mod util;
pub mod provider;
