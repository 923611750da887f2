//! HTTP layer: axum server, page error type, extractors, and routes.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::PageError;
pub use server::{run_server, AppState, ServerConfig};
