//! huaolelo-server: HTTP interface for the merged Hawaiian-English dictionary
//!
//! A read-only axum application over the dictionary's PostgreSQL schema.
//! Repositories issue filtered/paginated queries, the render module turns
//! row sets into HTML tables and cards, and the routes wire the two
//! together. The schema is populated by an external ingestion pipeline;
//! nothing here writes.

pub mod db;
pub mod http;
pub mod models;
pub mod render;

pub use http::server::{run_server, AppState, ServerConfig};
