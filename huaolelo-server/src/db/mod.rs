//! Database access: connection pool and read-only repositories.

pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::DbError;
