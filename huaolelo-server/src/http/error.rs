//! Page error type with IntoResponse.
//!
//! The error surface is deliberately small: a missing row or a failed detail
//! query renders a 404 page; failed list queries never reach here because the
//! routes render those pages with an empty result set instead.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::db::DbError;
use crate::render::layout;

/// Error for page handlers.
#[derive(Debug)]
pub enum PageError {
    /// The requested row does not exist (404).
    NotFound { resource: &'static str, id: String },

    /// A detail query failed (logged, rendered as 404).
    Database(DbError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::NotFound { resource, id } => layout::not_found(resource, id),
            Self::Database(err) => {
                tracing::error!("database error while rendering page: {err}");
                layout::not_found("page", "the requested address")
            }
        };
        (StatusCode::NOT_FOUND, Html(body)).into_response()
    }
}

impl From<DbError> for PageError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_is_404_html() {
        let err = PageError::NotFound {
            resource: "entry",
            id: "zzz".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_error_renders_as_404() {
        let err = PageError::Database(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
