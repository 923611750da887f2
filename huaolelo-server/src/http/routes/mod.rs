//! Route handlers organized by page.

pub mod browse;
pub mod concordance;
pub mod eng_haw;
pub mod entry;
pub mod health;
pub mod home;
pub mod library;
pub mod search;
pub mod stats;
pub mod topics;
pub mod wordlists;

use crate::db::DbError;
use crate::models::{Paginated, Pagination};

/// Failed list queries render the page with an empty result set rather than
/// an error page: the failure is logged, the reader sees "no entries found".
pub(crate) fn list_or_empty<T>(
    result: Result<Paginated<T>, DbError>,
    page: Pagination,
    context: &str,
) -> Paginated<T> {
    match result {
        Ok(list) => list,
        Err(err) => {
            tracing::error!("{context} query failed, rendering empty result: {err}");
            Paginated::empty(page)
        }
    }
}

/// Same policy for unpaginated listings.
pub(crate) fn rows_or_empty<T>(result: Result<Vec<T>, DbError>, context: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!("{context} query failed, rendering empty result: {err}");
            Vec::new()
        }
    }
}
