//! Entry detail page.
//!
//! The path segment is either a numeric entry id or an ASCII headword anchor
//! (cross-refs, word tokens, and linked words all link by anchor). Numeric
//! lookups that miss still fall through to the anchor form, mirroring how
//! the archive's own pages resolve.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::{routing::get, Router};

use huaolelo_core::text::{normalize_okina, to_ascii};

use crate::db::repos::{EntryDetail, EntryRepo};
use crate::http::error::PageError;
use crate::http::server::AppState;
use crate::render::{self, layout};

/// GET /entry/{id}
async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let repo = EntryRepo::new(&state.pool);

    let detail = match lookup(&repo, &id).await? {
        Some(detail) => detail,
        None => {
            return Err(PageError::NotFound {
                resource: "entry",
                id,
            })
        }
    };

    let entry = &detail.entry;
    let title = if entry.headword_display.is_empty() {
        entry.headword.clone()
    } else {
        entry.headword_display.clone()
    };

    Ok(Html(layout::page(&title, "/browse", &render::entry::detail(&detail))))
}

async fn lookup(repo: &EntryRepo<'_>, id: &str) -> Result<Option<EntryDetail>, PageError> {
    let is_numeric = !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit());
    if is_numeric {
        if let Some(detail) = repo.get(id).await? {
            return Ok(Some(detail));
        }
    }

    // Anchor lookup: fold whatever arrived in the URL to the ASCII form the
    // ingestion pipeline stores, then pick the best-source match.
    let anchor = to_ascii(&normalize_okina(id));
    let Some(entry_id) = repo.resolve_anchor(&anchor).await? else {
        return Ok(None);
    };
    Ok(repo.get(&entry_id).await?)
}

/// Entry routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/entry/{id}", get(show))
}
