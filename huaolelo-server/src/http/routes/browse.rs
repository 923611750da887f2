//! Browse Hawaiian-English entries by letter page.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::{routing::get, Router};
use serde::Deserialize;

use huaolelo_core::text::HAWAIIAN_LETTERS;
use huaolelo_core::DictSource;

use super::list_or_empty;
use crate::db::repos::{BrowseFilters, EntryRepo};
use crate::http::extractors::HawaiianLetter;
use crate::http::server::AppState;
use crate::models::Pagination;
use crate::render::{components, encode_segment, escape, layout};

const PER_PAGE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
struct BrowseQuery {
    page: Option<u32>,
    /// Comma-separated source tags, e.g. `PE,MK`.
    source: Option<String>,
    prefix: Option<String>,
    loanwords: Option<bool>,
}

impl BrowseQuery {
    fn filters(&self) -> BrowseFilters {
        BrowseFilters {
            sources: self
                .source
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .filter_map(|tag| tag.trim().parse::<DictSource>().ok())
                .collect(),
            prefix: self.prefix.clone().filter(|p| !p.is_empty()),
            loanwords: self.loanwords.unwrap_or(false),
        }
    }

    /// Query-string suffix that carries the filters across page links.
    fn filter_query(&self) -> String {
        let mut query = String::new();
        if let Some(source) = &self.source {
            let _ = write!(query, "&source={}", encode_segment(source));
        }
        if let Some(prefix) = &self.prefix {
            let _ = write!(query, "&prefix={}", encode_segment(prefix));
        }
        if self.loanwords == Some(true) {
            query.push_str("&loanwords=true");
        }
        query
    }
}

/// GET /browse - letter index
async fn index() -> Html<String> {
    let body = format!(
        "<h1>Browse Hawaiian-English</h1>\n\
         <p class=\"muted\">Pick a letter page.</p>\n{}",
        components::letter_nav("/browse", &HAWAIIAN_LETTERS, None)
    );
    Html(layout::page("Browse", "/browse", &body))
}

/// GET /browse/{letter} - paginated entry table
async fn letter(
    State(state): State<Arc<AppState>>,
    HawaiianLetter(letter): HawaiianLetter,
    Query(params): Query<BrowseQuery>,
) -> Html<String> {
    let page = Pagination::new(params.page.unwrap_or(1), PER_PAGE);
    let filters = params.filters();
    let entries = list_or_empty(
        EntryRepo::new(&state.pool)
            .browse_letter(&letter, &filters, page)
            .await,
        page,
        "browse",
    );

    let filter_query = params.filter_query();
    let href = |p: u32| format!("/browse/{letter}?page={p}{filter_query}");

    let mut body = String::new();
    let _ = write!(body, "<h1>Hawaiian-English: {}</h1>\n", escape(&letter.to_uppercase()));
    body.push_str(&components::letter_nav("/browse", &HAWAIIAN_LETTERS, Some(&letter)));
    let _ = write!(body, "\n<p class=\"small muted\">{} entries</p>\n", entries.total);
    body.push_str(&components::entry_table(&entries.items));
    body.push('\n');
    body.push_str(&components::pagination(&entries, href));

    Html(layout::page(
        &format!("Browse: {}", letter.to_uppercase()),
        "/browse",
        &body,
    ))
}

/// Browse routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/browse", get(index))
        .route("/browse/{letter}", get(letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_sources_and_prefix() {
        let query = BrowseQuery {
            page: None,
            source: Some("PE,MK,bogus".into()),
            prefix: Some("ka".into()),
            loanwords: Some(true),
        };
        let filters = query.filters();
        assert_eq!(filters.sources, vec![DictSource::Pe, DictSource::Mk]);
        assert_eq!(filters.prefix.as_deref(), Some("ka"));
        assert!(filters.loanwords);
    }

    #[test]
    fn filter_query_round_trips_into_links() {
        let query = BrowseQuery {
            page: None,
            source: Some("PE".into()),
            prefix: None,
            loanwords: Some(true),
        };
        assert_eq!(query.filter_query(), "&source=PE&loanwords=true");

        assert_eq!(BrowseQuery::default().filter_query(), "");
    }
}
