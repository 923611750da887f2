//! Search page: two-tier lookup over headwords or the reverse index.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::{routing::get, Router};
use serde::Deserialize;

use super::list_or_empty;
use crate::db::repos::{EngHawRepo, EntryRepo};
use crate::http::server::AppState;
use crate::models::Pagination;
use crate::render::{components, encode_segment, escape, layout};

const PER_PAGE: u32 = 50;

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    /// `haw-eng` (default) or `eng-haw`.
    #[serde(rename = "type")]
    direction: Option<String>,
    page: Option<u32>,
}

/// GET /search
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let direction = params.direction.as_deref().unwrap_or("haw-eng");
    let query = params.q.as_deref().unwrap_or("").trim().to_owned();

    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Search</h1>\n\
         <form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search\">\
         <input type=\"hidden\" name=\"type\" value=\"{}\"> \
         <button type=\"submit\">Search</button></form>\n",
        escape(&query),
        escape(direction),
    );

    // Direction tabs
    let tab_query = if query.is_empty() {
        String::new()
    } else {
        format!("q={}&", encode_segment(&query))
    };
    let tab = |kind: &str, label: &str| {
        if direction == kind {
            format!("<strong>{label}</strong>")
        } else {
            format!("<a href=\"/search?{tab_query}type={kind}\">{label}</a>")
        }
    };
    let _ = write!(
        body,
        "<p>{} · {}</p>\n",
        tab("haw-eng", "Hawaiian-English"),
        tab("eng-haw", "English-Hawaiian"),
    );

    if query.is_empty() {
        body.push_str("<p class=\"muted\">Enter a search term above.</p>\n");
        return Html(layout::page("Search", "/search", &body));
    }

    let page = Pagination::new(params.page.unwrap_or(1), PER_PAGE);
    let href = |p: u32| {
        format!(
            "/search?q={}&type={direction}&page={p}",
            encode_segment(&query)
        )
    };

    if direction == "eng-haw" {
        let results = list_or_empty(
            EngHawRepo::new(&state.pool).search(&query, page).await,
            page,
            "reverse-index search",
        );
        let _ = write!(
            body,
            "<p class=\"small muted\">{} results for &ldquo;{}&rdquo;</p>\n",
            results.total,
            escape(&query)
        );
        body.push_str(&components::eng_haw_table(&results.items));
        body.push('\n');
        body.push_str(&components::pagination(&results, href));
    } else {
        let results = list_or_empty(
            EntryRepo::new(&state.pool).search(&query, page).await,
            page,
            "headword search",
        );
        let _ = write!(
            body,
            "<p class=\"small muted\">{} results for &ldquo;{}&rdquo;</p>\n",
            results.total,
            escape(&query)
        );
        body.push_str(&components::entry_table(&results.items));
        body.push('\n');
        body.push_str(&components::pagination(&results, href));
    }

    Html(layout::page("Search", "/search", &body))
}

/// Search routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search))
}
