//! Statistics page: headline counts, per-source and per-letter
//! distributions, and the full table census.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::db::repos::StatsRepo;
use crate::http::server::AppState;
use crate::render::layout;

/// GET /statistics
async fn statistics(State(state): State<Arc<AppState>>) -> Html<String> {
    let repo = StatsRepo::new(&state.pool);

    // Independent censuses, fetched together.
    let (overview, by_source, by_letter, all_tables) = tokio::join!(
        repo.overview(),
        repo.by_source(),
        repo.by_letter(),
        repo.all_tables(),
    );
    let overview = overview.unwrap_or_default();
    let by_source = by_source.unwrap_or_default();
    let by_letter = by_letter.unwrap_or_default();
    let all_tables = all_tables.unwrap_or_default();

    let mut body = String::from("<h1>Statistics</h1>\n");

    let headline = [
        ("Entries", overview.entries),
        ("Definitions", overview.senses),
        ("Examples", overview.examples),
        ("Concordance", overview.concordance),
        ("Cross-refs", overview.cross_refs),
        ("Etymologies", overview.etymologies),
        ("English-Hawaiian", overview.eng_haw),
        ("References", overview.references),
    ];
    for (label, value) in headline {
        let _ = write!(
            body,
            "<div class=\"card\" style=\"display:inline-block;margin-right:.5rem\">\
             <strong>{value}</strong><br><span class=\"small muted\">{label}</span></div>"
        );
    }
    body.push('\n');

    body.push_str("<h2>Entries by Source</h2>\n<table>\n<thead><tr><th>Source</th><th>Entries</th></tr></thead>\n<tbody>\n");
    for count in &by_source {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>\n",
            count.source, count.entries
        );
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str("<h2>Entries by Letter</h2>\n<table>\n<thead><tr><th>Letter</th><th>Entries</th></tr></thead>\n<tbody>\n");
    for count in &by_letter {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td></tr>\n",
            count.letter.to_uppercase(),
            count.entries
        );
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str("<h2>Full Census</h2>\n<table>\n<thead><tr><th>Table</th><th>Rows</th></tr></thead>\n<tbody>\n");
    for count in &all_tables {
        let _ = write!(
            body,
            "<tr><td><code>{}</code></td><td>{}</td></tr>\n",
            count.table, count.rows
        );
    }
    body.push_str("</tbody>\n</table>\n");

    Html(layout::page("Statistics", "/statistics", &body))
}

/// Statistics routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/statistics", get(statistics))
}
