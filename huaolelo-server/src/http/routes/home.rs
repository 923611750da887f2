//! Home page: word of the day, headline counts, section links.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::{routing::get, Router};
use chrono::Utc;

use huaolelo_core::seed::daily_offset;

use crate::db::repos::{EntryRepo, StatsRepo};
use crate::http::server::AppState;
use crate::render::{components, layout};

/// GET /
async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let offset = daily_offset(Utc::now().date_naive());
    let word = match EntryRepo::new(&state.pool).word_of_day(offset).await {
        Ok(word) => word,
        Err(err) => {
            tracing::error!("word of the day query failed: {err}");
            None
        }
    };
    let overview = StatsRepo::new(&state.pool).overview().await.unwrap_or_default();

    let mut body = String::new();
    body.push_str(
        "<h1>Huaʻōlelo</h1>\n\
         <p>A merged Hawaiian-English dictionary: Pukui-Elbert, Māmaka Kaiao, and Andrews \
         in one place, with concordance sentences, topical indices, and the historical \
         word lists.</p>\n\
         <form action=\"/search\" method=\"get\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search headwords\"> \
         <button type=\"submit\">Search</button></form>\n",
    );

    if let Some(word) = word {
        let _ = write!(
            body,
            "<h2>Word of the day</h2>\n<div class=\"card\"><p>{} {}</p>\
             <p class=\"small muted\">{}</p></div>\n",
            components::headword_link(&word),
            components::source_badges(word.in_pe, word.in_mk, word.in_andrews, word.is_from_eh_only),
            components::definition_snippet(word.definition_text.as_deref()),
        );
    }

    let _ = write!(
        body,
        "<h2>The collection</h2>\n<ul>\
         <li><a href=\"/browse\">{} dictionary entries</a></li>\
         <li><a href=\"/concordance\">{} concordance sentences</a></li>\
         <li><a href=\"/eng-haw\">{} English-Hawaiian entries</a></li>\
         <li><a href=\"/references\">{} bibliographic references</a></li>\
         </ul>\n",
        overview.entries, overview.concordance, overview.eng_haw, overview.references,
    );

    Html(layout::page("Home", "", &body))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}
