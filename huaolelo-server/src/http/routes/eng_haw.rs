//! English-Hawaiian reverse index pages.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::{routing::get, Router};

use huaolelo_core::text::ENGLISH_LETTERS;

use super::list_or_empty;
use crate::db::repos::EngHawRepo;
use crate::http::extractors::EnglishLetter;
use crate::http::server::AppState;
use crate::models::PaginationParams;
use crate::render::{components, escape, layout};

const PER_PAGE: u32 = 50;

/// GET /eng-haw - a-z index
async fn index() -> Html<String> {
    let body = format!(
        "<h1>English-Hawaiian</h1>\n\
         <p class=\"muted\">The reverse index: find Hawaiian words from English.</p>\n{}",
        components::letter_nav("/eng-haw", &ENGLISH_LETTERS, None)
    );
    Html(layout::page("English-Hawaiian", "/eng-haw", &body))
}

/// GET /eng-haw/{letter} - reverse-index table for a letter
async fn letter(
    State(state): State<Arc<AppState>>,
    EnglishLetter(letter): EnglishLetter,
    Query(params): Query<PaginationParams>,
) -> Html<String> {
    let page = params.with_per_page(PER_PAGE);
    let entries = list_or_empty(
        EngHawRepo::new(&state.pool).browse_letter(&letter, page).await,
        page,
        "reverse index",
    );

    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>English-Hawaiian: {}</h1>\n",
        escape(&letter.to_uppercase())
    );
    body.push_str(&components::letter_nav("/eng-haw", &ENGLISH_LETTERS, Some(&letter)));
    let _ = write!(body, "\n<p class=\"small muted\">{} entries</p>\n", entries.total);
    body.push_str(&components::eng_haw_table(&entries.items));
    body.push('\n');
    body.push_str(&components::pagination(&entries, |p| {
        format!("/eng-haw/{letter}?page={p}")
    }));

    Html(layout::page(
        &format!("English-Hawaiian: {}", letter.to_uppercase()),
        "/eng-haw",
        &body,
    ))
}

/// Reverse index routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/eng-haw", get(index))
        .route("/eng-haw/{letter}", get(letter))
}
