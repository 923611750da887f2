//! Concordance pages: letter index, per-letter word index, and the
//! sentences for one word with the keyword highlighted.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::{routing::get, Router};

use huaolelo_core::text::{normalize_okina, HAWAIIAN_LETTERS};

use super::list_or_empty;
use crate::db::repos::ConcordanceRepo;
use crate::http::extractors::HawaiianLetter;
use crate::http::server::AppState;
use crate::models::PaginationParams;
use crate::render::{components, encode_segment, escape, layout};

const WORDS_PER_PAGE: u32 = 100;
const SENTENCES_PER_PAGE: u32 = 50;

/// GET /concordance - letter index
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let total = crate::db::repos::StatsRepo::new(&state.pool).overview().await
        .map(|o| o.concordance)
        .unwrap_or(0);

    let mut body = String::from("<h1>Concordance</h1>\n");
    let _ = write!(
        body,
        "<p class=\"muted\">Browse {total} sentences from Hawaiian texts, indexed by word.</p>\n"
    );
    body.push_str(&components::letter_nav("/concordance/letter", &HAWAIIAN_LETTERS, None));
    Html(layout::page("Concordance", "/concordance", &body))
}

/// GET /concordance/letter/{letter} - word index for a letter
async fn letter(
    State(state): State<Arc<AppState>>,
    HawaiianLetter(letter): HawaiianLetter,
    Query(params): Query<PaginationParams>,
) -> Html<String> {
    let page = params.with_per_page(WORDS_PER_PAGE);
    let words = list_or_empty(
        ConcordanceRepo::new(&state.pool).letter_words(&letter, page).await,
        page,
        "concordance word index",
    );

    let mut body = String::new();
    let _ = write!(body, "<h1>Concordance: {}</h1>\n", escape(&letter.to_uppercase()));
    body.push_str(&components::letter_nav(
        "/concordance/letter",
        &HAWAIIAN_LETTERS,
        Some(&letter),
    ));
    let _ = write!(body, "\n<p class=\"small muted\">{} words</p>\n", words.total);

    if words.items.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        body.push_str("<p>");
        for word in &words.items {
            let _ = write!(
                body,
                "<a href=\"/concordance/{}\">{}</a> ",
                encode_segment(word),
                escape(word)
            );
        }
        body.push_str("</p>\n");
    }

    body.push_str(&components::pagination(&words, |p| {
        format!("/concordance/letter/{letter}?page={p}")
    }));

    Html(layout::page(
        &format!("Concordance: {}", letter.to_uppercase()),
        "/concordance",
        &body,
    ))
}

/// GET /concordance/{word} - sentences for one word
async fn word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Html<String> {
    let word = normalize_okina(&word);
    let page = params.with_per_page(SENTENCES_PER_PAGE);
    let sentences = list_or_empty(
        ConcordanceRepo::new(&state.pool).by_word(&word, page).await,
        page,
        "concordance",
    );

    let mut body = String::new();
    let _ = write!(body, "<h1>Concordance: <em>{}</em></h1>\n", escape(&word));
    let _ = write!(
        body,
        "<p class=\"small muted\">{} occurrences</p>\n",
        sentences.total
    );

    if sentences.items.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for sentence in &sentences.items {
        body.push_str("<div class=\"card\">");
        if let Some(hawaiian) = &sentence.hawaiian_text {
            let _ = write!(body, "<p>{}</p>", components::highlight(hawaiian, &word));
        }
        if let Some(english) = &sentence.english_text {
            let _ = write!(body, "<p class=\"small muted\">{}</p>", escape(english));
        }
        if let Some(note) = &sentence.note {
            let _ = write!(body, "<p class=\"small muted\">{}</p>", escape(note));
        }
        if let Some(anchor) = &sentence.parent_entry_anchor {
            let _ = write!(
                body,
                "<p class=\"small\"><a href=\"/entry/{}\">dictionary entry</a></p>",
                encode_segment(anchor)
            );
        }
        body.push_str("</div>\n");
    }

    body.push_str(&components::pagination(&sentences, |p| {
        format!("/concordance/{}?page={p}", encode_segment(&word))
    }));

    Html(layout::page(
        &format!("Concordance: {word}"),
        "/concordance",
        &body,
    ))
}

/// Concordance routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/concordance", get(index))
        .route("/concordance/letter/{letter}", get(letter))
        .route("/concordance/{word}", get(word))
}
