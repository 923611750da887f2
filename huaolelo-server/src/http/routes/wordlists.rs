//! Historical word list pages.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::{routing::get, Router};

use super::{list_or_empty, rows_or_empty};
use crate::db::repos::WordlistRepo;
use crate::http::error::PageError;
use crate::http::server::AppState;
use crate::models::PaginationParams;
use crate::render::{components, encode_segment, escape, layout};

const PER_PAGE: u32 = 100;

/// GET /wordlists
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let lists = rows_or_empty(WordlistRepo::new(&state.pool).list().await, "word lists");

    let mut body = String::from(
        "<h1>Word Lists</h1>\n\
         <p class=\"muted\">Historical word lists collected alongside the dictionaries.</p>\n",
    );
    if lists.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for list in &lists {
        let mut byline = Vec::new();
        if let Some(author) = &list.author {
            byline.push(escape(author));
        }
        if let Some(year) = &list.year {
            byline.push(escape(year));
        }
        let _ = write!(
            body,
            "<div class=\"card\"><p><a href=\"/wordlists/{}\">{}</a> \
             <span class=\"small muted\">({} entries)</span></p>\
             <p class=\"small muted\">{}</p></div>\n",
            list.id,
            escape(&list.title),
            list.entry_count,
            byline.join(", "),
        );
    }

    Html(layout::page("Word Lists", "/wordlists", &body))
}

/// GET /wordlists/{id}
async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, PageError> {
    let repo = WordlistRepo::new(&state.pool);
    let list_id: i64 = id.parse().map_err(|_| PageError::NotFound {
        resource: "word list",
        id: id.clone(),
    })?;
    let list = repo.get(list_id).await?;

    let page = params.with_per_page(PER_PAGE);
    let entries = list_or_empty(repo.entries(list_id, page).await, page, "word list entries");

    let mut body = String::new();
    body.push_str("<p><a href=\"/wordlists\">&larr; Back to word lists</a></p>\n");
    let _ = write!(body, "<h1>{}</h1>\n", escape(&list.title));
    let mut byline = Vec::new();
    if let Some(author) = &list.author {
        byline.push(escape(author));
    }
    if let Some(year) = &list.year {
        byline.push(escape(year));
    }
    if !byline.is_empty() {
        let _ = write!(body, "<p class=\"small muted\">{}</p>\n", byline.join(", "));
    }
    if let Some(intro) = &list.intro_text {
        let _ = write!(body, "<p>{}</p>\n", escape(intro));
    }
    let _ = write!(body, "<p class=\"small muted\">{} entries</p>\n", entries.total);

    if entries.items.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>#</th><th>List Word</th><th>Modern Hawaiian</th>\
             <th>Gloss</th><th>Note</th></tr></thead>\n<tbody>\n",
        );
        for entry in &entries.items {
            let number = entry
                .entry_number
                .map(|n| n.to_string())
                .unwrap_or_default();
            let modern = match &entry.modern_hawaiian {
                Some(word) => match entry.links.first().and_then(|l| l.target_anchor.as_deref()) {
                    Some(anchor) => format!(
                        "<a href=\"/entry/{}\">{}</a>",
                        encode_segment(anchor),
                        escape(word)
                    ),
                    None => escape(word),
                },
                None => String::new(),
            };
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"small\">{}</td>\
                 <td class=\"small muted\">{}</td></tr>\n",
                escape(&number),
                escape(&entry.list_word),
                modern,
                escape(entry.gloss.as_deref().unwrap_or("")),
                escape(entry.footnote.as_deref().unwrap_or("")),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(&components::pagination(&entries, |p| {
        format!("/wordlists/{list_id}?page={p}")
    }));

    Ok(Html(layout::page(&list.title, "/wordlists", &body)))
}

/// Word list routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wordlists", get(index))
        .route("/wordlists/{id}", get(show))
}
