//! Topical index pages.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::{routing::get, Router};

use huaolelo_core::topics;

use super::{list_or_empty, rows_or_empty};
use crate::db::repos::TopicRepo;
use crate::http::error::PageError;
use crate::http::server::AppState;
use crate::models::PaginationParams;
use crate::render::{components, encode_segment, escape, layout};

const PER_PAGE: u32 = 100;

/// GET /topics - displayable topic codes with entry counts
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let all = rows_or_empty(TopicRepo::new(&state.pool).list().await, "topics");
    let displayable: Vec<_> = all
        .into_iter()
        .filter(|t| topics::is_displayable(&t.name))
        .collect();

    let mut body = String::from("<h1>Topics</h1>\n");
    if displayable.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        for topic in &displayable {
            let description = topics::meta(&topic.name)
                .map(|m| m.description)
                .unwrap_or("");
            let _ = write!(
                body,
                "<div class=\"card\"><p><a href=\"/topics/{}\">{}</a> \
                 <span class=\"small muted\">({} entries)</span></p>\
                 <p class=\"small muted\">{}</p></div>\n",
                encode_segment(&topic.name),
                escape(topics::display_name(&topic.name)),
                topic.entry_count,
                escape(description),
            );
        }
    }

    Html(layout::page("Topics", "/topics", &body))
}

/// GET /topics/{slug} - entries tagged with one topic code
async fn show(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, PageError> {
    if !topics::is_displayable(&slug) {
        return Err(PageError::NotFound {
            resource: "topic",
            id: slug,
        });
    }

    let repo = TopicRepo::new(&state.pool);
    let Some(topic) = repo.by_name(&slug).await? else {
        return Err(PageError::NotFound {
            resource: "topic",
            id: slug,
        });
    };

    let page = params.with_per_page(PER_PAGE);
    let entries = list_or_empty(repo.entries(topic.id, page).await, page, "topic entries");

    let display = topics::display_name(&topic.name);
    let mut body = String::new();
    body.push_str("<p><a href=\"/topics\">&larr; Back to topics</a></p>\n");
    let _ = write!(
        body,
        "<h1>{} ({})</h1>\n<p class=\"small muted\">{} entries</p>\n",
        escape(display),
        escape(&topic.name),
        entries.total
    );
    body.push_str(&components::entry_table(&entries.items));
    body.push('\n');
    let slug = topic.name.clone();
    body.push_str(&components::pagination(&entries, |p| {
        format!("/topics/{}?page={p}", encode_segment(&slug))
    }));

    Ok(Html(layout::page(display, "/topics", &body)))
}

/// Topic routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/topics", get(index))
        .route("/topics/{slug}", get(show))
}
