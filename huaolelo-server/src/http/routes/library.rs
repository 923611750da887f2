//! Bibliographic and archival pages: references, the source dictionaries,
//! gloss source texts, prefaces, structural pages, and the image index.

use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::{routing::get, Router};

use super::{list_or_empty, rows_or_empty};
use crate::db::repos::LibraryRepo;
use crate::http::error::PageError;
use crate::http::server::AppState;
use crate::models::PaginationParams;
use crate::render::{archive_url, components, escape, layout};

const IMAGES_PER_PAGE: u32 = 50;

/// GET /references
async fn references(State(state): State<Arc<AppState>>) -> Html<String> {
    let refs = rows_or_empty(LibraryRepo::new(&state.pool).references().await, "references");

    let mut body = String::from(
        "<h1>References</h1>\n\
         <p class=\"small\"><a href=\"/sources\">The Dictionaries</a> · \
         <a href=\"/gloss-sources\">Gloss Sources</a> · \
         <a href=\"/prefaces\">Prefaces</a> · \
         <a href=\"/pages\">Archive Pages</a> · \
         <a href=\"/images\">Images</a></p>\n",
    );
    if refs.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Abbreviation</th><th>Work</th></tr></thead>\n<tbody>\n",
        );
        for reference in &refs {
            let work = match (&reference.full_text, &reference.url) {
                (Some(text), Some(url)) => {
                    format!("<a href=\"{}\">{}</a>", escape(url), escape(text))
                }
                (Some(text), None) => escape(text),
                (None, Some(url)) => format!("<a href=\"{url}\">{url}</a>", url = escape(url)),
                (None, None) => String::new(),
            };
            let _ = write!(
                body,
                "<tr><td>{}</td><td class=\"small\">{}</td></tr>\n",
                escape(reference.abbreviation.as_deref().unwrap_or("")),
                work,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    Html(layout::page("References", "/references", &body))
}

/// GET /sources - the merged source dictionaries
async fn sources(State(state): State<Arc<AppState>>) -> Html<String> {
    let sources = rows_or_empty(
        LibraryRepo::new(&state.pool).dictionary_sources().await,
        "dictionary sources",
    );

    let mut body = String::from("<h1>The Dictionaries</h1>\n");
    if sources.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for source in &sources {
        body.push_str("<div class=\"card\">");
        let _ = write!(body, "<p><strong>{}</strong>", escape(&source.title));
        if let Some(year) = &source.year {
            let _ = write!(body, " <span class=\"muted\">({})</span>", escape(year));
        }
        body.push_str("</p>");
        if let Some(description) = &source.description {
            let _ = write!(body, "<p class=\"small\">{}</p>", escape(description));
        }
        if let Some(url) = &source.intro_pdf_url {
            let _ = write!(
                body,
                "<p class=\"small\"><a href=\"{}\">Introduction (PDF)</a></p>",
                escape(&archive_url(url))
            );
        }
        body.push_str("</div>\n");
    }

    Html(layout::page("Sources", "/references", &body))
}

/// GET /gloss-sources - numbered Hawaiian source texts
async fn gloss_sources(State(state): State<Arc<AppState>>) -> Html<String> {
    let sources = rows_or_empty(
        LibraryRepo::new(&state.pool).gloss_sources().await,
        "gloss sources",
    );

    let mut body = String::from("<h1>Gloss Source Texts</h1>\n");
    if sources.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>#</th><th>Title</th><th>Author</th>\
             <th>Publisher</th><th>Year</th></tr></thead>\n<tbody>\n",
        );
        for source in &sources {
            let title = match &source.ulukau_url {
                Some(url) => format!(
                    "<a href=\"{}\">{}</a>",
                    escape(url),
                    escape(&source.hawaiian_title)
                ),
                None => escape(&source.hawaiian_title),
            };
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td class=\"small\">{}</td>\
                 <td class=\"small\">{}</td><td class=\"small\">{}</td></tr>\n",
                source.source_number,
                title,
                escape(source.author_info.as_deref().unwrap_or("")),
                escape(source.publisher.as_deref().unwrap_or("")),
                escape(source.year.as_deref().unwrap_or("")),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    Html(layout::page("Gloss Sources", "/references", &body))
}

/// GET /prefaces
async fn prefaces(State(state): State<Arc<AppState>>) -> Html<String> {
    let prefaces = rows_or_empty(LibraryRepo::new(&state.pool).prefaces().await, "prefaces");

    let mut body = String::from(
        "<h1>Prefaces</h1>\n\
         <p class=\"muted\">Prefaces from the dictionary editions, oldest first.</p>\n",
    );
    if prefaces.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for preface in &prefaces {
        let _ = write!(
            body,
            "<div class=\"card\"><p><a href=\"/prefaces/{}\">{}</a></p>",
            preface.id,
            escape(&preface.title)
        );
        let mut sub = Vec::new();
        if let Some(subtitle) = &preface.subtitle {
            sub.push(escape(subtitle));
        }
        if let Some(edition) = &preface.year_edition {
            sub.push(escape(edition));
        }
        if !sub.is_empty() {
            let _ = write!(body, "<p class=\"small muted\">{}</p>", sub.join(" · "));
        }
        body.push_str("</div>\n");
    }

    Html(layout::page("Prefaces", "/references", &body))
}

/// GET /prefaces/{id}
async fn preface(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let preface_id: i64 = id.parse().map_err(|_| PageError::NotFound {
        resource: "preface",
        id,
    })?;
    let preface = LibraryRepo::new(&state.pool).preface(preface_id).await?;

    let mut body = String::new();
    body.push_str("<p><a href=\"/prefaces\">&larr; Back to prefaces</a></p>\n");
    let _ = write!(body, "<h1>{}</h1>\n", escape(&preface.title));
    if let Some(subtitle) = &preface.subtitle {
        let _ = write!(body, "<p class=\"muted\">{}</p>\n", escape(subtitle));
    }
    if let Some(edition) = &preface.year_edition {
        let _ = write!(body, "<p class=\"small muted\">{}</p>\n", escape(edition));
    }
    // Preface prose is cleaned HTML produced by the ingestion pipeline.
    if let Some(prose) = &preface.prose_html {
        body.push_str(prose);
        body.push('\n');
    }
    for image in &preface.images {
        let _ = write!(
            body,
            "<p><img src=\"{}\" alt=\"\"></p>\n",
            escape(&archive_url(image))
        );
    }

    Ok(Html(layout::page(&preface.title, "/references", &body)))
}

/// GET /pages - structural pages of the archive
async fn pages(State(state): State<Arc<AppState>>) -> Html<String> {
    let pages = rows_or_empty(
        LibraryRepo::new(&state.pool).structural_pages().await,
        "structural pages",
    );

    let mut body = String::from("<h1>Archive Pages</h1>\n");
    if pages.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Page</th><th>File</th><th>Updated</th></tr></thead>\n<tbody>\n",
        );
        for page in &pages {
            let _ = write!(
                body,
                "<tr><td><a href=\"/pages/{}\">{}</a></td>\
                 <td class=\"small muted\">{}</td><td class=\"small muted\">{}</td></tr>\n",
                page.id,
                escape(page.title.as_deref().unwrap_or(&page.filename)),
                escape(&page.filename),
                escape(page.updated.as_deref().unwrap_or("")),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    Html(layout::page("Archive Pages", "/references", &body))
}

/// GET /pages/{id}
async fn page_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let page_id: i64 = id.parse().map_err(|_| PageError::NotFound {
        resource: "archive page",
        id,
    })?;
    let page = LibraryRepo::new(&state.pool).structural_page(page_id).await?;

    let title = page.title.clone().unwrap_or_else(|| page.filename.clone());
    let mut body = String::new();
    body.push_str("<p><a href=\"/pages\">&larr; Back to archive pages</a></p>\n");
    let _ = write!(body, "<h1>{}</h1>\n", escape(&title));
    if let Some(updated) = &page.updated {
        let _ = write!(body, "<p class=\"small muted\">Updated {}</p>\n", escape(updated));
    }

    let sections = serde_json::to_string_pretty(&page.sections).unwrap_or_default();
    if !sections.is_empty() && sections != "null" {
        let _ = write!(body, "<pre class=\"small\">{}</pre>\n", escape(&sections));
    }

    if !page.internal_links.is_empty() {
        body.push_str("<h2>Linked pages</h2>\n<ul>");
        for link in &page.internal_links {
            let _ = write!(body, "<li>{}</li>", escape(link));
        }
        body.push_str("</ul>\n");
    }
    if !page.external_links.is_empty() {
        body.push_str("<h2>External links</h2>\n<ul>");
        for link in &page.external_links {
            let _ = write!(body, "<li><a href=\"{url}\">{url}</a></li>", url = escape(link));
        }
        body.push_str("</ul>\n");
    }

    Ok(Html(layout::page(&title, "/references", &body)))
}

/// GET /images - standalone image index
async fn images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Html<String> {
    let page = params.with_per_page(IMAGES_PER_PAGE);
    let images = list_or_empty(
        LibraryRepo::new(&state.pool).images(page).await,
        page,
        "image index",
    );

    let mut body = String::from("<h1>Images</h1>\n");
    let _ = write!(body, "<p class=\"small muted\">{} images</p>\n", images.total);
    if images.items.is_empty() {
        body.push_str("<p class=\"muted\">No entries found.</p>\n");
    }
    for image in &images.items {
        body.push_str("<div class=\"card\">");
        let _ = write!(
            body,
            "<p><img src=\"{}\" alt=\"{}\"></p>",
            escape(&archive_url(&image.image_url)),
            escape(image.headword_display.as_deref().unwrap_or(&image.filename)),
        );
        if let Some(caption) = &image.caption {
            let _ = write!(body, "<p class=\"small\">{}</p>", escape(caption));
        }
        if let Some(credit) = &image.source_credit {
            let _ = write!(body, "<p class=\"small muted\">{}</p>", escape(credit));
        }
        if let Some(url) = &image.source_link_url {
            let _ = write!(
                body,
                "<p class=\"small\"><a href=\"{}\">{}</a></p>",
                escape(url),
                escape(image.source_link_text.as_deref().unwrap_or("source")),
            );
        }
        body.push_str("</div>\n");
    }

    body.push_str(&components::pagination(&images, |p| format!("/images?page={p}")));

    Html(layout::page("Images", "/references", &body))
}

/// Library routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/references", get(references))
        .route("/sources", get(sources))
        .route("/gloss-sources", get(gloss_sources))
        .route("/prefaces", get(prefaces))
        .route("/prefaces/{id}", get(preface))
        .route("/pages", get(pages))
        .route("/pages/{id}", get(page_detail))
        .route("/images", get(images))
}
