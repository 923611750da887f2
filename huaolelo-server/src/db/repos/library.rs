//! Bibliographic and archival material: references, the five source
//! dictionaries, gloss source texts, prefaces, structural pages, and the
//! standalone image index.

use sqlx::{PgPool, Row};

use super::DbError;
use crate::models::{Paginated, Pagination};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Reference {
    pub abbreviation: Option<String>,
    pub anchor: Option<String>,
    pub full_text: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DictionarySource {
    pub source_page: String,
    pub anchor: String,
    pub title: String,
    pub year: Option<String>,
    pub description: Option<String>,
    pub cover_images: Vec<String>,
    pub intro_pdf_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GlossSourceText {
    pub source_number: i32,
    pub hawaiian_title: String,
    pub author_info: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub page_count: Option<String>,
    pub cover_image_url: Option<String>,
    pub ulukau_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrefaceSummary {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub year_edition: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Preface {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub year_edition: Option<String>,
    pub prose_html: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StructuralPageSummary {
    pub id: i64,
    pub filename: String,
    pub title: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StructuralPage {
    pub id: i64,
    pub filename: String,
    pub title: Option<String>,
    pub updated: Option<String>,
    pub sections: serde_json::Value,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImageDetail {
    pub filename: String,
    pub image_url: String,
    pub headword_display: Option<String>,
    pub caption: Option<String>,
    pub source_credit: Option<String>,
    pub source_link_url: Option<String>,
    pub source_link_text: Option<String>,
}

/// Library repository
pub struct LibraryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LibraryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Bibliography, ordered by abbreviation.
    pub async fn references(&self) -> Result<Vec<Reference>, DbError> {
        let refs = sqlx::query_as::<_, Reference>(
            "SELECT abbreviation, anchor, full_text, url FROM reference ORDER BY abbreviation",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(refs)
    }

    /// The merged source dictionaries.
    pub async fn dictionary_sources(&self) -> Result<Vec<DictionarySource>, DbError> {
        let sources = sqlx::query_as::<_, DictionarySource>(
            r#"
            SELECT source_page, anchor, title, year, description, cover_images, intro_pdf_url
            FROM dictionary_source
            ORDER BY source_page, anchor
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(sources)
    }

    /// Numbered Hawaiian source texts for glosses.
    pub async fn gloss_sources(&self) -> Result<Vec<GlossSourceText>, DbError> {
        let sources = sqlx::query_as::<_, GlossSourceText>(
            r#"
            SELECT source_number, hawaiian_title, author_info, publisher, year,
                   page_count, cover_image_url, ulukau_url
            FROM gloss_source_text
            ORDER BY source_number
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(sources)
    }

    pub async fn prefaces(&self) -> Result<Vec<PrefaceSummary>, DbError> {
        let prefaces = sqlx::query_as::<_, PrefaceSummary>(
            r#"
            SELECT id, filename, title, subtitle, year_edition
            FROM preface
            ORDER BY year_edition
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(prefaces)
    }

    pub async fn preface(&self, id: i64) -> Result<Preface, DbError> {
        sqlx::query_as::<_, Preface>(
            r#"
            SELECT id, filename, title, subtitle, year_edition, prose_html, images
            FROM preface
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "preface",
            id: id.to_string(),
        })
    }

    pub async fn structural_pages(&self) -> Result<Vec<StructuralPageSummary>, DbError> {
        let pages = sqlx::query_as::<_, StructuralPageSummary>(
            "SELECT id, filename, title, updated FROM structural_page ORDER BY filename",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(pages)
    }

    pub async fn structural_page(&self, id: i64) -> Result<StructuralPage, DbError> {
        sqlx::query_as::<_, StructuralPage>(
            r#"
            SELECT id, filename, title, updated, sections, internal_links, external_links
            FROM structural_page
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "archive page",
            id: id.to_string(),
        })
    }

    /// The standalone image index, paginated by filename.
    pub async fn images(&self, page: Pagination) -> Result<Paginated<ImageDetail>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT filename, image_url, headword_display, caption, source_credit,
                   source_link_url, source_link_text,
                   COUNT(*) OVER() AS total
            FROM image_detail
            ORDER BY filename
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        Ok(Paginated {
            items: rows
                .iter()
                .map(|row| ImageDetail {
                    filename: row.get("filename"),
                    image_url: row.get("image_url"),
                    headword_display: row.get("headword_display"),
                    caption: row.get("caption"),
                    source_credit: row.get("source_credit"),
                    source_link_url: row.get("source_link_url"),
                    source_link_text: row.get("source_link_text"),
                })
                .collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}
