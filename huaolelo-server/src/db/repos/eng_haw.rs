//! English-Hawaiian reverse index repository.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use huaolelo_core::{prefix_tsquery, DictSource};

use super::DbError;
use crate::models::{Paginated, Pagination};

/// Reverse-index entry with its Hawaiian translations.
#[derive(Debug, Clone)]
pub struct EngHawEntry {
    pub id: i64,
    pub english_word: String,
    pub source: DictSource,
    pub letter_page: Option<String>,
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub hawaiian_word: Option<String>,
    pub target_anchor: Option<String>,
    pub target_page: Option<String>,
}

/// English-Hawaiian repository
pub struct EngHawRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EngHawRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reverse-index entries on a letter page.
    pub async fn browse_letter(
        &self,
        letter: &str,
        page: Pagination,
    ) -> Result<Paginated<EngHawEntry>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, english_word, source, letter_page, COUNT(*) OVER() AS total
            FROM eng_haw_entry
            WHERE letter_page = $1
            ORDER BY english_word
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(letter)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;
        self.hydrate(rows, page).await
    }

    /// Two-tier search over English words: full-text with prefix matching,
    /// then substring ILIKE when the first tier fails or matches nothing.
    pub async fn search(
        &self,
        query: &str,
        page: Pagination,
    ) -> Result<Paginated<EngHawEntry>, DbError> {
        if let Some(tsquery) = prefix_tsquery(query) {
            match self.search_fulltext(&tsquery, page).await {
                Ok(hit) if !hit.items.is_empty() => return Ok(hit),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(%err, "reverse-index full-text search failed; using substring tier");
                }
            }
        }
        self.search_substring(query, page).await
    }

    async fn search_fulltext(
        &self,
        tsquery: &str,
        page: Pagination,
    ) -> Result<Paginated<EngHawEntry>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, english_word, source, letter_page, COUNT(*) OVER() AS total
            FROM eng_haw_entry
            WHERE word_search @@ to_tsquery('english', $1)
            ORDER BY english_word
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tsquery)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;
        self.hydrate(rows, page).await
    }

    async fn search_substring(
        &self,
        raw: &str,
        page: Pagination,
    ) -> Result<Paginated<EngHawEntry>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, english_word, source, letter_page, COUNT(*) OVER() AS total
            FROM eng_haw_entry
            WHERE english_word ILIKE '%' || $1 || '%'
            ORDER BY english_word
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(raw)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;
        self.hydrate(rows, page).await
    }

    /// Attach translations to a page of entry rows in one extra query.
    async fn hydrate(
        &self,
        rows: Vec<PgRow>,
        page: Pagination,
    ) -> Result<Paginated<EngHawEntry>, DbError> {
        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let ids: Vec<i64> = rows.iter().map(|r| r.get("id")).collect();

        let mut translations: HashMap<i64, Vec<Translation>> = HashMap::new();
        if !ids.is_empty() {
            let translation_rows = sqlx::query(
                r#"
                SELECT eng_haw_entry_id, hawaiian_word, target_anchor, target_page
                FROM eng_haw_translation
                WHERE eng_haw_entry_id = ANY($1)
                ORDER BY id
                "#,
            )
            .bind(&ids)
            .fetch_all(self.pool)
            .await?;

            for row in &translation_rows {
                translations
                    .entry(row.get("eng_haw_entry_id"))
                    .or_default()
                    .push(Translation {
                        hawaiian_word: row.get("hawaiian_word"),
                        target_anchor: row.get("target_anchor"),
                        target_page: row.get("target_page"),
                    });
            }
        }

        Ok(Paginated {
            items: rows
                .iter()
                .map(|row| {
                    let id: i64 = row.get("id");
                    EngHawEntry {
                        id,
                        english_word: row.get("english_word"),
                        source: DictSource::from_db(row.get::<&str, _>("source")),
                        letter_page: row.get("letter_page"),
                        translations: translations.remove(&id).unwrap_or_default(),
                    }
                })
                .collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn browse_letter_carries_translations() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let page = EngHawRepo::new(&pool)
            .browse_letter("a", Pagination::new(1, 50))
            .await
            .expect("query failed");

        assert!(page.items.iter().any(|e| !e.translations.is_empty()));
    }
}
