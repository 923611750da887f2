//! Historical word list repository.

use std::collections::HashMap;

use sqlx::{PgPool, Row};

use super::DbError;
use crate::models::{Paginated, Pagination};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Wordlist {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub author: Option<String>,
    pub year: Option<String>,
    pub intro_text: Option<String>,
    pub entry_count: i32,
}

/// Numbered row of a word list, with its entry links.
#[derive(Debug, Clone)]
pub struct WordlistEntry {
    pub entry_number: Option<i32>,
    pub list_word: String,
    pub modern_hawaiian: Option<String>,
    pub gloss: Option<String>,
    pub footnote: Option<String>,
    pub links: Vec<WordlistLink>,
}

#[derive(Debug, Clone)]
pub struct WordlistLink {
    pub surface: String,
    pub target_anchor: Option<String>,
    pub target_page: Option<String>,
}

/// Word list repository
pub struct WordlistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> WordlistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Wordlist>, DbError> {
        let lists = sqlx::query_as::<_, Wordlist>(
            r#"
            SELECT id, filename, title, author, year, intro_text, entry_count
            FROM wordlist
            ORDER BY title
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(lists)
    }

    pub async fn get(&self, id: i64) -> Result<Wordlist, DbError> {
        sqlx::query_as::<_, Wordlist>(
            r#"
            SELECT id, filename, title, author, year, intro_text, entry_count
            FROM wordlist
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "word list",
            id: id.to_string(),
        })
    }

    /// Rows of a word list in list order, each with its links.
    pub async fn entries(
        &self,
        wordlist_id: i64,
        page: Pagination,
    ) -> Result<Paginated<WordlistEntry>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, entry_number, list_word, modern_hawaiian, gloss, footnote,
                   COUNT(*) OVER() AS total
            FROM wordlist_entry
            WHERE wordlist_id = $1
            ORDER BY entry_number NULLS LAST, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(wordlist_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let ids: Vec<i64> = rows.iter().map(|r| r.get("id")).collect();

        let mut links: HashMap<i64, Vec<WordlistLink>> = HashMap::new();
        if !ids.is_empty() {
            let link_rows = sqlx::query(
                r#"
                SELECT wordlist_entry_id, surface, target_anchor, target_page
                FROM wordlist_entry_link
                WHERE wordlist_entry_id = ANY($1)
                ORDER BY id
                "#,
            )
            .bind(&ids)
            .fetch_all(self.pool)
            .await?;

            for row in &link_rows {
                links
                    .entry(row.get("wordlist_entry_id"))
                    .or_default()
                    .push(WordlistLink {
                        surface: row.get("surface"),
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
                    WordlistEntry {
                        entry_number: row.get("entry_number"),
                        list_word: row.get("list_word"),
                        modern_hawaiian: row.get("modern_hawaiian"),
                        gloss: row.get("gloss"),
                        footnote: row.get("footnote"),
                        links: links.remove(&id).unwrap_or_default(),
                    }
                })
                .collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}
