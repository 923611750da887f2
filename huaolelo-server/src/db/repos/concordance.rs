//! Concordance repository: indexed example sentences keyed by Hawaiian word.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::DbError;
use crate::models::{Paginated, Pagination};

/// One concordance sentence.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub word: String,
    pub word_anchor: Option<String>,
    pub hawaiian_text: Option<String>,
    pub english_text: Option<String>,
    pub note: Option<String>,
    pub parent_entry_anchor: Option<String>,
    pub parent_entry_page: Option<String>,
}

/// Concordance repository
pub struct ConcordanceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ConcordanceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Sentences indexed under an exact word.
    pub async fn by_word(
        &self,
        word: &str,
        page: Pagination,
    ) -> Result<Paginated<Sentence>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT word, word_anchor, hawaiian_text, english_text, note,
                   parent_entry_anchor, parent_entry_page,
                   COUNT(*) OVER() AS total
            FROM concordance
            WHERE word = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(word)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;
        Ok(paginate(rows, page))
    }

    /// Sentences whose index word starts with the letter.
    pub async fn by_letter(
        &self,
        letter: &str,
        page: Pagination,
    ) -> Result<Paginated<Sentence>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT word, word_anchor, hawaiian_text, english_text, note,
                   parent_entry_anchor, parent_entry_page,
                   COUNT(*) OVER() AS total
            FROM concordance
            WHERE word ILIKE $1 || '%'
            ORDER BY word, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(letter)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;
        Ok(paginate(rows, page))
    }

    /// Distinct index words for a letter page. The total counts distinct
    /// words, not sentences, since this backs the word index.
    pub async fn letter_words(
        &self,
        letter: &str,
        page: Pagination,
    ) -> Result<Paginated<String>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT word, COUNT(*) OVER() AS total
            FROM (
                SELECT DISTINCT word
                FROM concordance
                WHERE word ILIKE $1 || '%'
            ) words
            ORDER BY word
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(letter)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        Ok(Paginated {
            items: rows.iter().map(|r| r.get("word")).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }
}

fn sentence_from_row(row: &PgRow) -> Sentence {
    Sentence {
        word: row.get("word"),
        word_anchor: row.get("word_anchor"),
        hawaiian_text: row.get("hawaiian_text"),
        english_text: row.get("english_text"),
        note: row.get("note"),
        parent_entry_anchor: row.get("parent_entry_anchor"),
        parent_entry_page: row.get("parent_entry_page"),
    }
}

fn paginate(rows: Vec<PgRow>, page: Pagination) -> Paginated<Sentence> {
    let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
    Paginated {
        items: rows.iter().map(sentence_from_row).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn letter_words_are_distinct() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let page = ConcordanceRepo::new(&pool)
            .letter_words("a", Pagination::new(1, 100))
            .await
            .expect("query failed");

        let mut seen = page.items.clone();
        seen.dedup();
        assert_eq!(seen.len(), page.items.len());
    }
}
