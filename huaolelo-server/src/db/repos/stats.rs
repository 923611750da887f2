//! Statistics repository: table censuses for the statistics page.
//!
//! Counts are independent reads issued concurrently. A count that fails
//! reports 0 rather than failing the page.

use futures::future::join_all;
use sqlx::PgPool;

use huaolelo_core::text::HAWAIIAN_LETTERS;

use super::DbError;

/// Every table of the dictionary schema, for the full census.
const ALL_TABLES: [&str; 27] = [
    "entry",
    "sense",
    "sub_definition",
    "sub_definition_domain",
    "linked_word",
    "example",
    "word_token",
    "etymology",
    "cross_ref",
    "grammar_ref",
    "hawaiian_gloss",
    "image",
    "alt_spelling",
    "topic",
    "entry_topic",
    "eng_haw_entry",
    "eng_haw_translation",
    "concordance",
    "reference",
    "dictionary_source",
    "preface",
    "wordlist",
    "wordlist_entry",
    "wordlist_entry_link",
    "gloss_source_text",
    "image_detail",
    "structural_page",
];

/// Headline counts for the statistics page and home page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overview {
    pub entries: i64,
    pub senses: i64,
    pub examples: i64,
    pub concordance: i64,
    pub cross_refs: i64,
    pub etymologies: i64,
    pub eng_haw: i64,
    pub references: i64,
}

#[derive(Debug, Clone)]
pub struct SourceCount {
    pub source: &'static str,
    pub entries: i64,
}

#[derive(Debug, Clone)]
pub struct LetterCount {
    pub letter: &'static str,
    pub entries: i64,
}

#[derive(Debug, Clone)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Statistics repository
pub struct StatsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Headline counts across the main tables, fetched in parallel.
    pub async fn overview(&self) -> Result<Overview, DbError> {
        let (entries, senses, examples, concordance, cross_refs, etymologies, eng_haw, references) =
            tokio::join!(
                self.count("entry"),
                self.count("sense"),
                self.count("example"),
                self.count("concordance"),
                self.count("cross_ref"),
                self.count("etymology"),
                self.count("eng_haw_entry"),
                self.count("reference"),
            );

        Ok(Overview {
            entries,
            senses,
            examples,
            concordance,
            cross_refs,
            etymologies,
            eng_haw,
            references,
        })
    }

    /// Entry counts per source dictionary flag.
    pub async fn by_source(&self) -> Result<Vec<SourceCount>, DbError> {
        let (pe, mk, andrews, eh_only) = tokio::join!(
            self.count_where("entry", "in_pe"),
            self.count_where("entry", "in_mk"),
            self.count_where("entry", "in_andrews"),
            self.count_where("entry", "is_from_eh_only"),
        );

        Ok(vec![
            SourceCount { source: "PE", entries: pe },
            SourceCount { source: "MK", entries: mk },
            SourceCount { source: "Andrews", entries: andrews },
            SourceCount { source: "EH only", entries: eh_only },
        ])
    }

    /// Entry counts per Hawaiian letter page.
    pub async fn by_letter(&self) -> Result<Vec<LetterCount>, DbError> {
        let counts = join_all(HAWAIIAN_LETTERS.iter().map(|&letter| async move {
            let entries = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM entry WHERE letter_page = $1",
            )
            .bind(letter)
            .fetch_one(self.pool)
            .await
            .unwrap_or(0);
            LetterCount { letter, entries }
        }))
        .await;

        Ok(counts)
    }

    /// Exact row count of every table in the schema.
    pub async fn all_tables(&self) -> Result<Vec<TableCount>, DbError> {
        let counts = join_all(ALL_TABLES.iter().map(|&table| async move {
            TableCount {
                table,
                rows: self.count(table).await,
            }
        }))
        .await;

        Ok(counts)
    }

    // Table names come from the static lists above, never from input.
    async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool)
            .await
            .unwrap_or(0)
    }

    async fn count_where(&self, table: &str, flag: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table} WHERE {flag}"))
            .fetch_one(self.pool)
            .await
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn census_covers_every_table() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let counts = StatsRepo::new(&pool).all_tables().await.expect("census failed");
        assert_eq!(counts.len(), ALL_TABLES.len());
    }
}
