//! Topic repository: topical domain codes and their tagged entries.

use sqlx::{PgPool, Row};

use super::entries::EntryBrief;
use super::DbError;
use crate::models::{Paginated, Pagination};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicWithCount {
    pub id: i64,
    pub name: String,
    pub entry_count: i64,
}

/// Topic repository
pub struct TopicRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TopicRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All topics with their entry counts, one grouped join.
    pub async fn list(&self) -> Result<Vec<TopicWithCount>, DbError> {
        let topics = sqlx::query_as::<_, TopicWithCount>(
            r#"
            SELECT t.id, t.name, COUNT(et.entry_id) AS entry_count
            FROM topic t
            LEFT JOIN entry_topic et ON et.topic_id = t.id
            GROUP BY t.id, t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(topics)
    }

    /// Case-insensitive lookup by code.
    pub async fn by_name(&self, name: &str) -> Result<Option<Topic>, DbError> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, name FROM topic WHERE name ILIKE $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;
        Ok(topic)
    }

    /// Entries tagged with the topic, ordered by headword.
    pub async fn entries(
        &self,
        topic_id: i64,
        page: Pagination,
    ) -> Result<Paginated<EntryBrief>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                e.id, e.headword, e.headword_display, e.subscript,
                e.in_pe, e.in_mk, e.in_andrews, e.is_from_eh_only,
                s.definition_text, s.pos_raw,
                COUNT(*) OVER() AS total
            FROM entry_topic et
            JOIN entry e ON e.id = et.entry_id
            LEFT JOIN LATERAL (
                SELECT definition_text, pos_raw
                FROM sense
                WHERE entry_id = e.id
                ORDER BY sense_num
                LIMIT 1
            ) s ON TRUE
            WHERE et.topic_id = $1
            ORDER BY e.headword
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(topic_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        Ok(Paginated {
            items: rows
                .iter()
                .map(|row| EntryBrief {
                    id: row.get("id"),
                    headword: row.get("headword"),
                    headword_display: row.get("headword_display"),
                    subscript: row.get("subscript"),
                    in_pe: row.get("in_pe"),
                    in_mk: row.get("in_mk"),
                    in_andrews: row.get("in_andrews"),
                    is_from_eh_only: row.get("is_from_eh_only"),
                    definition_text: row.get("definition_text"),
                    pos_raw: row.get("pos_raw"),
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
    async fn by_name_is_case_insensitive() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let repo = TopicRepo::new(&pool);
        let upper = repo.by_name("WIN").await.expect("query failed");
        let lower = repo.by_name("win").await.expect("query failed");
        assert_eq!(upper.map(|t| t.id), lower.map(|t| t.id));
    }
}
