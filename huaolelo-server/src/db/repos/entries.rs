//! Entry repository.
//!
//! Brief rows power the browse/topic/search tables; the detail fetch
//! assembles the fully joined entry for the entry page. Headword ordering is
//! the dictionary's canonical ordering and every list here uses it.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};

use huaolelo_core::{prefix_tsquery, DictSource};

use super::DbError;
use crate::models::{Paginated, Pagination};

/// Brief select fragment: one row per entry with its first sense pulled in
/// through a lateral join, plus the window total for pagination.
const BRIEF_SELECT: &str = r#"
    SELECT
        e.id, e.headword, e.headword_display, e.subscript,
        e.in_pe, e.in_mk, e.in_andrews, e.is_from_eh_only,
        s.definition_text, s.pos_raw,
        COUNT(*) OVER() AS total
    FROM entry e
    LEFT JOIN LATERAL (
        SELECT definition_text, pos_raw
        FROM sense
        WHERE entry_id = e.id
        ORDER BY sense_num
        LIMIT 1
    ) s ON TRUE
"#;

/// Entry row for list views, carrying the first sense for the definition
/// column.
#[derive(Debug, Clone)]
pub struct EntryBrief {
    pub id: String,
    pub headword: String,
    pub headword_display: String,
    pub subscript: Option<String>,
    pub in_pe: bool,
    pub in_mk: bool,
    pub in_andrews: bool,
    pub is_from_eh_only: bool,
    pub definition_text: Option<String>,
    pub pos_raw: Option<String>,
}

/// Full entry row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Entry {
    pub id: String,
    pub headword: String,
    pub headword_display: String,
    pub headword_ascii: String,
    pub subscript: Option<String>,
    pub letter_page: String,
    pub display_type: String,
    pub parent_entry_id: Option<String>,
    pub pdf_page: Option<String>,
    pub in_pe: bool,
    pub in_mk: bool,
    pub in_mk_addendum: bool,
    pub in_andrews: bool,
    pub in_placenames: bool,
    pub is_from_eh_only: bool,
    pub syllable_breakdown: Option<String>,
    pub is_basic_vocab: bool,
    pub dialect: Option<String>,
    pub usage_register: Option<String>,
    pub is_loanword: bool,
    pub loan_source: Option<String>,
    pub loan_language: Option<String>,
    pub source_tag: Option<String>,
}

/// One numbered definition from a source dictionary, with its lettered
/// sub-definitions and in-definition links.
#[derive(Debug, Clone)]
pub struct Sense {
    pub id: i64,
    pub sense_num: i32,
    pub source_dict: DictSource,
    pub pos_raw: Option<String>,
    pub pos_hawaiian: Option<String>,
    pub pos_english: Option<String>,
    pub definition_text: Option<String>,
    pub hawaiian_gloss: Option<String>,
    pub gloss_source_num: Option<String>,
    pub sub_definitions: Vec<SubDefinition>,
    pub linked_words: Vec<LinkedWord>,
}

#[derive(Debug, Clone)]
pub struct SubDefinition {
    pub id: i64,
    pub text: String,
    pub is_figurative: bool,
    pub is_rare: bool,
    pub is_archaic: bool,
    pub domains: Vec<String>,
    pub linked_words: Vec<LinkedWord>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinkedWord {
    pub surface: String,
    pub target_anchor: Option<String>,
    pub target_page: Option<String>,
    pub link_class: Option<String>,
}

/// Usage sentence with its per-word tokens.
#[derive(Debug, Clone)]
pub struct Example {
    pub hawaiian_text: Option<String>,
    pub english_text: Option<String>,
    pub note: Option<String>,
    pub olelo_noeau_num: Option<String>,
    pub bible_ref: Option<String>,
    pub source_dict: DictSource,
    pub source_ref_url: Option<String>,
    pub tokens: Vec<WordToken>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WordToken {
    pub surface: String,
    pub anchor: Option<String>,
    pub target_entry: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Etymology {
    pub raw_text: Option<String>,
    pub proto_form: Option<String>,
    pub proto_language: Option<String>,
    pub qualifier: Option<String>,
    pub meaning: Option<String>,
    pub pollex_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CrossRef {
    pub ref_type: Option<String>,
    pub target_headword: Option<String>,
    pub target_anchor: Option<String>,
    pub target_page: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GrammarRef {
    pub section: Option<String>,
    pub label: Option<String>,
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HawaiianGloss {
    pub gloss: Option<String>,
    pub source_ref: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryImage {
    pub thumbnail_url: Option<String>,
    pub full_image_url: Option<String>,
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
}

/// The fully joined entry for the detail page.
#[derive(Debug, Clone)]
pub struct EntryDetail {
    pub entry: Entry,
    pub senses: Vec<Sense>,
    pub examples: Vec<Example>,
    pub etymologies: Vec<Etymology>,
    pub cross_refs: Vec<CrossRef>,
    pub grammar_refs: Vec<GrammarRef>,
    pub glosses: Vec<HawaiianGloss>,
    pub images: Vec<EntryImage>,
    pub alt_spellings: Vec<String>,
    pub topics: Vec<String>,
    pub children: Vec<EntryBrief>,
}

/// Optional filters for the browse-by-letter view.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilters {
    /// Restrict to entries present in these source dictionaries (PE, MK,
    /// Andrews; other tags have no per-entry flag and are ignored).
    pub sources: Vec<DictSource>,
    /// Headword prefix within the letter page.
    pub prefix: Option<String>,
    /// Loanwords only.
    pub loanwords: bool,
}

/// Entry repository
pub struct EntryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Entries on a letter page, filtered and paginated.
    ///
    /// Reverse-index-only rows and empty headwords never show up when
    /// browsing Hawaiian-English.
    pub async fn browse_letter(
        &self,
        letter: &str,
        filters: &BrowseFilters,
        page: Pagination,
    ) -> Result<Paginated<EntryBrief>, DbError> {
        let mut builder = QueryBuilder::new(BRIEF_SELECT);
        builder.push(" WHERE e.letter_page = ");
        builder.push_bind(letter);
        builder.push(" AND NOT e.is_from_eh_only AND e.headword <> ''");

        for source in &filters.sources {
            match source {
                DictSource::Pe => builder.push(" AND e.in_pe"),
                DictSource::Mk => builder.push(" AND e.in_mk"),
                DictSource::Andrews => builder.push(" AND e.in_andrews"),
                DictSource::Eh | DictSource::Other => continue,
            };
        }
        if let Some(prefix) = &filters.prefix {
            builder.push(" AND e.headword ILIKE ");
            builder.push_bind(format!("{prefix}%"));
        }
        if filters.loanwords {
            builder.push(" AND e.is_loanword");
        }

        builder.push(" ORDER BY e.headword LIMIT ");
        builder.push_bind(page.limit() as i64);
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder.build().fetch_all(self.pool).await?;
        Ok(paginate_briefs(rows, page))
    }

    /// Two-tier headword search.
    ///
    /// Tier one is full-text over the `headword_search` tsvector with prefix
    /// matching. When it fails or matches nothing, the same request reissues
    /// as a substring ILIKE over the headword. Both tiers exclude
    /// reverse-index-only rows and order by headword.
    pub async fn search(
        &self,
        query: &str,
        page: Pagination,
    ) -> Result<Paginated<EntryBrief>, DbError> {
        if let Some(tsquery) = prefix_tsquery(query) {
            match self.search_fulltext(&tsquery, page).await {
                Ok(hit) if !hit.items.is_empty() => return Ok(hit),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(%err, "headword full-text search failed; using substring tier");
                }
            }
        }
        self.search_substring(query, page).await
    }

    async fn search_fulltext(
        &self,
        tsquery: &str,
        page: Pagination,
    ) -> Result<Paginated<EntryBrief>, DbError> {
        let sql = format!(
            "{BRIEF_SELECT}
            WHERE e.headword_search @@ to_tsquery('simple', $1)
              AND NOT e.is_from_eh_only
            ORDER BY e.headword
            LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query(&sql)
            .bind(tsquery)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(self.pool)
            .await?;
        Ok(paginate_briefs(rows, page))
    }

    async fn search_substring(
        &self,
        raw: &str,
        page: Pagination,
    ) -> Result<Paginated<EntryBrief>, DbError> {
        let sql = format!(
            "{BRIEF_SELECT}
            WHERE e.headword ILIKE '%' || $1 || '%'
              AND NOT e.is_from_eh_only
            ORDER BY e.headword
            LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query(&sql)
            .bind(raw)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(self.pool)
            .await?;
        Ok(paginate_briefs(rows, page))
    }

    /// Resolve an ASCII anchor (cross-refs, word tokens, linked words) to the
    /// best matching entry id: PE entries first, then MK, then Andrews.
    pub async fn resolve_anchor(&self, anchor: &str) -> Result<Option<String>, DbError> {
        let id = sqlx::query_scalar::<_, String>(
            r#"
            SELECT id
            FROM entry
            WHERE headword_ascii = $1 AND NOT is_from_eh_only
            ORDER BY in_pe DESC, in_mk DESC, in_andrews DESC
            LIMIT 1
            "#,
        )
        .bind(anchor)
        .fetch_optional(self.pool)
        .await?;
        Ok(id)
    }

    /// Full entry detail, or None when the id is unknown.
    pub async fn get(&self, id: &str) -> Result<Option<EntryDetail>, DbError> {
        let Some(entry) = self.fetch_entry(id).await? else {
            return Ok(None);
        };

        // Satellite fetches are independent reads; issue them concurrently.
        let (senses, examples, satellites, children) = tokio::try_join!(
            self.fetch_senses(id),
            self.fetch_examples(id),
            self.fetch_satellites(id),
            self.sub_entries(id),
        )?;

        Ok(Some(EntryDetail {
            entry,
            senses,
            examples,
            etymologies: satellites.etymologies,
            cross_refs: satellites.cross_refs,
            grammar_refs: satellites.grammar_refs,
            glosses: satellites.glosses,
            images: satellites.images,
            alt_spellings: satellites.alt_spellings,
            topics: satellites.topics,
            children,
        }))
    }

    /// Children of a parent entry, ordered by headword.
    pub async fn sub_entries(&self, parent_id: &str) -> Result<Vec<EntryBrief>, DbError> {
        let sql = format!("{BRIEF_SELECT} WHERE e.parent_entry_id = $1 ORDER BY e.headword");
        let rows = sqlx::query(&sql).bind(parent_id).fetch_all(self.pool).await?;
        Ok(rows.iter().map(brief_from_row).collect())
    }

    /// The PE main entry at `offset` in headword order that carries at least
    /// one sense; falls back to the first PE entry when the offset misses.
    pub async fn word_of_day(&self, offset: u32) -> Result<Option<EntryBrief>, DbError> {
        let sql = format!(
            "{BRIEF_SELECT}
            WHERE e.in_pe
              AND e.display_type = 'main'
              AND EXISTS (SELECT 1 FROM sense WHERE entry_id = e.id)
            ORDER BY e.headword
            OFFSET $1 LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(offset as i64)
            .fetch_optional(self.pool)
            .await?;
        if let Some(row) = row {
            return Ok(Some(brief_from_row(&row)));
        }

        let sql = format!("{BRIEF_SELECT} WHERE e.in_pe ORDER BY e.headword LIMIT 1");
        let row = sqlx::query(&sql).fetch_optional(self.pool).await?;
        Ok(row.as_ref().map(brief_from_row))
    }

    async fn fetch_entry(&self, id: &str) -> Result<Option<Entry>, DbError> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"
            SELECT
                id, headword, headword_display, headword_ascii, subscript,
                letter_page, display_type, parent_entry_id, pdf_page,
                in_pe, in_mk, in_mk_addendum, in_andrews, in_placenames,
                is_from_eh_only, syllable_breakdown, is_basic_vocab, dialect,
                usage_register, is_loanword, loan_source, loan_language, source_tag
            FROM entry
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(entry)
    }

    async fn fetch_senses(&self, entry_id: &str) -> Result<Vec<Sense>, DbError> {
        let sense_rows = sqlx::query(
            r#"
            SELECT id, sense_num, source_dict, pos_raw, pos_hawaiian, pos_english,
                   definition_text, hawaiian_gloss, gloss_source_num
            FROM sense
            WHERE entry_id = $1
            ORDER BY sense_num
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let sub_rows = sqlx::query(
            r#"
            SELECT sd.id, sd.sense_id, sd.text, sd.is_figurative, sd.is_rare, sd.is_archaic
            FROM sub_definition sd
            JOIN sense s ON s.id = sd.sense_id
            WHERE s.entry_id = $1
            ORDER BY sd.id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let domain_rows = sqlx::query(
            r#"
            SELECT sdd.sub_definition_id, sdd.code
            FROM sub_definition_domain sdd
            JOIN sub_definition sd ON sd.id = sdd.sub_definition_id
            JOIN sense s ON s.id = sd.sense_id
            WHERE s.entry_id = $1
            ORDER BY sdd.code
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let linked_rows = sqlx::query(
            r#"
            SELECT lw.sense_id, lw.sub_definition_id, lw.surface,
                   lw.target_anchor, lw.target_page, lw.link_class
            FROM linked_word lw
            LEFT JOIN sense s ON s.id = lw.sense_id
            LEFT JOIN sub_definition sd ON sd.id = lw.sub_definition_id
            LEFT JOIN sense sds ON sds.id = sd.sense_id
            WHERE s.entry_id = $1 OR sds.entry_id = $1
            ORDER BY lw.id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let mut domains_by_sub: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &domain_rows {
            domains_by_sub
                .entry(row.get("sub_definition_id"))
                .or_default()
                .push(row.get("code"));
        }

        let mut links_by_sense: HashMap<i64, Vec<LinkedWord>> = HashMap::new();
        let mut links_by_sub: HashMap<i64, Vec<LinkedWord>> = HashMap::new();
        for row in &linked_rows {
            let word = LinkedWord {
                surface: row.get("surface"),
                target_anchor: row.get("target_anchor"),
                target_page: row.get("target_page"),
                link_class: row.get("link_class"),
            };
            if let Some(sub_id) = row.get::<Option<i64>, _>("sub_definition_id") {
                links_by_sub.entry(sub_id).or_default().push(word);
            } else if let Some(sense_id) = row.get::<Option<i64>, _>("sense_id") {
                links_by_sense.entry(sense_id).or_default().push(word);
            }
        }

        let mut subs_by_sense: HashMap<i64, Vec<SubDefinition>> = HashMap::new();
        for row in &sub_rows {
            let id: i64 = row.get("id");
            subs_by_sense
                .entry(row.get("sense_id"))
                .or_default()
                .push(SubDefinition {
                    id,
                    text: row.get("text"),
                    is_figurative: row.get("is_figurative"),
                    is_rare: row.get("is_rare"),
                    is_archaic: row.get("is_archaic"),
                    domains: domains_by_sub.remove(&id).unwrap_or_default(),
                    linked_words: links_by_sub.remove(&id).unwrap_or_default(),
                });
        }

        Ok(sense_rows
            .iter()
            .map(|row| {
                let id: i64 = row.get("id");
                Sense {
                    id,
                    sense_num: row.get("sense_num"),
                    source_dict: DictSource::from_db(row.get::<&str, _>("source_dict")),
                    pos_raw: row.get("pos_raw"),
                    pos_hawaiian: row.get("pos_hawaiian"),
                    pos_english: row.get("pos_english"),
                    definition_text: row.get("definition_text"),
                    hawaiian_gloss: row.get("hawaiian_gloss"),
                    gloss_source_num: row.get("gloss_source_num"),
                    sub_definitions: subs_by_sense.remove(&id).unwrap_or_default(),
                    linked_words: links_by_sense.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn fetch_examples(&self, entry_id: &str) -> Result<Vec<Example>, DbError> {
        let example_rows = sqlx::query(
            r#"
            SELECT id, hawaiian_text, english_text, note, olelo_noeau_num,
                   bible_ref, source_dict, source_ref_url
            FROM example
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let token_rows = sqlx::query(
            r#"
            SELECT wt.example_id, wt.surface, wt.anchor, wt.target_entry
            FROM word_token wt
            JOIN example ex ON ex.id = wt.example_id
            WHERE ex.entry_id = $1
            ORDER BY wt.id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool)
        .await?;

        let mut tokens_by_example: HashMap<i64, Vec<WordToken>> = HashMap::new();
        for row in &token_rows {
            if let Some(example_id) = row.get::<Option<i64>, _>("example_id") {
                tokens_by_example
                    .entry(example_id)
                    .or_default()
                    .push(WordToken {
                        surface: row.get("surface"),
                        anchor: row.get("anchor"),
                        target_entry: row.get("target_entry"),
                    });
            }
        }

        Ok(example_rows
            .iter()
            .map(|row| {
                let id: i64 = row.get("id");
                Example {
                    hawaiian_text: row.get("hawaiian_text"),
                    english_text: row.get("english_text"),
                    note: row.get("note"),
                    olelo_noeau_num: row.get("olelo_noeau_num"),
                    bible_ref: row.get("bible_ref"),
                    source_dict: DictSource::from_db(row.get::<&str, _>("source_dict")),
                    source_ref_url: row.get("source_ref_url"),
                    tokens: tokens_by_example.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn fetch_satellites(&self, entry_id: &str) -> Result<Satellites, DbError> {
        let etymologies = sqlx::query_as::<_, Etymology>(
            r#"
            SELECT raw_text, proto_form, proto_language, qualifier, meaning, pollex_url
            FROM etymology
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let cross_refs = sqlx::query_as::<_, CrossRef>(
            r#"
            SELECT ref_type, target_headword, target_anchor, target_page
            FROM cross_ref
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let grammar_refs = sqlx::query_as::<_, GrammarRef>(
            r#"
            SELECT section, label, pdf_url
            FROM grammar_ref
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let glosses = sqlx::query_as::<_, HawaiianGloss>(
            r#"
            SELECT gloss, source_ref
            FROM hawaiian_gloss
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let images = sqlx::query_as::<_, EntryImage>(
            r#"
            SELECT thumbnail_url, full_image_url, source_url, alt_text
            FROM image
            WHERE entry_id = $1
            ORDER BY id
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let alt_spellings = sqlx::query_scalar::<_, String>(
            "SELECT spelling FROM alt_spelling WHERE entry_id = $1 ORDER BY spelling",
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let topics = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.name
            FROM topic t
            JOIN entry_topic et ON et.topic_id = t.id
            WHERE et.entry_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(entry_id)
        .fetch_all(self.pool);

        let (etymologies, cross_refs, grammar_refs, glosses, images, alt_spellings, topics) =
            tokio::try_join!(
                etymologies,
                cross_refs,
                grammar_refs,
                glosses,
                images,
                alt_spellings,
                topics
            )?;

        Ok(Satellites {
            etymologies,
            cross_refs,
            grammar_refs,
            glosses,
            images,
            alt_spellings,
            topics,
        })
    }
}

struct Satellites {
    etymologies: Vec<Etymology>,
    cross_refs: Vec<CrossRef>,
    grammar_refs: Vec<GrammarRef>,
    glosses: Vec<HawaiianGloss>,
    images: Vec<EntryImage>,
    alt_spellings: Vec<String>,
    topics: Vec<String>,
}

fn brief_from_row(row: &PgRow) -> EntryBrief {
    EntryBrief {
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
    }
}

fn paginate_briefs(rows: Vec<PgRow>, page: Pagination) -> Paginated<EntryBrief> {
    let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
    Paginated {
        items: rows.iter().map(brief_from_row).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
    }
}

#[cfg(test)]
mod tests {
    // Integration tests - run with DATABASE_URL set against an ingested
    // dictionary: cargo test -p huaolelo-server -- --ignored

    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn browse_letter_excludes_reverse_index_rows() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let page = EntryRepo::new(&pool)
            .browse_letter("a", &BrowseFilters::default(), Pagination::new(1, 50))
            .await
            .expect("browse failed");

        assert!(page.items.iter().all(|e| !e.is_from_eh_only));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_falls_back_on_no_fulltext_hits() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        // Substring-only match: an infix no headword starts with still
        // resolves through the ILIKE tier.
        let page = EntryRepo::new(&pool)
            .search("loh", Pagination::new(1, 50))
            .await
            .expect("search failed");

        assert!(page.items.iter().any(|e| e.headword.contains("loh")));
    }
}
