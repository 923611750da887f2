//! Repository layer: read-only queries against the dictionary schema.
//!
//! Patterns shared by every repository:
//! - list queries compute their exact total via COUNT(*) OVER()
//! - offsets come from a validated Pagination
//! - the schema is populated by the ingestion pipeline and never written here

pub mod concordance;
pub mod eng_haw;
pub mod entries;
pub mod library;
pub mod stats;
pub mod topics;
pub mod wordlists;

pub use concordance::{ConcordanceRepo, Sentence};
pub use eng_haw::{EngHawEntry, EngHawRepo, Translation};
pub use entries::{BrowseFilters, EntryBrief, EntryDetail, EntryRepo};
pub use library::{
    DictionarySource, GlossSourceText, ImageDetail, LibraryRepo, Preface, PrefaceSummary,
    Reference, StructuralPage, StructuralPageSummary,
};
pub use stats::{LetterCount, Overview, SourceCount, StatsRepo, TableCount};
pub use topics::{Topic, TopicRepo, TopicWithCount};
pub use wordlists::{Wordlist, WordlistEntry, WordlistLink, WordlistRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
