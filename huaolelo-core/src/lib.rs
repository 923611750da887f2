//! huaolelo-core: shared domain logic for the merged Hawaiian-English dictionary
//!
//! Everything here is pure: Hawaiian text normalization, search query
//! construction, the dictionary source enum, the topical code table, and the
//! word-of-the-day seed. Database access and HTTP live in huaolelo-server.

pub mod search;
pub mod seed;
pub mod source;
pub mod text;
pub mod topics;

pub use search::prefix_tsquery;
pub use source::{DictSource, ParseSourceError};
pub use topics::TopicMeta;
