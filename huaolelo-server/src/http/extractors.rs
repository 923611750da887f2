//! Custom axum extractors.
//!
//! Letter-page parameters are validated against the relevant alphabet before
//! a handler runs; anything else is a 404, not a malformed query.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use huaolelo_core::text;

use super::error::PageError;

/// A validated Hawaiian letter page from the path.
pub struct HawaiianLetter(pub String);

impl<S> FromRequestParts<S> for HawaiianLetter
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| PageError::NotFound {
                resource: "letter page",
                id: String::new(),
            })?;

        let letter = raw.to_lowercase();
        if !text::is_hawaiian_letter(&letter) {
            return Err(PageError::NotFound {
                resource: "letter page",
                id: raw,
            });
        }
        Ok(Self(letter))
    }
}

/// A validated reverse-index letter page from the path.
pub struct EnglishLetter(pub String);

impl<S> FromRequestParts<S> for EnglishLetter
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| PageError::NotFound {
                resource: "letter page",
                id: String::new(),
            })?;

        let letter = raw.to_lowercase();
        if !text::is_english_letter(&letter) {
            return Err(PageError::NotFound {
                resource: "letter page",
                id: raw,
            });
        }
        Ok(Self(letter))
    }
}
