//! The five merged source dictionaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source dictionary tag as stored in `sense.source_dict`,
/// `example.source_dict`, and `eng_haw_entry.source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DictSource {
    #[serde(rename = "PE")]
    Pe,
    #[serde(rename = "MK")]
    Mk,
    Andrews,
    #[serde(rename = "EH")]
    Eh,
    Other,
}

impl DictSource {
    /// The tag as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pe => "PE",
            Self::Mk => "MK",
            Self::Andrews => "Andrews",
            Self::Eh => "EH",
            Self::Other => "Other",
        }
    }

    /// Full dictionary name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pe => "Pukui-Elbert",
            Self::Mk => "Māmaka Kaiao",
            Self::Andrews => "Andrews",
            Self::Eh => "English-Hawaiian",
            Self::Other => "Other",
        }
    }

    /// Tag parsed leniently: unrecognized values become `Other` rather than
    /// failing a whole row.
    pub fn from_db(value: &str) -> Self {
        value.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for DictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized source tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dictionary source: {0}")]
pub struct ParseSourceError(pub String);

impl FromStr for DictSource {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PE" => Ok(Self::Pe),
            "MK" => Ok(Self::Mk),
            "Andrews" => Ok(Self::Andrews),
            "EH" => Ok(Self::Eh),
            "Other" => Ok(Self::Other),
            other => Err(ParseSourceError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_db_tags() {
        for src in [
            DictSource::Pe,
            DictSource::Mk,
            DictSource::Andrews,
            DictSource::Eh,
            DictSource::Other,
        ] {
            assert_eq!(src.as_str().parse::<DictSource>().unwrap(), src);
        }
    }

    #[test]
    fn unknown_tag_errors_strict_but_folds_lenient() {
        assert!("PU".parse::<DictSource>().is_err());
        assert_eq!(DictSource::from_db("PU"), DictSource::Other);
    }
}
