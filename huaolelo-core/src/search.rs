//! Search query construction for the two-tier lookup.
//!
//! The primary tier is PostgreSQL full-text search over a tsvector column;
//! the input must therefore be turned into a valid tsquery before it touches
//! the database. The fallback tier (substring ILIKE) takes the raw input and
//! needs no preparation beyond parameter binding.

use crate::text::normalize_okina;

/// Characters with meaning in tsquery syntax. Replaced with spaces so user
/// input can never produce a malformed query.
const TSQUERY_OPERATORS: [char; 9] = ['&', '|', '!', ':', '(', ')', '*', '<', '>'];

/// Build a prefix-matching tsquery from raw user input.
///
/// ʻOkina variants are normalized first so `'aina` and `ʻaina` search the
/// same. Words are joined with `&` and the final term gets a `:*` suffix for
/// prefix matching. Returns `None` when the input holds no searchable words.
pub fn prefix_tsquery(input: &str) -> Option<String> {
    let cleaned: String = normalize_okina(input)
        .chars()
        .map(|c| if TSQUERY_OPERATORS.contains(&c) { ' ' } else { c })
        .collect();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    Some(format!("{}:*", words.join(" & ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_gets_prefix_suffix() {
        assert_eq!(prefix_tsquery("aloha").as_deref(), Some("aloha:*"));
    }

    #[test]
    fn multiple_words_joined_with_and() {
        assert_eq!(
            prefix_tsquery("aloha  aina").as_deref(),
            Some("aloha & aina:*")
        );
    }

    #[test]
    fn okina_is_normalized() {
        assert_eq!(
            prefix_tsquery("'aina").as_deref(),
            Some("\u{02BB}aina:*")
        );
    }

    #[test]
    fn operators_are_stripped() {
        assert_eq!(prefix_tsquery("a & b:*").as_deref(), Some("a & b:*"));
        assert_eq!(prefix_tsquery("(aloha)").as_deref(), Some("aloha:*"));
        assert_eq!(prefix_tsquery("!|&:()*<>"), None);
    }

    #[test]
    fn blank_input_yields_none() {
        assert_eq!(prefix_tsquery(""), None);
        assert_eq!(prefix_tsquery("   "), None);
    }
}
