//! Unicode utilities for Hawaiian text.
//!
//! Headwords carry the ʻokina (U+02BB) and kahakō (macron) vowels; anchors
//! and URL segments use the stripped ASCII form produced at ingestion time.
//! These helpers keep both worlds consistent when resolving links.

/// Canonical ʻokina.
pub const OKINA: char = '\u{02BB}';

/// Characters commonly typed (or scraped) in place of the ʻokina.
const OKINA_VARIANTS: [char; 5] = ['\u{2018}', '\u{2019}', '\u{0060}', '\u{00B4}', '\u{0027}'];

/// The twelve letter pages of the Hawaiian alphabet, in dictionary order.
pub const HAWAIIAN_LETTERS: [&str; 12] = [
    "a", "e", "h", "i", "k", "l", "m", "n", "o", "p", "u", "w",
];

/// Letter pages of the English-Hawaiian reverse index.
pub const ENGLISH_LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

/// Whether `letter` names a Hawaiian letter page.
pub fn is_hawaiian_letter(letter: &str) -> bool {
    HAWAIIAN_LETTERS.contains(&letter)
}

/// Whether `letter` names a reverse-index letter page.
pub fn is_english_letter(letter: &str) -> bool {
    ENGLISH_LETTERS.contains(&letter)
}

/// Normalize ʻokina variants (curly quotes, backtick, acute, apostrophe) to U+02BB.
pub fn normalize_okina(text: &str) -> String {
    text.chars()
        .map(|c| if OKINA_VARIANTS.contains(&c) { OKINA } else { c })
        .collect()
}

/// Strip all Hawaiian diacriticals for anchor matching: drop the ʻokina,
/// fold kahakō vowels to their plain forms. `ʻāina` → `aina`.
pub fn to_ascii(text: &str) -> String {
    text.chars()
        .filter(|&c| c != OKINA)
        .map(fold_kahako)
        .collect()
}

fn fold_kahako(c: char) -> char {
    match c {
        'ā' => 'a',
        'ē' => 'e',
        'ī' => 'i',
        'ō' => 'o',
        'ū' => 'u',
        'Ā' => 'A',
        'Ē' => 'E',
        'Ī' => 'I',
        'Ō' => 'O',
        'Ū' => 'U',
        _ => c,
    }
}

fn is_subscript_digit(c: char) -> bool {
    ('\u{2080}'..='\u{2089}').contains(&c)
}

/// Remove trailing Unicode subscript digits. `ā₁` → `ā`.
pub fn strip_subscript(text: &str) -> &str {
    text.trim_end_matches(is_subscript_digit).trim_end()
}

/// Extract trailing subscript digits as a plain string. `ā₁` → `Some("1")`.
pub fn extract_subscript(text: &str) -> Option<String> {
    let tail: String = text
        .chars()
        .rev()
        .take_while(|&c| is_subscript_digit(c))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .map(|c| char::from_u32(c as u32 - 0x2080 + '0' as u32).unwrap_or('0'))
        .collect();

    if tail.is_empty() {
        None
    } else {
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_okina_variants() {
        assert_eq!(normalize_okina("\u{2018}aina"), "\u{02BB}aina");
        assert_eq!(normalize_okina("'aina"), "\u{02BB}aina");
        assert_eq!(normalize_okina("`aina"), "\u{02BB}aina");
        // Already canonical text passes through untouched.
        assert_eq!(normalize_okina("\u{02BB}ōlelo"), "\u{02BB}ōlelo");
    }

    #[test]
    fn folds_to_ascii() {
        assert_eq!(to_ascii("\u{02BB}āina"), "aina");
        assert_eq!(to_ascii("kūpuna"), "kupuna");
        assert_eq!(to_ascii("Ōlelo"), "Olelo");
        assert_eq!(to_ascii("aloha"), "aloha");
    }

    #[test]
    fn strips_and_extracts_subscripts() {
        assert_eq!(strip_subscript("ā₁"), "ā");
        assert_eq!(strip_subscript("pau₂₃"), "pau");
        assert_eq!(strip_subscript("aloha"), "aloha");

        assert_eq!(extract_subscript("ā₁").as_deref(), Some("1"));
        assert_eq!(extract_subscript("pau₂₃").as_deref(), Some("23"));
        assert_eq!(extract_subscript("aloha"), None);
    }

    #[test]
    fn letter_membership() {
        assert!(is_hawaiian_letter("a"));
        assert!(is_hawaiian_letter("w"));
        assert!(!is_hawaiian_letter("b"));
        assert!(!is_hawaiian_letter("A"));

        assert!(is_english_letter("b"));
        assert!(!is_english_letter("ā"));
    }
}
