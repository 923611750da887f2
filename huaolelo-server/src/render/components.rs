//! Reusable page fragments: letter navigation, source badges, pagination
//! controls, entry tables, keyword highlighting.

use std::fmt::Write;

use huaolelo_core::DictSource;

use crate::db::repos::{EngHawEntry, EntryBrief};
use crate::models::Paginated;

use super::escape;

/// Characters of the first-definition column before truncation.
const SNIPPET_LEN: usize = 120;

/// Letter navigation strip. `base` is the path prefix the letter is appended
/// to, e.g. `/browse`.
pub fn letter_nav(base: &str, letters: &[&str], active: Option<&str>) -> String {
    let mut html = String::from("<div class=\"letter-nav\">");
    for &letter in letters {
        let class = if active == Some(letter) { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"{base}/{letter}\"{class}>{}</a>",
            letter.to_uppercase()
        );
    }
    html.push_str("</div>");
    html
}

/// Badges for the per-entry source flags.
pub fn source_badges(in_pe: bool, in_mk: bool, in_andrews: bool, is_from_eh_only: bool) -> String {
    let mut html = String::new();
    if in_pe {
        html.push_str("<span class=\"badge\">PE</span>");
    }
    if in_mk {
        html.push_str("<span class=\"badge\">MK</span>");
    }
    if in_andrews {
        html.push_str("<span class=\"badge\">And</span>");
    }
    if is_from_eh_only {
        html.push_str("<span class=\"badge\">EH</span>");
    }
    html
}

/// Badge for a single source tag (reverse-index rows, senses, examples).
pub fn source_badge(source: DictSource) -> String {
    format!(
        "<span class=\"badge\" title=\"{}\">{}</span>",
        source.label(),
        source.as_str()
    )
}

/// Numbered pagination controls: prev/next plus a window of pages around the
/// current one, with first/last and elision. Renders nothing for one page.
pub fn pagination<T>(paginated: &Paginated<T>, href: impl Fn(u32) -> String) -> String {
    let total_pages = paginated.total_pages();
    if total_pages <= 1 {
        return String::new();
    }

    let window = paginated.page_window(3);
    let (start, end) = (*window.start(), *window.end());
    let current = paginated.page;

    let mut html = String::from("<div class=\"pagination\">");
    if paginated.has_prev() {
        let _ = write!(html, "<a href=\"{}\">&laquo; Prev</a>", href(current - 1));
    }
    if start > 1 {
        let _ = write!(html, "<a href=\"{}\">1</a>", href(1));
    }
    if start > 2 {
        html.push_str("<span>&hellip;</span>");
    }
    for p in window {
        if p == current {
            let _ = write!(html, "<span class=\"current\">{p}</span>");
        } else {
            let _ = write!(html, "<a href=\"{}\">{p}</a>", href(p));
        }
    }
    if end < total_pages - 1 {
        html.push_str("<span>&hellip;</span>");
    }
    if end < total_pages {
        let _ = write!(html, "<a href=\"{}\">{total_pages}</a>", href(total_pages));
    }
    if paginated.has_next() {
        let _ = write!(html, "<a href=\"{}\">Next &raquo;</a>", href(current + 1));
    }
    html.push_str("</div>");
    html
}

/// Headword cell: display form linked to the entry page, subscript appended.
pub fn headword_link(entry: &EntryBrief) -> String {
    let display = if entry.headword_display.is_empty() {
        &entry.headword
    } else {
        &entry.headword_display
    };
    let mut html = format!(
        "<a href=\"/entry/{}\">{}",
        escape(&entry.id),
        escape(display)
    );
    if let Some(subscript) = &entry.subscript {
        let _ = write!(html, "<sub>{}</sub>", escape(subscript));
    }
    html.push_str("</a>");
    html
}

/// First-definition snippet for table cells.
pub fn definition_snippet(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => {
            let truncated: String = text.chars().take(SNIPPET_LEN).collect();
            if text.chars().count() > SNIPPET_LEN {
                format!("{}&hellip;", escape(&truncated))
            } else {
                escape(&truncated)
            }
        }
        _ => "&mdash;".to_owned(),
    }
}

/// The standard headword/sources/definition table, with the standard empty
/// message when there is nothing to show.
pub fn entry_table(entries: &[EntryBrief]) -> String {
    if entries.is_empty() {
        return "<p class=\"muted\">No entries found.</p>".to_owned();
    }

    let mut html = String::from(
        "<table>\n<thead><tr><th>Headword</th><th>Sources</th><th>First Definition</th></tr></thead>\n<tbody>\n",
    );
    for entry in entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"small\">{}</td></tr>\n",
            headword_link(entry),
            source_badges(entry.in_pe, entry.in_mk, entry.in_andrews, entry.is_from_eh_only),
            definition_snippet(entry.definition_text.as_deref()),
        );
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Reverse-index table: English word, source, Hawaiian translations.
pub fn eng_haw_table(entries: &[EngHawEntry]) -> String {
    if entries.is_empty() {
        return "<p class=\"muted\">No entries found.</p>".to_owned();
    }

    let mut html = String::from(
        "<table>\n<thead><tr><th>English</th><th>Source</th><th>Hawaiian</th></tr></thead>\n<tbody>\n",
    );
    for entry in entries {
        let translations: Vec<String> = entry
            .translations
            .iter()
            .filter_map(|t| {
                let word = t.hawaiian_word.as_deref()?;
                Some(match t.target_anchor.as_deref() {
                    Some(anchor) if !anchor.is_empty() => format!(
                        "<a href=\"/entry/{}\">{}</a>",
                        super::encode_segment(anchor),
                        escape(word)
                    ),
                    _ => escape(word),
                })
            })
            .collect();
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&entry.english_word),
            source_badge(entry.source),
            translations.join(", "),
        );
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Escape `text` and wrap case-insensitive occurrences of `word` in
/// `<mark>`. Falls back to plain escaping when lowercasing shifts byte
/// offsets (no Hawaiian text does).
pub fn highlight(text: &str, word: &str) -> String {
    if word.is_empty() {
        return escape(text);
    }

    let haystack = text.to_lowercase();
    let needle = word.to_lowercase();
    if haystack.len() != text.len() {
        return escape(text);
    }

    let mut html = String::with_capacity(text.len() + 16);
    let mut rest = 0;
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            let mut next = start + 1;
            while next < haystack.len() && !haystack.is_char_boundary(next) {
                next += 1;
            }
            from = next;
            continue;
        }
        html.push_str(&escape(&text[rest..start]));
        let _ = write!(html, "<mark>{}</mark>", escape(&text[start..end]));
        rest = end;
        from = end;
    }
    html.push_str(&escape(&text[rest..]));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;

    fn brief(id: &str, headword: &str) -> EntryBrief {
        EntryBrief {
            id: id.to_owned(),
            headword: headword.to_owned(),
            headword_display: headword.to_owned(),
            subscript: None,
            in_pe: true,
            in_mk: false,
            in_andrews: false,
            is_from_eh_only: false,
            definition_text: Some("Love, affection".to_owned()),
            pos_raw: Some("n.".to_owned()),
        }
    }

    #[test]
    fn letter_nav_marks_active() {
        let html = letter_nav("/browse", &["a", "e"], Some("e"));
        assert!(html.contains("<a href=\"/browse/a\">A</a>"));
        assert!(html.contains("<a href=\"/browse/e\" class=\"active\">E</a>"));
    }

    #[test]
    fn badges_follow_flags() {
        let html = source_badges(true, false, true, false);
        assert!(html.contains(">PE<"));
        assert!(html.contains(">And<"));
        assert!(!html.contains(">MK<"));
    }

    #[test]
    fn pagination_windows_and_elides() {
        let paginated: Paginated<()> = Paginated {
            items: vec![],
            total: 1000,
            page: 50,
            per_page: 10,
        };
        let html = pagination(&paginated, |p| format!("/browse/a?page={p}"));
        assert!(html.contains("<span class=\"current\">50</span>"));
        assert!(html.contains("href=\"/browse/a?page=47\""));
        assert!(html.contains("href=\"/browse/a?page=53\""));
        assert!(html.contains("href=\"/browse/a?page=100\""));
        assert!(html.contains("&hellip;"));
        assert!(html.contains("Prev"));
        assert!(html.contains("Next"));
    }

    #[test]
    fn pagination_hidden_for_single_page() {
        let paginated: Paginated<()> = Paginated::empty(Pagination::new(1, 10));
        assert!(pagination(&paginated, |p| format!("?page={p}")).is_empty());
    }

    #[test]
    fn entry_table_renders_rows_and_empty_state() {
        let html = entry_table(&[brief("42", "aloha")]);
        assert!(html.contains("<a href=\"/entry/42\">aloha</a>"));
        assert!(html.contains("Love, affection"));

        assert_eq!(entry_table(&[]), "<p class=\"muted\">No entries found.</p>");
    }

    #[test]
    fn subscript_renders_inside_link() {
        let mut entry = brief("1", "ā");
        entry.subscript = Some("1".to_owned());
        assert!(headword_link(&entry).contains("<sub>1</sub>"));
    }

    #[test]
    fn snippet_truncates_long_definitions() {
        let long = "x".repeat(200);
        let html = definition_snippet(Some(&long));
        assert!(html.ends_with("&hellip;"));
        assert_eq!(definition_snippet(None), "&mdash;");
    }

    #[test]
    fn highlight_marks_case_insensitively() {
        let html = highlight("Aloha kākou, e nā hoaaloha.", "aloha");
        assert_eq!(
            html,
            "<mark>Aloha</mark> kākou, e nā hoa<mark>aloha</mark>."
        );
    }

    #[test]
    fn highlight_escapes_surroundings() {
        let html = highlight("<b>aloha</b>", "aloha");
        assert_eq!(html, "&lt;b&gt;<mark>aloha</mark>&lt;/b&gt;");
    }
}
