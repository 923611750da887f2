//! Entry detail page: the full card stack for one headword.

use std::fmt::Write;

use huaolelo_core::text::{strip_subscript, to_ascii};
use huaolelo_core::topics;

use crate::db::repos::entries::{EntryDetail, Example, LinkedWord, Sense};

use super::components::{source_badge, source_badges};
use super::{archive_url, encode_segment, escape};

/// Link target for an anchor; falls back to the ASCII fold of a surface form
/// when ingestion recorded no anchor.
fn entry_href(anchor: Option<&str>, surface: &str) -> String {
    let anchor = match anchor {
        Some(anchor) if !anchor.is_empty() => anchor.to_owned(),
        _ => to_ascii(strip_subscript(surface)),
    };
    format!("/entry/{}", encode_segment(&anchor))
}

/// Render the full detail body.
pub fn detail(detail: &EntryDetail) -> String {
    let entry = &detail.entry;
    let mut html = String::with_capacity(4096);

    // Header
    let display = if entry.headword_display.is_empty() {
        &entry.headword
    } else {
        &entry.headword_display
    };
    let _ = write!(html, "<h1>{}", escape(display));
    if let Some(subscript) = &entry.subscript {
        let _ = write!(html, "<sub>{}</sub>", escape(subscript));
    }
    let _ = write!(
        html,
        "</h1>\n<p>{}</p>\n",
        source_badges(entry.in_pe, entry.in_mk, entry.in_andrews, entry.is_from_eh_only)
    );

    let mut meta = Vec::new();
    if let Some(syllables) = &entry.syllable_breakdown {
        meta.push(escape(syllables));
    }
    if let Some(dialect) = &entry.dialect {
        meta.push(format!("dialect: {}", escape(dialect)));
    }
    if let Some(register) = &entry.usage_register {
        meta.push(escape(register));
    }
    if entry.is_loanword {
        let mut note = String::from("loanword");
        if let Some(source) = &entry.loan_source {
            let _ = write!(note, " from {}", escape(source));
        }
        if let Some(language) = &entry.loan_language {
            let _ = write!(note, " ({})", escape(language));
        }
        meta.push(note);
    }
    if !meta.is_empty() {
        let _ = write!(html, "<p class=\"small muted\">{}</p>\n", meta.join(" · "));
    }

    if !detail.alt_spellings.is_empty() {
        let spellings: Vec<String> = detail.alt_spellings.iter().map(|s| escape(s)).collect();
        let _ = write!(
            html,
            "<p class=\"small muted\">Also spelled: {}</p>\n",
            spellings.join(", ")
        );
    }

    // Etymology
    if !detail.etymologies.is_empty() {
        html.push_str("<h2>Etymology</h2>\n");
        for etymology in &detail.etymologies {
            html.push_str("<div class=\"card small\">");
            if let (Some(language), Some(form)) =
                (&etymology.proto_language, &etymology.proto_form)
            {
                let _ = write!(html, "<em>{} {}</em>", escape(language), escape(form));
                if let Some(meaning) = &etymology.meaning {
                    let _ = write!(html, ", {}", escape(meaning));
                }
                if let Some(qualifier) = &etymology.qualifier {
                    let _ = write!(html, " <span class=\"muted\">({})</span>", escape(qualifier));
                }
            } else if let Some(raw) = &etymology.raw_text {
                html.push_str(&escape(raw));
            }
            if let Some(url) = &etymology.pollex_url {
                let _ = write!(
                    html,
                    " <a href=\"{}\" class=\"small\">Pollex</a>",
                    escape(url)
                );
            }
            html.push_str("</div>\n");
        }
    }

    // Definitions
    if !detail.senses.is_empty() {
        html.push_str("<h2>Definitions</h2>\n");
        for sense in &detail.senses {
            html.push_str(&render_sense(sense));
        }
    }

    // Examples
    if !detail.examples.is_empty() {
        html.push_str("<h2>Examples</h2>\n");
        for example in &detail.examples {
            html.push_str(&render_example(example));
        }
    }

    // Cross-references
    if !detail.cross_refs.is_empty() {
        html.push_str("<h2>See Also</h2>\n<p>");
        for cross_ref in &detail.cross_refs {
            let surface = cross_ref
                .target_headword
                .as_deref()
                .or(cross_ref.target_anchor.as_deref())
                .unwrap_or_default();
            if surface.is_empty() {
                continue;
            }
            let _ = write!(
                html,
                "<a class=\"badge\" href=\"{}\">{}</a> ",
                entry_href(cross_ref.target_anchor.as_deref(), surface),
                escape(surface)
            );
        }
        html.push_str("</p>\n");
    }

    // Grammar references
    if !detail.grammar_refs.is_empty() {
        html.push_str("<h2>Grammar</h2>\n<ul>");
        for grammar_ref in &detail.grammar_refs {
            html.push_str("<li>");
            let label = grammar_ref
                .label
                .as_deref()
                .or(grammar_ref.section.as_deref())
                .unwrap_or("Grammar section");
            match &grammar_ref.pdf_url {
                Some(url) => {
                    let _ = write!(
                        html,
                        "<a href=\"{}\">{}</a>",
                        escape(&archive_url(url)),
                        escape(label)
                    );
                }
                None => html.push_str(&escape(label)),
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>\n");
    }

    // Hawaiian glosses
    if !detail.glosses.is_empty() {
        html.push_str("<h2>Hawaiian Glosses</h2>\n<ul>");
        for gloss in &detail.glosses {
            if let Some(text) = &gloss.gloss {
                html.push_str("<li>");
                html.push_str(&escape(text));
                if let Some(source_ref) = &gloss.source_ref {
                    let _ = write!(html, " <span class=\"muted small\">{}</span>", escape(source_ref));
                }
                html.push_str("</li>");
            }
        }
        html.push_str("</ul>\n");
    }

    // Images
    if !detail.images.is_empty() {
        html.push_str("<h2>Images</h2>\n<p>");
        for image in &detail.images {
            let Some(thumbnail) = image.thumbnail_url.as_deref().or(image.full_image_url.as_deref())
            else {
                continue;
            };
            let full = image.full_image_url.as_deref().unwrap_or(thumbnail);
            let alt = image.alt_text.as_deref().unwrap_or(display.as_str());
            let _ = write!(
                html,
                "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a> ",
                escape(&archive_url(full)),
                escape(&archive_url(thumbnail)),
                escape(alt)
            );
        }
        html.push_str("</p>\n");
    }

    // Topics
    if !detail.topics.is_empty() {
        html.push_str("<h2>Topics</h2>\n<p>");
        for code in &detail.topics {
            let _ = write!(
                html,
                "<a class=\"badge\" href=\"/topics/{}\">{}</a> ",
                encode_segment(code),
                escape(topics::display_name(code))
            );
        }
        html.push_str("</p>\n");
    }

    // Sub-entries
    if !detail.children.is_empty() {
        html.push_str("<h2>Sub-entries</h2>\n");
        for child in &detail.children {
            let _ = write!(
                html,
                "<div class=\"card\"><p>{} {}</p><p class=\"small muted\">{}</p></div>\n",
                super::components::headword_link(child),
                source_badges(child.in_pe, child.in_mk, child.in_andrews, child.is_from_eh_only),
                super::components::definition_snippet(child.definition_text.as_deref()),
            );
        }
    }

    html
}

fn render_sense(sense: &Sense) -> String {
    let mut html = String::from("<div class=\"card\">");

    let _ = write!(
        html,
        "<p><strong>{}.</strong> {}",
        sense.sense_num,
        source_badge(sense.source_dict)
    );
    if let Some(pos) = sense.pos_raw.as_deref().or(sense.pos_english.as_deref()) {
        let _ = write!(html, " <em class=\"small muted\">{}</em>", escape(pos));
    }
    html.push_str("</p>");

    if let Some(definition) = &sense.definition_text {
        let _ = write!(html, "<p>{}</p>", escape(definition));
    }
    if let Some(gloss) = &sense.hawaiian_gloss {
        let _ = write!(html, "<p class=\"small muted\">{}</p>", escape(gloss));
    }

    if !sense.sub_definitions.is_empty() {
        html.push_str("<ol type=\"a\">");
        for sub in &sense.sub_definitions {
            html.push_str("<li>");
            html.push_str(&escape(&sub.text));
            let mut flags = Vec::new();
            if sub.is_figurative {
                flags.push("fig.");
            }
            if sub.is_rare {
                flags.push("rare");
            }
            if sub.is_archaic {
                flags.push("archaic");
            }
            if !flags.is_empty() {
                let _ = write!(html, " <em class=\"small muted\">{}</em>", flags.join(", "));
            }
            for code in &sub.domains {
                let _ = write!(
                    html,
                    " <a class=\"badge\" href=\"/topics/{}\">{}</a>",
                    encode_segment(code),
                    escape(code)
                );
            }
            html.push_str(&linked_words(&sub.linked_words));
            html.push_str("</li>");
        }
        html.push_str("</ol>");
    }

    html.push_str(&linked_words(&sense.linked_words));
    html.push_str("</div>\n");
    html
}

fn linked_words(words: &[LinkedWord]) -> String {
    let mut html = String::new();
    for word in words {
        let _ = write!(
            html,
            " <a href=\"{}\">{}</a>",
            entry_href(word.target_anchor.as_deref(), &word.surface),
            escape(&word.surface)
        );
    }
    html
}

fn render_example(example: &Example) -> String {
    let mut html = String::from("<div class=\"card\">");
    if let Some(hawaiian) = &example.hawaiian_text {
        let _ = write!(html, "<p><em>{}</em></p>", escape(hawaiian));
    }
    if let Some(english) = &example.english_text {
        let _ = write!(html, "<p class=\"small\">{}</p>", escape(english));
    }
    if let Some(note) = &example.note {
        let _ = write!(html, "<p class=\"small muted\">{}</p>", escape(note));
    }

    let mut refs = Vec::new();
    if let Some(number) = &example.olelo_noeau_num {
        refs.push(format!("ʻŌlelo Noʻeau {}", escape(number)));
    }
    if let Some(bible_ref) = &example.bible_ref {
        refs.push(escape(bible_ref));
    }
    if !refs.is_empty() || example.source_ref_url.is_some() {
        let _ = write!(
            html,
            "<p class=\"small muted\">{} {}",
            source_badge(example.source_dict),
            refs.join(" · ")
        );
        if let Some(url) = &example.source_ref_url {
            let _ = write!(html, " <a href=\"{}\">source</a>", escape(url));
        }
        html.push_str("</p>");
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::entries::{Entry, EntryDetail};

    fn bare_entry() -> Entry {
        Entry {
            id: "58645".into(),
            headword: "aloha".into(),
            headword_display: "aloha".into(),
            headword_ascii: "aloha".into(),
            subscript: None,
            letter_page: "a".into(),
            display_type: "main".into(),
            parent_entry_id: None,
            pdf_page: None,
            in_pe: true,
            in_mk: false,
            in_mk_addendum: false,
            in_andrews: true,
            in_placenames: false,
            is_from_eh_only: false,
            syllable_breakdown: Some("a.lo.ha".into()),
            is_basic_vocab: true,
            dialect: None,
            usage_register: None,
            is_loanword: false,
            loan_source: None,
            loan_language: None,
            source_tag: None,
        }
    }

    fn bare_detail() -> EntryDetail {
        EntryDetail {
            entry: bare_entry(),
            senses: vec![],
            examples: vec![],
            etymologies: vec![],
            cross_refs: vec![],
            grammar_refs: vec![],
            glosses: vec![],
            images: vec![],
            alt_spellings: vec![],
            topics: vec![],
            children: vec![],
        }
    }

    #[test]
    fn renders_header_and_meta() {
        let html = detail(&bare_detail());
        assert!(html.contains("<h1>aloha</h1>"));
        assert!(html.contains("a.lo.ha"));
        assert!(html.contains(">PE<"));
        // Empty sections do not render their headings.
        assert!(!html.contains("<h2>Definitions</h2>"));
        assert!(!html.contains("<h2>Examples</h2>"));
    }

    #[test]
    fn topic_codes_render_display_names() {
        let mut d = bare_detail();
        d.topics = vec!["WIN".into()];
        let html = detail(&d);
        assert!(html.contains("href=\"/topics/WIN\""));
        assert!(html.contains("Wind, Rain, Clouds"));
    }

    #[test]
    fn anchor_fallback_folds_surface() {
        assert_eq!(entry_href(None, "ʻāina₁"), "/entry/aina");
        assert_eq!(entry_href(Some("aina"), "ignored"), "/entry/aina");
    }
}
