//! Shared page shell: document head, header navigation, footer.

use std::fmt::Write;

use super::escape;

const NAV_ITEMS: [(&str, &str); 8] = [
    ("/browse", "Browse"),
    ("/search", "Search"),
    ("/concordance", "Concordance"),
    ("/topics", "Topics"),
    ("/eng-haw", "English-Hawaiian"),
    ("/wordlists", "Word Lists"),
    ("/references", "Library"),
    ("/statistics", "Statistics"),
];

/// Minimal presentation defaults so the tables and cards read as such.
const STYLE: &str = r#"
    body { font-family: Georgia, serif; margin: 0 auto; max-width: 64rem; padding: 0 1rem; }
    header nav a { margin-right: .75rem; }
    table { border-collapse: collapse; width: 100%; }
    th, td { border-bottom: 1px solid #ddd; padding: .35rem .5rem; text-align: left; vertical-align: top; }
    .badge { font-size: .7rem; border: 1px solid #999; border-radius: .25rem; padding: 0 .25rem; margin-right: .25rem; }
    .card { border: 1px solid #ddd; border-radius: .35rem; padding: .75rem; margin: .5rem 0; }
    .muted { color: #666; }
    .small { font-size: .85rem; }
    .letter-nav a { margin-right: .5rem; }
    .letter-nav .active { font-weight: bold; }
    .pagination a, .pagination span { margin-right: .4rem; }
    .pagination .current { font-weight: bold; }
    mark { background: #fe7; }
"#;

/// Wrap a page body in the shared shell.
pub fn page(title: &str, active: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 2048);

    let _ = write!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} · Huaʻōlelo</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(title)
    );

    html.push_str("<header>\n<p><a href=\"/\"><strong>Huaʻōlelo</strong></a> · merged Hawaiian-English dictionary</p>\n<nav>");
    for (href, label) in NAV_ITEMS {
        if href == active {
            let _ = write!(html, "<a href=\"{href}\"><strong>{label}</strong></a>");
        } else {
            let _ = write!(html, "<a href=\"{href}\">{label}</a>");
        }
    }
    html.push_str("</nav>\n</header>\n<main>\n");

    html.push_str(body);

    html.push_str(
        "\n</main>\n<footer>\n<p class=\"small muted\">Dictionary text from the Pukui-Elbert, \
         Māmaka Kaiao, and Andrews dictionaries, via the trussel2.com archive.</p>\n\
         </footer>\n</body>\n</html>\n",
    );

    html
}

/// Full 404 page for an unknown resource.
pub fn not_found(resource: &str, id: &str) -> String {
    let body = format!(
        "<h1>Not found</h1>\n<p class=\"muted\">No {} matching <code>{}</code>.</p>\n\
         <p><a href=\"/\">Back to the dictionary</a></p>",
        escape(resource),
        escape(id)
    );
    page("Not found", "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_in_shell() {
        let html = page("Browse", "/browse", "<h1>Browse</h1>");
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<h1>Browse</h1>"));
        assert!(html.contains("<title>Browse · Huaʻōlelo</title>"));
        // Active nav item is emphasized.
        assert!(html.contains("<a href=\"/browse\"><strong>Browse</strong></a>"));
    }

    #[test]
    fn escapes_title_and_not_found_id() {
        let html = page("<script>", "", "");
        assert!(html.contains("&lt;script&gt;"));

        let html = not_found("entry", "<img>");
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }
}
