use std::sync::OnceLock;

use regex::Regex;

use crate::render::SafeHtml;

fn wiki_link_re() -> &'static Regex {
    static WIKI_LINK: OnceLock<Regex> = OnceLock::new();
    WIKI_LINK.get_or_init(|| Regex::new(r"\[([A-Za-z0-9]+)\]").expect("invalid wiki link regex"))
}

/// Rewrite `[Token]` occurrences in rendered HTML into view links.
///
/// Runs on the post-render HTML, not the raw body, with a non-overlapping
/// leftmost scan. Purely syntactic: whether the target page exists is
/// never checked, since navigating to a missing page is how new pages get
/// created.
pub fn rewrite_wiki_links(html: SafeHtml) -> SafeHtml {
    let rewritten = wiki_link_re()
        .replace_all(html.as_str(), "<a href=\"/view/$1\">$1</a>")
        .into_owned();
    SafeHtml::from_rendered(rewritten)
}
