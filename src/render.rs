use std::fmt;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::utils::escape_html;

/// How raw page bodies become HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Escape everything, interpret nothing. The body is shown verbatim.
    EscapeOnly,
    /// Render the body as Markdown with smart punctuation.
    #[default]
    Markdown,
}

impl RenderPolicy {
    /// Parse a policy name as found in configuration. Unknown names fall
    /// back to the default Markdown policy.
    pub fn from_name(name: &str) -> Self {
        match name {
            "escape" => RenderPolicy::EscapeOnly,
            _ => RenderPolicy::Markdown,
        }
    }
}

/// HTML that is safe to embed in a response body.
///
/// Only the rendering and link-rewriting functions can construct one, so a
/// raw string can never reach a template slot unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub(crate) fn from_rendered(html: String) -> Self {
        SafeHtml(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn concat(mut self, other: SafeHtml) -> SafeHtml {
        self.0.push_str(&other.0);
        self
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render raw body bytes to safe HTML under the given policy.
pub fn render_body(body: &[u8], policy: RenderPolicy) -> SafeHtml {
    let text = String::from_utf8_lossy(body);
    match policy {
        RenderPolicy::EscapeOnly => SafeHtml(escape_html(&text)),
        RenderPolicy::Markdown => SafeHtml(markdown_to_html(&text)),
    }
}

fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    // Raw HTML embedded in a page body is demoted to literal text so the
    // serializer escapes it. Markup only enters the output through
    // Markdown syntax itself.
    let parser = Parser::new_ext(text, options).map(|ev| match ev {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
