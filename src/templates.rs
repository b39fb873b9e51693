use std::fs;
use std::path::Path;

use log::warn;

use crate::render::SafeHtml;
use crate::types::Page;
use crate::utils::{escape_attr, escape_html};

/// Shown in place of a part whose template cannot be rendered. The shared
/// chrome still goes out, only the inner content degrades.
pub const FALLBACK_PART: &str = "Failed to load ...";

const DEFAULT_SHELL: &str = "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{{TITLE}}</title>\n<link rel=\"stylesheet\" href=\"/assets/wiki.css\">\n</head>\n<body>\n<div class=\"page\">{{CONTENT}}</div>\n</body>\n</html>\n";

const DEFAULT_VIEW: &str = "<h1>{{TITLE}}</h1>\n<div class=\"body\">{{CONTENT}}</div>\n<p><a href=\"/edit/{{TITLE}}\">Edit this page</a></p>\n";

const DEFAULT_EDIT: &str = "<h1>Editing {{TITLE}}</h1>\n<form action=\"/save/{{TITLE}}\" method=\"POST\">\n<textarea name=\"body\" rows=\"20\" cols=\"80\">{{CONTENT}}</textarea>\n<div><button type=\"submit\">Save</button></div>\n</form>\n";

/// The template collaborator: the three templates (`main`, `view`, `edit`)
/// loaded once at startup and read-only afterwards.
///
/// Templates use `{{TITLE}}` and `{{CONTENT}}` placeholders. Per-operation
/// parts are rendered first, then wrapped in the shared `main` chrome.
pub struct TemplateSet {
    shell: String,
    view: String,
    edit: String,
}

impl TemplateSet {
    /// Load templates from a directory, falling back to the built-in
    /// defaults for any file that cannot be read.
    pub fn load(dir: &Path) -> Self {
        Self {
            shell: read_or_default(&dir.join("main.html"), DEFAULT_SHELL),
            view: read_or_default(&dir.join("view.html"), DEFAULT_VIEW),
            edit: read_or_default(&dir.join("edit.html"), DEFAULT_EDIT),
        }
    }

    /// Assemble the full view page for already-rendered content.
    pub fn view_page(&self, title: &str, content: &SafeHtml) -> String {
        let part = render_part(&self.view, title, content.as_str());
        self.render_shell(title, &part)
    }

    /// Assemble the edit form. The raw body is escaped here, on its way
    /// into the textarea; it is never embedded unescaped.
    pub fn edit_page(&self, page: &Page) -> String {
        let body = escape_html(&page.body_text());
        let part = render_part(&self.edit, page.title.as_str(), &body);
        self.render_shell(page.title.as_str(), &part)
    }

    fn render_shell(&self, title: &str, part: &str) -> String {
        if !self.shell.contains("{{CONTENT}}") {
            warn!("main template has no content slot, using built-in shell");
            return DEFAULT_SHELL
                .replace("{{TITLE}}", &escape_attr(title))
                .replace("{{CONTENT}}", part);
        }
        self.shell
            .replace("{{TITLE}}", &escape_attr(title))
            .replace("{{CONTENT}}", part)
    }
}

fn render_part(tpl: &str, title: &str, content: &str) -> String {
    if !tpl.contains("{{CONTENT}}") {
        warn!("template has no content slot, degrading to fallback");
        return FALLBACK_PART.to_string();
    }
    tpl.replace("{{TITLE}}", &escape_attr(title))
        .replace("{{CONTENT}}", content)
}

fn read_or_default(path: &Path, default: &str) -> String {
    match fs::read_to_string(path) {
        Ok(tpl) => tpl,
        Err(e) => {
            warn!("template {:?} not readable ({}), using built-in default", path, e);
            default.to_string()
        }
    }
}
