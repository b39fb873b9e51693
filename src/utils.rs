use std::path::{Component, Path};

use crate::errors::WikiError;
use crate::render::SafeHtml;

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values.
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Collapse a request path into clean relative segments.
pub fn normalize_request_path(req_path: &str) -> String {
    let trimmed = req_path.trim_start_matches('/');
    let mut parts = Vec::new();
    for part in trimmed.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        parts.push(part);
    }
    parts.join("/")
}

/// Reject paths that could climb out of the serving directory.
pub fn ensure_safe_path(req_path: &str) -> Result<(), WikiError> {
    let path = Path::new(req_path);
    for comp in path.components() {
        match comp {
            Component::ParentDir => return Err(WikiError::InvalidPath),
            Component::Normal(seg) => {
                if seg.is_empty() {
                    return Err(WikiError::InvalidPath);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Determine content type for a static asset based on its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ref ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ref ext) if ext == "css" => "text/css; charset=utf-8",
        Some(ref ext) if ext == "js" => "application/javascript; charset=utf-8",
        Some(ref ext) if ext == "json" => "application/json; charset=utf-8",
        Some(ref ext) if ext == "svg" => "image/svg+xml",
        Some(ref ext) if ext == "png" => "image/png",
        Some(ref ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ref ext) if ext == "gif" => "image/gif",
        Some(ref ext) if ext == "ico" => "image/x-icon",
        Some(ref ext) if ext == "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Generate a last-modified metadata line for a stored page. Empty when
/// the metadata cannot be read.
pub fn last_modified_html(path: &Path) -> SafeHtml {
    let html = match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => match mtime.duration_since(std::time::UNIX_EPOCH) {
            Ok(dur) => {
                let secs = dur.as_secs() as i64;
                time::OffsetDateTime::from_unix_timestamp(secs)
                    .ok()
                    .and_then(|dt| dt.format(&time::format_description::well_known::Rfc3339).ok())
                    .map(|s| format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)))
                    .unwrap_or_default()
            }
            Err(_) => String::new(),
        },
        Err(_) => String::new(),
    };
    SafeHtml::from_rendered(html)
}
