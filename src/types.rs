use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::WikiError;
use crate::render::RenderPolicy;
use crate::store::PageStore;
use crate::templates::TemplateSet;

/// Application state shared across all handlers.
///
/// Everything in here is read-only after startup, so cloning per request
/// is just a handful of `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub assets_dir: Arc<PathBuf>,
    pub templates: Arc<TemplateSet>,
    pub policy: RenderPolicy,
}

/// Validated page title. Non-empty, ASCII alphanumeric only, so it can
/// never name anything outside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(WikiError::InvalidPath);
        }
        Ok(Title(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page: title plus raw body bytes, exactly as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body }
    }

    /// Title-only page used when editing a page that does not exist yet.
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
