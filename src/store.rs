use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info};

use crate::errors::WikiError;
use crate::types::{Page, Title};

/// File extension for stored pages.
const PAGE_SUFFIX: &str = "txt";

/// Flat-file page storage: one file per page under a single data directory.
///
/// There is no locking; concurrent saves to the same title race at the
/// file-system level and the last write wins.
#[derive(Clone)]
pub struct PageStore {
    data_dir: Arc<PathBuf>,
}

impl PageStore {
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("creating page store at {:?}", data_dir);
        Self { data_dir: Arc::new(data_dir) }
    }

    /// Storage key for a title. Bijective because titles are restricted to
    /// alphanumerics, which excludes both the path separator and `.`.
    pub fn page_path(&self, title: &Title) -> PathBuf {
        self.data_dir.join(format!("{}.{}", title, PAGE_SUFFIX))
    }

    /// Read a page from disk. Any read failure, missing file or otherwise,
    /// is reported as `NotFound`: the page does not exist yet.
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        match fs::read(&path) {
            Ok(body) => {
                debug!("loaded page '{}' ({} bytes)", title, body.len());
                Ok(Page::new(title.clone(), body))
            }
            Err(e) => {
                debug!("page '{}' not readable ({}): treating as missing", title, e);
                Err(WikiError::NotFound)
            }
        }
    }

    /// Write a page to disk, wholesale replacing any previous content.
    /// Creates the data directory on first save.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        self.ensure_data_dir()?;
        let path = self.page_path(&page.title);
        fs::write(&path, &page.body).map_err(|e| {
            error!("failed to write page '{}' to {:?}: {}", page.title, path, e);
            WikiError::Io(e)
        })?;
        info!("saved page '{}' ({} bytes)", page.title, page.body.len());
        Ok(())
    }

    fn ensure_data_dir(&self) -> Result<(), WikiError> {
        if self.data_dir.is_dir() {
            return Ok(());
        }
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            // group/other readable but not writable
            builder.mode(0o755);
        }
        builder.create(&*self.data_dir).map_err(|e| {
            error!("failed to create data directory {:?}: {}", self.data_dir, e);
            WikiError::Io(e)
        })
    }
}
