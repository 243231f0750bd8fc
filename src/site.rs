//! Output-tree writer for the static site.
//!
//! The path scheme is load-bearing for downstream hosting:
//!
//! - site index -> `<root>/index.html`
//! - forum page -> `<root>/<forum_id>/index.html`
//! - topic page -> `<root>/<forum_id>/<topic_id>.html`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Writes rendered pages into the output tree.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    root: PathBuf,
}

impl SiteWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root.join("index.html")
    }

    #[must_use]
    pub fn forum_dir(&self, forum_id: i64) -> PathBuf {
        self.root.join(forum_id.to_string())
    }

    #[must_use]
    pub fn forum_page_path(&self, forum_id: i64) -> PathBuf {
        self.forum_dir(forum_id).join("index.html")
    }

    #[must_use]
    pub fn topic_page_path(&self, forum_id: i64, topic_id: i64) -> PathBuf {
        self.forum_dir(forum_id).join(format!("{topic_id}.html"))
    }

    /// Create the output root if needed.
    ///
    /// An existing root is tolerated (re-running into the same tree
    /// overwrites pages) but flagged with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<()> {
        ensure_directory(&self.root).await
    }

    /// Create a forum's directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_forum_dir(&self, forum_id: i64) -> Result<()> {
        ensure_directory(&self.forum_dir(forum_id)).await
    }

    /// Write the site index page.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_index(&self, html: &str) -> Result<()> {
        write_page(&self.index_path(), html).await
    }

    /// Write a forum's topic-listing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_forum_page(&self, forum_id: i64, html: &str) -> Result<()> {
        write_page(&self.forum_page_path(forum_id), html).await
    }

    /// Write a topic page.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_topic_page(&self, forum_id: i64, topic_id: i64, html: &str) -> Result<()> {
        write_page(&self.topic_page_path(forum_id, topic_id), html).await
    }
}

async fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() {
        warn!("The directory {} already exists", path.display());
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Write UTF-8 text to `path`, overwriting any existing file.
async fn write_page(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html.as_bytes())
        .await
        .with_context(|| format!("Failed to write page: {}", path.display()))
}
