//! The export pipeline: walk the forum hierarchy and materialize pages.
//!
//! One strictly sequential pass: fetch categories and forums, write the site
//! index, then per forum fetch topics and write the forum page, then per
//! topic fetch posts and write the topic page.
//!
//! Legacy forum data is frequently inconsistent (orphaned rows, forums whose
//! category is gone), so failures below the top level degrade gracefully: a
//! forum or topic whose branch fails is logged, counted, and skipped while
//! its siblings continue. Failures before the first page - fetching the
//! hierarchy, creating the output root, writing the index - abort the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::db::{Forum, ForumSource, SourceError, Topic};
use crate::pages::{
    render_forum_page, render_index_page, render_topic_page, ForumPageParams, TopicPageParams,
};
use crate::site::SiteWriter;

/// Counts reported after a run. Skipped counts are the signal for partial
/// failure; the process still exits 0 once the export loop has begun.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportSummary {
    pub forums_written: u64,
    pub forums_skipped: u64,
    pub topics_written: u64,
    pub topics_skipped: u64,
}

/// Orchestrates one export run over a forum source.
#[derive(Debug)]
pub struct Exporter<S> {
    source: S,
    writer: SiteWriter,
}

impl<S: ForumSource> Exporter<S> {
    pub fn new(source: S, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            writer: SiteWriter::new(root),
        }
    }

    /// Run the export to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures before the first forum branch:
    /// fetching the hierarchy, creating the output root, or writing the
    /// site index.
    pub async fn run(&self) -> Result<ExportSummary> {
        let categories = self
            .source
            .categories()
            .await
            .context("Failed to fetch categories")?;
        let forums = self.source.forums().await.context("Failed to fetch forums")?;

        info!(
            categories = categories.len(),
            forums = forums.len(),
            "Fetched forum hierarchy"
        );

        for forum in &forums {
            if !categories.iter().any(|c| c.id == forum.parent_id) {
                warn!(
                    forum_id = forum.id,
                    parent_id = forum.parent_id,
                    "Forum references a missing category; omitted from the index listing"
                );
            }
        }

        self.writer.ensure_root().await?;
        let index_html = render_index_page(&categories, &forums).into_string();
        self.writer
            .write_index(&index_html)
            .await
            .context("Failed to write the site index")?;

        let mut summary = ExportSummary::default();
        for forum in &forums {
            info!(forum_id = forum.id, "Processing forum");
            match self.export_forum(forum, &mut summary).await {
                Ok(()) => summary.forums_written += 1,
                Err(e) => {
                    error!(forum_id = forum.id, "Skipping forum: {e:#}");
                    summary.forums_skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn export_forum(&self, forum: &Forum, summary: &mut ExportSummary) -> Result<()> {
        // The name is re-fetched per forum; a missing or failing row is not
        // fatal, the page just renders without one.
        let forum_name = match self.source.forum_name(forum.id).await {
            Ok(name) => Some(name),
            Err(e @ SourceError::ForumNotFound { .. }) => {
                warn!(forum_id = forum.id, "{e}");
                None
            }
            Err(e) => {
                warn!(forum_id = forum.id, "Could not fetch forum name: {e}");
                None
            }
        };

        let topics = self
            .source
            .topics(forum.id)
            .await
            .with_context(|| format!("Failed to fetch topics for forum {}", forum.id))?;
        info!(forum_id = forum.id, topics = topics.len(), "Found topics");

        self.writer.ensure_forum_dir(forum.id).await?;
        let html = render_forum_page(&ForumPageParams {
            forum_id: forum.id,
            forum_name: forum_name.as_deref(),
            topics: &topics,
        })
        .into_string();
        self.writer.write_forum_page(forum.id, &html).await?;
        info!(
            forum_id = forum.id,
            name = forum_name.as_deref().unwrap_or(""),
            "Writing forum"
        );

        for topic in &topics {
            match self.export_topic(forum.id, forum_name.as_deref(), topic).await {
                Ok(()) => summary.topics_written += 1,
                Err(e) => {
                    error!(
                        forum_id = forum.id,
                        topic_id = topic.id,
                        "Skipping topic: {e:#}"
                    );
                    summary.topics_skipped += 1;
                }
            }
        }

        Ok(())
    }

    async fn export_topic(
        &self,
        forum_id: i64,
        forum_name: Option<&str>,
        topic: &Topic,
    ) -> Result<()> {
        let posts = self
            .source
            .posts(topic.id)
            .await
            .with_context(|| format!("Failed to fetch posts for topic {}", topic.id))?;

        let html = render_topic_page(&TopicPageParams {
            forum_id,
            forum_name,
            topic,
            posts: &posts,
        })
        .into_string();
        self.writer.write_topic_page(forum_id, topic.id, &html).await?;
        debug!(topic_id = topic.id, posts = posts.len(), "Writing topic");

        Ok(())
    }
}
