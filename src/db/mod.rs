mod models;
mod queries;

pub use models::*;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use thiserror::Error;

use crate::config::DbSettings;

/// Failures from the forum data source.
///
/// The pipeline decides per kind whether to abort the run, skip a branch, or
/// continue with a missing value; see `export`.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to connect to the phpBB database: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("query failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("forum {forum_id} does not exist")]
    ForumNotFound { forum_id: i64 },
}

/// Read-only view of the forum hierarchy.
///
/// All operations return ordered collections; entities are snapshots valid
/// for the duration of one export run. `Database` is the MySQL
/// implementation; tests substitute an in-memory source.
#[async_trait]
pub trait ForumSource: Send + Sync {
    /// Top-level categories (rows with `parent_id = 0`).
    async fn categories(&self) -> Result<Vec<Category>, SourceError>;

    /// All forums (rows with `parent_id > 0`).
    async fn forums(&self) -> Result<Vec<Forum>, SourceError>;

    /// Display name of a single forum.
    async fn forum_name(&self, forum_id: i64) -> Result<String, SourceError>;

    /// Topics of a forum, newest first. Moved topics are excluded.
    async fn topics(&self, forum_id: i64) -> Result<Vec<Topic>, SourceError>;

    /// Posts of a topic in ascending posted-time order.
    async fn posts(&self, topic_id: i64) -> Result<Vec<Post>, SourceError>;
}

/// Connection pool to the phpBB MySQL database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Connect to the phpBB database.
    ///
    /// The pool connects eagerly so an unreachable or misconfigured database
    /// fails here, before any output is written.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Connection` if the connection cannot be
    /// established.
    pub async fn connect(settings: &DbSettings) -> Result<Self, SourceError> {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .username(&settings.username)
            .password(&settings.password)
            .database(&settings.database)
            // phpBB stores text in the legacy utf8 charset.
            .charset("utf8");

        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(SourceError::Connection)?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl ForumSource for Database {
    async fn categories(&self) -> Result<Vec<Category>, SourceError> {
        queries::list_categories(&self.pool).await
    }

    async fn forums(&self) -> Result<Vec<Forum>, SourceError> {
        queries::list_forums(&self.pool).await
    }

    async fn forum_name(&self, forum_id: i64) -> Result<String, SourceError> {
        queries::forum_name(&self.pool, forum_id).await
    }

    async fn topics(&self, forum_id: i64) -> Result<Vec<Topic>, SourceError> {
        queries::list_topics(&self.pool, forum_id).await
    }

    async fn posts(&self, topic_id: i64) -> Result<Vec<Post>, SourceError> {
        queries::list_posts(&self.pool, topic_id).await
    }
}
