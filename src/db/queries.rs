use sqlx::MySqlPool;
use tracing::error;

use super::models::{Category, Forum, Post, Topic};
use super::SourceError;

const CATEGORIES_SQL: &str = "\
    SELECT forum_id AS id, forum_name AS name \
    FROM phpbb_forums \
    WHERE parent_id = 0 \
    ORDER BY forum_id";

const FORUMS_SQL: &str = "\
    SELECT \
        forum_id AS id, \
        parent_id, \
        forum_name AS name, \
        forum_posts AS post_count, \
        forum_topics AS topic_count, \
        forum_last_poster_name AS last_poster_name, \
        DATE_FORMAT(FROM_UNIXTIME(forum_last_post_time), '%a %b %d, %Y %h:%i %p') AS last_post_time, \
        CONVERT(forum_desc USING utf8) AS description \
    FROM phpbb_forums \
    WHERE parent_id > 0 \
    ORDER BY forum_id";

const FORUM_NAME_SQL: &str = "\
    SELECT forum_name \
    FROM phpbb_forums \
    WHERE forum_id = ?";

const TOPICS_SQL: &str = "\
    SELECT \
        t.topic_id AS id, \
        t.forum_id, \
        t.topic_title AS title, \
        DATE_FORMAT(FROM_UNIXTIME(t.topic_time), '%a %b %d, %Y %h:%i %p') AS created_time, \
        t.topic_replies AS reply_count, \
        u.username AS author_username \
    FROM phpbb_topics t \
    LEFT JOIN phpbb_users u ON t.topic_poster = u.user_id \
    WHERE t.topic_moved_id = 0 AND t.forum_id = ? \
    ORDER BY t.topic_time DESC";

const POSTS_SQL: &str = "\
    SELECT \
        p.post_id AS id, \
        p.forum_id, \
        p.topic_id, \
        p.poster_id, \
        p.post_username AS guest_username, \
        u.username AS registered_username, \
        DATE_FORMAT(FROM_UNIXTIME(p.post_time), '%a %b %d, %Y %h:%i %p') AS posted_time, \
        p.post_time AS raw_posted_time, \
        pt.post_subject AS subject, \
        pt.post_text AS body_text, \
        pt.bbcode_uid AS markup_uid \
    FROM phpbb_posts p \
    LEFT JOIN phpbb_users u ON p.poster_id = u.user_id \
    LEFT JOIN phpbb_posts pt ON p.post_id = pt.post_id \
    WHERE p.topic_id = ? \
    ORDER BY p.post_time ASC";

/// Log a failed query together with its text and wrap it as a source error.
fn query_error(query: &'static str, source: sqlx::Error) -> SourceError {
    error!("There was a problem while trying to run a query:\n\t{source}");
    error!("{query}");
    SourceError::Query { query, source }
}

/// Fetch the top-level categories.
pub async fn list_categories(pool: &MySqlPool) -> Result<Vec<Category>, SourceError> {
    sqlx::query_as::<_, Category>(CATEGORIES_SQL)
        .fetch_all(pool)
        .await
        .map_err(|e| query_error(CATEGORIES_SQL, e))
}

/// Fetch every forum with its display metadata.
pub async fn list_forums(pool: &MySqlPool) -> Result<Vec<Forum>, SourceError> {
    sqlx::query_as::<_, Forum>(FORUMS_SQL)
        .fetch_all(pool)
        .await
        .map_err(|e| query_error(FORUMS_SQL, e))
}

/// Fetch a single forum's display name.
pub async fn forum_name(pool: &MySqlPool, forum_id: i64) -> Result<String, SourceError> {
    let row: Option<(String,)> = sqlx::query_as(FORUM_NAME_SQL)
        .bind(forum_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| query_error(FORUM_NAME_SQL, e))?;

    row.map(|(name,)| name)
        .ok_or(SourceError::ForumNotFound { forum_id })
}

/// Fetch a forum's topics, newest first, excluding moved topics.
pub async fn list_topics(pool: &MySqlPool, forum_id: i64) -> Result<Vec<Topic>, SourceError> {
    sqlx::query_as::<_, Topic>(TOPICS_SQL)
        .bind(forum_id)
        .fetch_all(pool)
        .await
        .map_err(|e| query_error(TOPICS_SQL, e))
}

/// Fetch a topic's posts in ascending posted-time order, joined with the
/// poster account and the auxiliary post text row.
pub async fn list_posts(pool: &MySqlPool, topic_id: i64) -> Result<Vec<Post>, SourceError> {
    sqlx::query_as::<_, Post>(POSTS_SQL)
        .bind(topic_id)
        .fetch_all(pool)
        .await
        .map_err(|e| query_error(POSTS_SQL, e))
}
