/// A top-level forum grouping (a `phpbb_forums` row with `parent_id = 0`).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A sub-board belonging to a category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Forum {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
    pub post_count: i64,
    pub topic_count: i64,
    pub last_poster_name: String,
    /// Pre-formatted as "Ddd Mon DD, YYYY hh:mm AM/PM" by the query.
    pub last_post_time: Option<String>,
    pub description: Option<String>,
}

/// A discussion thread within a forum.
///
/// Topics that were moved elsewhere (`topic_moved_id != 0`) are filtered out
/// at the query level and never constructed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Topic {
    pub id: i64,
    pub forum_id: i64,
    pub title: String,
    /// Pre-formatted as "Ddd Mon DD, YYYY hh:mm AM/PM" by the query.
    pub created_time: Option<String>,
    pub reply_count: i64,
    /// `None` when the author's account no longer exists.
    pub author_username: Option<String>,
}

/// A single message within a topic.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub forum_id: i64,
    pub topic_id: i64,
    pub poster_id: i64,
    /// Username stored on the post itself, set for guest posts.
    pub guest_username: String,
    /// Username of the registered account, `None` when the account is gone.
    pub registered_username: Option<String>,
    /// Pre-formatted as "Ddd Mon DD, YYYY hh:mm AM/PM" by the query.
    pub posted_time: Option<String>,
    /// Raw epoch seconds of `posted_time`.
    pub raw_posted_time: i64,
    pub subject: Option<String>,
    /// Body HTML as stored by phpBB; already rendered from bulletin-board
    /// markup, emitted without further escaping.
    pub body_text: Option<String>,
    pub markup_uid: Option<String>,
}

impl Post {
    /// Name to display for the poster: the registered username when the
    /// account still exists, else the guest name stored on the post.
    #[must_use]
    pub fn display_username(&self) -> &str {
        match self.registered_username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.guest_username.is_empty() => &self.guest_username,
            _ => "Guest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(registered: Option<&str>, guest: &str) -> Post {
        Post {
            id: 1,
            forum_id: 5,
            topic_id: 42,
            poster_id: 7,
            guest_username: guest.to_string(),
            registered_username: registered.map(ToString::to_string),
            posted_time: Some("Mon Jan 01, 2001 12:00 AM".to_string()),
            raw_posted_time: 978_307_200,
            subject: None,
            body_text: None,
            markup_uid: None,
        }
    }

    #[test]
    fn test_display_username_prefers_registered_account() {
        assert_eq!(post(Some("alice"), "old name").display_username(), "alice");
    }

    #[test]
    fn test_display_username_falls_back_to_guest_name() {
        assert_eq!(post(None, "visitor").display_username(), "visitor");
        assert_eq!(post(Some(""), "visitor").display_username(), "visitor");
    }

    #[test]
    fn test_display_username_defaults_when_both_missing() {
        assert_eq!(post(None, "").display_username(), "Guest");
    }
}
