//! Topic page: every post of one topic, oldest first.

use maud::{html, Markup, PreEscaped, Render};

use crate::components::BaseLayout;
use crate::db::{Post, Topic};

/// Parameters for the topic page.
#[derive(Debug, Clone)]
pub struct TopicPageParams<'a> {
    pub forum_id: i64,
    pub forum_name: Option<&'a str>,
    pub topic: &'a Topic,
    /// Posts in ascending posted-time order, as returned by the source.
    pub posts: &'a [Post],
}

/// One rendered post.
#[derive(Debug, Clone)]
struct PostArticle<'a> {
    post: &'a Post,
}

impl Render for PostArticle<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        html! {
            article class="post" {
                header {
                    @if let Some(subject) = post.subject.as_deref() {
                        @if !subject.is_empty() {
                            strong { (PreEscaped(subject)) }
                            br;
                        }
                    }
                    small {
                        "Posted by " (PreEscaped(post.display_username()))
                        @if let Some(posted_time) = post.posted_time.as_deref() {
                            " on " (posted_time)
                        }
                    }
                }
                div class="body" {
                    (PreEscaped(post.body_text.as_deref().unwrap_or("")))
                }
            }
        }
    }
}

/// Render a topic's posts.
///
/// The heading uses the topic title fetched with the topic listing.
#[must_use]
pub fn render_topic_page(params: &TopicPageParams<'_>) -> Markup {
    let content = html! {
        h1 { (PreEscaped(&params.topic.title)) }
        p {
            a href="index.html" {
                "Return to "
                @if let Some(forum_name) = params.forum_name {
                    (PreEscaped(forum_name))
                } @else {
                    "forum " (params.forum_id)
                }
            }
        }
        @for post in params.posts {
            (PostArticle { post })
        }
    };

    BaseLayout::new(&params.topic.title)
        .with_home_href("../index.html")
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic {
            id: 42,
            forum_id: 5,
            title: "Hello".to_string(),
            created_time: Some("Sun Nov 29, 2015 10:02 AM".to_string()),
            reply_count: 1,
            author_username: Some("alice".to_string()),
        }
    }

    fn post(id: i64, time: i64, body: &str) -> Post {
        Post {
            id,
            forum_id: 5,
            topic_id: 42,
            poster_id: 7,
            guest_username: String::new(),
            registered_username: Some("alice".to_string()),
            posted_time: Some("Sun Nov 29, 2015 10:02 AM".to_string()),
            raw_posted_time: time,
            subject: Some("Re: Hello".to_string()),
            body_text: Some(body.to_string()),
            markup_uid: Some("abc123".to_string()),
        }
    }

    fn params<'a>(topic: &'a Topic, posts: &'a [Post]) -> TopicPageParams<'a> {
        TopicPageParams {
            forum_id: 5,
            forum_name: Some("Chat"),
            topic,
            posts,
        }
    }

    #[test]
    fn test_heading_uses_queried_topic_title() {
        let t = topic();
        let html = render_topic_page(&params(&t, &[])).into_string();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<title>Hello</title>"));
    }

    #[test]
    fn test_posts_render_in_given_order() {
        let t = topic();
        let posts = vec![post(1, 100, "first words"), post(2, 200, "second words")];
        let html = render_topic_page(&params(&t, &posts)).into_string();

        let first = html.find("first words").unwrap();
        let second = html.find("second words").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_post_body_html_not_escaped() {
        let t = topic();
        let posts = vec![post(1, 100, "<b>bold</b> and &quot;quoted&quot;")];
        let html = render_topic_page(&params(&t, &posts)).into_string();

        assert!(html.contains("<b>bold</b> and &quot;quoted&quot;"));
        assert!(!html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_deleted_account_renders_guest_name() {
        let t = topic();
        let mut p = post(1, 100, "hi");
        p.registered_username = None;
        p.guest_username = "visitor".to_string();
        let posts = vec![p];
        let html = render_topic_page(&params(&t, &posts)).into_string();
        assert!(html.contains("Posted by visitor"));
    }

    #[test]
    fn test_back_link_targets_forum_listing() {
        let t = topic();
        let html = render_topic_page(&params(&t, &[])).into_string();
        assert!(html.contains(r#"<a href="index.html">Return to Chat</a>"#));
        assert!(html.contains(r#"<a href="../index.html">Forum index</a>"#));
    }
}
