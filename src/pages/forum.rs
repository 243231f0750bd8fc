//! Forum page: the topic listing for one forum.

use maud::{html, Markup, PreEscaped, Render};

use crate::components::BaseLayout;
use crate::db::Topic;

/// Parameters for the forum page.
#[derive(Debug, Clone)]
pub struct ForumPageParams<'a> {
    pub forum_id: i64,
    /// `None` when the forum's name could not be fetched; the page renders
    /// with a generic heading instead of failing.
    pub forum_name: Option<&'a str>,
    pub topics: &'a [Topic],
}

/// A table row for one topic.
#[derive(Debug, Clone)]
struct TopicRow<'a> {
    topic: &'a Topic,
}

impl Render for TopicRow<'_> {
    fn render(&self) -> Markup {
        let topic = self.topic;
        html! {
            tr {
                td {
                    a href=(format!("{}.html", topic.id)) {
                        (PreEscaped(&topic.title))
                    }
                }
                td { (PreEscaped(topic.author_username.as_deref().unwrap_or("Guest"))) }
                td class="num" { (topic.reply_count) }
                td { (topic.created_time.as_deref().unwrap_or("-")) }
            }
        }
    }
}

/// Render the topic listing of a forum.
#[must_use]
pub fn render_forum_page(params: &ForumPageParams<'_>) -> Markup {
    let heading = params
        .forum_name
        .map_or_else(|| format!("Forum {}", params.forum_id), ToString::to_string);

    let content = html! {
        h1 { (PreEscaped(&heading)) }
        @if params.topics.is_empty() {
            p class="empty" { "This forum has no topics." }
        } @else {
            table class="listing" {
                thead {
                    tr {
                        th { "Topic" }
                        th { "Author" }
                        th { "Replies" }
                        th { "Created" }
                    }
                }
                tbody {
                    @for topic in params.topics {
                        (TopicRow { topic })
                    }
                }
            }
        }
    };

    BaseLayout::new(&heading)
        .with_home_href("../index.html")
        .render(content)
}
