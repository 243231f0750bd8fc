//! Site index page: every forum grouped under its category.

use maud::{html, Markup, PreEscaped, Render};

use crate::components::BaseLayout;
use crate::db::{Category, Forum};

/// A table row for one forum on the index page.
#[derive(Debug, Clone)]
struct ForumRow<'a> {
    forum: &'a Forum,
}

impl Render for ForumRow<'_> {
    fn render(&self) -> Markup {
        let forum = self.forum;
        html! {
            tr {
                td {
                    a href=(format!("{}/index.html", forum.id)) {
                        (PreEscaped(&forum.name))
                    }
                    @if let Some(description) = forum.description.as_deref() {
                        @if !description.is_empty() {
                            br;
                            small { (PreEscaped(description)) }
                        }
                    }
                }
                td class="num" { (forum.topic_count) }
                td class="num" { (forum.post_count) }
                td {
                    @if let Some(last_post_time) = forum.last_post_time.as_deref() {
                        (last_post_time)
                        @if !forum.last_poster_name.is_empty() {
                            br;
                            small { "by " (PreEscaped(&forum.last_poster_name)) }
                        }
                    } @else {
                        "-"
                    }
                }
            }
        }
    }
}

/// One category heading with the table of its forums.
#[derive(Debug, Clone)]
struct CategorySection<'a> {
    category: &'a Category,
    forums: Vec<&'a Forum>,
}

impl Render for CategorySection<'_> {
    fn render(&self) -> Markup {
        html! {
            section {
                h2 { (PreEscaped(&self.category.name)) }
                @if self.forums.is_empty() {
                    p class="empty" { "This category has no forums." }
                } @else {
                    table class="listing" {
                        thead {
                            tr {
                                th { "Forum" }
                                th { "Topics" }
                                th { "Posts" }
                                th { "Last post" }
                            }
                        }
                        tbody {
                            @for &forum in &self.forums {
                                (ForumRow { forum })
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render the site index.
///
/// Forums appear under the category their `parent_id` references; forums
/// pointing at a category that does not exist are left off the listing (the
/// pipeline logs them, and their own pages are still written).
#[must_use]
pub fn render_index_page(categories: &[Category], forums: &[Forum]) -> Markup {
    let content = html! {
        h1 { "Forum index" }
        @for category in categories {
            (CategorySection {
                category,
                forums: forums.iter().filter(|f| f.parent_id == category.id).collect(),
            })
        }
    };
    BaseLayout::new("Forum index").render(content)
}
