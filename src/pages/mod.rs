//! Page templates for the exported site, one module per page kind.
//!
//! Rendering is pure: typed parameters in, a `Markup` document out. No
//! clock, no I/O, so identical inputs produce byte-identical pages.
//!
//! phpBB stores its text HTML-encoded, with post bodies already rendered
//! from bulletin-board markup. Legacy text fields are therefore spliced with
//! `PreEscaped` throughout; escaping them again would double-encode.

pub mod forum;
pub mod index;
pub mod topic;

pub use forum::{render_forum_page, ForumPageParams};
pub use index::render_index_page;
pub use topic::{render_topic_page, TopicPageParams};
