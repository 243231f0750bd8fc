//! Maud HTML components shared by the exported pages.
//!
//! - `layout`: page skeleton with the embedded stylesheet

pub mod layout;

pub use layout::BaseLayout;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
