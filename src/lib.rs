//! phpbb2static library.
//!
//! Exports a legacy phpBB forum database to a static HTML site: one index
//! page, one page per forum, one page per topic. The export is a single
//! sequential batch run against a read-only snapshot of the database.

pub mod components;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod pages;
pub mod site;
