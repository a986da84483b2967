//! Export a Sieve database into static-site content.
//!
//! Reads scored articles, daily digests and threads from the Sieve SQLite
//! database and renders:
//!
//! - `content/digests/{date}.md`: one frontmatter + markdown document per digest
//! - `data/articles.json`: every scored article, optionally date-filtered
//! - `data/threads.json`: every thread with at least one scored article

pub mod config;
pub mod export;
pub mod runner;
pub mod storage;
pub mod util;

pub use runner::{run, OutputSink, RunError, RunOptions};
