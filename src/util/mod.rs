//! Text helpers shared by the exporters.
//!
//! - **Dates**: pull the calendar date out of stored timestamps
//! - **Markdown**: strip basic formatting and pick summary paragraphs out of digest bodies
//!
//! # Examples
//!
//! ```
//! use sieve_export::util::{extract_summary, strip_markdown};
//!
//! assert_eq!(strip_markdown("**Bold** [link](https://example.com)"), "Bold link");
//!
//! let body = "# Heading\n\nA paragraph that is comfortably longer than forty characters.";
//! assert!(extract_summary(body, 200).starts_with("A paragraph"));
//! ```

mod text;

pub use text::{extract_big_picture, extract_date, extract_summary, strip_markdown, truncate_on_word};

/// Default summary length in characters, ellipsis included
pub const DEFAULT_SUMMARY_LENGTH: usize = 200;
