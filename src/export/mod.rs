//! Document builders for the three export kinds.
//!
//! Every builder is a pure transform from loaded records to a
//! [`RenderedDocument`]. None of them touch the filesystem; writing (or
//! previewing) is left to the runner.

pub mod articles;
pub mod digest;
pub mod frontmatter;
pub mod threads;

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

pub use articles::build_articles_document;
pub use digest::{build_digest_document, DigestOptions};
pub use frontmatter::{FieldValue, Frontmatter, FrontmatterValue};
pub use threads::build_threads_document;

/// Maximum characters of a sample JSON record shown in preview mode
pub const SAMPLE_PREVIEW_CHARS: usize = 500;

/// A fully rendered output file
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Target path relative to the output root
    pub relative_path: PathBuf,
    /// Full file contents
    pub contents: String,
    /// What preview mode prints in place of writing
    pub preview: String,
    /// Short description for the "exported" log line
    pub description: String,
}

/// `generated_at` stamp: RFC 3339, microseconds, `+00:00` offset
pub fn generated_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// First `max_chars` characters of `s`
pub(crate) fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_at_format() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 6, 30, 0).unwrap();
        assert_eq!(generated_at(now), "2026-01-15T06:30:00.000000+00:00");
    }

    #[test]
    fn test_char_prefix_respects_char_boundaries() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("hi", 10), "hi");
        assert_eq!(char_prefix("", 3), "");
    }
}
