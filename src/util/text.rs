use regex::Regex;
use std::sync::LazyLock;

/// Ellipsis appended to truncated summaries
const ELLIPSIS: &str = "...";

/// Paragraphs shorter than this (after markdown stripping) are treated as labels, not prose.
const MIN_PARAGRAPH_CHARS: usize = 40;

static LEADING_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap());

static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\(.+?\)").unwrap());
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*]\s+").unwrap());

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());
static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s").unwrap());
static BIG_PICTURE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(#{1,6})\s+.*big picture").unwrap());

/// Returns the leading `YYYY-MM-DD` of an ISO-8601-like timestamp.
///
/// Accepts bare dates as well as timestamps with a time-of-day and/or offset
/// suffix (`2026-01-29T18:30:52+00:00`, `2026-01-29 18:30:52`).
///
/// # Examples
///
/// ```
/// use sieve_export::util::extract_date;
///
/// assert_eq!(extract_date("2026-01-29T18:30:52+00:00"), Some("2026-01-29"));
/// assert_eq!(extract_date("yesterday"), None);
/// ```
pub fn extract_date(timestamp: &str) -> Option<&str> {
    LEADING_DATE
        .captures(timestamp)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Removes basic markdown formatting: heading markers, bold/italic emphasis,
/// link syntax (keeping the label) and leading list markers.
///
/// Four targeted substitutions, not a parser. Nested or malformed markup is
/// left however the substitutions happen to leave it.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADING_MARKER.replace_all(text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = LINK.replace_all(&text, "${1}");
    let text = LIST_MARKER.replace_all(&text, "");
    text.trim().to_string()
}

/// Truncates `text` to at most `max_length` characters (ellipsis included),
/// cutting at the last space inside the window.
///
/// Text that already fits is returned unchanged.
pub fn truncate_on_word(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_length <= ellipsis_len {
        return text.chars().take(max_length).collect();
    }

    let window: String = text.chars().take(max_length - ellipsis_len).collect();
    let cut = match window.rfind(' ') {
        Some(idx) => &window[..idx],
        None => window.as_str(),
    };
    format!("{cut}{ELLIPSIS}")
}

/// First paragraph that is not a heading and still has substance once stripped.
fn first_substantive_paragraph(content: &str) -> Option<String> {
    PARAGRAPH_BREAK
        .split(content)
        .map(str::trim)
        .filter(|para| !para.is_empty() && !para.starts_with('#'))
        .map(strip_markdown)
        .find(|clean| clean.chars().count() >= MIN_PARAGRAPH_CHARS)
}

/// Extracts the first substantive paragraph of `content`, markdown-stripped
/// and truncated to `max_length` characters on a word boundary.
///
/// Returns an empty string when no paragraph qualifies.
pub fn extract_summary(content: &str, max_length: usize) -> String {
    first_substantive_paragraph(content)
        .map(|clean| truncate_on_word(&clean, max_length))
        .unwrap_or_default()
}

/// Extracts the "Big Picture" section of a digest.
///
/// The section starts after the first heading whose text contains
/// "big picture" (any case) and runs until the next heading of the same
/// level. Without such a section, falls back to the first substantive
/// paragraph, stripped but not truncated.
pub fn extract_big_picture(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut section_level: Option<usize> = None;
    let mut section: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        match section_level {
            None => {
                if let Some(caps) = BIG_PICTURE_HEADING.captures(line) {
                    section_level = Some(caps[1].len());
                }
            }
            Some(level) => {
                let closes = HEADING_LINE
                    .captures(line)
                    .is_some_and(|caps| caps[1].len() == level);
                if closes {
                    break;
                }
                section.push(line);
            }
        }
    }

    let text = section.join("\n");
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    first_substantive_paragraph(content).unwrap_or_default()
}
