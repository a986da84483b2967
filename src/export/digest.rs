use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::frontmatter::{FieldValue, Frontmatter, FrontmatterValue};
use super::{char_prefix, RenderedDocument};
use crate::storage::{Article, Digest};
use crate::util::{
    extract_big_picture, extract_summary, strip_markdown, truncate_on_word, DEFAULT_SUMMARY_LENGTH,
};

/// Number of topics listed in `top_topics`
const TOP_TOPICS: usize = 5;
/// Number of articles listed in `top_scoring_articles`
const TOP_ARTICLES: usize = 5;

/// Tunables for digest rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestOptions {
    /// Maximum `summary` length in characters, ellipsis included
    pub summary_max_length: usize,
    /// Characters of the document printed in preview mode
    pub preview_chars: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            summary_max_length: DEFAULT_SUMMARY_LENGTH,
            preview_chars: 500,
        }
    }
}

/// `content/digests/{date}.md`
pub fn digest_path(digest_date: &str) -> PathBuf {
    PathBuf::from("content")
        .join("digests")
        .join(format!("{digest_date}.md"))
}

/// Number of distinct non-empty sources
pub fn source_count(articles: &[Article]) -> usize {
    articles
        .iter()
        .filter_map(|a| a.source.as_deref())
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Most frequent topics, ties kept in first-seen order
pub fn top_topics(articles: &[Article], limit: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for topic in articles.iter().flat_map(|a| a.topics.iter()) {
        let count = counts.entry(topic.as_str()).or_insert_with(|| {
            order.push(topic.as_str());
            0
        });
        *count += 1;
    }

    // sort_by is stable, so equal counts keep encounter order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(str::to_string).collect()
}

/// Highest-scoring articles, ties kept in input order
pub fn top_scoring(articles: &[Article], limit: usize) -> Vec<&Article> {
    let mut ranked: Vec<&Article> = articles.iter().collect();
    ranked.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
    ranked.truncate(limit);
    ranked
}

/// Summary line for the frontmatter.
///
/// Uses the first paragraph of the Big Picture section when there is one,
/// otherwise the first substantive paragraph of the whole digest.
pub fn digest_summary(content: &str, big_picture: &str, max_length: usize) -> String {
    if big_picture.is_empty() {
        return extract_summary(content, max_length);
    }
    let first = big_picture.split("\n\n").next().unwrap_or_default();
    truncate_on_word(&strip_markdown(first), max_length)
}

fn top_article_record(article: &Article) -> Vec<(String, FieldValue)> {
    vec![
        ("title".to_string(), article.title.as_deref().into()),
        ("source".to_string(), article.source.as_deref().into()),
        ("score".to_string(), article.overall_score.into()),
        ("url".to_string(), article.url.as_deref().into()),
    ]
}

/// Render a digest as frontmatter + original markdown body.
///
/// `articles` are the scored articles for the digest date, highest score first.
pub fn build_digest_document(
    digest: &Digest,
    articles: &[Article],
    options: &DigestOptions,
) -> RenderedDocument {
    let date = digest.digest_date.as_str();
    let big_picture = extract_big_picture(&digest.content);
    let summary = digest_summary(&digest.content, &big_picture, options.summary_max_length);

    let top_articles = top_scoring(articles, TOP_ARTICLES)
        .into_iter()
        .map(top_article_record)
        .collect();

    let frontmatter = Frontmatter::new()
        .field("title", format!("Daily Signal — {date}"))
        .field("date", date)
        .field("summary", summary)
        .field("big_picture", big_picture)
        .field("article_count", articles.len())
        .field("source_count", source_count(articles))
        .field("top_topics", top_topics(articles, TOP_TOPICS))
        .field(
            "top_scoring_articles",
            FrontmatterValue::Records(top_articles),
        );

    let contents = format!("{}\n\n{}\n", frontmatter.render(), digest.content);
    let preview = format!(
        "Content preview (first {} chars):\n{}\n...",
        options.preview_chars,
        char_prefix(&contents, options.preview_chars)
    );

    RenderedDocument {
        relative_path: digest_path(date),
        contents,
        preview,
        description: "digest".to_string(),
    }
}
