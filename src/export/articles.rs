use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use super::{char_prefix, generated_at, RenderedDocument, SAMPLE_PREVIEW_CHARS};
use crate::storage::Article;

/// Shape of `data/articles.json`
#[derive(Debug, Serialize)]
struct ArticlesFile<'a> {
    generated_at: String,
    total_articles: usize,
    articles: &'a [Article],
}

/// `data/articles.json`
pub fn articles_path() -> PathBuf {
    PathBuf::from("data").join("articles.json")
}

/// Render the article set as pretty-printed JSON.
///
/// The target path is fixed regardless of the date filter that selected
/// `articles`.
pub fn build_articles_document(
    articles: &[Article],
    now: DateTime<Utc>,
) -> Result<RenderedDocument> {
    let file = ArticlesFile {
        generated_at: generated_at(now),
        total_articles: articles.len(),
        articles,
    };
    let contents =
        serde_json::to_string_pretty(&file).context("Failed to serialize articles")?;

    let mut preview = format!("Total articles: {}", articles.len());
    if let Some(first) = articles.first() {
        let sample =
            serde_json::to_string_pretty(first).context("Failed to serialize sample article")?;
        preview.push_str(&format!(
            "\nSample article: {}...",
            char_prefix(&sample, SAMPLE_PREVIEW_CHARS)
        ));
    }

    Ok(RenderedDocument {
        relative_path: articles_path(),
        contents,
        preview,
        description: format!("{} articles", articles.len()),
    })
}
