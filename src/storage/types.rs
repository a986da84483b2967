use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::util::extract_date;

// ============================================================================
// Error Types
// ============================================================================

/// Database errors that abort a run before any export work starts
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database file does not exist
    #[error("Database not found at {}", .0.display())]
    NotFound(PathBuf),

    /// SQLite refused to open the file
    #[error("Failed to connect to database: {0}")]
    Open(#[source] sqlx::Error),

    /// One or more required tables are absent (sorted by name)
    #[error("Missing required tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    /// Generic database error
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
}

// ============================================================================
// Date Selection
// ============================================================================

/// Which dates a run covers.
///
/// A single date always wins over a range; each range bound is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    On(NaiveDate),
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateFilter {
    pub fn new(date: Option<NaiveDate>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        match (date, from, to) {
            (Some(date), _, _) => Self::On(date),
            (None, None, None) => Self::All,
            (None, from, to) => Self::Range { from, to },
        }
    }
}

/// Formats a date the way the store keys digests (`YYYY-MM-DD`)
pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Helper Types
// ============================================================================

/// Internal row type for scored article queries (used by sqlx FromRow)
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ArticleDbRow {
    pub id: i64,
    pub title: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub pub_date: Option<String>,
    pub composite_score: f64,
    pub summary: Option<String>,
    pub d1_attention_economy: Option<f64>,
    pub d2_data_sovereignty: Option<f64>,
    pub d3_power_consolidation: Option<f64>,
    pub d4_coercion_cooperation: Option<f64>,
    pub d5_fear_trust: Option<f64>,
    pub d6_democratization: Option<f64>,
    pub d7_systemic_design: Option<f64>,
    pub scored_at: Option<String>,
    pub topics: Option<String>,
}

impl ArticleDbRow {
    pub(crate) fn into_article(self) -> Article {
        let digest_date = self
            .scored_at
            .as_deref()
            .and_then(extract_date)
            .map(str::to_string);
        Article {
            id: self.id,
            title: self.title,
            source: self.source,
            url: self.url,
            published: self
                .pub_date
                .as_deref()
                .and_then(extract_date)
                .map(str::to_string),
            overall_score: self.composite_score,
            axiom_scores: AxiomScores {
                attention_economy: self.d1_attention_economy,
                data_sovereignty: self.d2_data_sovereignty,
                power_consolidation: self.d3_power_consolidation,
                coercion_cooperation: self.d4_coercion_cooperation,
                fear_trust: self.d5_fear_trust,
                democratization: self.d6_democratization,
                systemic_design: self.d7_systemic_design,
            },
            topics: parse_topics(self.topics.as_deref()),
            digest_date,
            summary: self.summary,
        }
    }
}

/// Splits the stored comma-separated topic list, dropping blank entries.
/// Order and duplicates are kept.
pub(crate) fn parse_topics(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Data Structures
// ============================================================================

/// The seven axiom sub-scores of an article
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxiomScores {
    pub attention_economy: Option<f64>,
    pub data_sovereignty: Option<f64>,
    pub power_consolidation: Option<f64>,
    pub coercion_cooperation: Option<f64>,
    pub fear_trust: Option<f64>,
    pub democratization: Option<f64>,
    pub systemic_design: Option<f64>,
}

/// A scored article.
///
/// Only rows with a composite score are ever materialised, so `overall_score`
/// is not optional. Serializes as the flat record written to `articles.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    /// Calendar date of `pub_date`
    pub published: Option<String>,
    pub overall_score: f64,
    pub axiom_scores: AxiomScores,
    pub topics: Vec<String>,
    /// Calendar date of `scored_at`
    pub digest_date: Option<String>,
    pub summary: Option<String>,
}

/// A stored daily digest
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub digest_date: String,
    pub content: String,
    pub article_count: Option<i64>,
}

/// A scored article belonging to a thread
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ThreadMember {
    pub id: i64,
    pub scored_at: Option<String>,
    pub pub_date: Option<String>,
}

/// A thread and its scored members, oldest score first
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: i64,
    /// Exported as the thread label; `null` when unnamed
    pub name: Option<String>,
    /// Stored aggregate; the member list is authoritative
    pub article_count: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub members: Vec<ThreadMember>,
}
