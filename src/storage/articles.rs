use anyhow::Result;
use sqlx::QueryBuilder;

use super::schema::Database;
use super::types::{date_key, Article, ArticleDbRow, DateFilter};

/// Columns selected for every scored-article query, in `ArticleDbRow` order.
///
/// Scores are cast to REAL so rows stored with INTEGER or NUMERIC affinity
/// decode the same as REAL ones.
const ARTICLE_COLUMNS: &str = "id, title, source, url, pub_date, \
     CAST(composite_score AS REAL) AS composite_score, summary, \
     CAST(d1_attention_economy AS REAL) AS d1_attention_economy, \
     CAST(d2_data_sovereignty AS REAL) AS d2_data_sovereignty, \
     CAST(d3_power_consolidation AS REAL) AS d3_power_consolidation, \
     CAST(d4_coercion_cooperation AS REAL) AS d4_coercion_cooperation, \
     CAST(d5_fear_trust AS REAL) AS d5_fear_trust, \
     CAST(d6_democratization AS REAL) AS d6_democratization, \
     CAST(d7_systemic_design AS REAL) AS d7_systemic_design, \
     scored_at, topics";

impl Database {
    // ========================================================================
    // Article Queries
    // ========================================================================

    /// Scored articles belonging to a digest date, highest score first.
    ///
    /// An article belongs to date D when either `date(scored_at)` or
    /// `date(pub_date)` equals D.
    pub async fn get_articles_for_digest_date(&self, digest_date: &str) -> Result<Vec<Article>> {
        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("SELECT ");
        builder
            .push(ARTICLE_COLUMNS)
            .push(" FROM articles WHERE composite_score IS NOT NULL AND (date(scored_at) = ")
            .push_bind(digest_date)
            .push(" OR date(pub_date) = ")
            .push_bind(digest_date)
            .push(") ORDER BY composite_score DESC");

        let rows = builder
            .build_query_as::<ArticleDbRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(digest_date, count = rows.len(), "Loaded articles for digest");
        Ok(rows.into_iter().map(ArticleDbRow::into_article).collect())
    }

    /// All scored articles matching `filter`, most recently scored first.
    ///
    /// Each date condition matches on `scored_at` OR `pub_date`; range bounds
    /// are inclusive and applied independently.
    pub async fn get_scored_articles(&self, filter: &DateFilter) -> Result<Vec<Article>> {
        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("SELECT ");
        builder
            .push(ARTICLE_COLUMNS)
            .push(" FROM articles WHERE composite_score IS NOT NULL");

        match *filter {
            DateFilter::All => {}
            DateFilter::On(date) => {
                let date = date_key(date);
                builder
                    .push(" AND (date(scored_at) = ")
                    .push_bind(date.clone())
                    .push(" OR date(pub_date) = ")
                    .push_bind(date)
                    .push(")");
            }
            DateFilter::Range { from, to } => {
                if let Some(from) = from.map(date_key) {
                    builder
                        .push(" AND (date(scored_at) >= ")
                        .push_bind(from.clone())
                        .push(" OR date(pub_date) >= ")
                        .push_bind(from)
                        .push(")");
                }
                if let Some(to) = to.map(date_key) {
                    builder
                        .push(" AND (date(scored_at) <= ")
                        .push_bind(to.clone())
                        .push(" OR date(pub_date) <= ")
                        .push_bind(to)
                        .push(")");
                }
            }
        }

        builder.push(" ORDER BY scored_at DESC");

        let rows = builder
            .build_query_as::<ArticleDbRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(?filter, count = rows.len(), "Loaded scored articles");
        Ok(rows.into_iter().map(ArticleDbRow::into_article).collect())
    }
}
