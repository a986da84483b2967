use anyhow::Result;
use sqlx::QueryBuilder;

use super::schema::Database;
use super::types::{date_key, DateFilter, Digest};

impl Database {
    // ========================================================================
    // Digest Queries
    // ========================================================================

    /// Get the stored digest for a date.
    ///
    /// # Returns
    ///
    /// `None` when no digest row exists for `digest_date`.
    pub async fn get_digest(&self, digest_date: &str) -> Result<Option<Digest>> {
        let row: Option<(Option<String>, Option<i64>)> =
            sqlx::query_as("SELECT content, article_count FROM digests WHERE digest_date = ?")
                .bind(digest_date)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(content, article_count)| Digest {
            digest_date: digest_date.to_string(),
            content: content.unwrap_or_default(),
            article_count,
        }))
    }

    /// Digest dates matching `filter`, oldest first
    pub async fn get_digest_dates(&self, filter: &DateFilter) -> Result<Vec<String>> {
        let mut builder: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT digest_date FROM digests");

        match *filter {
            DateFilter::All => {}
            DateFilter::On(date) => {
                builder.push(" WHERE digest_date = ").push_bind(date_key(date));
            }
            DateFilter::Range { from, to } => {
                let mut conditions = 0;
                for (op, bound) in [(">=", from), ("<=", to)] {
                    if let Some(bound) = bound {
                        builder.push(if conditions == 0 { " WHERE " } else { " AND " });
                        builder
                            .push("digest_date ")
                            .push(op)
                            .push(" ")
                            .push_bind(date_key(bound));
                        conditions += 1;
                    }
                }
            }
        }

        builder.push(" ORDER BY digest_date ASC");

        let rows: Vec<(String,)> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}
