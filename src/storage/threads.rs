use anyhow::Result;

use super::schema::Database;
use super::types::{Thread, ThreadMember};

/// Row type for the thread header query
type ThreadRow = (i64, Option<String>, Option<i64>, Option<String>, Option<String>);

impl Database {
    // ========================================================================
    // Thread Queries
    // ========================================================================

    /// All threads ordered by name, each with its scored members.
    ///
    /// Members come from `article_threads`, restricted to articles with a
    /// composite score and ordered by `scored_at` ascending. Threads with no
    /// scored members are still returned here, with an empty member list.
    pub async fn get_threads_with_members(&self) -> Result<Vec<Thread>> {
        let rows: Vec<ThreadRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, t.article_count, t.created_at, t.updated_at
            FROM threads t
            ORDER BY t.name
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut threads = Vec::with_capacity(rows.len());
        for (id, name, article_count, created_at, updated_at) in rows {
            let members = sqlx::query_as::<_, ThreadMember>(
                r#"
                SELECT a.id, a.scored_at, a.pub_date
                FROM articles a
                JOIN article_threads at ON a.id = at.article_id
                WHERE at.thread_id = ? AND a.composite_score IS NOT NULL
                ORDER BY a.scored_at ASC
            "#,
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

            threads.push(Thread {
                id,
                name,
                article_count,
                created_at,
                updated_at,
                members,
            });
        }

        tracing::debug!(count = threads.len(), "Loaded threads");
        Ok(threads)
    }
}
