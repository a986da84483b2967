//! Fixture Sieve databases for integration tests.
//!
//! Each fixture is a real SQLite file inside its own temporary directory,
//! created through a separate read-write pool and closed before the
//! exporter opens it read-only.

#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE articles (
        id INTEGER PRIMARY KEY,
        title TEXT,
        source TEXT,
        url TEXT,
        pub_date TEXT,
        composite_score REAL,
        summary TEXT,
        d1_attention_economy REAL,
        d2_data_sovereignty REAL,
        d3_power_consolidation REAL,
        d4_coercion_cooperation REAL,
        d5_fear_trust REAL,
        d6_democratization REAL,
        d7_systemic_design REAL,
        scored_at TEXT,
        entities TEXT,
        topics TEXT
    )
    "#,
    r#"
    CREATE TABLE digests (
        id INTEGER PRIMARY KEY,
        digest_date TEXT UNIQUE NOT NULL,
        content TEXT,
        article_count INTEGER
    )
    "#,
    r#"
    CREATE TABLE threads (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        article_count INTEGER,
        created_at TEXT,
        updated_at TEXT
    )
    "#,
    r#"
    CREATE TABLE article_threads (
        article_id INTEGER NOT NULL,
        thread_id INTEGER NOT NULL,
        PRIMARY KEY (article_id, thread_id)
    )
    "#,
];

/// An article row to seed
pub struct ArticleSeed {
    pub id: i64,
    pub title: &'static str,
    pub source: Option<&'static str>,
    pub pub_date: Option<&'static str>,
    pub score: Option<f64>,
    pub scored_at: Option<&'static str>,
    pub topics: Option<&'static str>,
}

impl ArticleSeed {
    pub fn new(id: i64, score: Option<f64>, scored_at: &'static str, pub_date: &'static str) -> Self {
        Self {
            id,
            title: "Untitled",
            source: Some("Wire"),
            pub_date: Some(pub_date),
            score,
            scored_at: Some(scored_at),
            topics: None,
        }
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    pub fn source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn topics(mut self, topics: &'static str) -> Self {
        self.topics = Some(topics);
        self
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pool: SqlitePool,
}

impl Fixture {
    /// Empty database with the full Sieve schema
    pub async fn new() -> Self {
        Self::with_tables(&SCHEMA).await
    }

    /// Database with only the given CREATE TABLE statements
    pub async fn with_tables(statements: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("sieve.db");
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        for statement in statements {
            sqlx::query(statement).execute(&pool).await.unwrap();
        }

        Self { dir, db_path, pool }
    }

    pub fn schema() -> &'static [&'static str] {
        &SCHEMA
    }

    /// Output root inside the fixture directory (not created)
    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    pub async fn add_article(&self, seed: ArticleSeed) {
        sqlx::query(
            r#"
            INSERT INTO articles (
                id, title, source, url, pub_date, composite_score, summary,
                d1_attention_economy, d2_data_sovereignty, d3_power_consolidation,
                d4_coercion_cooperation, d5_fear_trust, d6_democratization,
                d7_systemic_design, scored_at, topics
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, ?, ?)
        "#,
        )
        .bind(seed.id)
        .bind(seed.title)
        .bind(seed.source)
        .bind(format!("https://example.com/{}", seed.id))
        .bind(seed.pub_date)
        .bind(seed.score)
        .bind(format!("Summary of {}", seed.title))
        .bind(seed.scored_at)
        .bind(seed.topics)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn add_digest(&self, digest_date: &str, content: &str, article_count: i64) {
        sqlx::query("INSERT INTO digests (digest_date, content, article_count) VALUES (?, ?, ?)")
            .bind(digest_date)
            .bind(content)
            .bind(article_count)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn add_thread(&self, id: i64, name: &str, article_ids: &[i64]) {
        self.insert_thread(id, Some(name), article_ids).await;
    }

    /// Thread row with a NULL name (needs a schema without `NOT NULL`)
    pub async fn add_unnamed_thread(&self, id: i64, article_ids: &[i64]) {
        self.insert_thread(id, None, article_ids).await;
    }

    async fn insert_thread(&self, id: i64, name: Option<&str>, article_ids: &[i64]) {
        sqlx::query(
            "INSERT INTO threads (id, name, article_count, created_at, updated_at) VALUES (?, ?, ?, '2026-01-01', '2026-01-31')",
        )
        .bind(id)
        .bind(name)
        .bind(article_ids.len() as i64)
        .execute(&self.pool)
        .await
        .unwrap();

        for article_id in article_ids {
            sqlx::query("INSERT INTO article_threads (article_id, thread_id) VALUES (?, ?)")
                .bind(article_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .unwrap();
        }
    }

    /// Close the seeding connection so the exporter sees a quiescent file
    pub async fn finish(self) -> SeededDb {
        self.pool.close().await;
        SeededDb {
            dir: self.dir,
            db_path: self.db_path,
        }
    }
}

/// A seeded database ready for the exporter
pub struct SeededDb {
    pub dir: TempDir,
    pub db_path: PathBuf,
}

impl SeededDb {
    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("site")
    }
}

/// Count regular files below `root` (0 if it does not exist)
pub fn count_files(root: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(root) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let path = e.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}
