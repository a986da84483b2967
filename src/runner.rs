//! Run orchestration.
//!
//! Opens and validates the database, decides which exports to run, and is
//! the only place that writes to the output root. Everything upstream of
//! [`OutputSink::emit`] is a read or a pure transform, so a dry run executes
//! the same path minus the writes.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export::{
    build_articles_document, build_digest_document, build_threads_document, DigestOptions,
    RenderedDocument,
};
use crate::storage::{date_key, Database, DatabaseError, DateFilter};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum RunError {
    /// Missing database, open failure or missing tables. Nothing was exported.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Failure partway through exporting. Files already written are kept.
    #[error(transparent)]
    Export(anyhow::Error),
}

// ============================================================================
// Options
// ============================================================================

/// Everything a single export run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sieve_db: PathBuf,
    /// Output root; documents land beneath it at their relative paths
    pub output: PathBuf,
    pub filter: DateFilter,
    /// Print what would be written instead of writing
    pub dry_run: bool,
    /// Skip digest markdown
    pub articles_only: bool,
    /// Skip the JSON data files
    pub digests_only: bool,
    pub digest: DigestOptions,
}

impl RunOptions {
    pub fn exports_digests(&self) -> bool {
        !self.articles_only
    }

    pub fn exports_data(&self) -> bool {
        !self.digests_only
    }
}

// ============================================================================
// Output
// ============================================================================

/// Writes rendered documents under the output root, or previews them.
#[derive(Debug, Clone)]
pub struct OutputSink {
    root: PathBuf,
    dry_run: bool,
}

impl OutputSink {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
        }
    }

    /// Write `doc` to its target path, overwriting any previous file.
    ///
    /// In dry-run mode prints the target path and the document preview to
    /// stdout and touches nothing.
    pub fn emit(&self, doc: &RenderedDocument) -> Result<PathBuf> {
        let path = self.root.join(&doc.relative_path);

        if self.dry_run {
            println!("\n[DRY RUN] Would write to: {}", path.display());
            println!("{}", doc.preview);
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&path, &doc.contents)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;

        tracing::info!(path = %path.display(), "Exported {}", doc.description);
        Ok(path)
    }
}

// ============================================================================
// Run
// ============================================================================

/// Run one export.
///
/// The database connection is closed before returning, whether the run
/// succeeded or not.
pub async fn run(options: &RunOptions) -> Result<(), RunError> {
    let db = Database::open(&options.sieve_db).await?;
    let result = execute(&db, options).await;
    db.close().await;
    result
}

async fn execute(db: &Database, options: &RunOptions) -> Result<(), RunError> {
    db.verify_schema().await?;
    export_all(db, options).await.map_err(RunError::Export)
}

async fn export_all(db: &Database, options: &RunOptions) -> Result<()> {
    let sink = OutputSink::new(&options.output, options.dry_run);

    if options.exports_digests() {
        export_digests(db, &sink, options).await?;
    }

    if options.exports_data() {
        let articles = db
            .get_scored_articles(&options.filter)
            .await
            .context("Failed to load articles")?;
        sink.emit(&build_articles_document(&articles, Utc::now())?)?;

        let threads = db
            .get_threads_with_members()
            .await
            .context("Failed to load threads")?;
        sink.emit(&build_threads_document(&threads, Utc::now())?)?;
    }

    tracing::info!("Export complete!");
    Ok(())
}

async fn export_digests(db: &Database, sink: &OutputSink, options: &RunOptions) -> Result<()> {
    let dates = match options.filter {
        DateFilter::On(date) => vec![date_key(date)],
        ref filter => {
            let dates = db
                .get_digest_dates(filter)
                .await
                .context("Failed to list digest dates")?;
            if dates.is_empty() {
                tracing::warn!("No digests found matching criteria");
                return Ok(());
            }
            tracing::info!(count = dates.len(), "Exporting {} digests...", dates.len());
            dates
        }
    };

    for date in &dates {
        export_digest(db, sink, date, &options.digest).await?;
    }
    Ok(())
}

/// Export the digest for one date.
///
/// A date with no stored digest is logged and skipped, not an error.
pub async fn export_digest(
    db: &Database,
    sink: &OutputSink,
    digest_date: &str,
    options: &DigestOptions,
) -> Result<()> {
    let Some(digest) = db
        .get_digest(digest_date)
        .await
        .with_context(|| format!("Failed to load digest for {digest_date}"))?
    else {
        tracing::warn!(digest_date, "No digest found for {}", digest_date);
        return Ok(());
    };

    let articles = db
        .get_articles_for_digest_date(digest_date)
        .await
        .with_context(|| format!("Failed to load articles for {digest_date}"))?;

    sink.emit(&build_digest_document(&digest, &articles, options))?;
    Ok(())
}
