use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use super::{generated_at, RenderedDocument};
use crate::storage::{Thread, ThreadMember};
use crate::util::extract_date;

/// One entry of `active_threads`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadEntry {
    pub id: i64,
    pub label: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub article_count: usize,
    pub article_ids: Vec<i64>,
}

/// Shape of `data/threads.json`
#[derive(Debug, Serialize)]
struct ThreadsFile<'a> {
    generated_at: String,
    active_threads: &'a [ThreadEntry],
}

/// `data/threads.json`
pub fn threads_path() -> PathBuf {
    PathBuf::from("data").join("threads.json")
}

/// Scoring date of a member, falling back to its publication date
fn seen_date(member: &ThreadMember) -> Option<String> {
    member
        .scored_at
        .as_deref()
        .and_then(extract_date)
        .or_else(|| member.pub_date.as_deref().and_then(extract_date))
        .map(str::to_string)
}

/// Convert threads to export entries, dropping threads without scored members.
///
/// Members are expected oldest-first, so the first and last members give the
/// first- and last-seen dates.
pub fn thread_entries(threads: &[Thread]) -> Vec<ThreadEntry> {
    threads
        .iter()
        .filter_map(|thread| {
            let first = thread.members.first()?;
            let last = thread.members.last()?;
            Some(ThreadEntry {
                id: thread.id,
                label: thread.name.clone(),
                first_seen: seen_date(first),
                last_seen: seen_date(last),
                article_count: thread.members.len(),
                article_ids: thread.members.iter().map(|m| m.id).collect(),
            })
        })
        .collect()
}

/// Render the active threads as pretty-printed JSON
pub fn build_threads_document(threads: &[Thread], now: DateTime<Utc>) -> Result<RenderedDocument> {
    let entries = thread_entries(threads);
    let file = ThreadsFile {
        generated_at: generated_at(now),
        active_threads: &entries,
    };
    let contents = serde_json::to_string_pretty(&file).context("Failed to serialize threads")?;

    let mut preview = format!("Total threads: {}", entries.len());
    if let Some(first) = entries.first() {
        let sample =
            serde_json::to_string_pretty(first).context("Failed to serialize sample thread")?;
        preview.push_str(&format!("\nSample thread: {sample}"));
    }

    Ok(RenderedDocument {
        relative_path: threads_path(),
        contents,
        preview,
        description: format!("{} threads", entries.len()),
    })
}
