//! Flatten forum submissions and comments from monthly JSON-lines dumps into
//! one `Posting` CSV, the input format of the topic pipeline.

use crate::error::PipelineError;
use crate::jsonl::for_each_line;
use crate::paths::{expand_dump_inputs, input_kind, InputKind};
use crate::progress::maybe_count_progress;
use crate::util::{create_file, init_tracing_once};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingKind {
    Submission,
    Comment,
}

/// One flattened row. For submissions `parent_id` is the subreddit id; for
/// comments it is the parent thing id and `permalink`/`title` are empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Posting {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PostingKind,
    pub parent_id: String,
    pub permalink: String,
    pub redditor: String,
    pub title: String,
    pub created_at: String,
    pub score: Option<i64>,
    pub downs: Option<i64>,
    pub ups: Option<i64>,
    pub text: String,
}

impl Posting {
    pub const FIELDS: [&'static str; 11] = [
        "id", "type", "parent_id", "permalink", "redditor", "title", "created_at", "score", "downs", "ups", "text",
    ];

    /// Build from a dump record; `None` when it has no id.
    pub fn from_record(v: &Value) -> Option<Self> {
        let id = str_field(v, "id")?.to_string();
        let kind = if is_comment_record(v) { PostingKind::Comment } else { PostingKind::Submission };
        let created_at = created_utc(v).and_then(format_timestamp).unwrap_or_default();
        let text = |key| str_field(v, key).unwrap_or_default().to_string();
        let posting = match kind {
            PostingKind::Submission => Posting {
                id,
                kind,
                parent_id: text("subreddit_id"),
                permalink: text("permalink"),
                redditor: text("author"),
                title: text("title"),
                created_at,
                score: int_field(v, "score"),
                downs: int_field(v, "downs"),
                ups: int_field(v, "ups"),
                text: text("selftext"),
            },
            PostingKind::Comment => Posting {
                id,
                kind,
                parent_id: text("parent_id"),
                permalink: String::new(),
                redditor: text("author"),
                title: String::new(),
                created_at,
                score: int_field(v, "score"),
                downs: int_field(v, "downs"),
                ups: int_field(v, "ups"),
                text: text("body"),
            },
        };
        Some(posting)
    }
}

/// Heuristic: a record is a comment if it has a `body` and a `parent_id`.
pub fn is_comment_record(v: &Value) -> bool {
    v.get("body").is_some() && v.get("parent_id").is_some()
}

fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(Value::as_str)
}

/// Integers may arrive as numbers, floats or numeric strings depending on the dump month.
fn int_field(v: &Value, key: &str) -> Option<i64> {
    match v.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

pub fn created_utc(v: &Value) -> Option<i64> {
    int_field(v, "created_utc")
}

/// UTC `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: i64) -> Option<String> {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(ts).ok()?.format(fmt).ok()
}

/// Parse a `MM/DD/YYYY` date.
pub fn parse_date(s: &str) -> Result<Date> {
    let fmt = format_description!("[month]/[day]/[year]");
    Date::parse(s.trim(), fmt).with_context(|| format!("invalid date `{s}` (expected MM/DD/YYYY)"))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostingsSummary {
    pub submissions: u64,
    pub comments: u64,
    /// Lines that were not JSON objects with an id.
    pub malformed: u64,
}

impl PostingsSummary {
    pub fn written(&self) -> u64 {
        self.submissions + self.comments
    }
}

/// Filtered export of dump records to a postings CSV.
#[derive(Clone, Debug, Default)]
pub struct PostingsExport {
    subreddit: Option<String>, // normalized lowercase, no "r/"
    from_date: Option<Date>,   // inclusive
    to_date: Option<Date>,     // inclusive
    progress: bool,
}

impl PostingsExport {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn subreddit(mut self, sub: impl AsRef<str>) -> Self {
        let mut s = sub.as_ref().trim().to_lowercase();
        if let Some(rest) = s.strip_prefix("r/") {
            s = rest.to_string();
        }
        self.subreddit = Some(s);
        self
    }
    pub fn date_range(mut self, from: Option<Date>, to: Option<Date>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }
    pub fn progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    fn matches(&self, v: &Value) -> bool {
        if let Some(sub) = &self.subreddit {
            match str_field(v, "subreddit") {
                Some(s) if s.eq_ignore_ascii_case(sub) => {}
                _ => return false,
            }
        }
        if self.from_date.is_none() && self.to_date.is_none() {
            return true;
        }
        let Some(day) = created_utc(v)
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
            .map(|dt| dt.date())
        else {
            return false;
        };
        self.from_date.map_or(true, |lo| day >= lo) && self.to_date.map_or(true, |hi| day <= hi)
    }

    /// Stream every input (directories are expanded to their dump files) and
    /// write matching records to `out_path`, header first.
    pub fn write_csv(&self, inputs: &[PathBuf], out_path: &Path) -> Result<PostingsSummary> {
        init_tracing_once();
        let files = expand_dump_inputs(inputs);
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(create_file(out_path)?);
        w.write_record(Posting::FIELDS).map_err(|e| PipelineError::csv(out_path, e))?;

        let pb = maybe_count_progress(self.progress, files.len() as u64, "Postings: files");
        let mut summary = PostingsSummary::default();
        for path in &files {
            let compressed = matches!(input_kind(path), Some(InputKind::JsonLines { compressed: true }));
            for_each_line(path, compressed, |line| -> Result<()> {
                let Ok(v) = serde_json::from_str::<Value>(line) else {
                    summary.malformed += 1;
                    return Ok(());
                };
                if !self.matches(&v) {
                    return Ok(());
                }
                let Some(posting) = Posting::from_record(&v) else {
                    summary.malformed += 1;
                    return Ok(());
                };
                match posting.kind {
                    PostingKind::Submission => summary.submissions += 1,
                    PostingKind::Comment => summary.comments += 1,
                }
                w.serialize(&posting).map_err(|e| PipelineError::csv(out_path, e))?;
                Ok(())
            })
            .with_context(|| format!("processing {}", path.display()))?;
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_with_message("Postings: done");
        }
        w.flush().with_context(|| format!("flushing {}", out_path.display()))?;

        if summary.malformed > 0 {
            tracing::warn!("skipped {} malformed records", summary.malformed);
        }
        tracing::info!(
            "wrote {} postings ({} submissions, {} comments) to {}",
            summary.written(),
            summary.submissions,
            summary.comments,
            out_path.display()
        );
        Ok(summary)
    }
}
