//! Row reader: delimited files -> lazy stream of `Document`s.
//!
//! Reading semantics per file:
//! - a row whose text value is the literal `0` ends that file (the rest is ignored),
//! - a row whose text value is empty is skipped,
//! - a row without the text field is a schema error.

use crate::document::Document;
use crate::error::{PipelineError, Result};
use crate::paths::delimiter_for;
use crate::util::open_file;
use csv::{StringRecord, StringRecordsIntoIter};
use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};

/// End-of-data marker used by the survey exports.
pub const ZERO_SENTINEL: &str = "0";

/// Which columns the reader cares about.
#[derive(Clone, Debug)]
pub struct ReaderConfig {
    pub text_field: String,
    pub id_field: Option<String>,
    /// Overrides the per-file delimiter picked from the extension.
    pub delimiter: Option<u8>,
}

impl ReaderConfig {
    pub fn new(text_field: impl Into<String>) -> Self {
        Self { text_field: text_field.into(), id_field: None, delimiter: None }
    }
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

struct OpenFile {
    path: PathBuf,
    headers: StringRecord,
    records: StringRecordsIntoIter<File>,
    text_idx: Option<usize>,
    id_idx: Option<usize>,
    row: u64,
}

/// Lazy, single-use iterator over the documents of several files sharing a header layout.
///
/// The first error ends the iteration.
pub struct RowReader {
    cfg: ReaderConfig,
    pending: VecDeque<PathBuf>,
    current: Option<OpenFile>,
    ordinal: u64,
    failed: bool,
}

impl RowReader {
    pub fn new<I, P>(files: I, cfg: ReaderConfig) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            cfg,
            pending: files.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            current: None,
            ordinal: 0,
            failed: false,
        }
    }

    fn open(&self, path: PathBuf) -> Result<OpenFile> {
        let file = open_file(&path)?;
        let delimiter = self.cfg.delimiter.unwrap_or_else(|| delimiter_for(&path));
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);
        let headers = rdr.headers().map_err(|e| PipelineError::csv(&path, e))?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);
        let text_idx = position(self.cfg.text_field.as_str());
        let id_idx = self.cfg.id_field.as_deref().and_then(position);
        tracing::debug!("reading {} ({} columns)", path.display(), headers.len());
        Ok(OpenFile { path, headers, records: rdr.into_records(), text_idx, id_idx, row: 0 })
    }

    fn next_document(&mut self) -> Option<Result<Document>> {
        loop {
            if self.current.is_none() {
                let path = self.pending.pop_front()?;
                match self.open(path) {
                    Ok(f) => self.current = Some(f),
                    Err(e) => return Some(Err(e)),
                }
            }
            let file = self.current.as_mut()?;

            let record = match file.records.next() {
                None => {
                    self.current = None;
                    continue;
                }
                Some(Err(e)) => return Some(Err(PipelineError::csv(&file.path, e))),
                Some(Ok(r)) => r,
            };
            file.row += 1;

            let text = match file.text_idx.and_then(|i| record.get(i)) {
                Some(t) => t,
                None => {
                    let available = file.headers.iter().take(record.len()).map(str::to_string).collect();
                    return Some(Err(PipelineError::Schema {
                        path: file.path.clone(),
                        row: file.row,
                        field: self.cfg.text_field.clone(),
                        available,
                    }));
                }
            };

            let text = text.trim();
            if text == ZERO_SENTINEL {
                tracing::debug!("{}: zero sentinel at row {}, ignoring the rest of the file", file.path.display(), file.row);
                self.current = None;
                continue;
            }
            if text.is_empty() {
                continue;
            }

            let fields = file
                .headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            let id = match file.id_idx.and_then(|i| record.get(i)) {
                Some(id) => id.to_string(),
                None => self.ordinal.to_string(),
            };
            self.ordinal += 1;
            return Some(Ok(Document::new(id, fields)));
        }
    }
}

impl Iterator for RowReader {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_document();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
            self.current = None;
            self.pending.clear();
        }
        item
    }
}

/// Convenience over `RowReader::new`.
pub fn read_corpus<I, P>(files: I, cfg: ReaderConfig) -> RowReader
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    RowReader::new(files, cfg)
}
