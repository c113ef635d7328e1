//! Term -> vector slot assignment, and its on-disk dictionary form.

use crate::document::Document;
use crate::error::{PipelineError, Result};
use crate::util::{create_file, open_file};
use ahash::AHashMap;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Bijection between surviving terms and `0..len()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorIndex {
    slots: AHashMap<String, usize>,
    terms: Vec<String>,
}

impl VectorIndex {
    /// Assign slots in first-seen order: documents in order, then terms in
    /// each document's frequency map order.
    pub fn build<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut index = Self::default();
        for doc in docs {
            for term in doc.frequencies.keys() {
                index.insert(term);
            }
        }
        index
    }

    fn insert(&mut self, term: &str) -> usize {
        if let Some(&slot) = self.slots.get(term) {
            return slot;
        }
        let slot = self.terms.len();
        self.slots.insert(term.to_string(), slot);
        self.terms.push(term.to_string());
        slot
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<usize> {
        self.slots.get(term).copied()
    }

    pub fn term(&self, slot: usize) -> Option<&str> {
        self.terms.get(slot).map(String::as_str)
    }

    /// Terms in slot order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Write as `slot<TAB>term` lines, in slot order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut w = BufWriter::new(create_file(path)?);
        for (slot, term) in self.terms.iter().enumerate() {
            writeln!(w, "{slot}\t{term}").map_err(|e| PipelineError::file_access(path, e))?;
        }
        w.flush().map_err(|e| PipelineError::file_access(path, e))
    }

    /// Read a dictionary written by `save`. Slots must be exactly `0..n`,
    /// each term appearing once.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(open_file(path)?);
        let mut pairs: Vec<(usize, String)> = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PipelineError::file_access(path, e))?;
            if line.is_empty() {
                continue;
            }
            let (slot, term) = line
                .split_once('\t')
                .ok_or_else(|| PipelineError::cache(path, format!("line {}: expected `slot<TAB>term`", n + 1)))?;
            let slot = slot
                .parse::<usize>()
                .map_err(|_| PipelineError::cache(path, format!("line {}: bad slot `{slot}`", n + 1)))?;
            pairs.push((slot, term.to_string()));
        }
        pairs.sort_by_key(|(slot, _)| *slot);

        let mut index = Self::default();
        for (expected, (slot, term)) in pairs.into_iter().enumerate() {
            if slot != expected {
                return Err(PipelineError::cache(path, format!("slot {expected} missing or duplicated")));
            }
            if index.slots.contains_key(&term) {
                return Err(PipelineError::cache(path, format!("term `{term}` appears twice")));
            }
            index.insert(&term);
        }
        Ok(index)
    }
}
