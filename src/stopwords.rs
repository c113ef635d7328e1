//! Stopword list loading.

use crate::error::{PipelineError, Result};
use crate::util::open_file;
use ahash::AHashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Immutable set of stopwords, stored exactly as they appear in the list.
/// The normalizer lower-cases tokens before lookup, so lists are expected
/// to be lower-case already.
#[derive(Clone, Debug, Default)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { words: iter.into_iter().map(Into::into).collect() }
    }
}

/// Read a newline-delimited word list. Lines are trimmed; blank lines are ignored.
pub fn load_stopwords(path: &Path) -> Result<StopwordSet> {
    let reader = BufReader::new(open_file(path)?);
    let mut words = AHashSet::new();
    for line in reader.lines() {
        let line = line.map_err(|e| PipelineError::file_access(path, e))?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    tracing::debug!("loaded {} stopwords from {}", words.len(), path.display());
    Ok(StopwordSet { words })
}
