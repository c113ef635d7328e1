//! Token normalization: keep alphanumeric, long-enough, non-stopword tokens, lower-cased.

use crate::document::Document;
use crate::error::Result;
use crate::stopwords::StopwordSet;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct TokenFilter {
    pub stopwords: Arc<StopwordSet>,
    /// Tokens must be strictly longer than this (in chars).
    pub min_token_len: usize,
}

impl TokenFilter {
    pub fn new(stopwords: Arc<StopwordSet>, min_token_len: usize) -> Self {
        Self { stopwords, min_token_len }
    }

    /// The lower-cased token if it passes, `None` otherwise.
    pub fn apply(&self, token: &str) -> Option<String> {
        if token.is_empty() || !token.chars().all(char::is_alphanumeric) {
            return None;
        }
        if token.chars().count() <= self.min_token_len {
            return None;
        }
        let lower = token.to_lowercase();
        if self.stopwords.contains(&lower) {
            return None;
        }
        Some(lower)
    }

    pub fn filter_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens.iter().filter_map(|t| self.apply(t.as_ref())).collect()
    }
}

/// Normalizer stage: replaces `tokens` with the filtered form of `raw_tokens`.
pub fn normalize<'a, I>(docs: I, filter: &'a TokenFilter) -> impl Iterator<Item = Result<Document>> + 'a
where
    I: Iterator<Item = Result<Document>> + 'a,
{
    docs.map(move |doc| {
        let mut doc = doc?;
        doc.tokens = filter.filter_tokens(&doc.raw_tokens);
        Ok(doc)
    })
}
