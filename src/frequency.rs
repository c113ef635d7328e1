//! Term counting: per-document frequency maps and corpus-wide totals.

use crate::document::Document;
use ahash::AHashMap;
use indexmap::IndexMap;

/// Term -> count for one document, keys in first-occurrence order.
pub type TermFrequencies = IndexMap<String, u32>;

/// Term -> total occurrences across the corpus.
pub type CorpusFrequencies = AHashMap<String, u64>;

pub fn term_frequencies<S: AsRef<str>>(tokens: &[S]) -> TermFrequencies {
    let mut freqs = TermFrequencies::new();
    for token in tokens {
        *freqs.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    freqs
}

/// Sum every document's frequency map. Consumes the whole input.
pub fn corpus_frequencies<'a, I>(docs: I) -> CorpusFrequencies
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut total = CorpusFrequencies::new();
    for doc in docs {
        merge_counts(&mut total, &doc.frequencies);
    }
    total
}

pub fn merge_counts(total: &mut CorpusFrequencies, part: &TermFrequencies) {
    for (term, count) in part {
        *total.entry(term.clone()).or_insert(0) += u64::from(*count);
    }
}

/// Attach a frequency map to each document, derived from its current `tokens`.
pub fn count<I>(docs: I) -> impl Iterator<Item = crate::error::Result<Document>>
where
    I: Iterator<Item = crate::error::Result<Document>>,
{
    docs.map(|doc| {
        let mut doc = doc?;
        doc.frequencies = term_frequencies(&doc.tokens);
        Ok(doc)
    })
}
