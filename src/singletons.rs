//! Singleton removal: drop terms that occur exactly once in the whole corpus.

use crate::document::Document;
use crate::frequency::{corpus_frequencies, term_frequencies, CorpusFrequencies};
use ahash::AHashSet;

pub type SingletonSet = AHashSet<String>;

/// How many removal rounds to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SingletonMode {
    /// One round against the original corpus counts.
    #[default]
    SinglePass,
    /// Recount and remove until no term has a total count of 1.
    Iterative,
}

pub fn find_singletons(freqs: &CorpusFrequencies) -> SingletonSet {
    freqs
        .iter()
        .filter(|(_, &count)| count == 1)
        .map(|(term, _)| term.clone())
        .collect()
}

/// Remove every occurrence of a singleton from one document, then recount it.
pub fn remove_from_document(doc: &mut Document, singletons: &SingletonSet) {
    if singletons.is_empty() {
        return;
    }
    doc.tokens.retain(|t| !singletons.contains(t));
    doc.frequencies = term_frequencies(&doc.tokens);
}

pub fn remove_singletons(docs: &mut [Document], singletons: &SingletonSet) {
    for doc in docs.iter_mut() {
        remove_from_document(doc, singletons);
    }
}

/// Run removal per `mode`. Returns the corpus frequencies of what is left
/// and the number of distinct terms removed.
pub fn filter_singletons(docs: &mut [Document], mode: SingletonMode) -> (CorpusFrequencies, usize) {
    let mut freqs = corpus_frequencies(docs.iter());
    let mut removed = 0;
    loop {
        let singletons = find_singletons(&freqs);
        if singletons.is_empty() {
            break;
        }
        removed += singletons.len();
        remove_singletons(docs, &singletons);
        for term in &singletons {
            freqs.remove(term);
        }
        match mode {
            SingletonMode::SinglePass => break,
            SingletonMode::Iterative => freqs = corpus_frequencies(docs.iter()),
        }
    }
    (freqs, removed)
}
