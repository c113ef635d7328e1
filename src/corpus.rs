//! Materialization checkpoints between the streaming and the global stages.
//!
//! `Corpus` is the fully read, normalized document list. Singleton removal
//! needs global counts, so it only exists on `Corpus` and yields a
//! `FilteredCorpus`. The vector index can only be built from a
//! `FilteredCorpus`, and vectorization consumes that same value, so the
//! index always covers exactly the documents being vectorized.

use crate::document::Document;
use crate::error::Result;
use crate::frequency::{corpus_frequencies, count, CorpusFrequencies};
use crate::index::VectorIndex;
use crate::singletons::{filter_singletons, SingletonMode};
use crate::vectorize::vectorize;

#[derive(Clone, Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Count each document's terms and drain the stream. The first error
    /// aborts and is returned.
    pub fn collect<I>(docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Document>>,
    {
        let documents = count(docs.into_iter()).collect::<Result<Vec<_>>>()?;
        Ok(Self { documents })
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn filter_singletons(mut self, mode: SingletonMode) -> FilteredCorpus {
        let (frequencies, singletons_removed) = filter_singletons(&mut self.documents, mode);
        tracing::info!(
            "removed {} singleton terms, {} distinct terms remain over {} documents",
            singletons_removed,
            frequencies.len(),
            self.documents.len()
        );
        FilteredCorpus { documents: self.documents, frequencies, singletons_removed }
    }
}

/// Documents after singleton removal, ready for indexing.
#[derive(Clone, Debug, Default)]
pub struct FilteredCorpus {
    documents: Vec<Document>,
    frequencies: CorpusFrequencies,
    singletons_removed: usize,
}

impl FilteredCorpus {
    /// Rebuild from already-filtered documents (e.g. loaded from the cache).
    pub fn from_filtered(documents: Vec<Document>) -> Self {
        let frequencies = corpus_frequencies(documents.iter());
        Self { documents, frequencies, singletons_removed: 0 }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn frequencies(&self) -> &CorpusFrequencies {
        &self.frequencies
    }

    pub fn singletons_removed(&self) -> usize {
        self.singletons_removed
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn index(&self) -> VectorIndex {
        VectorIndex::build(&self.documents)
    }

    /// Vectorize against a freshly built index.
    pub fn vectorize_all(self) -> VectorizedCorpus {
        let index = self.index();
        self.vectorize(index)
    }

    /// Vectorize against `index`, which must come from this corpus
    /// (directly or via the cache).
    pub fn vectorize(mut self, index: VectorIndex) -> VectorizedCorpus {
        for doc in self.documents.iter_mut() {
            doc.vector = vectorize(doc, &index);
        }
        VectorizedCorpus { documents: self.documents, index }
    }
}

/// Final pipeline output: documents carrying vectors, plus the index that laid them out.
#[derive(Clone, Debug, Default)]
pub struct VectorizedCorpus {
    documents: Vec<Document>,
    index: VectorIndex,
}

impl VectorizedCorpus {
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
