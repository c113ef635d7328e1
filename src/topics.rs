//! Topic modeling over the document vectors.
//!
//! The model is a deterministic EM approximation of LDA: document-topic and
//! topic-term distributions start uniform plus seeded noise, then each pass
//! redistributes every (document, term) count over topics in proportion to
//! `p(topic | doc) * p(term | topic)` and renormalizes both tables.

use crate::corpus::VectorizedCorpus;
use crate::error::{PipelineError, Result};
use crate::index::VectorIndex;
use crate::progress::maybe_count_progress;

#[derive(Clone, Debug)]
pub struct TopicModel {
    n_topics: usize,
    passes: usize,
    seed: u64,
    progress: bool,
}

impl TopicModel {
    pub fn new(n_topics: usize) -> Self {
        Self { n_topics, passes: 100, seed: 42, progress: false }
    }
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    /// Fit to `corpus`. Fails with `EmptyCorpus` when there are no documents
    /// or no indexed terms.
    pub fn fit(&self, corpus: &VectorizedCorpus) -> Result<FittedTopics> {
        if self.n_topics == 0 {
            return Err(PipelineError::Config("topic count must be at least 1".into()));
        }
        let n_docs = corpus.len();
        let n_terms = corpus.index().len();
        if n_docs == 0 || n_terms == 0 {
            return Err(PipelineError::EmptyCorpus);
        }
        let k = self.n_topics;

        // Sparse (slot, count) view of each document.
        let counts: Vec<Vec<(usize, f64)>> = corpus
            .documents()
            .iter()
            .map(|doc| {
                doc.vector
                    .iter()
                    .enumerate()
                    .filter(|(_, &c)| c > 0)
                    .map(|(slot, &c)| (slot, f64::from(c)))
                    .collect()
            })
            .collect();

        let mut doc_topic: Vec<f64> = (0..n_docs * k)
            .map(|i| 1.0 / k as f64 + self.noise(i) * 0.01)
            .collect();
        let mut topic_term: Vec<f64> = (0..k * n_terms)
            .map(|i| 1.0 / n_terms as f64 + self.noise(i + n_docs * k) * 0.01)
            .collect();
        normalize_rows(&mut doc_topic, k);
        normalize_rows(&mut topic_term, n_terms);

        let pb = maybe_count_progress(self.progress, self.passes as u64, "Topics: fitting");
        let mut weights = vec![0.0; k];
        for _ in 0..self.passes {
            let mut next_doc_topic = vec![0.0; n_docs * k];
            let mut next_topic_term = vec![0.0; k * n_terms];

            for (d, doc) in counts.iter().enumerate() {
                for &(v, count) in doc {
                    let mut sum = 0.0;
                    for t in 0..k {
                        weights[t] = doc_topic[d * k + t] * topic_term[t * n_terms + v];
                        sum += weights[t];
                    }
                    if sum <= 1e-12 {
                        continue;
                    }
                    for t in 0..k {
                        let share = count * weights[t] / sum;
                        next_doc_topic[d * k + t] += share;
                        next_topic_term[t * n_terms + v] += share;
                    }
                }
            }

            normalize_rows(&mut next_doc_topic, k);
            normalize_rows(&mut next_topic_term, n_terms);
            doc_topic = next_doc_topic;
            topic_term = next_topic_term;
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_with_message("Topics: done");
        }

        // Documents with no terms keep the initial noise; report them as all-zero.
        for (d, doc) in counts.iter().enumerate() {
            if doc.is_empty() {
                doc_topic[d * k..(d + 1) * k].fill(0.0);
            }
        }

        tracing::info!("fitted {} topics over {} documents and {} terms ({} passes)", k, n_docs, n_terms, self.passes);
        Ok(FittedTopics { n_topics: k, n_terms, doc_topic, topic_term })
    }

    /// Seeded LCG in `[0, 1)`.
    fn noise(&self, i: usize) -> f64 {
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1 << 32;
        let x = A.wrapping_mul(self.seed.wrapping_add(i as u64)).wrapping_add(C) % M;
        x as f64 / M as f64
    }
}

fn normalize_rows(data: &mut [f64], n_cols: usize) {
    for row in data.chunks_mut(n_cols) {
        let sum: f64 = row.iter().sum();
        if sum > 1e-12 {
            row.iter_mut().for_each(|x| *x /= sum);
        }
    }
}

/// Learned distributions: rows of `doc_topic` are documents, rows of
/// `topic_term` are topics.
#[derive(Clone, Debug)]
pub struct FittedTopics {
    n_topics: usize,
    n_terms: usize,
    doc_topic: Vec<f64>,
    topic_term: Vec<f64>,
}

impl FittedTopics {
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    pub fn n_documents(&self) -> usize {
        self.doc_topic.len() / self.n_topics
    }

    /// Topic scores for document `d` (corpus order).
    pub fn document_topics(&self, d: usize) -> &[f64] {
        &self.doc_topic[d * self.n_topics..(d + 1) * self.n_topics]
    }

    pub fn topic_weights(&self, topic: usize) -> &[f64] {
        &self.topic_term[topic * self.n_terms..(topic + 1) * self.n_terms]
    }

    /// The `n` heaviest terms of each topic, heaviest first.
    pub fn topic_terms(&self, index: &VectorIndex, n: usize) -> Vec<Vec<(String, f64)>> {
        (0..self.n_topics)
            .map(|topic| {
                let mut scored: Vec<(usize, f64)> = self.topic_weights(topic).iter().copied().enumerate().collect();
                scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
                scored
                    .into_iter()
                    .take(n)
                    .filter_map(|(slot, w)| index.term(slot).map(|t| (t.to_string(), w)))
                    .collect()
            })
            .collect()
    }
}
