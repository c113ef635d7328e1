use crate::cache::{ArtifactCache, DICTIONARY_FILE, FREQ_FILE};
use crate::config::PipelineOptions;
use crate::corpus::{Corpus, VectorizedCorpus};
use crate::error::PipelineError;
use crate::normalize::{normalize, TokenFilter};
use crate::output::{write_document_topics_csv, write_topic_terms_csv, write_vectors_csv};
use crate::paths::expand_delimited_inputs;
use crate::reader::RowReader;
use crate::singletons::SingletonMode;
use crate::stopwords::{load_stopwords, StopwordSet};
use crate::tokenize::tokenize;
use crate::topics::{FittedTopics, TopicModel};
use crate::util::init_tracing_once;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Default output names, next to the cache artifacts.
pub const TOPIC_FILE: &str = "corpus-topic.csv";
pub const DOC_FILE: &str = "corpus-docs.csv";

/// Driver for the read -> tokenize -> normalize -> filter -> index -> vectorize run.
#[derive(Clone, Debug, Default)]
pub struct TopicPipeline {
    pub(crate) opts: PipelineOptions,
}

/// Result of `fit_topics`: the corpus that was modeled and, unless it was
/// empty, the fitted model.
#[derive(Clone, Debug)]
pub struct TopicRun {
    pub corpus: VectorizedCorpus,
    pub topics: Option<FittedTopics>,
}

impl TopicPipeline {
    pub fn new() -> Self {
        Self { opts: PipelineOptions::default() }
    }

    pub fn from_options(opts: PipelineOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.opts
    }

    // -------- Builder methods --------
    pub fn inputs<I, P>(mut self, inputs: I) -> Self where I: IntoIterator<Item = P>, P: AsRef<Path> { self.opts = self.opts.with_inputs(inputs); self }
    pub fn text_field(mut self, field: impl Into<String>) -> Self { self.opts = self.opts.with_text_field(field); self }
    pub fn id_field(mut self, field: impl Into<String>) -> Self { self.opts = self.opts.with_id_field(Some(field.into())); self }
    pub fn no_id_field(mut self) -> Self { self.opts = self.opts.with_id_field(None); self }
    pub fn stopwords(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_stopwords(path); self }
    pub fn min_token_len(mut self, len: usize) -> Self { self.opts = self.opts.with_min_token_len(len); self }
    pub fn delimiter(mut self, delimiter: u8) -> Self { self.opts = self.opts.with_delimiter(delimiter); self }
    pub fn singleton_mode(mut self, mode: SingletonMode) -> Self { self.opts = self.opts.with_singleton_mode(mode); self }
    pub fn cache_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_cache_dir(dir); self }
    pub fn clear_cache(mut self, yes: bool) -> Self { self.opts = self.opts.with_clear_cache(yes); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn topics(mut self, n: usize) -> Self { self.opts = self.opts.with_topics(n); self }
    pub fn passes(mut self, n: usize) -> Self { self.opts = self.opts.with_passes(n); self }
    pub fn seed(mut self, seed: u64) -> Self { self.opts = self.opts.with_seed(seed); self }
    pub fn top_terms(mut self, n: usize) -> Self { self.opts = self.opts.with_top_terms(n); self }

    // -------- Stages --------

    pub fn load_stopwords(&self) -> Result<StopwordSet> {
        match &self.opts.stopwords_path {
            Some(path) => Ok(load_stopwords(path).context("loading stopword list")?),
            None => Ok(StopwordSet::empty()),
        }
    }

    /// Read, tokenize and normalize every input into a materialized corpus.
    pub fn read_corpus(&self) -> Result<Corpus> {
        init_tracing_once();
        if self.opts.inputs.is_empty() {
            return Err(anyhow!(PipelineError::Config("no input files given".into())));
        }
        let files = expand_delimited_inputs(&self.opts.inputs);
        tracing::info!("reading {} input files", files.len());

        let filter = TokenFilter::new(Arc::new(self.load_stopwords()?), self.opts.min_token_len);
        let reader = RowReader::new(&files, self.opts.reader_config());
        let docs = normalize(tokenize(reader, &self.opts.text_field), &filter);
        let corpus = Corpus::collect(docs).context("reading corpus")?;

        tracing::info!("read {} documents", corpus.len());
        Ok(corpus)
    }

    /// The full pipeline, using the artifact cache when it is enabled and complete.
    pub fn build_corpus(&self) -> Result<VectorizedCorpus> {
        init_tracing_once();
        let cache = self.opts.cache_dir.as_ref().map(ArtifactCache::new);

        if let Some(cache) = &cache {
            if self.opts.clear_cache {
                cache.clear().context("clearing cache artifacts")?;
            } else if cache.is_complete() {
                tracing::info!("reading {} and {} from disk", FREQ_FILE, DICTIONARY_FILE);
                return Ok(cache.load().context("loading cache artifacts")?);
            }
        }

        tracing::info!("creating corpus");
        let filtered = self.read_corpus()?.filter_singletons(self.opts.singleton_mode);
        if filtered.is_empty() {
            tracing::warn!("no documents left after filtering");
        }
        let corpus = filtered.vectorize_all();
        tracing::info!("dictionary size = {}", corpus.index().len());
        tracing::info!("corpus size = {}", corpus.len());

        if let Some(cache) = &cache {
            cache.store(&corpus).context("writing cache artifacts")?;
        }
        Ok(corpus)
    }

    /// Build the corpus and write one row of term counts per document.
    pub fn write_vectors_csv(&self, out_path: &Path) -> Result<usize> {
        let corpus = self.build_corpus()?;
        let n = write_vectors_csv(out_path, self.opts.id_column(), &corpus)
            .with_context(|| format!("writing {}", out_path.display()))?;
        tracing::info!("wrote {} document vectors to {}", n, out_path.display());
        Ok(n)
    }

    /// Build the corpus and fit the topic model. An empty corpus is not an
    /// error: the run carries no model.
    pub fn fit_topics(&self) -> Result<TopicRun> {
        let corpus = self.build_corpus()?;
        let model = TopicModel::new(self.opts.topics)
            .with_passes(self.opts.passes)
            .with_seed(self.opts.seed)
            .with_progress(self.opts.progress);
        tracing::info!("generating topics");
        let topics = match model.fit(&corpus) {
            Ok(fit) => Some(fit),
            Err(PipelineError::EmptyCorpus) => {
                tracing::warn!("corpus is empty, skipping topic modeling");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(TopicRun { corpus, topics })
    }

    /// Fit topics and write the topic-term and document-topic CSVs.
    pub fn write_topics(&self, topic_path: &Path, doc_path: &Path) -> Result<TopicRun> {
        let run = self.fit_topics()?;
        let fit = run.topics.as_ref();

        tracing::info!("writing topic terms to {}", topic_path.display());
        write_topic_terms_csv(topic_path, fit, run.corpus.index(), self.opts.top_terms)
            .with_context(|| format!("writing {}", topic_path.display()))?;

        tracing::info!("writing document topics to {}", doc_path.display());
        write_document_topics_csv(doc_path, self.opts.id_column(), self.opts.topics, &run.corpus, fit)
            .with_context(|| format!("writing {}", doc_path.display()))?;
        Ok(run)
    }
}
