use crate::reader::ReaderConfig;
use crate::singletons::SingletonMode;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEXT_FIELD: &str = "text";
pub const DEFAULT_ID_FIELD: &str = "id";

/// Everything a pipeline run depends on, passed explicitly to each stage.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub inputs: Vec<PathBuf>,
    pub text_field: String,
    pub id_field: Option<String>,
    pub stopwords_path: Option<PathBuf>, // None = no stopwords
    pub min_token_len: usize,            // tokens must be strictly longer
    pub delimiter: Option<u8>,           // None = pick per file from the extension
    pub singleton_mode: SingletonMode,

    // artifact cache
    pub cache_dir: Option<PathBuf>, // None = caching off
    pub clear_cache: bool,          // rebuild even when artifacts exist

    pub progress: bool,

    // topic modeling
    pub topics: usize,
    pub passes: usize,
    pub seed: u64,
    pub top_terms: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            id_field: Some(DEFAULT_ID_FIELD.to_string()),
            stopwords_path: None,
            min_token_len: 0,
            delimiter: None,
            singleton_mode: SingletonMode::SinglePass,

            cache_dir: None,
            clear_cache: false,

            progress: false,

            topics: 10,
            passes: 100,
            seed: 42,
            top_terms: 10,
        }
    }
}

impl PipelineOptions {
    pub fn with_inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.inputs = inputs.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
        self
    }
    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }
    pub fn with_id_field(mut self, field: Option<String>) -> Self {
        self.id_field = field;
        self
    }
    pub fn with_stopwords(mut self, path: impl AsRef<Path>) -> Self {
        self.stopwords_path = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
    pub fn with_singleton_mode(mut self, mode: SingletonMode) -> Self {
        self.singleton_mode = mode;
        self
    }
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cache_dir = Some(dir.as_ref().to_path_buf());
        self
    }
    pub fn with_clear_cache(mut self, yes: bool) -> Self {
        self.clear_cache = yes;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_topics(mut self, topics: usize) -> Self {
        self.topics = topics;
        self
    }
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    pub fn with_top_terms(mut self, n: usize) -> Self {
        self.top_terms = n;
        self
    }

    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            text_field: self.text_field.clone(),
            id_field: self.id_field.clone(),
            delimiter: self.delimiter,
        }
    }

    /// Header name for the id column of every output CSV.
    pub fn id_column(&self) -> &str {
        self.id_field.as_deref().unwrap_or(DEFAULT_ID_FIELD)
    }
}
