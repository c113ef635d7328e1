mod config;
mod error;
mod paths;
mod util;
mod progress;

mod document;
mod stopwords;
mod reader;
mod tokenize;
mod normalize;
mod frequency;
mod singletons;
mod index;
mod vectorize;
mod corpus;

mod jsonl;
mod cache;
mod output;
mod topics;
mod pipeline;

mod postings;

pub use crate::config::{PipelineOptions, DEFAULT_ID_FIELD, DEFAULT_TEXT_FIELD};
pub use crate::error::{PipelineError, Result};
pub use crate::pipeline::{TopicPipeline, TopicRun, DOC_FILE, TOPIC_FILE};

// Pipeline stages, usable on their own.
pub use crate::document::Document;
pub use crate::stopwords::{load_stopwords, StopwordSet};
pub use crate::reader::{read_corpus, ReaderConfig, RowReader, ZERO_SENTINEL};
pub use crate::tokenize::{tokenize, word_tokenize};
pub use crate::normalize::{normalize, TokenFilter};
pub use crate::frequency::{corpus_frequencies, count, term_frequencies, CorpusFrequencies, TermFrequencies};
pub use crate::singletons::{filter_singletons, find_singletons, remove_singletons, SingletonMode, SingletonSet};
pub use crate::index::VectorIndex;
pub use crate::vectorize::vectorize;

// Typed checkpoints between streaming and global stages.
pub use crate::corpus::{Corpus, FilteredCorpus, VectorizedCorpus};

// Artifacts and outputs.
pub use crate::cache::{ArtifactCache, DICTIONARY_FILE, FREQ_FILE};
pub use crate::output::{write_document_topics_csv, write_topic_terms_csv, write_vectors_csv};
pub use crate::topics::{FittedTopics, TopicModel};

pub use crate::paths::{delimiter_for, expand_delimited_inputs, expand_dump_inputs};
pub use crate::postings::{parse_date, Posting, PostingKind, PostingsExport, PostingsSummary};

pub use crate::util::init_tracing_once;
