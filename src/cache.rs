//! Whole-pipeline artifact cache.
//!
//! Two fixed-name artifacts live in the cache directory: the processed
//! documents (`corpus.freq`, zstd JSON lines) and the term dictionary
//! (`corpus.dict`). There is no version tag; whoever changes upstream
//! parameters must clear the cache.

use crate::corpus::{FilteredCorpus, VectorizedCorpus};
use crate::document::Document;
use crate::error::{PipelineError, Result};
use crate::index::VectorIndex;
use crate::jsonl::{for_each_line, RecordWriter};
use crate::util::{remove_if_exists, replace_file, tmp_path_for};
use std::fs;
use std::path::{Path, PathBuf};

pub const FREQ_FILE: &str = "corpus.freq";
pub const DICTIONARY_FILE: &str = "corpus.dict";

#[derive(Clone, Debug)]
pub struct ArtifactCache {
    dir: PathBuf,
}

impl ArtifactCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn freq_path(&self) -> PathBuf {
        self.dir.join(FREQ_FILE)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dir.join(DICTIONARY_FILE)
    }

    /// True when every artifact is present.
    pub fn is_complete(&self) -> bool {
        self.freq_path().is_file() && self.dictionary_path().is_file()
    }

    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.freq_path())?;
        remove_if_exists(&self.dictionary_path())
    }

    /// Load documents and dictionary and re-vectorize against the stored dictionary.
    pub fn load(&self) -> Result<VectorizedCorpus> {
        let freq_path = self.freq_path();
        let mut documents = Vec::new();
        for_each_line(&freq_path, true, |line| -> Result<()> {
            let doc: Document = serde_json::from_str(line)
                .map_err(|e| PipelineError::cache(&freq_path, format!("bad document record: {e}")))?;
            documents.push(doc);
            Ok(())
        })?;
        let index = VectorIndex::load(&self.dictionary_path())?;
        tracing::info!("loaded {} documents and {} terms from {}", documents.len(), index.len(), self.dir.display());
        Ok(FilteredCorpus::from_filtered(documents).vectorize(index))
    }

    /// Persist the filtered documents and the index. Each artifact is written
    /// to a temp file first and renamed into place.
    pub fn store(&self, corpus: &VectorizedCorpus) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PipelineError::file_access(&self.dir, e))?;

        let freq_path = self.freq_path();
        let tmp = tmp_path_for(&freq_path);
        let mut writer = RecordWriter::create(&tmp, 3)?;
        for doc in corpus.documents() {
            // Raw tokens and vectors are not needed to rebuild the corpus.
            let stored = Document { raw_tokens: Vec::new(), vector: Vec::new(), ..doc.clone() };
            writer.write(&stored)?;
        }
        writer.finish()?;
        replace_file(&tmp, &freq_path)?;

        let dict_path = self.dictionary_path();
        let tmp = tmp_path_for(&dict_path);
        corpus.index().save(&tmp)?;
        replace_file(&tmp, &dict_path)?;

        tracing::info!("wrote cache artifacts to {}", self.dir.display());
        Ok(())
    }
}
