//! The record flowing through every pipeline stage.

use crate::frequency::TermFrequencies;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One input row plus the data each stage attaches to it.
///
/// `fields` holds the original columns untouched, in header order. The
/// remaining fields are owned by the pipeline: `raw_tokens` by the
/// tokenizer, `tokens` by the normalizer and singleton filter,
/// `frequencies` by the counter, `vector` by the vectorizer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_tokens: Vec<String>,
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub frequencies: TermFrequencies,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vector: Vec<u32>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        Self { id: id.into(), fields, ..Default::default() }
    }

    /// Build a document from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(id, fields)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}
