//! CSV outputs: document vectors, topic terms, document topic scores.

use crate::corpus::VectorizedCorpus;
use crate::error::{PipelineError, Result};
use crate::index::VectorIndex;
use crate::topics::FittedTopics;
use crate::util::create_file;
use std::path::Path;

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new().flexible(true).from_writer(create_file(path)?))
}

/// The id column's header name, `_`-prefixed until it no longer clashes
/// with another column of the same file.
fn id_header(id_column: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut name = id_column.to_string();
    while taken(&name) {
        name.insert(0, '_');
    }
    if name != id_column {
        tracing::warn!("column `{}` is also a data column, writing the id column as `{}`", id_column, name);
    }
    name
}

/// Header: `id_column` (prefixed if it equals a term), then one column per
/// term in slot order.
/// One row per document: id, then its counts. Returns the number of rows.
pub fn write_vectors_csv(path: &Path, id_column: &str, corpus: &VectorizedCorpus) -> Result<usize> {
    let mut w = csv_writer(path)?;
    let err = |e| PipelineError::csv(path, e);

    let index = corpus.index();
    let mut header = vec![id_header(id_column, |name| index.get(name).is_some())];
    header.extend(index.terms().iter().cloned());
    w.write_record(&header).map_err(err)?;

    for doc in corpus.documents() {
        let mut row = Vec::with_capacity(doc.vector.len() + 1);
        row.push(doc.id.clone());
        row.extend(doc.vector.iter().map(u32::to_string));
        w.write_record(&row).map_err(err)?;
    }
    w.flush().map_err(|e| PipelineError::file_access(path, e))?;
    Ok(corpus.len())
}

/// One row per topic: topic number, then its top terms, heaviest first.
pub fn write_topic_terms_csv(path: &Path, topics: Option<&FittedTopics>, index: &VectorIndex, top_terms: usize) -> Result<()> {
    let mut w = csv_writer(path)?;
    if let Some(fit) = topics {
        for (topic, terms) in fit.topic_terms(index, top_terms).into_iter().enumerate() {
            let mut row = vec![topic.to_string()];
            row.extend(terms.into_iter().map(|(term, _)| term));
            w.write_record(&row).map_err(|e| PipelineError::csv(path, e))?;
        }
    }
    w.flush().map_err(|e| PipelineError::file_access(path, e))
}

/// Header: `id_column`, `0..n_topics`. One row per document with its topic scores.
pub fn write_document_topics_csv(
    path: &Path,
    id_column: &str,
    n_topics: usize,
    corpus: &VectorizedCorpus,
    topics: Option<&FittedTopics>,
) -> Result<()> {
    let mut w = csv_writer(path)?;
    let err = |e| PipelineError::csv(path, e);

    let topic_column = |name: &str| name.parse::<usize>().map_or(false, |t| t < n_topics);
    let mut header = vec![id_header(id_column, topic_column)];
    header.extend((0..n_topics).map(|t| t.to_string()));
    w.write_record(&header).map_err(err)?;

    if let Some(fit) = topics {
        for (d, doc) in corpus.documents().iter().enumerate() {
            let mut row = vec![doc.id.clone()];
            row.extend(fit.document_topics(d).iter().map(|s| s.to_string()));
            w.write_record(&row).map_err(err)?;
        }
    }
    w.flush().map_err(|e| PipelineError::file_access(path, e))
}
