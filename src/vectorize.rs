use crate::document::Document;
use crate::index::VectorIndex;

/// Dense count vector for `doc`: one slot per indexed term, zero elsewhere.
/// Terms missing from the index are skipped.
pub fn vectorize(doc: &Document, index: &VectorIndex) -> Vec<u32> {
    let mut vector = vec![0u32; index.len()];
    for (term, &count) in &doc.frequencies {
        match index.get(term) {
            Some(slot) => vector[slot] = count,
            None => tracing::debug!("document {}: term `{}` not in index", doc.id, term),
        }
    }
    vector
}
