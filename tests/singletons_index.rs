#[path = "common/mod.rs"]
mod common;

use common::*;
use doctopics::{
    corpus_frequencies, filter_singletons, find_singletons, term_frequencies, vectorize, Corpus, Document,
    PipelineError, SingletonMode, VectorIndex,
};

fn doc(id: &str, tokens: &[&str]) -> Document {
    let mut d = Document::from_pairs(id, [("text", tokens.join(" "))]);
    d.tokens = tokens.iter().map(|t| t.to_string()).collect();
    d.frequencies = term_frequencies(&d.tokens);
    d
}

fn sample_docs() -> Vec<Document> {
    vec![
        doc("a", &["red", "green", "red", "blue"]),
        doc("b", &["green", "yellow", "red"]),
        doc("c", &["purple", "green"]),
    ]
}

/// Terms seen once corpus-wide vanish; a term seen twice in one document survives.
#[test]
fn removes_corpus_wide_singletons_only() {
    let mut docs = vec![doc("a", &["x", "x", "y"]), doc("b", &["z", "w", "w"])];
    let (freqs, removed) = filter_singletons(&mut docs, SingletonMode::SinglePass);

    assert_eq!(removed, 2);
    assert_eq!(docs[0].tokens, ["x", "x"]);
    assert_eq!(docs[1].tokens, ["w", "w"]);
    assert_eq!(freqs.get("x").copied(), Some(2));
    assert!(!freqs.contains_key("y"));
    assert_eq!(docs[1].frequencies.get("w").copied(), Some(2));
}

/// After one round no count is 1, and running the filter again changes nothing.
#[test]
fn singleton_removal_is_idempotent() {
    let mut docs = sample_docs();
    filter_singletons(&mut docs, SingletonMode::SinglePass);
    let after_first = docs.clone();

    assert!(find_singletons(&corpus_frequencies(&docs)).is_empty());
    let (_, removed) = filter_singletons(&mut docs, SingletonMode::SinglePass);
    assert_eq!(removed, 0);
    assert_eq!(docs, after_first);
}

/// Both modes agree: removing a term never lowers another term's count.
#[test]
fn iterative_mode_matches_single_pass() {
    let mut single = sample_docs();
    let mut iterative = sample_docs();
    let (f1, r1) = filter_singletons(&mut single, SingletonMode::SinglePass);
    let (f2, r2) = filter_singletons(&mut iterative, SingletonMode::Iterative);

    assert_eq!(r1, r2);
    assert_eq!(f1, f2);
    assert_eq!(single, iterative);
    assert_eq!(single[2].tokens, ["green"]);
}

/// The index is a bijection onto 0..n laid out in first-seen order, and each
/// vector holds the document's counts at the term slots and zero elsewhere.
#[test]
fn index_and_vectors_agree_with_frequencies() {
    let filtered = Corpus::from_documents(sample_docs()).filter_singletons(SingletonMode::SinglePass);
    let corpus = filtered.vectorize_all();
    let index = corpus.index();

    assert_eq!(index.terms(), ["red", "green"]);
    for (slot, term) in index.terms().iter().enumerate() {
        assert_eq!(index.get(term), Some(slot));
        assert_eq!(index.term(slot), Some(term.as_str()));
    }

    for d in corpus.documents() {
        assert_eq!(d.vector.len(), index.len());
        for (slot, &count) in d.vector.iter().enumerate() {
            let term = index.term(slot).unwrap();
            assert_eq!(count, d.frequencies.get(term).copied().unwrap_or(0));
        }
    }
    let vectors: Vec<Vec<u32>> = corpus.documents().iter().map(|d| d.vector.clone()).collect();
    assert_eq!(vectors, vec![vec![2, 1], vec![1, 1], vec![0, 1]]);
}

/// Terms missing from the index are skipped when vectorizing.
#[test]
fn vectorize_skips_unknown_terms() {
    let index = VectorIndex::build(&[doc("a", &["known", "known"])]);
    let v = vectorize(&doc("b", &["known", "stranger"]), &index);
    assert_eq!(v, vec![1]);
}

/// A saved dictionary loads back into the same index.
#[test]
fn dictionary_round_trips_through_disk() {
    let dir = tempdir();
    let index = VectorIndex::build(&sample_docs());
    let path = dir.path().join("corpus.dict");
    index.save(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().next(), Some("0\tred"));
    assert_eq!(VectorIndex::load(&path).unwrap(), index);
}

/// Dictionaries with gaps or repeated terms are rejected as cache errors.
#[test]
fn dictionary_load_rejects_gaps_and_duplicates() {
    let dir = tempdir();
    let gap = write_file(dir.path(), "gap.dict", "0\tred\n2\tblue\n");
    let dup = write_file(dir.path(), "dup.dict", "0\tred\n1\tred\n");
    let garbled = write_file(dir.path(), "garbled.dict", "red\n");

    for path in [gap, dup, garbled] {
        assert!(
            matches!(VectorIndex::load(&path), Err(PipelineError::Cache { .. })),
            "{} should be rejected",
            path.display()
        );
    }
}
