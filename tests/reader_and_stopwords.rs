#[path = "common/mod.rs"]
mod common;

use common::*;
use doctopics::{load_stopwords, PipelineError, ReaderConfig, RowReader, TopicPipeline};

/// Empty text rows are skipped; ids come from the configured column.
#[test]
fn reader_skips_empty_text_and_keeps_fields() {
    let dir = tempdir();
    let input = write_file(dir.path(), "rows.csv", "id,text,score\nr1,hello world,3\nr2,,4\nr3,  ,5\nr4,bye,6\n");

    let docs: Vec<_> = RowReader::new([&input], ReaderConfig::new("text").with_id_field("id"))
        .collect::<Result<_, _>>()
        .unwrap();

    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r4"]);
    assert_eq!(docs[0].field("score"), Some("3"));
    assert_eq!(docs[0].field_names(), vec!["id", "text", "score"]);
}

/// Without an id column, documents are numbered by position across all files.
#[test]
fn reader_falls_back_to_positional_ids() {
    let dir = tempdir();
    let a = write_file(dir.path(), "a.csv", "text\nfirst\nsecond\n");
    let b = write_file(dir.path(), "b.csv", "text\nthird\n");

    let docs: Vec<_> = RowReader::new([&a, &b], ReaderConfig::new("text").with_id_field("missing"))
        .collect::<Result<_, _>>()
        .unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

/// `.tsv` inputs are split on tabs, so commas stay inside the text.
#[test]
fn reader_detects_tab_delimited_files() {
    let dir = tempdir();
    let input = write_file(dir.path(), "survey.tsv", "ResponseId\tanswer\nR_1\tyes, please\n");

    let docs: Vec<_> = RowReader::new([&input], ReaderConfig::new("answer").with_id_field("ResponseId"))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "R_1");
    assert_eq!(docs[0].field("answer"), Some("yes, please"));
}

/// A missing text column is a schema error naming the fields that do exist.
#[test]
fn missing_text_field_reports_available_fields() {
    let dir = tempdir();
    let input = write_file(dir.path(), "wrong.csv", "id,body\nw1,some text\n");

    let mut reader = RowReader::new([&input], ReaderConfig::new("text"));
    match reader.next() {
        Some(Err(PipelineError::Schema { field, available, row, .. })) => {
            assert_eq!(field, "text");
            assert_eq!(available, vec!["id".to_string(), "body".to_string()]);
            assert_eq!(row, 1);
        }
        other => panic!("expected schema error, got {:?}", other),
    }
    assert!(reader.next().is_none(), "reader stops after the first error");
}

/// A short row (fewer cells than the header) also lacks the text field.
#[test]
fn short_row_is_a_schema_error() {
    let dir = tempdir();
    let input = write_file(dir.path(), "short.csv", "id,text\nok,fine words\nbroken\n");

    let err = TopicPipeline::new().inputs([&input]).read_corpus().unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Schema { available, row, .. }) => {
            assert_eq!(available, &vec!["id".to_string()]);
            assert_eq!(*row, 2);
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

/// A nonexistent input file is a fatal file-access error.
#[test]
fn missing_input_file_is_fatal() {
    let dir = tempdir();
    let err = TopicPipeline::new().inputs([dir.path().join("nope.csv")]).build_corpus().unwrap_err();
    assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::FileAccess { .. })));
}

/// Stopword lines are trimmed, blank lines ignored, and case is kept as written.
#[test]
fn stopwords_are_trimmed_not_case_folded() {
    let dir = tempdir();
    let path = write_file(dir.path(), "sw.txt", "the\n  and  \n\nThe\n");

    let set = load_stopwords(&path).unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains("the"));
    assert!(set.contains("and"));
    assert!(set.contains("The"));
    assert!(!set.contains("AND"));
}

/// A missing stopword list fails the run.
#[test]
fn missing_stopword_file_is_fatal() {
    let dir = tempdir();
    let (input, _) = cat_corpus(dir.path());

    assert!(matches!(load_stopwords(&dir.path().join("absent")), Err(PipelineError::FileAccess { .. })));

    let err = TopicPipeline::new()
        .inputs([&input])
        .stopwords(dir.path().join("absent"))
        .build_corpus()
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::FileAccess { .. })));
}

/// Directories given as inputs expand to the delimited files inside them, in name order.
#[test]
fn directory_inputs_expand_to_delimited_files() {
    let dir = tempdir();
    let data = dir.path().join("data");
    write_file(&data, "b.csv", "id,text\nb1,beta\n");
    write_file(&data, "a.tsv", "id\ttext\na1\talpha\n");
    write_file(&data, "notes.txt", "ignored\n");

    let corpus = TopicPipeline::new().inputs([&data]).read_corpus().unwrap();
    let ids: Vec<&str> = corpus.documents().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "b1"]);
}
