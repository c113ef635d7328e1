#[path = "common/mod.rs"]
mod common;

use common::*;
use doctopics::{parse_date, Posting, PostingKind, PostingsExport, TopicPipeline};
use serde_json::json;
use std::path::{Path, PathBuf};

const JAN_1: i64 = 1_136_073_600; // 2006-01-01 00:00:00 UTC
const JAN_2: i64 = JAN_1 + 86_400;

/// A dump directory with one submission file and one comment file.
fn dump_dir(root: &Path) -> PathBuf {
    let dir = root.join("dumps");
    write_zst_lines(
        &dir.join("RS_2006-01.zst"),
        &[
            json!({"id": "s1", "subreddit": "Science", "subreddit_id": "t5_mlt", "author": "alice",
                   "title": "Rocket launch", "permalink": "/r/science/s1", "created_utc": JAN_1,
                   "score": 5, "downs": 0, "ups": 5, "selftext": "rocket launch orbit rocket"})
            .to_string(),
            json!({"id": "s2", "subreddit": "pics", "subreddit_id": "t5_2qh0u", "author": "bob",
                   "title": "A cat", "permalink": "/r/pics/s2", "created_utc": JAN_2.to_string(),
                   "score": "3", "selftext": "cat photo"})
            .to_string(),
            "{not json".to_string(),
        ],
    );
    write_zst_lines(
        &dir.join("RC_2006-01.zst"),
        &[
            json!({"id": "c1", "subreddit": "science", "parent_id": "t3_s1", "author": "carol",
                   "created_utc": JAN_1 + 60, "score": 2.0, "body": "orbit launch orbit"})
            .to_string(),
            json!({"subreddit": "science", "parent_id": "t3_s1", "body": "no id here"}).to_string(),
        ],
    );
    write_file(&dir, "README.txt", "not a dump\n");
    dir
}

/// Every record is flattened: comments from RC_ files, submissions from RS_ files,
/// with the fixed column order and a formatted UTC timestamp.
#[test]
fn flattens_submissions_and_comments() {
    let dir = tempdir();
    let dumps = dump_dir(dir.path());
    let out = dir.path().join("postings.csv");

    let summary = PostingsExport::new().write_csv(&[dumps], &out).unwrap();
    assert_eq!(summary.submissions, 2);
    assert_eq!(summary.comments, 1);
    assert_eq!(summary.malformed, 2);
    assert_eq!(summary.written(), 3);

    let rows = read_csv_rows(&out);
    assert_eq!(rows[0], Posting::FIELDS);
    assert_eq!(rows.len(), 4);

    // RC_ sorts before RS_.
    assert_eq!(rows[1], ["c1", "comment", "t3_s1", "", "carol", "", "2006-01-01 00:01:00", "2", "", "", "orbit launch orbit"]);
    assert_eq!(
        rows[2],
        ["s1", "submission", "t5_mlt", "/r/science/s1", "alice", "Rocket launch", "2006-01-01 00:00:00", "5", "0", "5", "rocket launch orbit rocket"]
    );
    assert_eq!(rows[3][6], "2006-01-02 00:00:00");
    assert_eq!(rows[3][7], "3");
}

/// The subreddit filter is case-insensitive and accepts an `r/` prefix.
#[test]
fn filters_by_subreddit() {
    let dir = tempdir();
    let dumps = dump_dir(dir.path());
    let out = dir.path().join("science.csv");

    let summary = PostingsExport::new().subreddit("r/SCIENCE").write_csv(&[dumps], &out).unwrap();
    assert_eq!(summary.written(), 2);
    let ids: Vec<String> = read_csv_rows(&out).into_iter().skip(1).map(|r| r[0].clone()).collect();
    assert_eq!(ids, ["c1", "s1"]);
}

/// Date bounds are whole days and inclusive on both ends.
#[test]
fn filters_by_inclusive_date_range() {
    let dir = tempdir();
    let dumps = dump_dir(dir.path());
    let out = dir.path().join("jan1.csv");
    let jan1 = parse_date("01/01/2006").unwrap();

    let summary = PostingsExport::new().date_range(Some(jan1), Some(jan1)).write_csv(&[dumps.clone()], &out).unwrap();
    assert_eq!(summary.written(), 2);

    let jan2 = parse_date("01/02/2006").unwrap();
    let summary = PostingsExport::new().date_range(Some(jan2), None).write_csv(&[dumps], &out).unwrap();
    assert_eq!(summary.written(), 1);
    assert_eq!(read_csv_rows(&out)[1][0], "s2");
}

/// Dates must be MM/DD/YYYY.
#[test]
fn rejects_malformed_dates() {
    assert!(parse_date("2006-01-01").is_err());
    assert!(parse_date("13/01/2006").is_err());
    assert_eq!(parse_date(" 12/31/2006 ").unwrap().to_string(), "2006-12-31");
}

/// A comment record carries its parent thing id and no title.
#[test]
fn comment_records_are_detected() {
    let posting = Posting::from_record(&json!({"id": "c9", "parent_id": "t1_c8", "body": "reply"})).unwrap();
    assert_eq!(posting.kind, PostingKind::Comment);
    assert_eq!(posting.parent_id, "t1_c8");
    assert_eq!(posting.text, "reply");
    assert!(posting.title.is_empty());
    assert_eq!(posting.score, None);
    assert!(Posting::from_record(&json!({"body": "orphan"})).is_none());
}

/// The postings CSV feeds straight into the topic pipeline.
#[test]
fn postings_csv_is_pipeline_input() {
    let dir = tempdir();
    let dumps = dump_dir(dir.path());
    let out = dir.path().join("science.csv");
    PostingsExport::new().subreddit("science").write_csv(&[dumps], &out).unwrap();

    let corpus = TopicPipeline::new().inputs([&out]).build_corpus().unwrap();
    let ids: Vec<&str> = corpus.documents().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "s1"]);
    assert_eq!(corpus.index().terms(), ["orbit", "launch", "rocket"]);
}
