#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn tempdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Write a compressed `.zst` file containing the provided JSONL lines.
/// This mirrors the forum's RC_/RS_ monthly dump files with tiny content.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Read a CSV file into rows of strings, header row included.
pub fn read_csv_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

/// The two-document corpus used throughout:
/// d1 "The cat sat.", d2 "The cat ran.", stopwords {"the"}.
/// Returns (input csv, stopword file).
pub fn cat_corpus(dir: &Path) -> (PathBuf, PathBuf) {
    let input = write_file(dir, "cats.csv", "id,text\nd1,The cat sat.\nd2,The cat ran.\n");
    let stopwords = write_file(dir, "english.stopwords", "the\n");
    (input, stopwords)
}

/// Two clearly separated themes, each term repeated so nothing is a singleton.
pub fn themed_corpus(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "themes.csv",
        "id,text\n\
         f1,apple banana apple pear\n\
         f2,banana pear apple banana\n\
         f3,pear apple banana\n\
         r1,rocket launch orbit rocket\n\
         r2,launch orbit rocket launch\n\
         r3,orbit rocket launch\n",
    )
}
