//! Input discovery: expand directories into the delimited or dump files they hold.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of input file, decided from its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Tsv,
    /// JSON lines, optionally zstd-compressed (`.jsonl`, `.ndjson`, `.zst`).
    JsonLines { compressed: bool },
}

pub fn input_kind(path: &Path) -> Option<InputKind> {
    let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some(InputKind::Csv),
        "tsv" | "tab" => Some(InputKind::Tsv),
        "jsonl" | "ndjson" | "json" => Some(InputKind::JsonLines { compressed: false }),
        "zst" => Some(InputKind::JsonLines { compressed: true }),
        _ => None,
    }
}

/// Field delimiter implied by the file name: tab for `.tsv`/`.tab`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    match input_kind(path) {
        Some(InputKind::Tsv) => b'\t',
        _ => b',',
    }
}

fn is_delimited(path: &Path) -> bool {
    matches!(input_kind(path), Some(InputKind::Csv | InputKind::Tsv))
}

fn is_json_lines(path: &Path) -> bool {
    matches!(input_kind(path), Some(InputKind::JsonLines { .. }))
}

/// Expand directories (one level, sorted by name) into matching files.
/// Plain file paths are kept as given, in order, whether or not they exist;
/// opening them later reports the access error.
fn expand_with(inputs: &[PathBuf], keep: fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            out.push(input.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(input)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && keep(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        found.sort();
        if found.is_empty() {
            tracing::warn!("no input files found in {}", input.display());
        }
        out.extend(found);
    }
    out
}

pub fn expand_delimited_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    expand_with(inputs, is_delimited)
}

pub fn expand_dump_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    expand_with(inputs, is_json_lines)
}
