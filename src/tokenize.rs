//! Treebank-style word tokenization.
//!
//! Chunks are cut at Unicode word boundaries (UAX #29), which keeps
//! `can't` and `1,000` whole and splits every other punctuation mark off.
//! On top of that, runs of `.` or `-` become one token, `:` inside a word
//! is split out, and English contraction suffixes are separated:
//!
//! ```
//! use doctopics::word_tokenize;
//! assert_eq!(word_tokenize("I can't go."), ["I", "ca", "n't", "go", "."]);
//! assert_eq!(word_tokenize("wait--note:this..."), ["wait", "--", "note", ":", "this", "..."]);
//! ```

use crate::document::Document;
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Punctuation whose adjacent repeats form a single token (`...`, `--`).
const RUN_PUNCT: &[char] = &['.', '-'];

fn contraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(.+?)(n't|'s|'re|'ve|'ll|'d|'m)$").expect("contraction pattern is valid")
    })
}

/// Split `text` into word and punctuation tokens, in order.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut run: Option<char> = None;
    for segment in text.split_word_bounds() {
        if let Some(c) = single_char(segment).filter(|c| RUN_PUNCT.contains(c)) {
            if run == Some(c) {
                if let Some(last) = out.last_mut() {
                    last.push(c);
                }
            } else {
                out.push(c.to_string());
            }
            run = Some(c);
            continue;
        }
        run = None;

        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        if segment.chars().any(char::is_alphanumeric) {
            push_word(segment, &mut out);
        } else {
            out.push(segment.to_string());
        }
    }
    out
}

fn single_char(segment: &str) -> Option<char> {
    let mut chars = segment.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Word segments keep a `:` only between letters (`note:cat`); split it out.
fn push_word(segment: &str, out: &mut Vec<String>) {
    let mut pieces = segment.split(':');
    if let Some(first) = pieces.next() {
        push_piece(first, out);
    }
    for piece in pieces {
        out.push(":".to_string());
        push_piece(piece, out);
    }
}

fn push_piece(word: &str, out: &mut Vec<String>) {
    if word.is_empty() {
        return;
    }
    let normalized;
    let word = if word.contains('\u{2019}') {
        normalized = word.replace('\u{2019}', "'");
        normalized.as_str()
    } else {
        word
    };
    if word.eq_ignore_ascii_case("cannot") {
        out.push(word[..3].to_string());
        out.push(word[3..].to_string());
        return;
    }
    if let Some(caps) = contraction_re().captures(word) {
        out.push(caps[1].to_string());
        out.push(caps[2].to_string());
        return;
    }
    out.push(word.to_string());
}

/// Tokenizer stage: sets `raw_tokens` from `text_field` on each document.
pub fn tokenize<'a, I>(docs: I, text_field: &'a str) -> impl Iterator<Item = Result<Document>> + 'a
where
    I: Iterator<Item = Result<Document>> + 'a,
{
    docs.map(move |doc| {
        let mut doc = doc?;
        doc.raw_tokens = word_tokenize(doc.field(text_field).unwrap_or_default());
        Ok(doc)
    })
}
