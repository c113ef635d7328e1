//! JSON-lines I/O, plain or zstd-compressed: line streaming for dump inputs
//! and a record writer for the corpus cache.

use crate::error::{PipelineError, Result};
use crate::util::{create_file, open_file};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder;
use zstd::stream::write::Encoder as ZstdEncoder;

const READ_BUF_BYTES: usize = 256 * 1024;

fn open_lines(path: &Path, compressed: bool) -> Result<Box<dyn BufRead>> {
    let file = open_file(path)?;
    let inner: Box<dyn Read> = if compressed {
        let mut decoder = Decoder::new(file).map_err(|e| PipelineError::file_access(path, e))?;
        // Monthly dumps use long windows.
        decoder.window_log_max(31).map_err(|e| PipelineError::file_access(path, e))?;
        Box::new(decoder)
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::with_capacity(READ_BUF_BYTES, inner)))
}

/// Call `on_line` for every line (trailing `\r?\n` stripped; blank lines skipped).
/// The callback's error aborts the stream and is returned as-is.
pub fn for_each_line<E>(
    path: &Path,
    compressed: bool,
    mut on_line: impl FnMut(&str) -> std::result::Result<(), E>,
) -> std::result::Result<u64, E>
where
    E: From<PipelineError>,
{
    let mut reader = open_lines(path, compressed)?;
    let mut buf = String::with_capacity(16 * 1024);
    let mut lines = 0u64;
    loop {
        buf.clear();
        let n = reader.read_line(&mut buf).map_err(|e| PipelineError::file_access(path, e))?;
        if n == 0 {
            break;
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        if buf.trim().is_empty() {
            continue;
        }
        lines += 1;
        on_line(&buf)?;
    }
    Ok(lines)
}

/// zstd-compressed JSON-lines writer of serializable records.
pub struct RecordWriter {
    path: PathBuf,
    enc: ZstdEncoder<'static, BufWriter<File>>,
    written: u64,
}

impl RecordWriter {
    pub fn create(path: &Path, level: i32) -> Result<Self> {
        let file = create_file(path)?;
        let enc = ZstdEncoder::new(BufWriter::new(file), level).map_err(|e| PipelineError::file_access(path, e))?;
        Ok(Self { path: path.to_path_buf(), enc, written: 0 })
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.enc, record)
            .map_err(|e| PipelineError::cache(&self.path, format!("serialize: {e}")))?;
        self.enc.write_all(b"\n").map_err(|e| PipelineError::file_access(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Finish the zstd frame and flush. Returns the number of records written.
    pub fn finish(self) -> Result<u64> {
        let path = self.path;
        let mut inner = self.enc.finish().map_err(|e| PipelineError::file_access(&path, e))?;
        inner.flush().map_err(|e| PipelineError::file_access(&path, e))?;
        Ok(self.written)
    }
}
