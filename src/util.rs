use crate::error::{PipelineError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

/// Open a file for reading, mapping failures to `PipelineError::FileAccess`.
pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| PipelineError::file_access(path, e))
}

/// Create (truncate) a file for writing, creating parent directories first.
pub fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::file_access(parent, e))?;
        }
    }
    File::create(path).map_err(|e| PipelineError::file_access(path, e))
}

/// Sibling temp path used while an artifact is being written.
pub fn tmp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}

/// Replace `dest` with `tmp`. Falls back to copy+remove when rename fails
/// (e.g. across filesystems).
pub fn replace_file(tmp: &Path, dest: &Path) -> Result<()> {
    if fs::rename(tmp, dest).is_ok() {
        return Ok(());
    }
    fs::copy(tmp, dest).map_err(|e| PipelineError::file_access(dest, e))?;
    fs::remove_file(tmp).map_err(|e| PipelineError::file_access(tmp, e))?;
    Ok(())
}

/// Remove a file; succeeds if it doesn't exist.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PipelineError::file_access(path, e)),
    }
}
