//! Change-gated atomic publish of the rendered document.
//!
//! ## `publish` — protocol
//!
//! 1. Render content (already done by caller).
//! 2. Read the existing document, if any.
//! 3. Compare non-comment lines → skip if identical.
//! 4. Write to `<path>.patrons.tmp` (parents created).
//! 5. Rename to final path (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::diff::{documents_match, normalize_line_endings};
use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of publishing the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: non-comment lines match what is on disk.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    /// `true` unless the document on disk already matched.
    pub fn changed(&self) -> bool {
        !matches!(self, WriteResult::Unchanged { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Current on-disk document, or `None` before the first run.
pub fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(normalize_line_endings(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

/// Write `content` to `path` unless `existing` already matches it.
///
/// `existing` is the document read before rendering (see [`read_existing`]).
pub fn publish(
    path: &Path,
    content: &str,
    existing: Option<&str>,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.patrons.tmp", path.display()));
    publish_with_tmp(path, content, existing, dry_run, &tmp)
}

fn publish_with_tmp(
    path: &Path,
    content: &str,
    existing: Option<&str>,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    // Normalise line endings to LF before comparing and writing.
    let normalized = normalize_line_endings(content);
    let content = normalized.as_str();

    if let Some(existing) = existing {
        if documents_match(existing, content) {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("updated {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
