//! Page and file output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SiteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The file already existed and `overwrite` was off.
    Skipped(PathBuf),
}

impl WriteOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Skipped(path) => path,
        }
    }
}

/// Writes `html` to `<dir>/<file_stem>.html`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if the directory cannot be created or the file
/// cannot be written.
pub fn write_page(
    dir: &Path,
    file_stem: &str,
    html: &str,
    overwrite: bool,
) -> Result<WriteOutcome, SiteError> {
    fs::create_dir_all(dir).map_err(|e| SiteError::io(dir, e))?;

    let path = dir.join(format!("{file_stem}.html"));
    if !overwrite && path.exists() {
        tracing::debug!(path = %path.display(), "page exists, skipping");
        return Ok(WriteOutcome::Skipped(path));
    }

    write_atomic(&path, html.as_bytes())?;
    Ok(WriteOutcome::Written(path))
}

/// Writes through a sibling temp file and renames it over `path`, so readers
/// never observe a partially written file.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, contents).map_err(|e| SiteError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SiteError::io(path, e));
    }
    Ok(())
}
