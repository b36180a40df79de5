// Result resolution - figures out which file a finished download produced
//
// yt-dlp names the output after the media title, which we never see on this
// side of the pipe. After the process exits we scan the output directory for
// the expected extension and take the most recently modified match. That is
// a heuristic: a concurrent run or a stale file with a newer mtime can win.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::errors::DownloadError;
use super::models::{DownloadOutcome, OutputFormat};

/// Picks the most recently modified file with the expected extension.
pub fn resolve_latest(dir: &Path, output: OutputFormat) -> Result<DownloadOutcome, DownloadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        DownloadError::OutputMissing(format!("cannot read {}: {}", dir.display(), e))
    })?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, output.extension()) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    match newest {
        Some((_, path)) => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            Ok(DownloadOutcome {
                file_path: path.to_string_lossy().to_string(),
                file_name,
                mime_type: output.mime_type().to_string(),
            })
        }
        None => Err(DownloadError::OutputMissing(format!(
            "no .{} file in {}",
            output.extension(),
            dir.display()
        ))),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
