// yt-dlp engine: metadata fetch and the single blocking download path.
//
// Everything hard — extraction, retrieval, muxing, transcoding — happens
// inside yt-dlp and ffmpeg. This module locates the binaries, hands them the
// arguments the options builder produced, relays progress lines to the page,
// and resolves which file came out the other end.

use std::io::{BufRead, BufReader};
use std::process::{Command as StdCommand, Stdio};

use tauri::Emitter;
use tauri_plugin_dialog::DialogExt;

use crate::downloader::models::default_output_dir;
use crate::downloader::options::build_download_args;
use crate::downloader::outcome::resolve_latest;
use crate::downloader::progress::parse_progress_line;
use crate::downloader::tools::{require_tool, ToolType};
use crate::downloader::utils::run_output_with_timeout;
use crate::downloader::{
    DownloadError, DownloadOutcome, DownloadProgress, DownloadRequest, MediaInfo,
};

/// Fetch title/duration/thumbnail/uploader for display before downloading
#[tauri::command]
pub async fn get_media_info(url: String) -> Result<MediaInfo, String> {
    fetch_media_info(&url).await.map_err(|e| e.to_string())
}

async fn fetch_media_info(url: &str) -> Result<MediaInfo, DownloadError> {
    let ytdlp = require_tool(ToolType::YtDlp)?;

    let args: Vec<String> = [
        "--dump-json",
        "--no-playlist",
        "--no-warnings",
        "--socket-timeout",
        "15",
        "--retries",
        "2",
        "--user-agent",
        "Mozilla/5.0",
        url,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let output = run_output_with_timeout(&ytdlp, &args, 30).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        eprintln!(
            "[info] yt-dlp failed: {}",
            stderr.lines().next().unwrap_or("no stderr")
        );
        return Err(DownloadError::from(stderr));
    }

    parse_media_info(&output.stdout)
}

fn parse_media_info(stdout: &[u8]) -> Result<MediaInfo, DownloadError> {
    let json: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| DownloadError::ParseError(format!("metadata JSON: {}", e)))?;

    let duration_secs = json["duration"].as_f64().unwrap_or(0.0) as i64;
    let duration = format!("{}:{:02}", duration_secs / 60, duration_secs % 60);

    Ok(MediaInfo {
        title: json["title"].as_str().unwrap_or("Unknown").to_string(),
        duration,
        thumbnail: json["thumbnail"].as_str().unwrap_or("").to_string(),
        uploader: json["uploader"].as_str().unwrap_or("Unknown").to_string(),
    })
}

/// Run one download to completion, streaming progress events to the page
#[tauri::command]
pub async fn download_media(
    request: DownloadRequest,
    app_handle: tauri::AppHandle,
) -> Result<DownloadOutcome, String> {
    run_download(&request, &app_handle).map_err(|e| e.to_string())
}

fn run_download(
    request: &DownloadRequest,
    app_handle: &tauri::AppHandle,
) -> Result<DownloadOutcome, DownloadError> {
    let ytdlp = require_tool(ToolType::YtDlp)?;
    let ffmpeg = require_tool(ToolType::Ffmpeg)?;

    let output_dir = request.resolved_output_dir();
    std::fs::create_dir_all(&output_dir).map_err(|e| {
        DownloadError::ExecutionError(format!("cannot create {}: {}", output_dir.display(), e))
    })?;

    let args = build_download_args(request, &output_dir, &ffmpeg);
    eprintln!(
        "[download] starting yt-dlp: {} -> {}",
        request.url,
        output_dir.display()
    );

    let emit = |progress: DownloadProgress| {
        let _ = app_handle.emit("download-progress", progress);
    };
    emit(DownloadProgress {
        progress: 0.0,
        status: "Starting download...".to_string(),
    });

    let mut child = StdCommand::new(&ytdlp)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DownloadError::ToolNotFound(format!("yt-dlp: {}", e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| DownloadError::ExecutionError("failed to capture stdout".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| DownloadError::ExecutionError("failed to capture stderr".to_string()))?;

    // Drain stderr on a helper thread so a full pipe cannot stall yt-dlp
    let stderr_handle = std::thread::spawn(move || {
        BufReader::new(stderr)
            .lines()
            .map_while(Result::ok)
            .collect::<Vec<_>>()
            .join("\n")
    });

    // Single blocking read path; lines arrive in issuing order
    for line in BufReader::new(stdout).lines().map_while(Result::ok) {
        if let Some(progress) = parse_progress_line(&line) {
            emit(progress);
        }
        if line.contains("[download]") || line.contains("[Merger]") || line.contains("[ExtractAudio]")
        {
            eprintln!("[yt-dlp] {}", line);
        }
    }

    let status = child
        .wait()
        .map_err(|e| DownloadError::ExecutionError(format!("process error: {}", e)))?;
    let stderr_output = stderr_handle.join().unwrap_or_default();

    if !status.success() {
        eprintln!("[download] yt-dlp exited with {}", status);
        return Err(DownloadError::from(stderr_output));
    }

    let outcome = resolve_latest(&output_dir, request.output)?;
    emit(DownloadProgress {
        progress: 1.0,
        status: format!("✅ Saved {}", outcome.file_name),
    });
    eprintln!("[download] done: {}", outcome.file_path);

    Ok(outcome)
}

/// Folder chooser for the output directory field
#[tauri::command]
pub async fn pick_output_dir(app_handle: tauri::AppHandle) -> Result<Option<String>, String> {
    let picked = app_handle.dialog().file().blocking_pick_folder();
    Ok(picked.map(|folder| folder.to_string()))
}

/// Initial value for the output directory field
#[tauri::command]
pub fn get_default_output_dir() -> String {
    default_output_dir().to_string_lossy().to_string()
}

/// Open the finished file with the system default player
#[tauri::command]
pub async fn open_file(path: String) -> Result<(), String> {
    tauri_plugin_opener::open_path(path, None::<&str>).map_err(|e| e.to_string())
}

/// Highlight the finished file in the system file manager
#[tauri::command]
pub async fn show_in_folder(path: String) -> Result<(), String> {
    tauri_plugin_opener::reveal_item_in_dir(&path).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_info_parses_the_dump_json_fields() {
        let json = br#"{"title":"A Talk","duration":754.2,"thumbnail":"https://i.example/t.jpg","uploader":"Some Channel"}"#;
        let info = parse_media_info(json).unwrap();
        assert_eq!(info.title, "A Talk");
        assert_eq!(info.duration, "12:34");
        assert_eq!(info.uploader, "Some Channel");
    }

    #[test]
    fn media_info_defaults_missing_fields() {
        let info = parse_media_info(b"{}").unwrap();
        assert_eq!(info.title, "Unknown");
        assert_eq!(info.duration, "0:00");
        assert_eq!(info.thumbnail, "");
    }

    #[test]
    fn malformed_metadata_is_a_parse_error() {
        let err = parse_media_info(b"not json").unwrap_err();
        assert!(matches!(err, DownloadError::ParseError(_)));
    }
}
