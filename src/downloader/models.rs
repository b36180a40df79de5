// Common data models for the download pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolution cap selected in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "best")]
    Best,
    #[serde(rename = "2160")]
    P2160,
    #[serde(rename = "1080")]
    P1080,
    #[serde(rename = "720")]
    P720,
    #[serde(rename = "480")]
    P480,
    #[serde(rename = "360")]
    P360,
}

impl Resolution {
    /// Height bound used in the yt-dlp format selector.
    /// "Best" is capped at 2160 like an explicit 4K selection.
    pub fn height_cap(&self) -> u32 {
        match self {
            Resolution::Best | Resolution::P2160 => 2160,
            Resolution::P1080 => 1080,
            Resolution::P720 => 720,
            Resolution::P480 => 480,
            Resolution::P360 => 360,
        }
    }
}

/// Container the user wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mp4,
    Mp3,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "video/mp4",
            OutputFormat::Mp3 => "audio/mpeg",
        }
    }
}

/// One submitted download. Built from the page form, immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub resolution: Resolution,
    pub output: OutputFormat,
    /// Target directory; the user's Downloads folder when not set
    pub output_dir: Option<String>,
}

impl DownloadRequest {
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir)
    }
}

pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Metadata shown on the page before the download starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub title: String,
    pub duration: String,
    pub thumbnail: String,
    pub uploader: String,
}

/// Progress event payload mirrored into the page widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Fraction of the current step, clamped to 0..=1
    pub progress: f32,
    pub status: String,
}

/// Best-effort result of a finished download (see outcome.rs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub file_path: String,
    pub file_name: String,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_wire_values_round_trip() {
        for (json, expected) in [
            ("\"best\"", Resolution::Best),
            ("\"2160\"", Resolution::P2160),
            ("\"1080\"", Resolution::P1080),
            ("\"720\"", Resolution::P720),
            ("\"480\"", Resolution::P480),
            ("\"360\"", Resolution::P360),
        ] {
            let parsed: Resolution = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn best_caps_at_2160() {
        assert_eq!(Resolution::Best.height_cap(), 2160);
        assert_eq!(Resolution::P2160.height_cap(), 2160);
        assert_eq!(Resolution::P360.height_cap(), 360);
    }

    #[test]
    fn output_format_extension_and_mime() {
        assert_eq!(OutputFormat::Mp4.extension(), "mp4");
        assert_eq!(OutputFormat::Mp4.mime_type(), "video/mp4");
        assert_eq!(OutputFormat::Mp3.extension(), "mp3");
        assert_eq!(OutputFormat::Mp3.mime_type(), "audio/mpeg");
    }

    #[test]
    fn request_deserializes_from_page_payload() {
        let request: DownloadRequest = serde_json::from_str(
            r#"{"url":"https://example.com/watch?v=x","resolution":"720","output":"mp3","output_dir":null}"#,
        )
        .unwrap();
        assert_eq!(request.resolution, Resolution::P720);
        assert_eq!(request.output, OutputFormat::Mp3);
        assert!(request.output_dir.is_none());
    }

    #[test]
    fn blank_output_dir_falls_back_to_default() {
        let request = DownloadRequest {
            url: String::new(),
            resolution: Resolution::Best,
            output: OutputFormat::Mp4,
            output_dir: Some("  ".to_string()),
        };
        assert_eq!(request.resolved_output_dir(), default_output_dir());
    }
}
