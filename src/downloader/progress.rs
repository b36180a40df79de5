// Progress relay - turns yt-dlp's --newline stdout stream into UI events
//
// yt-dlp prints lines like:
//   [download]  45.2% of ~ 343.72MiB at  420.30KiB/s ETA 12:32 (frag 29/454)
// One regex pulls out percent/size/speed/ETA; the percent string parses
// best-effort into a 0..=1 fraction and the rest is mirrored verbatim into
// the status line. Events arrive in issuing order on the single read path.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::DownloadProgress;

lazy_static! {
    static ref PROGRESS_RE: Regex = Regex::new(
        r"\[download\]\s+(\d+\.?\d*%)\s+of\s+~?\s*(\d+\.?\d*\s*\w+)\s+at\s+(\d+\.?\d*\s*\w+/s)(?:\s+ETA\s+(\S+))?"
    )
    .unwrap();
    static ref DEST_RE: Regex = Regex::new(r"\[download\]\s+Destination:\s+(.+)").unwrap();
    static ref MERGE_RE: Regex = Regex::new(r"\[Merger\]\s+Merging").unwrap();
    static ref EXTRACT_RE: Regex = Regex::new(r"\[ExtractAudio\]").unwrap();
    static ref ALREADY_RE: Regex = Regex::new(r"has already been downloaded").unwrap();
}

/// "45.2%" -> 0.452, clamped to 0..=1. Unparsable input counts as zero.
pub fn parse_percent_str(raw: &str) -> f32 {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    number
        .trim()
        .parse::<f32>()
        .map(|p| (p / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// One line of yt-dlp stdout -> progress event, when the line is interesting.
pub fn parse_progress_line(line: &str) -> Option<DownloadProgress> {
    if let Some(caps) = PROGRESS_RE.captures(line) {
        let percent = caps.get(1).map(|m| m.as_str()).unwrap_or("0%");
        let size = caps.get(2).map(|m| m.as_str()).unwrap_or("?");
        let speed = caps.get(3).map(|m| m.as_str()).unwrap_or("?");
        let eta = caps.get(4).map(|m| m.as_str()).unwrap_or("");

        let status = if eta.is_empty() {
            format!("⬇️ {} of {} at {}", percent, size, speed)
        } else {
            format!("⬇️ {} of {} at {} | ETA {}", percent, size, speed, eta)
        };

        return Some(DownloadProgress {
            progress: parse_percent_str(percent),
            status,
        });
    }

    if let Some(caps) = DEST_RE.captures(line) {
        let filename = caps.get(1).map(|m| m.as_str()).unwrap_or("file");
        let short_name: String = filename
            .split(['/', '\\'])
            .next_back()
            .unwrap_or(filename)
            .chars()
            .take(50)
            .collect();
        return Some(DownloadProgress {
            progress: 0.0,
            status: format!("📥 Starting: {}", short_name),
        });
    }

    if MERGE_RE.is_match(line) {
        return Some(DownloadProgress {
            progress: 0.99,
            status: "🔄 Merging video and audio...".to_string(),
        });
    }

    if EXTRACT_RE.is_match(line) {
        return Some(DownloadProgress {
            progress: 0.99,
            status: "🎵 Converting audio to MP3...".to_string(),
        });
    }

    if ALREADY_RE.is_match(line) {
        return Some(DownloadProgress {
            progress: 1.0,
            status: "✅ File already downloaded".to_string(),
        });
    }

    None
}
