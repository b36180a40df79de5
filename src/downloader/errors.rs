// Error types for the download pipeline

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadError {
    /// Network timeout while talking to the source site
    NetworkTimeout,

    /// yt-dlp or ffmpeg not found on the system
    ToolNotFound(String),

    /// URL rejected by the extractor
    InvalidUrl(String),

    /// Failed to parse yt-dlp JSON output
    ParseError(String),

    /// Command execution failed
    ExecutionError(String),

    /// yt-dlp reported success but no matching file is in the output directory
    OutputMissing(String),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkTimeout => write!(f, "Network timeout: the source site is not responding"),
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::ExecutionError(msg) => write!(f, "Execution error: {}", msg),
            Self::OutputMissing(msg) => write!(f, "File not found after download: {}", msg),
            Self::Unknown(msg) => write!(f, "Download failed: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

// Classify raw yt-dlp stderr into something the log can name.
// The page still shows one catch-all message with the raw text attached.
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        if s.contains("timeout") || s.contains("timed out") {
            return Self::NetworkTimeout;
        }

        if s.contains("Unsupported URL") || s.contains("is not a valid URL") || s.contains("Invalid URL") {
            return Self::InvalidUrl(s);
        }

        if s.contains("not found") || s.contains("No such file") || s.contains("command not found") {
            return Self::ToolNotFound(s);
        }

        if s.contains("JSON") || s.contains("parse") {
            return Self::ParseError(s);
        }

        Self::Unknown(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_classification() {
        let err = DownloadError::from("ERROR: Connection timed out".to_string());
        assert_eq!(err, DownloadError::NetworkTimeout);
    }

    #[test]
    fn unsupported_url_classification() {
        let err = DownloadError::from("ERROR: Unsupported URL: ftp://nope".to_string());
        assert!(matches!(err, DownloadError::InvalidUrl(_)));
    }

    #[test]
    fn missing_tool_classification() {
        let err = DownloadError::from("sh: yt-dlp: command not found".to_string());
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[test]
    fn everything_else_is_unknown() {
        let err = DownloadError::from("ERROR: Sign in to confirm you are not a bot".to_string());
        assert!(matches!(err, DownloadError::Unknown(_)));
    }

    #[test]
    fn display_keeps_raw_detail() {
        let err = DownloadError::Unknown("boom".to_string());
        assert!(err.to_string().contains("boom"));
    }
}
