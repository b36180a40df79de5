// Options builder - maps the page selections onto a yt-dlp invocation
//
// Pure translation layer: resolution + output format in, format selector
// string and argument list out. The selector strings mirror what yt-dlp
// documents for "best video up to a height, plus best audio".

use std::path::Path;

use super::models::{DownloadRequest, OutputFormat, Resolution};

/// yt-dlp format selector for the chosen resolution/output pair.
///
/// MP3 downloads pull the best audio-only stream and convert afterwards;
/// MP4 downloads pull best-video-under-cap plus best-audio for merging.
pub fn format_selector(resolution: Resolution, output: OutputFormat) -> String {
    match output {
        OutputFormat::Mp3 => "bestaudio/best".to_string(),
        OutputFormat::Mp4 => format!(
            "bestvideo[height<={}]+bestaudio/best",
            resolution.height_cap()
        ),
    }
}

/// Full argument list for one download run.
///
/// `ffmpeg_path` is forwarded with `--ffmpeg-location` so yt-dlp can merge
/// and transcode without ffmpeg on PATH. The URL goes last.
pub fn build_download_args(
    request: &DownloadRequest,
    output_dir: &Path,
    ffmpeg_path: &str,
) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        format_selector(request.resolution, request.output),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--newline".to_string(),
        "-P".to_string(),
        output_dir.to_string_lossy().to_string(),
        // Default yt-dlp template is "%(title)s [%(id)s].%(ext)s" — drop the [id]
        "-o".to_string(),
        "%(title)s.%(ext)s".to_string(),
        "--no-check-certificates".to_string(),
        "--user-agent".to_string(),
        "Mozilla/5.0".to_string(),
        "--ffmpeg-location".to_string(),
        ffmpeg_path.to_string(),
    ];

    match request.output {
        OutputFormat::Mp4 => {
            args.push("--merge-output-format".to_string());
            args.push("mp4".to_string());
        }
        OutputFormat::Mp3 => {
            // Extract to MP3 via ffmpeg; quality 0 lets ffmpeg pick the best
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                "mp3".to_string(),
                "--audio-quality".to_string(),
                "0".to_string(),
            ]);
        }
    }

    args.push(request.url.clone());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(resolution: Resolution, output: OutputFormat) -> DownloadRequest {
        DownloadRequest {
            url: "https://example.com/watch?v=abc".to_string(),
            resolution,
            output,
            output_dir: None,
        }
    }

    #[test]
    fn selector_contains_height_bound_for_each_resolution() {
        for (resolution, bound) in [
            (Resolution::P2160, "height<=2160"),
            (Resolution::P1080, "height<=1080"),
            (Resolution::P720, "height<=720"),
            (Resolution::P480, "height<=480"),
            (Resolution::P360, "height<=360"),
        ] {
            let selector = format_selector(resolution, OutputFormat::Mp4);
            assert!(
                selector.contains(bound),
                "{selector} should contain {bound}"
            );
        }
    }

    #[test]
    fn best_uses_the_2160_capped_selector() {
        assert_eq!(
            format_selector(Resolution::Best, OutputFormat::Mp4),
            "bestvideo[height<=2160]+bestaudio/best"
        );
    }

    #[test]
    fn mp3_selects_audio_only_source_and_extraction() {
        let selector = format_selector(Resolution::P720, OutputFormat::Mp3);
        assert_eq!(selector, "bestaudio/best");

        let args = build_download_args(
            &request(Resolution::P720, OutputFormat::Mp3),
            &PathBuf::from("/tmp/out"),
            "/usr/bin/ffmpeg",
        );
        assert!(args.contains(&"-x".to_string()));
        let audio_format = args.iter().position(|a| a == "--audio-format").unwrap();
        assert_eq!(args[audio_format + 1], "mp3");
        assert!(!args.contains(&"--merge-output-format".to_string()));
    }

    #[test]
    fn mp4_selects_muxed_source_with_mp4_merge_target() {
        let args = build_download_args(
            &request(Resolution::P1080, OutputFormat::Mp4),
            &PathBuf::from("/tmp/out"),
            "/usr/bin/ffmpeg",
        );
        let selector = &args[args.iter().position(|a| a == "-f").unwrap() + 1];
        assert!(selector.contains("bestvideo[height<=1080]+bestaudio"));
        let merge = args.iter().position(|a| a == "--merge-output-format").unwrap();
        assert_eq!(args[merge + 1], "mp4");
        assert!(!args.contains(&"-x".to_string()));
    }

    #[test]
    fn url_goes_last_and_ffmpeg_location_is_forwarded() {
        let args = build_download_args(
            &request(Resolution::Best, OutputFormat::Mp4),
            &PathBuf::from("/tmp/out"),
            "/opt/ffmpeg/bin/ffmpeg",
        );
        assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc");
        let loc = args.iter().position(|a| a == "--ffmpeg-location").unwrap();
        assert_eq!(args[loc + 1], "/opt/ffmpeg/bin/ffmpeg");
    }
}
