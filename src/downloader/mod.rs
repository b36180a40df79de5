// Download pipeline: request models, option mapping, progress relay,
// result resolution, tool discovery.

pub mod errors;
pub mod models;
pub mod options;
pub mod outcome;
pub mod progress;
pub mod tools;
pub mod utils;

pub use errors::DownloadError;
pub use models::{DownloadOutcome, DownloadProgress, DownloadRequest, MediaInfo, OutputFormat, Resolution};
