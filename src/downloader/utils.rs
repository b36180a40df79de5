// Subprocess helpers shared by the engine

use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

use super::errors::DownloadError;

/// Run a command to completion with a hard timeout.
///
/// Used for the metadata fetch, where a stuck extractor would otherwise hang
/// the page forever. `kill_on_drop` reaps the child when the timeout fires.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    timeout_secs: u64,
) -> Result<Output, DownloadError> {
    let child = TokioCommand::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| DownloadError::ToolNotFound(format!("{}: {}", program, e)))?;

    match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(result) => result
            .map_err(|e| DownloadError::ExecutionError(format!("failed to wait for {}: {}", program, e))),
        Err(_) => {
            eprintln!("[utils] {} timed out after {}s", program, timeout_secs);
            Err(DownloadError::NetworkTimeout)
        }
    }
}
