use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::path::Path;
use tokio::process::Command;

const LOG_TARGET: &str = "       git";

/// Shallow-clone a repository into `dest` for file-presence inspection.
///
/// Uses `--depth 1` since only the working tree matters, never the history.
/// The whole operation is bounded by `timeout`; a hung clone is killed.
pub async fn shallow_clone(repo_url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    let dest_str = dest.to_str().into_app_err("invalid UTF-8 in clone destination path")?;

    log::info!(target: LOG_TARGET, "Shallow-cloning repository '{repo_url}'");
    let start_time = std::time::Instant::now();

    let output = run_git_with_timeout(
        &["clone", "--depth", "1", "--single-branch", "--no-tags", repo_url, dest_str],
        timeout,
    )
    .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone of '{repo_url}' failed: {}", stderr.trim());
    }

    log::debug!(target: LOG_TARGET, "Cloned '{repo_url}' in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

async fn run_git_with_timeout(args: &[&str], timeout: Duration) -> Result<std::process::Output> {
    let child = Command::new("git")
        .args(args)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err("could not spawn git command")?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e).into_app_err_with(|| format!("'git {}' failed to run", args.join(" "))),
        Err(_) => {
            bail!("'git {}' timed out after {} seconds", args.join(" "), timeout.as_secs());
        }
    }
}
