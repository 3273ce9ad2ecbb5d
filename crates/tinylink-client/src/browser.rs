use anyhow::{Context, Result};
use reqwest::Url;
use std::process::Command;
use tracing::debug;

/// Builds the platform command that hands `url` to the default browser.
pub fn command(url: &Url) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        // the empty argument is the window title `start` expects first
        cmd.args(["/c", "start", ""]).arg(url.as_str());
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url.as_str());
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url.as_str());
        cmd
    }
}

/// Opens `url` without waiting for the browser to exit.
pub fn open(url: &Url) -> Result<()> {
    debug!(%url, "opening browser");
    command(url)
        .spawn()
        .with_context(|| format!("failed to open {url}"))?;
    Ok(())
}
