//! Result display.
//!
//! Headless unless asked: the image is written as a PNG preview to the temp
//! directory, handed to the platform viewer, and the process blocks until
//! Enter is pressed.

use crate::CliResult;
use pdilab::io::write_image;
use pdilab::{ImageFormat, Pix};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::Command;

fn preview_path(title: &str) -> PathBuf {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    std::env::temp_dir().join(format!("pdilab-{stem}.png"))
}

fn viewer(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Show `pix` under `title`, or just log it when `interactive` is off.
pub fn show(pix: &Pix, title: &str, interactive: bool) -> CliResult<()> {
    if !interactive {
        tracing::info!(
            "{}: {}x{} (pass --show to open a viewer)",
            title,
            pix.width(),
            pix.height()
        );
        return Ok(());
    }

    let path = preview_path(title);
    write_image(pix, &path, ImageFormat::Png)?;
    tracing::info!("{}: preview at {}", title, path.display());

    if let Err(e) = viewer(&path).spawn() {
        tracing::warn!("Could not start an image viewer: {}", e);
    }

    println!("Press Enter to continue...");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
