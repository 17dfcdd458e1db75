use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Locate the wkhtmltopdf executable on the system path. Fatal when absent:
/// callers run this before any file is written.
pub fn locate_wkhtmltopdf() -> Result<PathBuf> {
    locate("wkhtmltopdf")
}

/// Resolve a binary name via `which` (Unix) or `where` (Windows).
fn locate(binary: &str) -> Result<PathBuf> {
    #[cfg(windows)]
    let which_cmd = "where";
    #[cfg(not(windows))]
    let which_cmd = "which";

    let output = Command::new(which_cmd)
        .arg(binary)
        .output()
        .with_context(|| format!("running {which_cmd} {binary}"))?;

    if !output.status.success() {
        bail!("{binary} executable not found. Please install {binary}.");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.lines().next().map(str::trim).unwrap_or("");
    if path.is_empty() {
        bail!("{binary} executable not found. Please install {binary}.");
    }

    debug!("found {binary} at {path}");
    Ok(PathBuf::from(path))
}

/// Convert the combined markdown to HTML and hand it to wkhtmltopdf.
pub fn render_pdf(wkhtmltopdf: &Path, markdown: &str, output: &Path) -> Result<()> {
    let html = to_html_document(markdown);

    let mut html_file = tempfile::Builder::new()
        .prefix("mdbinder-")
        .suffix(".html")
        .tempfile()
        .context("creating temporary HTML file")?;
    html_file.write_all(html.as_bytes())?;
    html_file.flush()?;

    let status = Command::new(wkhtmltopdf)
        .arg("--encoding")
        .arg("UTF-8")
        .arg("--footer-right")
        .arg("[page]")
        .arg("--footer-font-size")
        .arg("10")
        .arg("--no-outline")
        .arg(html_file.path())
        .arg(output)
        .status()
        .with_context(|| format!("running {}", wkhtmltopdf.display()))?;

    if !status.success() {
        bail!("wkhtmltopdf exited with {status}");
    }
    Ok(())
}

/// Render markdown to a minimal standalone HTML document with a UTF-8
/// charset declaration.
fn to_html_document(markdown: &str) -> String {
    let mut options = comrak::Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    // The page-break divs are raw HTML and must survive conversion.
    options.render.unsafe_ = true;

    let body = comrak::markdown_to_html(markdown, &options);
    format!("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body>{body}</body></html>")
}
