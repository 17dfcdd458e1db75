use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Raw HTML separator the renderer turns into a page boundary.
pub const PAGE_BREAK: &str = "<div style=\"page-break-before: always;\"></div>";

/// Concatenate documents in order into a single markdown blob. The first
/// entry, when named `README.md`, is emitted verbatim; every other file is
/// preceded by a page break and an `<h1>` derived from its filename stem.
pub fn combine(files: &[PathBuf]) -> Result<String> {
    let mut combined = String::new();
    for (idx, path) in files.iter().enumerate() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        let readme_first = idx == 0 && path.file_name() == Some(OsStr::new("README.md"));
        if readme_first {
            combined.push_str(&content);
            combined.push('\n');
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("document");
        combined.push_str(PAGE_BREAK);
        combined.push('\n');
        combined.push_str(&format!("<h1 id=\"{stem}\">{stem}</h1>\n\n"));
        combined.push_str(&content);
        combined.push_str("\n\n");
    }
    Ok(combined)
}
