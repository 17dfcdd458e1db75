use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Matches the start of any heading line.
fn heading_re() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| Regex::new(r"(?m)^#").expect("heading regex is valid"))
}

/// Splice `replacement` into `text` between the marker heading line and the
/// next heading (or end of file). Everything outside that span is preserved
/// byte-for-byte. Returns `None` when the marker is absent.
pub fn splice(text: &str, marker: &str, replacement: &str) -> Option<String> {
    let start = find_marker(text, marker)?;
    let line_end = text[start..]
        .find('\n')
        .map_or(text.len(), |i| start + i + 1);
    let next_heading = heading_re()
        .find(&text[line_end..])
        .map_or(text.len(), |m| line_end + m.start());

    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..line_end]);
    out.push_str(replacement);
    out.push_str(&text[next_heading..]);
    Some(out)
}

/// First occurrence of `marker` at the start of a line.
fn find_marker(text: &str, marker: &str) -> Option<usize> {
    text.match_indices(marker)
        .map(|(i, _)| i)
        .find(|&i| i == 0 || text.as_bytes()[i - 1] == b'\n')
}

/// Rewrite `README.md` under `root` with the summary tree spliced in below
/// the marker heading. A missing README or missing marker is a silent skip;
/// returns whether the file was rewritten.
pub fn update_readme(root: &Path, marker: &str, tree_lines: &[String]) -> Result<bool> {
    let readme_path = root.join("README.md");
    if !readme_path.exists() {
        debug!("{} does not exist, skipping summary update", readme_path.display());
        return Ok(false);
    }

    let content = fs::read_to_string(&readme_path)
        .with_context(|| format!("reading {}", readme_path.display()))?;
    let replacement = format!("\n{}\n\n", tree_lines.join("\n"));

    match splice(&content, marker, &replacement) {
        Some(updated) => {
            fs::write(&readme_path, updated)
                .with_context(|| format!("writing {}", readme_path.display()))?;
            Ok(true)
        }
        None => {
            debug!("marker {marker:?} not found in README.md, leaving it unchanged");
            Ok(false)
        }
    }
}
