use std::ffi::OsStr;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::types::{FileEntry, PageMap};

// Prefix tokens for the rendered tree: entries with siblings after them get
// TEE, the last sibling gets LAST; nesting continues with BRANCH under a TEE
// and SPACE under a LAST.
const SPACE: &str = "    ";
const BRANCH: &str = "    ";
const TEE: &str = "  - ";
const LAST: &str = "   - ";

/// Extensions excluded from the summary tree: scripts and rendered output.
static SKIP_EXTENSIONS: &[&str] = &["py", "sh", "bat", "pdf"];

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Wrap each entry in an HTML anchor and collect a page map.
    pub links: bool,
}

/// Render the directory structure under `root` as indented summary lines,
/// one per entry, siblings sorted by name. With `links` enabled every line
/// carries an anchor to the entry and the returned page map records the
/// name→anchor pairs in traversal order.
pub fn build_tree(root: &Path, opts: TreeOptions) -> (Vec<String>, PageMap) {
    let mut lines = Vec::new();
    let mut pages = PageMap::default();
    walk(root, "", opts, &mut lines, &mut pages);
    debug!("summary tree has {} lines, {} pages", lines.len(), pages.len());
    (lines, pages)
}

fn walk(dir: &Path, prefix: &str, opts: TreeOptions, lines: &mut Vec<String>, pages: &mut PageMap) {
    let entries = list_entries(dir);
    let count = entries.len();
    for (idx, entry) in entries.iter().enumerate() {
        let pointer = if idx + 1 == count { LAST } else { TEE };
        let name = entry.display_name.as_str();
        if opts.links {
            let anchor = format!("<a href=\"{name}\">{name}</a>");
            lines.push(format!("{prefix}{pointer}{anchor}"));
            pages.insert(name, anchor);
        } else {
            lines.push(format!("{prefix}{pointer}{name}"));
        }
        if entry.is_dir {
            let extension = if pointer == TEE { BRANCH } else { SPACE };
            walk(&entry.path, &format!("{prefix}{extension}"), opts, lines, pages);
        }
    }
}

/// Direct children of `dir`, sorted by name, minus hidden entries and
/// skipped extensions. Unreadable entries are silently dropped.
fn list_entries(dir: &Path) -> Vec<FileEntry> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || has_skipped_extension(&name) {
            continue;
        }
        entries.push(FileEntry {
            path: entry.path().to_path_buf(),
            display_name: name,
            is_dir: entry.file_type().is_dir(),
        });
    }
    entries
}

fn has_skipped_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| {
            SKIP_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
}
