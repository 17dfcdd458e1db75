use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;
use tracing::debug;

/// Collect every markdown file under `root`, README first, the rest sorted by
/// path. Hidden files and directories are excluded, as is anything matching a
/// user ignore pattern (substring match, same as the config file documents).
pub fn collect_markdown_files(root: &Path, user_ignores: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.is_dir() {
        return Ok(files);
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .follow_links(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(false)
        .build();

    for entry in walker {
        if let Ok(ent) = entry {
            let path = ent.path();
            if path.is_dir() || !is_markdown(path) {
                continue;
            }
            if matches_ignore(path, user_ignores) {
                debug!("skipping by ignore pattern: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    // README.md at the root always leads the document order.
    let readme = root.join("README.md");
    if let Some(pos) = files.iter().position(|p| *p == readme) {
        let readme = files.remove(pos);
        files.insert(0, readme);
    }

    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| ext.eq_ignore_ascii_case("md"))
}

fn matches_ignore(path: &Path, user_ignores: &[String]) -> bool {
    let pstr = path.to_string_lossy();
    user_ignores.iter().any(|pat| pstr.contains(pat.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn readme_first_then_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("README.md"), "readme").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.md"), "c").unwrap();

        let files = collect_markdown_files(dir.path(), &[]).unwrap();
        assert_eq!(names(&files), vec!["README.md", "a.md", "b.md", "c.md"]);
    }

    #[test]
    fn skips_hidden_and_non_markdown() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.md"), "n").unwrap();
        fs::write(dir.path().join(".draft.md"), "hidden").unwrap();
        fs::write(dir.path().join("notes.txt"), "text").unwrap();
        fs::write(dir.path().join("build.py"), "script").unwrap();
        fs::create_dir(dir.path().join(".obsidian")).unwrap();
        fs::write(dir.path().join(".obsidian").join("inner.md"), "x").unwrap();

        let files = collect_markdown_files(dir.path(), &[]).unwrap();
        assert_eq!(names(&files), vec!["notes.md"]);
    }

    #[test]
    fn honors_user_ignore_patterns() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.md"), "k").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("wip.md"), "w").unwrap();

        let ignores = vec!["drafts".to_string()];
        let files = collect_markdown_files(dir.path(), &ignores).unwrap();
        assert_eq!(names(&files), vec!["keep.md"]);
    }

    #[test]
    fn missing_root_yields_empty() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        let files = collect_markdown_files(&gone, &[]).unwrap();
        assert!(files.is_empty());
    }
}
