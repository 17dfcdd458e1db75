use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

const DEFAULT_MARKER_HEADING: &str = "# Sumário";
const DEFAULT_OUTPUT: &str = "RubikCube.pdf";
const DEFAULT_COMMIT_MESSAGE: &str = "Add";
const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_BRANCH: &str = "main";

/// Config for optional YAML (`mdbinder.yml` / `mdbinder.yaml`)
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Additional ignore patterns (substring matches).
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Heading in the README that anchors the generated summary.
    #[serde(default = "default_marker_heading")]
    pub marker_heading: String,
    /// PDF output file name.
    #[serde(default = "default_output")]
    pub output: String,
    /// Commit message for the publish step.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// Remote to push to.
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch to push to.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ignore_patterns: Vec::new(),
            marker_heading: default_marker_heading(),
            output: default_output(),
            commit_message: default_commit_message(),
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

fn default_marker_heading() -> String {
    DEFAULT_MARKER_HEADING.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Attempt to load config from mdbinder.yml or mdbinder.yaml, falling back to
/// defaults if neither exists.
pub fn load(root: &Path) -> Result<Config> {
    for candidate in &["mdbinder.yml", "mdbinder.yaml"] {
        let path = root.join(candidate);
        if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = serde_yaml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!("loaded config from {}", path.display());
            return Ok(config);
        }
    }
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(dir.path()).unwrap();

        assert!(config.ignore_patterns.is_empty());
        assert_eq!(config.marker_heading, "# Sumário");
        assert_eq!(config.output, "RubikCube.pdf");
        assert_eq!(config.commit_message, "Add");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branch, "main");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("mdbinder.yml"),
            "marker_heading: \"# Summary\"\nignore_patterns:\n  - drafts\n",
        )
        .unwrap();

        let config = load(dir.path()).unwrap();
        assert_eq!(config.marker_heading, "# Summary");
        assert_eq!(config.ignore_patterns, vec!["drafts".to_string()]);
        assert_eq!(config.output, "RubikCube.pdf");
        assert_eq!(config.branch, "main");
    }

    #[test]
    fn yml_takes_precedence_over_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mdbinder.yml"), "output: first.pdf\n").unwrap();
        fs::write(dir.path().join("mdbinder.yaml"), "output: second.pdf\n").unwrap();

        let config = load(dir.path()).unwrap();
        assert_eq!(config.output, "first.pdf");
    }
}
