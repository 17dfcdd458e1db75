use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

/// Stage, commit, and push the working directory. Best effort: the first
/// failing command aborts the remaining ones and is logged, never returned.
pub fn publish(root: &Path, message: &str, remote: &str, branch: &str) {
    let steps: [Vec<&str>; 3] = [
        vec!["add", "-A"],
        vec!["commit", "-m", message],
        vec!["push", remote, branch],
    ];

    for args in &steps {
        match Command::new("git").args(args).current_dir(root).status() {
            Ok(status) if status.success() => {
                debug!("git {} succeeded", args.join(" "));
            }
            Ok(status) => {
                warn!("git {} exited with {status}, skipping remaining steps", args.join(" "));
                return;
            }
            Err(err) => {
                warn!("failed to run git {}: {err}", args.join(" "));
                return;
            }
        }
    }
    println!("Changes pushed to {remote}/{branch}.");
}
