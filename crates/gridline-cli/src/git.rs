use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const GIT_CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GitStatus {
    pub branch: String,
    pub dirty: bool,
    pub ahead: u32,
    pub behind: u32,
}

static CACHE: Lazy<Mutex<HashMap<PathBuf, (Option<GitStatus>, Instant)>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Collect git state for a directory. Returns None outside a repository
/// or when `git` is unavailable; never an error. Results are cached for
/// a few seconds so hosts that re-render on a short interval do not pay
/// for repeated subprocesses.
pub fn collect(dir: &Path) -> Option<GitStatus> {
    let key = dir.to_path_buf();

    if let Ok(cache) = CACHE.lock() {
        if let Some((status, at)) = cache.get(&key) {
            if at.elapsed() < GIT_CACHE_TTL {
                return status.clone();
            }
        }
    }

    let status = collect_uncached(dir);

    if let Ok(mut cache) = CACHE.lock() {
        cache.insert(key, (status.clone(), Instant::now()));
    }

    status
}

fn collect_uncached(dir: &Path) -> Option<GitStatus> {
    let branch = git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    if branch.is_empty() {
        return None;
    }

    let dirty = git(dir, &["status", "--porcelain"])
        .map(|out| !out.is_empty())
        .unwrap_or(false);

    // "<ahead>\t<behind>"; absent upstream leaves both at zero.
    let (ahead, behind) = git(dir, &["rev-list", "--left-right", "--count", "HEAD...@{upstream}"])
        .and_then(|out| {
            let mut parts = out.split_whitespace();
            let ahead = parts.next()?.parse().ok()?;
            let behind = parts.next()?.parse().ok()?;
            Some((ahead, behind))
        })
        .unwrap_or((0, 0));

    Some(GitStatus {
        branch,
        dirty,
        ahead,
        behind,
    })
}

fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_non_repo_is_absent() {
        let temp = TempDir::new().unwrap();
        assert!(collect_uncached(temp.path()).is_none());
    }

    #[test]
    fn test_fresh_repo_reports_branch() {
        let temp = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(temp.path())
                .output()
                .unwrap()
        };
        run(&["init"]);
        run(&["config", "user.email", "t@example.com"]);
        run(&["config", "user.name", "t"]);
        std::fs::write(temp.path().join("f"), "x").unwrap();
        run(&["add", "."]);
        run(&["commit", "-m", "initial"]);
        run(&["branch", "-m", "work"]);

        let status = collect_uncached(temp.path()).unwrap();
        assert_eq!(status.branch, "work");
        assert!(!status.dirty);
        assert_eq!((status.ahead, status.behind), (0, 0));

        std::fs::write(temp.path().join("g"), "y").unwrap();
        let status = collect_uncached(temp.path()).unwrap();
        assert!(status.dirty);
    }
}
