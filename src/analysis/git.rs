//! Remote repository analysis via shallow clone.
//!
//! The clone lands in a scoped temporary directory that is removed on every
//! exit path, including clone failures and timeouts. The clone itself is
//! bounded by a wall-clock limit: an unbounded `git clone` would tie up the
//! whole invocation.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};
use wait_timeout::ChildExt;

use super::analyzer::{AnalysisReport, AnalysisSource, BlueprintAnalyzer};
use super::{AnalysisError, AnalysisResult};

/// Shallow-clones repositories with a time limit.
pub struct GitCloner {
    timeout: Duration,
}

impl GitCloner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Clone `url` at `branch` into `dest` with `--depth 1`.
    pub fn clone_shallow(&self, url: &str, branch: &str, dest: &Path) -> AnalysisResult<()> {
        debug!(%url, %branch, dest = %dest.display(), "cloning repository");

        let mut child = Command::new("git")
            .args(["clone", "--depth", "1", "--branch", branch, url])
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| AnalysisError::CloneFailed(format!("failed to run git: {err}")))?;

        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(AnalysisError::CloneTimeout(self.timeout));
            }
        };

        if !status.success() {
            let stderr = child
                .stderr
                .take()
                .and_then(|mut pipe| {
                    use std::io::Read;
                    let mut buf = String::new();
                    pipe.read_to_string(&mut buf).ok().map(|_| buf)
                })
                .unwrap_or_default();
            return Err(AnalysisError::CloneFailed(stderr.trim().to_string()));
        }

        Ok(())
    }
}

impl BlueprintAnalyzer {
    /// Clone a remote repository and analyze its working tree.
    ///
    /// The temporary clone directory is dropped (and deleted) whether the
    /// clone, the scan, or nothing at all fails.
    pub fn analyze_git_repo(&self, url: &str, branch: &str) -> AnalysisResult<AnalysisReport> {
        let temp_dir = TempDir::new()?;
        let cloner = GitCloner::new(Duration::from_secs(self.config().clone_timeout_secs));

        cloner.clone_shallow(url, branch, temp_dir.path())?;
        info!(%url, %branch, "repository cloned, scanning");

        self.analyze_directory(
            temp_dir.path(),
            Some(AnalysisSource::Repository {
                url: url.to_string(),
                branch: branch.to_string(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use std::fs;
    use std::process::Command;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .is_ok_and(|ok| ok)
    }

    #[test]
    fn test_clone_failure_reports_error() {
        if !git_available() {
            return;
        }

        let dir = tempfile::TempDir::new().unwrap();
        let cloner = GitCloner::new(Duration::from_secs(30));
        let err = cloner
            .clone_shallow(
                "file:///definitely/not/a/repo",
                "main",
                &dir.path().join("clone"),
            )
            .unwrap_err();

        assert!(matches!(err, AnalysisError::CloneFailed(_)));
    }

    #[test]
    fn test_local_repo_clone_and_analysis() {
        if !git_available() {
            return;
        }

        // Build a tiny local repository to clone from
        let origin = tempfile::TempDir::new().unwrap();
        fs::write(origin.path().join("app.js"), "fetch(\"/api/users\")").unwrap();

        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(origin.path())
                .env("GIT_AUTHOR_NAME", "test")
                .env("GIT_AUTHOR_EMAIL", "test@example.com")
                .env("GIT_COMMITTER_NAME", "test")
                .env("GIT_COMMITTER_EMAIL", "test@example.com")
                .output()
                .unwrap()
        };
        run(&["init", "--initial-branch=main"]);
        run(&["add", "."]);
        run(&["commit", "-m", "init"]);

        let analyzer = BlueprintAnalyzer::new(AnalyzerConfig::default());
        let url = format!("file://{}", origin.path().display());
        let report = analyzer.analyze_git_repo(&url, "main").unwrap();

        assert!(matches!(
            report.source,
            AnalysisSource::Repository { .. }
        ));
        assert_eq!(report.data_flows.len(), 1);
    }

    #[test]
    fn test_timeout_error_names_the_limit() {
        let err = AnalysisError::CloneTimeout(Duration::from_secs(300));
        assert!(err.to_string().contains("300"));
    }
}
