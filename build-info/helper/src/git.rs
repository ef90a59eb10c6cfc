//! The only place that talks to git. Everything else goes through [`GitQuery`].

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::debug;

use crate::Error;

/// Tag filter for the hash query. No tag is expected to match it, which forces
/// `git describe` into its bare hash fallback.
pub const MATCH_NO_TAG: &str = "--match=NeVeRmAtCh";

/// The two read-only describe queries run against a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeQuery {
    /// Nearest tag, commits since, abbreviated hash and dirty marker.
    Description,
    /// Full length commit hash with dirty marker.
    FullHash,
}

impl DescribeQuery {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Description => &["describe", "--tags", "--always", "--dirty"],
            Self::FullHash => &[
                "describe",
                MATCH_NO_TAG,
                "--always",
                "--abbrev=40",
                "--dirty",
            ],
        }
    }
}

/// Runs describe queries against some repository.
pub trait GitQuery {
    /// Returns the query's stdout with trailing whitespace removed.
    fn describe(&self, query: DescribeQuery) -> Result<String, Error>;
}

impl<T: GitQuery + ?Sized> GitQuery for &T {
    fn describe(&self, query: DescribeQuery) -> Result<String, Error> {
        (**self).describe(query)
    }
}

/// [`GitQuery`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    repo_dir: PathBuf,
}

impl GitCli {
    /// Queries the repository containing `repo_dir`, using `git` from `PATH`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            repo_dir: repo_dir.into(),
        }
    }

    #[must_use]
    pub fn with_program(self, program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..self
        }
    }
}

impl GitQuery for GitCli {
    fn describe(&self, query: DescribeQuery) -> Result<String, Error> {
        // Spawning in a missing directory also reports NotFound, which would be
        // mistaken for a missing executable.
        if !self.repo_dir.is_dir() {
            return Err(Error::NoSuchDirectory {
                path: self.repo_dir.clone(),
            });
        }
        let args = query.args();
        debug!(?args, repo_dir = %self.repo_dir.display(), "running git");
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    Error::GitNotFound {
                        program: self.program.clone(),
                        source,
                    }
                } else {
                    Error::Spawn {
                        program: self.program.clone(),
                        args: args.join(" "),
                        source,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(Error::GitFailed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
            });
        }

        let mut stdout =
            String::from_utf8(output.stdout).map_err(|source| Error::NonUtf8Output {
                args: args.join(" "),
                source,
            })?;
        stdout.truncate(stdout.trim_end().len());
        debug!(?query, %stdout, "git answered");

        Ok(stdout)
    }
}

/// Where a repository lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The checked out tree, i.e. the directory holding `.git`.
    pub work_tree: PathBuf,
    /// Per worktree metadata: `HEAD` and `index`.
    pub git_dir: PathBuf,
    /// Metadata shared between worktrees: `refs` and `packed-refs`. Same as
    /// `git_dir` for a plain clone.
    pub common_dir: PathBuf,
}

impl Repository {
    /// Finds the repository containing `start`, walking up through its
    /// ancestors.
    ///
    /// Handles both a regular `.git` directory and the `gitdir: <path>` file that
    /// worktrees and submodules use, following `commondir` when present.
    pub fn discover(start: &Path) -> Option<Self> {
        start.ancestors().find_map(|dir| {
            let git_dir = resolve_git_dir(dir)?;
            let common_dir = fs::read_to_string(git_dir.join("commondir"))
                .ok()
                .map(|common| git_dir.join(common.trim()))
                .filter(|common| common.is_dir())
                .unwrap_or_else(|| git_dir.clone());
            Some(Self {
                work_tree: dir.to_owned(),
                git_dir,
                common_dir,
            })
        })
    }

    /// Paths whose changes can alter what `git describe` reports.
    ///
    /// The work tree itself is included, since any edit to a tracked file can
    /// flip the dirty marker. Paths that don't exist are skipped.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        [
            self.work_tree.clone(),
            self.git_dir.join("HEAD"),
            self.git_dir.join("index"),
            self.common_dir.join("refs"),
            self.common_dir.join("packed-refs"),
        ]
        .into_iter()
        .filter(|path| path.exists())
        .collect()
    }
}

fn resolve_git_dir(dir: &Path) -> Option<PathBuf> {
    let dot_git = dir.join(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }
    let contents = fs::read_to_string(&dot_git).ok()?;
    let target = contents.trim().strip_prefix("gitdir:")?.trim();
    let git_dir = dir.join(target);
    git_dir.is_dir().then_some(git_dir)
}
