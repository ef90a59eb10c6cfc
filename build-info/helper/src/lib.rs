//! Generates the version info artifact consumed by `verstamp-build-info`.
//!
//! From a build script, call [`initialize()`]. Other build systems can drive
//! [`Generator`] directly, or use the `verstamp generate` command.

mod artifact;
pub mod build_script;
mod descriptor;
mod error;
pub mod git;

use std::{
    env,
    path::{Path, PathBuf},
};

use color_eyre::{
    Help, Result,
    eyre::{OptionExt as _, WrapErr as _},
};
use tracing::info;

pub use crate::{
    artifact::{ARTIFACT_FILE_NAME, render_artifact, write_if_changed},
    descriptor::{Version, VersionDescriptor, describe_repository},
    error::Error,
    git::{DescribeQuery, GitCli, GitQuery, Repository},
};
use crate::build_script::{Overrides, resolve_descriptor};

// Must match the `env` names used by the verstamp CLI flags.
const ENV_PREFIX: &str = "VERSTAMP_";

/// Outcome of one [`Generator::generate`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub descriptor: VersionDescriptor,
    /// False when the artifact already had the rendered content.
    pub written: bool,
}

/// Describe, render, then write only if changed.
#[derive(Debug)]
pub struct Generator<G> {
    git: G,
}

impl<G: GitQuery> Generator<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    pub fn generate(&self, out_path: &Path) -> Result<Generated, Error> {
        let descriptor = describe_repository(&self.git)?;
        let written = write_if_changed(out_path, &render_artifact(&descriptor))?;
        info!(
            package = %descriptor.package(),
            path = %out_path.display(),
            written,
            "generated version info"
        );

        Ok(Generated {
            descriptor,
            written,
        })
    }
}

/// Call this from within your build script.
///
/// Writes `$OUT_DIR/version_info.rs` for `make_version_info!()` to include.
/// `VERSTAMP_GIT_DESCRIBE` and `VERSTAMP_GIT_SHA1` override the values git
/// would report, and `VERSTAMP_GIT` picks the git executable.
pub fn initialize() -> Result<()> {
    color_eyre::install()?;
    let out_dir = env::var_os("OUT_DIR")
        .ok_or_eyre("`OUT_DIR` is not set")
        .suggestion("Only call `initialize()` from a build script")?;
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
        .ok_or_eyre("`CARGO_MANIFEST_DIR` is not set")
        .suggestion("Only call `initialize()` from a build script")?;

    let descriptor = build_script_descriptor(Path::new(&manifest_dir))?;
    let out_path = PathBuf::from(out_dir).join(ARTIFACT_FILE_NAME);
    write_if_changed(&out_path, &render_artifact(&descriptor))
        .wrap_err("failed to write the version info artifact")?;

    Ok(())
}

fn build_script_descriptor(manifest_dir: &Path) -> Result<VersionDescriptor> {
    let overrides = Overrides {
        describe: read_env("GIT_DESCRIBE")?,
        sha1: read_env("GIT_SHA1")?,
    };
    let program = read_env("GIT")?.unwrap_or_else(|| "git".to_owned());

    let repository = if overrides.is_complete() {
        None
    } else {
        Repository::discover(manifest_dir)
    };
    match &repository {
        Some(repository) => {
            for path in repository.watched_paths() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
        None if !overrides.is_complete() => println!(
            "cargo:warning=no git repository contains {}, embedding empty version info",
            manifest_dir.display()
        ),
        None => {}
    }

    let git = repository.map(|_| GitCli::new(manifest_dir).with_program(program));
    let descriptor = resolve_descriptor(overrides, git.as_ref())
        .wrap_err("failed to query git for version information")
        .suggestion("Is `git` installed? Set `VERSTAMP_GIT` to its path.")?;

    Ok(descriptor)
}

fn read_env(var: &str) -> Result<Option<String>> {
    let var = format!("{ENV_PREFIX}{var}");
    println!("cargo:rerun-if-env-changed={var}");
    match env::var(&var) {
        Ok(s) => Ok(Some(s)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).wrap_err_with(|| format!("invalid value for `{var}`")),
    }
}
