use std::path::PathBuf;

use color_eyre::{Help as _, Result, eyre::WrapErr as _};
use tracing::info;
use verstamp_build_info_helper::{Generated, Generator, GitCli};

/// Regenerates a version info artifact, leaving it untouched when unchanged.
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Any directory inside the repository to describe.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
    /// Where to write the artifact.
    #[arg(long)]
    pub out: PathBuf,
    /// The git executable to run.
    #[arg(long, env = "VERSTAMP_GIT", default_value = "git")]
    pub git: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<Generated> {
    let git = GitCli::new(&args.repo).with_program(&args.git);
    let generated = Generator::new(git)
        .generate(&args.out)
        .wrap_err_with(|| {
            format!("failed to generate version info for {}", args.repo.display())
        })
        .suggestion("Is `git` installed, and is --repo inside a git repository?")?;

    if generated.written {
        info!(path = %args.out.display(), "version info updated");
    } else {
        info!(path = %args.out.display(), "version info already up to date");
    }

    Ok(generated)
}
