use std::{io, path::PathBuf, process::ExitStatus, string::FromUtf8Error};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("git executable {} could not be found", .program.display())]
    GitNotFound { program: PathBuf, source: io::Error },
    #[error("failed to run {} {args}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        args: String,
        source: io::Error,
    },
    #[error("repository directory {} does not exist", .path.display())]
    NoSuchDirectory { path: PathBuf },
    #[error("`git {args}` exited with {status}: {stderr}")]
    GitFailed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`git {args}` printed non-utf8 output: {source}")]
    NonUtf8Output { args: String, source: FromUtf8Error },
    #[error("failed reading artifact {}: {source}", .path.display())]
    ReadArtifact { path: PathBuf, source: io::Error },
    #[error("failed creating directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed writing artifact {}: {source}", .path.display())]
    WriteArtifact { path: PathBuf, source: io::Error },
}
