use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use crate::{Error, VersionDescriptor};

/// File name of the artifact inside `OUT_DIR`.
// Must be the same as the one in verstamp-build-info's `make_version_info!()`.
pub const ARTIFACT_FILE_NAME: &str = "version_info.rs";

/// Renders the Rust source defining the three version constants.
///
/// Output depends only on `descriptor`, so an unchanged repository renders the
/// same bytes every time.
pub fn render_artifact(descriptor: &VersionDescriptor) -> String {
    // `{:?}` on a str yields an escaped Rust string literal.
    format!(
        "// @generated by verstamp. Do not edit.\n\
         pub const PACKAGE: &str = {:?};\n\
         pub const GIT_SHA1: &str = {:?};\n\
         pub const GIT_DESCRIPTION: &str = {:?};\n",
        descriptor.package(),
        descriptor.raw_hash,
        descriptor.raw_description,
    )
}

/// Writes `contents` to `path` unless the file already holds exactly those
/// bytes. Returns whether a write happened.
///
/// Leaving the file untouched keeps its mtime, so dependents are not rebuilt
/// when the version did not change.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool, Error> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => {
            debug!(path = %path.display(), "artifact unchanged, not writing");
            return Ok(false);
        }
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(Error::ReadArtifact {
                path: path.to_owned(),
                source,
            });
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_owned(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::WriteArtifact {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "artifact written");

    Ok(true)
}
