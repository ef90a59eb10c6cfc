//! Be sure that you run `verstamp_build_info::initialize()` in your build.rs,
//! with the `build-script` feature enabled on the build-dependency.
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "build-script")]
pub use verstamp_build_info_helper::*;

/// Version information derived from the repository at build time.
///
/// All fields are literals baked in when the artifact was generated, so an
/// instance never changes and reading it cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionInfo {
    /// `major.minor.patch`, with `-dirty` appended when the working tree had
    /// uncommitted changes. Components without a matching digit run are blank.
    pub package: &'static str,
    /// Full commit hash, with a `-dirty` suffix for a modified working tree.
    pub git_sha1: &'static str,
    /// The result of `git describe --tags --always --dirty`.
    pub git_description: &'static str,
}

impl VersionInfo {
    pub const fn new(
        package: &'static str,
        git_sha1: &'static str,
        git_description: &'static str,
    ) -> Self {
        Self {
            package,
            git_sha1,
            git_description,
        }
    }

    /// True when the build came from a working tree with uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.git_sha1.ends_with("-dirty")
    }
}

/// Calling this returns an instance of [`VersionInfo`]. Usable in const context.
///
/// Be sure that you also call `initialize` in your build.rs.
#[macro_export]
macro_rules! make_version_info {
    // Must be the same file name as `ARTIFACT_FILE_NAME` in the helper.
    () => {{
        #[allow(dead_code)]
        mod __verstamp_generated {
            include!(concat!(env!("OUT_DIR"), "/version_info.rs"));
        }
        $crate::VersionInfo::new(
            __verstamp_generated::PACKAGE,
            __verstamp_generated::GIT_SHA1,
            __verstamp_generated::GIT_DESCRIPTION,
        )
    }};
}
