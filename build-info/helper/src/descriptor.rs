use std::fmt;

use crate::{
    Error,
    git::{DescribeQuery, GitQuery},
};

/// Version number parsed out of a `git describe` description.
///
/// A component is `None` when the description has no digit run for it. It is
/// rendered blank rather than guessed as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    /// The working tree had uncommitted changes.
    pub dirty: bool,
}

impl Version {
    /// Takes the first three maximal runs of ASCII digits, left to right, as
    /// major, minor and patch. Further runs are ignored. A run too long for a
    /// `u64` still occupies its position but yields `None`.
    ///
    /// Any occurrence of `dirty` marks the version dirty.
    pub fn parse(description: &str) -> Self {
        let mut runs = description
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .map(|run| run.parse::<u64>().ok());
        let mut next = || runs.next().flatten();

        Self {
            major: next(),
            minor: next(),
            patch: next(),
            dirty: description.contains("dirty"),
        }
    }
}

/// `{major}.{minor}.{patch}`, with `-dirty` glued onto the patch component.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn component(f: &mut fmt::Formatter<'_>, c: Option<u64>) -> fmt::Result {
            match c {
                Some(n) => write!(f, "{n}"),
                None => Ok(()),
            }
        }

        component(f, self.major)?;
        f.write_str(".")?;
        component(f, self.minor)?;
        f.write_str(".")?;
        component(f, self.patch)?;
        if self.dirty {
            f.write_str("-dirty")?;
        }
        Ok(())
    }
}

/// Everything learned from the repository in one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDescriptor {
    /// Verbatim output of the tag based describe query.
    pub raw_description: String,
    /// Full commit hash, `-dirty` suffixed for a modified working tree.
    pub raw_hash: String,
    pub version: Version,
}

impl VersionDescriptor {
    pub fn new(raw_description: String, raw_hash: String) -> Self {
        let version = Version::parse(&raw_description);
        Self {
            raw_description,
            raw_hash,
            version,
        }
    }

    /// The dot joined package version string.
    pub fn package(&self) -> String {
        self.version.to_string()
    }
}

/// Runs both describe queries and parses the result.
pub fn describe_repository(
    git: &(impl GitQuery + ?Sized),
) -> Result<VersionDescriptor, Error> {
    let raw_description = git.describe(DescribeQuery::Description)?;
    let raw_hash = git.describe(DescribeQuery::FullHash)?;

    Ok(VersionDescriptor::new(raw_description, raw_hash))
}
