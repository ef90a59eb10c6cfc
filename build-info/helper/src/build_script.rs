//! Decides what [`initialize()`](crate::initialize) embeds, without touching the
//! process environment.

use crate::{Error, GitQuery, VersionDescriptor, describe_repository};

/// Values supplied through `VERSTAMP_GIT_DESCRIBE` and `VERSTAMP_GIT_SHA1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub describe: Option<String>,
    pub sha1: Option<String>,
}

impl Overrides {
    /// With both values overridden git has nothing left to answer.
    pub fn is_complete(&self) -> bool {
        self.describe.is_some() && self.sha1.is_some()
    }
}

/// Combines overrides with what git reports, field by field.
///
/// `git` is `None` when no repository was found. The fields without an
/// override are then left empty rather than failing the build. Errors from git
/// itself, a missing executable included, are returned as is.
pub fn resolve_descriptor<G: GitQuery + ?Sized>(
    overrides: Overrides,
    git: Option<&G>,
) -> Result<VersionDescriptor, Error> {
    let Overrides { describe, sha1 } = overrides;
    if let (Some(describe), Some(sha1)) = (&describe, &sha1) {
        return Ok(VersionDescriptor::new(describe.clone(), sha1.clone()));
    }

    let Some(git) = git else {
        return Ok(VersionDescriptor::new(
            describe.unwrap_or_default(),
            sha1.unwrap_or_default(),
        ));
    };
    let queried = describe_repository(git)?;

    Ok(VersionDescriptor::new(
        describe.unwrap_or(queried.raw_description),
        sha1.unwrap_or(queried.raw_hash),
    ))
}
