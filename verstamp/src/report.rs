//! Formats a [`VersionInfo`] for stdout.

use serde::Serialize;
use verstamp_build_info::VersionInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Three `key value` lines.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    package: &'a str,
    git_sha1: &'a str,
    git_description: &'a str,
    dirty: bool,
}

/// The historical three line report. "decription" is misspelled on purpose,
/// scripts parse this output.
pub fn text(info: &VersionInfo) -> String {
    format!(
        "package {}\ngit sha = {}\ngit decription = {}\n",
        info.package, info.git_sha1, info.git_description
    )
}

pub fn json(info: &VersionInfo) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(&JsonReport {
        package: info.package,
        git_sha1: info.git_sha1,
        git_description: info.git_description,
        dirty: info.is_dirty(),
    })?;
    out.push('\n');
    Ok(out)
}

pub fn render(info: &VersionInfo, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Text => Ok(text(info)),
        Format::Json => json(info),
    }
}
