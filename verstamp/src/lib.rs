pub mod generate;
pub mod report;

use verstamp_build_info::{VersionInfo, make_version_info};

/// Version info of this very binary.
pub const VERSION_INFO: VersionInfo = make_version_info!();
