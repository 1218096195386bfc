use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions found while preparing a release.
/// These are reported to the user; the release can still go ahead.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A manifest declares a different version than the version source
    ManifestOutOfSync {
        path: PathBuf,
        found: String,
        expected: String,
    },
    /// A manifest declares a version string that does not parse
    ManifestVersionUnreadable { path: PathBuf, found: String },
    /// An existing tag already carries a version at or above the new one
    NotNewestVersion { new_tag: String, latest_tag: String },
    /// No manifest tracks a platform build code, so none is incremented
    NoBuildCode,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ManifestOutOfSync {
                path,
                found,
                expected,
            } => write!(
                f,
                "'{}' declares version {} but the version source is at {}",
                path.display(),
                found,
                expected
            ),
            BoundaryWarning::ManifestVersionUnreadable { path, found } => write!(
                f,
                "'{}' declares version '{}', which is not a valid version; it will be overwritten",
                path.display(),
                found
            ),
            BoundaryWarning::NotNewestVersion {
                new_tag,
                latest_tag,
            } => write!(
                f,
                "New tag '{}' is not newer than existing tag '{}'",
                new_tag, latest_tag
            ),
            BoundaryWarning::NoBuildCode => {
                write!(f, "No manifest has a versionCode; build code left unchanged")
            }
        }
    }
}
