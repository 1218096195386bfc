//! Project manifests that carry the application version.
//!
//! Every manifest can be read for its current version, and rendered with a
//! new one. Rendering is pure; [`UpdatePlan::apply`] is the only place that
//! writes to disk, and it only runs once every manifest rendered cleanly.

pub mod gradle;
pub mod package_json;
pub mod typescript;

use crate::config::{ManifestConfig, ManifestKind};
use crate::domain::{TagPattern, Version};
use crate::error::{ReleaseBumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Values written into manifests for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    pub version: Version,
    /// Tag name, also the value stored in `ts_constant` manifests
    pub tag: String,
    /// Next platform build code, if any manifest tracks one
    pub build_code: Option<u32>,
}

/// A manifest file resolved against the project root
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub kind: ManifestKind,
    pub path: PathBuf,
    pub constant: String,
}

impl Manifest {
    pub fn from_config(project_dir: &Path, config: &ManifestConfig) -> Self {
        Manifest {
            kind: config.kind,
            path: project_dir.join(&config.path),
            constant: config.constant.clone(),
        }
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            ReleaseBumpError::manifest(format!("Cannot read '{}': {}", self.path.display(), e))
        })
    }

    /// Read the file and parse its current version.
    pub fn read_version(&self, pattern: &TagPattern) -> Result<Version> {
        let content = self.read()?;
        self.current_version(&content, pattern)
    }

    /// Parse the current version out of already-loaded contents.
    pub fn current_version(&self, content: &str, pattern: &TagPattern) -> Result<Version> {
        let raw = self
            .declared_value(content)?
            .ok_or_else(|| self.missing_field())?;
        self.parse_declared(&raw, pattern)
    }

    /// The raw version string the manifest declares, before parsing.
    pub fn declared_value(&self, content: &str) -> Result<Option<String>> {
        match self.kind {
            ManifestKind::TsConstant => typescript::read_constant(content, &self.constant),
            ManifestKind::PackageJson => package_json::read_version(content),
            ManifestKind::ExpoConfig => typescript::read_expo_version(content),
            ManifestKind::Gradle => gradle::read_version_name(content),
        }
    }

    fn parse_declared(&self, raw: &str, pattern: &TagPattern) -> Result<Version> {
        match self.kind {
            // Constants hold the tag form ("v1.2.3")
            ManifestKind::TsConstant => pattern.extract(raw).map_err(|e| {
                ReleaseBumpError::manifest(format!(
                    "{} in '{}' is not a release tag: {}",
                    self.constant,
                    self.path.display(),
                    e
                ))
            }),
            _ => Version::parse(raw),
        }
    }

    /// The platform build code in this manifest, if it tracks one.
    pub fn build_code(&self, content: &str) -> Result<Option<u32>> {
        match self.kind {
            ManifestKind::ExpoConfig => typescript::read_expo_version_code(content),
            ManifestKind::Gradle => gradle::read_version_code(content),
            ManifestKind::TsConstant | ManifestKind::PackageJson => Ok(None),
        }
    }

    /// Render the manifest with the release values applied.
    pub fn render(&self, content: &str, target: &ReleaseTarget) -> Result<String> {
        let version = target.version.to_string();
        let rendered = match self.kind {
            ManifestKind::TsConstant => {
                typescript::write_constant(content, &self.constant, &target.tag)?
            }
            ManifestKind::PackageJson => Some(package_json::write_version(content, &version)?),
            ManifestKind::ExpoConfig => {
                typescript::write_expo_config(content, &version, target.build_code)?
            }
            ManifestKind::Gradle => gradle::write_versions(content, &version, target.build_code)?,
        };

        rendered.ok_or_else(|| self.missing_field())
    }

    fn missing_field(&self) -> ReleaseBumpError {
        let field = match self.kind {
            ManifestKind::TsConstant => self.constant.as_str(),
            ManifestKind::PackageJson | ManifestKind::ExpoConfig => "version",
            ManifestKind::Gradle => "versionName",
        };
        ReleaseBumpError::manifest(format!(
            "No {} field found in {} manifest '{}'",
            field,
            self.kind.name(),
            self.path.display()
        ))
    }
}

pub(crate) fn parse_build_code(code: &str) -> Result<u32> {
    code.parse::<u32>().map_err(|e| {
        ReleaseBumpError::manifest(format!("versionCode {} is not a valid build code: {}", code, e))
    })
}

/// One file the release will write
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub path: PathBuf,
    /// Version string the file declared before the release
    pub declared: Option<String>,
    /// `declared` parsed, when it is a valid version
    pub previous_version: Option<Version>,
    pub contents: String,
}

/// Fully rendered manifest updates, not yet written
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub target: ReleaseTarget,
    pub writes: Vec<PlannedWrite>,
}

impl UpdatePlan {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.writes.iter().map(|w| w.path.clone()).collect()
    }

    /// Manifests whose current version differs from `expected`.
    pub fn out_of_sync(&self, expected: &Version) -> Vec<(PathBuf, Version)> {
        self.writes
            .iter()
            .filter_map(|w| match w.previous_version {
                Some(found) if found != *expected => Some((w.path.clone(), found)),
                _ => None,
            })
            .collect()
    }

    /// Manifests that declare a version string that does not parse.
    pub fn unreadable(&self) -> Vec<(PathBuf, String)> {
        self.writes
            .iter()
            .filter_map(|w| match (&w.declared, w.previous_version) {
                (Some(raw), None) => Some((w.path.clone(), raw.clone())),
                _ => None,
            })
            .collect()
    }

    /// Write every rendered manifest to disk.
    pub fn apply(&self) -> Result<Vec<PathBuf>> {
        for write in &self.writes {
            fs::write(&write.path, &write.contents).map_err(|e| {
                ReleaseBumpError::manifest(format!(
                    "Cannot write '{}': {}",
                    write.path.display(),
                    e
                ))
            })?;
        }
        Ok(self.paths())
    }
}

/// Read and render every manifest for `version`.
///
/// The next build code is the highest build code found across all
/// manifests plus one, so every platform manifest ends up agreeing.
pub fn plan_updates(
    manifests: &[Manifest],
    version: &Version,
    pattern: &TagPattern,
) -> Result<UpdatePlan> {
    let mut loaded = Vec::with_capacity(manifests.len());
    let mut highest_code: Option<u32> = None;

    for manifest in manifests {
        let content = manifest.read()?;
        if let Some(code) = manifest.build_code(&content)? {
            highest_code = Some(highest_code.map_or(code, |h| h.max(code)));
        }
        loaded.push((manifest, content));
    }

    let build_code = highest_code
        .map(|code| {
            code.checked_add(1).ok_or_else(|| {
                ReleaseBumpError::manifest(format!("Cannot increment build code past {}", code))
            })
        })
        .transpose()?;

    let target = ReleaseTarget {
        version: *version,
        tag: pattern.format(version),
        build_code,
    };

    let mut writes = Vec::with_capacity(loaded.len());
    for (manifest, content) in loaded {
        let declared = manifest.declared_value(&content)?;
        let previous_version = declared
            .as_deref()
            .and_then(|raw| manifest.parse_declared(raw, pattern).ok());
        writes.push(PlannedWrite {
            path: manifest.path.clone(),
            declared,
            previous_version,
            contents: manifest.render(&content, &target)?,
        });
    }

    Ok(UpdatePlan { target, writes })
}
