use crate::domain::TagPattern;
use crate::error::{ReleaseBumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "releasebump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains the version source, the manifests the new version is written to,
/// git settings, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_version_source")]
    pub version_source: ManifestConfig,

    #[serde(default = "default_manifests")]
    pub manifests: Vec<ManifestConfig>,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// File formats that carry the application version.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManifestKind {
    /// `export const APP_VERSION = "v1.2.3";` in a TypeScript module
    TsConstant,
    /// The `"version"` key of a `package.json`
    PackageJson,
    /// `version` / `versionCode` fields of an Expo `app.config.ts`
    ExpoConfig,
    /// `versionName` / `versionCode` of an Android `build.gradle`
    Gradle,
}

impl ManifestKind {
    pub fn name(&self) -> &'static str {
        match self {
            ManifestKind::TsConstant => "ts_constant",
            ManifestKind::PackageJson => "package_json",
            ManifestKind::ExpoConfig => "expo_config",
            ManifestKind::Gradle => "gradle",
        }
    }
}

/// A single manifest entry: its format and its path relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    pub kind: ManifestKind,

    pub path: PathBuf,

    /// Constant name for `ts_constant` manifests
    #[serde(default = "default_constant_name")]
    pub constant: String,
}

impl ManifestConfig {
    pub fn new(kind: ManifestKind, path: impl Into<PathBuf>) -> Self {
        ManifestConfig {
            kind,
            path: path.into(),
            constant: default_constant_name(),
        }
    }
}

fn default_constant_name() -> String {
    "APP_VERSION".to_string()
}

fn default_version_source() -> ManifestConfig {
    ManifestConfig::new(ManifestKind::TsConstant, "src/constants/Config.ts")
}

/// Returns the manifests rewritten on every release besides the version source.
fn default_manifests() -> Vec<ManifestConfig> {
    vec![
        ManifestConfig::new(ManifestKind::PackageJson, "package.json"),
        ManifestConfig::new(ManifestKind::ExpoConfig, "app.config.ts"),
        ManifestConfig::new(ManifestKind::Gradle, "android/app/build.gradle"),
    ]
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "release: {tag}".to_string()
}

/// Author/committer used for the release commit instead of the repository identity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

/// Configuration for the git side of a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Commit message template; `{tag}` and `{version}` are substituted
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default)]
    pub author: Option<CommitIdentity>,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            author: None,
        }
    }
}

impl GitConfig {
    pub fn tag_pattern(&self) -> TagPattern {
        TagPattern::new(self.tag_pattern.clone())
    }

    /// Render the commit message for a release.
    pub fn render_commit_message(&self, tag: &str, version: &str) -> String {
        self.commit_message
            .replace("{tag}", tag)
            .replace("{version}", version)
    }
}

fn default_true() -> bool {
    true
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Ask before releasing from the current branch
    #[serde(default = "default_true")]
    pub confirm_branch: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            confirm_branch: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_source: default_version_source(),
            manifests: default_manifests(),
            git: GitConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never produce a release.
    pub fn validate(&self) -> Result<()> {
        self.git.tag_pattern().validate()?;

        if self.git.remote.trim().is_empty() {
            return Err(ReleaseBumpError::config("git.remote must not be empty"));
        }

        for manifest in std::iter::once(&self.version_source).chain(&self.manifests) {
            if manifest.path.as_os_str().is_empty() {
                return Err(ReleaseBumpError::config(format!(
                    "{} manifest has an empty path",
                    manifest.kind.name()
                )));
            }
            if manifest.kind == ManifestKind::TsConstant && manifest.constant.trim().is_empty() {
                return Err(ReleaseBumpError::config(format!(
                    "ts_constant manifest '{}' needs a constant name",
                    manifest.path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in the project directory
/// 3. `.releasebump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `project_dir` - Directory the release is made from
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            ReleaseBumpError::config(format!("Cannot read '{}': {}", path.display(), e))
        })?
    } else if project_dir.join(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
