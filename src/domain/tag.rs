use crate::domain::version::{Version, VERSION_GRAMMAR};
use crate::error::{ReleaseBumpError, Result};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Check that the pattern has exactly one `{version}` placeholder
    pub fn validate(&self) -> Result<()> {
        match self.pattern.matches(PLACEHOLDER).count() {
            1 => Ok(()),
            0 => Err(ReleaseBumpError::tag(format!(
                "Pattern '{}' must contain a {{version}} placeholder",
                self.pattern
            ))),
            _ => Err(ReleaseBumpError::tag(format!(
                "Pattern '{}' should have exactly one {{version}} placeholder",
                self.pattern
            ))),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3-rc.1 -> "v1.2.3-rc.1"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }

    /// Extract the version from a tag-shaped string (e.g., "v1.2.3" -> 1.2.3)
    pub fn extract(&self, tag: &str) -> Result<Version> {
        self.validate()?;
        let (prefix, suffix) = self
            .pattern
            .split_once(PLACEHOLDER)
            .unwrap_or((self.pattern.as_str(), ""));

        let version_part = tag
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .ok_or_else(|| {
                ReleaseBumpError::tag(format!(
                    "Tag '{}' does not match pattern '{}'",
                    tag, self.pattern
                ))
            })?;

        Version::parse(version_part)
    }

    /// Validate if a tag matches this pattern
    pub fn matches(&self, tag: &str) -> bool {
        if self.validate().is_err() {
            return false;
        }

        // Escape everything, then swap the escaped placeholder for the version grammar
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(r"\{version\}", VERSION_GRAMMAR);

        match regex::Regex::new(&format!("^{}$", regex_pattern)) {
            Ok(re) => re.is_match(tag),
            Err(_) => false,
        }
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v{version}")
    }
}
