use crate::error::{ReleaseBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// How the release version is bumped.
///
/// `Major`, `Minor` and `Patch` start a new base version (optionally as the
/// first release candidate). `Rc` moves to the next release candidate of the
/// same base version and `Release` drops the candidate marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpAction {
    Major,
    Minor,
    Patch,
    Rc,
    Release,
}

impl BumpAction {
    pub const ALL: [BumpAction; 5] = [
        BumpAction::Major,
        BumpAction::Minor,
        BumpAction::Patch,
        BumpAction::Rc,
        BumpAction::Release,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpAction::Major => "major",
            BumpAction::Minor => "minor",
            BumpAction::Patch => "patch",
            BumpAction::Rc => "rc",
            BumpAction::Release => "release",
        }
    }

    /// Whether this action only operates on an existing release candidate.
    pub fn requires_candidate(&self) -> bool {
        matches!(self, BumpAction::Rc | BumpAction::Release)
    }
}

impl FromStr for BumpAction {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpAction::Major),
            "minor" => Ok(BumpAction::Minor),
            "patch" => Ok(BumpAction::Patch),
            "rc" => Ok(BumpAction::Rc),
            "release" => Ok(BumpAction::Release),
            other => Err(ReleaseBumpError::validation(format!(
                "Unknown bump action '{}': expected one of major, minor, patch, rc, release",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
