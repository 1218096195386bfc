use crate::domain::BumpAction;
use crate::error::{ReleaseBumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Grammar accepted for version strings, without any tag prefix.
pub const VERSION_GRAMMAR: &str = r"\d+\.\d+\.\d+(?:-rc\.\d+)?";

/// Semantic version with an optional release-candidate number.
///
/// `rc == None` is a released version; `rc == Some(n)` is release candidate `n`
/// (always `n >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub rc: Option<u32>,
}

impl Version {
    /// Create a released version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            rc: None,
        }
    }

    /// Create release candidate `rc` of the given base version
    pub fn candidate(major: u32, minor: u32, patch: u32, rc: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            rc: Some(rc),
        }
    }

    pub fn is_release_candidate(&self) -> bool {
        self.rc.is_some()
    }

    /// Parse a bare version string (e.g. "1.2.3" or "1.2.3-rc.2").
    ///
    /// The whole input must match `major.minor.patch[-rc.N]`; no prefix,
    /// suffix or surrounding whitespace is accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-rc\.(\d+))?$")
            .map_err(|e| ReleaseBumpError::version(format!("Invalid version grammar: {}", e)))?;

        let captures = re.captures(input).ok_or_else(|| {
            ReleaseBumpError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z or X.Y.Z-rc.N",
                input
            ))
        })?;

        let segment = |index: usize, name: &str| -> Result<u32> {
            captures[index].parse::<u32>().map_err(|_| {
                ReleaseBumpError::version(format!(
                    "Invalid {} version: {}",
                    name, &captures[index]
                ))
            })
        };

        let major = segment(1, "major")?;
        let minor = segment(2, "minor")?;
        let patch = segment(3, "patch")?;
        let rc = match captures.get(4) {
            Some(_) => {
                let rc = segment(4, "release candidate")?;
                if rc == 0 {
                    return Err(ReleaseBumpError::version(format!(
                        "Invalid version '{}': release candidate numbers start at 1",
                        input
                    )));
                }
                Some(rc)
            }
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
            rc,
        })
    }

    /// Compute the version that follows this one for the given action.
    ///
    /// Bumping `major` or `minor` resets the lower segments to 0. The
    /// `as_release_candidate` flag turns a major/minor/patch bump into the
    /// first release candidate of the new base version.
    pub fn next(&self, action: BumpAction, as_release_candidate: bool) -> Result<Version> {
        if action.requires_candidate() {
            if as_release_candidate {
                return Err(ReleaseBumpError::validation(format!(
                    "asRC flag incompatible with rc/release action (got `--action {}` with `--as-rc`)",
                    action
                )));
            }
            if self.rc.is_none() {
                return Err(match action {
                    BumpAction::Rc => ReleaseBumpError::validation(format!(
                        "cannot increment rc on a released version ({})",
                        self
                    )),
                    _ => ReleaseBumpError::validation(format!(
                        "cannot release a non-candidate version ({})",
                        self
                    )),
                });
            }
        }

        let first_candidate = if as_release_candidate { Some(1) } else { None };

        let next = match action {
            BumpAction::Release => Version { rc: None, ..*self },
            BumpAction::Rc => Version {
                rc: self
                    .rc
                    .map(|rc| increment(rc, "release candidate"))
                    .transpose()?,
                ..*self
            },
            BumpAction::Major => Version {
                major: increment(self.major, "major")?,
                minor: 0,
                patch: 0,
                rc: first_candidate,
            },
            BumpAction::Minor => Version {
                major: self.major,
                minor: increment(self.minor, "minor")?,
                patch: 0,
                rc: first_candidate,
            },
            BumpAction::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: increment(self.patch, "patch")?,
                rc: first_candidate,
            },
        };

        Ok(next)
    }

    /// Convert to a `semver::Version` for precedence comparisons.
    pub fn to_semver(&self) -> Result<semver::Version> {
        semver::Version::parse(&self.to_string())
            .map_err(|e| ReleaseBumpError::version(format!("'{}' is not semver: {}", self, e)))
    }
}

fn increment(value: u32, segment: &str) -> Result<u32> {
    value.checked_add(1).ok_or_else(|| {
        ReleaseBumpError::version(format!("Cannot increment {} version past {}", segment, value))
    })
}

/// Compute the next release version.
///
/// Free-function form of [`Version::next`]; the current version is always
/// passed in explicitly.
pub fn next_version(
    current: &Version,
    action: BumpAction,
    as_release_candidate: bool,
) -> Result<Version> {
    current.next(action, as_release_candidate)
}

impl FromStr for Version {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(rc) = self.rc {
            write!(f, "-rc.{}", rc)?;
        }
        Ok(())
    }
}
