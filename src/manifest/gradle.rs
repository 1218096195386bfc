//! Android `build.gradle` / `build.gradle.kts` version fields.

use crate::error::{ReleaseBumpError, Result};
use regex::{Captures, Regex};

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ReleaseBumpError::manifest(format!("Invalid pattern: {}", e)))
}

// Groovy writes `versionName "1.0"`, the Kotlin DSL `versionName = "1.0"`
fn version_name_regex() -> Result<Regex> {
    compile(r#"(?m)^(?P<head>[ \t]*versionName(?:[ \t]*=[ \t]*|[ \t]+))["'](?P<value>[^"'\n]*)["'](?P<tail>[^\n]*)$"#)
}

fn version_code_regex() -> Result<Regex> {
    compile(r"(?m)^(?P<head>[ \t]*versionCode(?:[ \t]*=[ \t]*|[ \t]+))(?P<code>\d+)(?P<tail>[^\n]*)$")
}

pub fn read_version_name(content: &str) -> Result<Option<String>> {
    let re = version_name_regex()?;
    Ok(re.captures(content).map(|caps| caps["value"].to_string()))
}

pub fn read_version_code(content: &str) -> Result<Option<u32>> {
    let re = version_code_regex()?;
    re.captures(content)
        .map(|caps| super::parse_build_code(&caps["code"]))
        .transpose()
}

/// Rewrites `versionName` and, when a build code is given, `versionCode`.
///
/// Returns `None` when the file declares no `versionName`.
pub fn write_versions(
    content: &str,
    version: &str,
    build_code: Option<u32>,
) -> Result<Option<String>> {
    let name_re = version_name_regex()?;
    if !name_re.is_match(content) {
        return Ok(None);
    }

    let rendered = name_re.replace_all(content, |caps: &Captures| {
        format!("{}\"{}\"{}", &caps["head"], version, &caps["tail"])
    });

    let rendered = match build_code {
        Some(code) => version_code_regex()?
            .replace_all(&rendered, |caps: &Captures| {
                format!("{}{}{}", &caps["head"], code, &caps["tail"])
            })
            .into_owned(),
        None => rendered.into_owned(),
    };

    Ok(Some(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROOVY: &str = r#"android {
    namespace "com.example.music"
    defaultConfig {
        applicationId "com.example.music"
        minSdkVersion rootProject.ext.minSdkVersion
        versionCode 41
        versionName "1.2.3"
    }
}
"#;

    const KOTLIN: &str = r#"android {
    defaultConfig {
        versionCode = 7
        versionName = "0.4.0-rc.2"
    }
}
"#;

    #[test]
    fn test_read_groovy() {
        assert_eq!(read_version_name(GROOVY).unwrap(), Some("1.2.3".to_string()));
        assert_eq!(read_version_code(GROOVY).unwrap(), Some(41));
    }

    #[test]
    fn test_read_kotlin_dsl() {
        assert_eq!(
            read_version_name(KOTLIN).unwrap(),
            Some("0.4.0-rc.2".to_string())
        );
        assert_eq!(read_version_code(KOTLIN).unwrap(), Some(7));
    }

    #[test]
    fn test_write_groovy() {
        let rendered = write_versions(GROOVY, "1.3.0", Some(42)).unwrap().unwrap();
        assert!(rendered.contains("        versionCode 42\n"));
        assert!(rendered.contains("        versionName \"1.3.0\"\n"));
        assert!(rendered.contains("minSdkVersion rootProject.ext.minSdkVersion"));
    }

    #[test]
    fn test_write_kotlin_dsl() {
        let rendered = write_versions(KOTLIN, "0.4.0", Some(8)).unwrap().unwrap();
        assert!(rendered.contains("versionCode = 8\n"));
        assert!(rendered.contains("versionName = \"0.4.0\"\n"));
    }

    #[test]
    fn test_oversized_version_code_is_an_error() {
        let content = "defaultConfig {\n    versionCode 99999999999\n}\n";
        let err = read_version_code(content).unwrap_err();
        assert!(err.to_string().contains("99999999999"));
    }

    #[test]
    fn test_write_missing_version_name() {
        assert!(write_versions("android {}\n", "1.0.0", Some(1))
            .unwrap()
            .is_none());
    }
}
